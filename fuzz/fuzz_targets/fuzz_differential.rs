#![no_main]
use libfuzzer_sys::fuzz_target;
use jsonmap::{DecodeError, Error, Options, decode_from_slice};

fuzz_target!(|data: &[u8]| {
    let Ok(json) = serde_json::from_slice::<serde_json::Value>(data) else {
        return;
    };
    // Anything serde_json accepts must infer, unless a number or the nesting is out of range
    match decode_from_slice(data, &Options::default()) {
        Ok(_) => {}
        Err(Error::Decode(DecodeError::NumberOutOfRange { .. } | DecodeError::DepthLimitExceeded { .. })) => {}
        Err(e) => panic!(
            "Differential fuzzing: rejected input serde_json accepts ({})\nInput: {:?}",
            e, json
        ),
    }
});
