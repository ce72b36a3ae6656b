#![no_main]
use libfuzzer_sys::fuzz_target;
use jsonmap::{Options, decode_from_slice, decode_mapping_from_slice};

fuzz_target!(|data: &[u8]| {
    let opts = Options::default();
    let _ = decode_from_slice(data, &opts);
    let _ = decode_mapping_from_slice(data, &opts);
});
