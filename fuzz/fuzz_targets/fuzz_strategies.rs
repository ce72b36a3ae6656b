#![no_main]
use libfuzzer_sys::fuzz_target;
use jsonmap::{Options, WriteStrategy, decode_from_slice, encode_to_string};

fuzz_target!(|data: &[u8]| {
    let Ok(value) = decode_from_slice(data, &Options::default()) else {
        return;
    };
    let direct_opts = Options { strategy: WriteStrategy::DirectWrite, ..Options::default() };
    let recursive_opts = Options { strategy: WriteStrategy::RecursiveGeneric, ..Options::default() };

    let (direct, recursive) = match (
        encode_to_string(&value, &direct_opts),
        encode_to_string(&value, &recursive_opts),
    ) {
        (Ok(d), Ok(r)) => (d, r),
        // Offsets can shift a timestamp out of the four-digit year range
        (Err(d), Err(r)) => {
            assert_eq!(d.to_string(), r.to_string(), "strategies fail differently");
            return;
        }
        (d, r) => panic!("strategies disagree on failure: {:?} vs {:?}", d, r),
    };
    assert_eq!(direct, recursive, "strategies disagree");

    let again = decode_from_slice(direct.as_bytes(), &Options::default()).expect("output decodes");
    let second = encode_to_string(&again, &direct_opts).expect("re-encode");
    assert_eq!(direct, second, "encoding is not a fixed point");
});
