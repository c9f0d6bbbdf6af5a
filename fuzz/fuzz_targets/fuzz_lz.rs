#![no_main]

use libfuzzer_sys::fuzz_target;
use sarx::compression::{Lz77, decode_factors, factorise};

fuzz_target!(|data: &[u8]| {
    if let Ok(factors) = factorise(data) {
        assert_eq!(decode_factors(&factors).unwrap(), data);
    }

    let mut encoder = Lz77::new();
    if encoder.encode(data, 64).is_ok() {
        assert_eq!(encoder.decode().unwrap(), data);
    }
});
