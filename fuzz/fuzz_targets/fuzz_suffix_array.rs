#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use sarx::index::ReverseSuffixArray;

#[derive(Arbitrary, Debug)]
struct Input {
    text: Vec<u8>,
    prefix: Vec<u8>,
    pattern: Vec<u8>,
}

fuzz_target!(|input: Input| {
    let Ok(mut rsa) = ReverseSuffixArray::new(&input.text) else {
        return;
    };

    // Growing on the left must give the same array as a fresh build
    rsa.insert_left(&input.prefix);
    let combined = [input.prefix.as_slice(), input.text.as_slice()].concat();
    let rebuilt = ReverseSuffixArray::new(&combined).unwrap();
    assert_eq!(rsa, rebuilt);

    if let Some(pos) = rsa.search(&input.pattern) {
        assert!(combined[pos..].starts_with(&input.pattern));
    }
});
