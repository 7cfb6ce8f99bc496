#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes: errors are fine, panics and out-of-bounds writes are not.
    // The first byte picks the output capacity so short buffers get exercised too.
    let cap = data.first().map_or(0, |&b| b as usize * 64);
    let mut out = vec![0u8; cap];
    if let Ok(n) = bdelta::decompress(data, &mut out) {
        assert!(n <= cap);
    }
});
