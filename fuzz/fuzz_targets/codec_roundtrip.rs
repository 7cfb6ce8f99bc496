#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut compressed = vec![0u8; bdelta::compress_bound(data.len())];
    let n = bdelta::compress(data, &mut compressed).expect("compress_bound must always suffice");

    let mut recovered = vec![0u8; data.len()];
    let m = bdelta::decompress(&compressed[..n], &mut recovered)
        .expect("a freshly compressed stream must decode");

    assert_eq!(m, data.len());
    assert_eq!(recovered, data, "round-trip mismatch after {} compressed bytes", n);
});
