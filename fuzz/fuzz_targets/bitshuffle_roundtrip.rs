#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }
    let elem_size = (data[0] as usize % 16) + 1;
    let body = &data[1..];
    let size = body.len() / elem_size;
    let nbytes = size * elem_size;

    let mut shuffled = vec![0u8; nbytes];
    let mut restored = vec![0u8; nbytes];
    bdelta::bitshuffle(&body[..nbytes], &mut shuffled, size, elem_size, 0).expect("bitshuffle");
    bdelta::bitunshuffle(&shuffled, &mut restored, size, elem_size, 0).expect("bitunshuffle");
    assert_eq!(restored, &body[..nbytes]);
});
