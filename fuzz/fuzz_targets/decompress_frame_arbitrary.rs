#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Err results are expected; what we verify is no panics.
    let _ = bdelta::frame::frame_info(data);
    let _ = bdelta::frame::decompress_frame(data);
});
