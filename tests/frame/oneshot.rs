// Integration tests for one-shot `.bdz` frame compression and decompression.

use bdelta::endian::read_u32_be;
use bdelta::frame::types::{CHECKSUM_SIZE, CHUNK_STORED_FLAG, CH_SIZE, HEADER_SIZE};
use bdelta::frame::{
    compress_frame, compress_frame_bound, decompress_frame, frame_info, FrameError, FramePrefs,
};

fn floats(n: usize) -> Vec<u8> {
    (0..n).flat_map(|i| (1000.0f32 + (i as f32) * 0.25).to_le_bytes()).collect()
}

fn prefs(chunk_size: usize, elem_size: usize) -> FramePrefs {
    FramePrefs { chunk_size, elem_size }
}

// ─────────────────────────────────────────────────────────────────────────────
// Round trips
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn round_trip_across_chunk_sizes() {
    let src = floats(20_000);
    for chunk in [1024usize, 4000, 65_536, 1 << 20] {
        let frame = compress_frame(&src, &prefs(chunk, 0)).unwrap();
        assert!(frame.len() <= compress_frame_bound(src.len(), chunk));
        let h = frame_info(&frame).unwrap();
        assert_eq!(h.content_size, src.len() as u64);
        assert_eq!(h.chunk_count as usize, src.len().div_ceil(chunk));
        assert_eq!(decompress_frame(&frame).unwrap(), src, "chunk {}", chunk);
    }
}

#[test]
fn shuffling_helps_typed_data() {
    let src = floats(50_000);
    let plain = compress_frame(&src, &prefs(1 << 16, 0)).unwrap();
    let shuffled = compress_frame(&src, &prefs(1 << 16, 4)).unwrap();
    assert!(shuffled.len() < plain.len(), "{} vs {}", shuffled.len(), plain.len());
    assert_eq!(decompress_frame(&shuffled).unwrap(), src);
}

#[test]
fn odd_element_sizes_round_trip() {
    let src: Vec<u8> = (0..10_007u32).map(|i| (i % 251) as u8).collect();
    for elem in [1usize, 3, 5, 12, 100] {
        let frame = compress_frame(&src, &prefs(2048, elem)).unwrap();
        assert_eq!(decompress_frame(&frame).unwrap(), src, "elem {}", elem);
    }
}

#[test]
fn chunks_are_laid_out_in_order() {
    let src = floats(4096);
    let frame = compress_frame(&src, &prefs(4096, 0)).unwrap();
    let mut pos = HEADER_SIZE;
    let mut total = 0;
    for _ in 0..4 {
        let raw = read_u32_be(&frame[pos..]);
        let len = (raw & !CHUNK_STORED_FLAG) as usize;
        pos += CH_SIZE + len;
        total += 1;
    }
    assert_eq!(total, 4);
    assert_eq!(pos + CHECKSUM_SIZE, frame.len());
}

// ─────────────────────────────────────────────────────────────────────────────
// Damage
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn corruption_never_yields_wrong_content() {
    let src = floats(10_000);
    let frame = compress_frame(&src, &prefs(8192, 4)).unwrap();
    for i in (HEADER_SIZE..frame.len()).step_by(97) {
        let mut bad = frame.clone();
        bad[i] ^= 0x10;
        if let Ok(out) = decompress_frame(&bad) {
            assert_eq!(out, src, "flip at {}", i);
        }
    }

    let mut bad = frame.clone();
    let last = bad.len() - 1;
    bad[last] ^= 0x10;
    assert_eq!(decompress_frame(&bad), Err(FrameError::ContentChecksumInvalid));
}

#[test]
fn forged_content_size_is_refused_before_allocation() {
    let src = vec![0u8; 4096];
    let mut frame = compress_frame(&src, &prefs(4096, 0)).unwrap();
    // claim a single chunk of 1 GiB carried by a few bytes of payload
    frame[9..13].copy_from_slice(&(1u32 << 30).to_be_bytes());
    frame[13..21].copy_from_slice(&(1u64 << 30).to_be_bytes());
    assert_eq!(decompress_frame(&frame), Err(FrameError::ChunkSizeWrong));
}

#[test]
fn short_frames_are_rejected() {
    let frame = compress_frame(b"abcdefgh", &FramePrefs::default()).unwrap();
    for cut in 0..frame.len() {
        assert!(decompress_frame(&frame[..cut]).is_err(), "cut {}", cut);
    }
}
