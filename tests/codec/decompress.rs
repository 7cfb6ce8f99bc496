// Integration tests for `bdelta::codec::decompress`: hand-built streams and
// malformed input.

use bdelta::codec::{compress, compress_bound, decompress, DecompressError};

fn compressed(src: &[u8]) -> Vec<u8> {
    let mut dst = vec![0u8; compress_bound(src.len())];
    let n = compress(src, &mut dst).unwrap();
    dst.truncate(n);
    dst
}

fn sample() -> Vec<u8> {
    let mut v = Vec::new();
    for i in 0..200u32 {
        v.extend_from_slice(format!("record {:04} value {}\n", i % 17, i * 3).as_bytes());
    }
    v
}

// ─────────────────────────────────────────────────────────────────────────────
// Hand-built streams
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn version_marker_is_ignored_on_first_byte() {
    let mut dst = [0u8; 4];
    assert_eq!(decompress(&[0x20 | 3, 1, 2, 3, 4], &mut dst), Ok(4));
    assert_eq!(dst, [1, 2, 3, 4]);
}

#[test]
fn near_match_replays_from_history() {
    // "abc" then a 3-byte match at distance 3, then a 4-byte match at distance 1
    let stream = [2, b'a', b'b', b'c', 1 << 5, 2, 2 << 5, 0];
    let mut dst = [0u8; 10];
    assert_eq!(decompress(&stream, &mut dst), Ok(10));
    assert_eq!(&dst, b"abcabccccc");
}

#[test]
fn overlapping_copy_repeats_a_pattern() {
    // 12-byte match at distance 2 over "xy"
    let stream = [1, b'x', b'y', 7 << 5, 3, 1];
    let mut dst = [0u8; 14];
    assert_eq!(decompress(&stream, &mut dst), Ok(14));
    assert_eq!(&dst, b"xyxyxyxyxyxyxy");
}

#[test]
fn far_distance_is_biased_by_8192() {
    let mut src = vec![0u8; 9000];
    src[..5].copy_from_slice(b"hello");
    // literal "hello", run of zeros, then a far 5-byte match back to offset 0
    let mut stream = vec![4, b'h', b'e', b'l', b'l', b'o'];
    stream.extend_from_slice(&[0, 0]); // one literal zero
    // run of 8994 zeros: class 7, extension 8994 - 9 = 8985 = 35*255 + 60
    stream.push(7 << 5);
    stream.extend(std::iter::repeat(255).take(35));
    stream.extend_from_slice(&[60, 0]);
    // back = 9000 - 1 = 8999 = 807 + 8192
    stream.extend_from_slice(&[3 << 5 | 31, 255, 0x03, 0x27]);
    src.extend_from_slice(b"hello");

    let mut dst = vec![0u8; src.len()];
    assert_eq!(decompress(&stream, &mut dst), Ok(src.len()));
    assert_eq!(dst, src);
}

// ─────────────────────────────────────────────────────────────────────────────
// Malformed input
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn reference_before_start_is_rejected() {
    let mut dst = [0u8; 16];
    assert_eq!(decompress(&[0, b'a', 1 << 5, 9], &mut dst), Err(DecompressError::MalformedInput));
}

#[test]
fn truncated_tokens_are_rejected() {
    let mut dst = [0u8; 64];
    // literal run promises 5 bytes, has 2
    assert!(decompress(&[4, 1, 2], &mut dst).is_err());
    // extended length with no terminator
    assert!(decompress(&[0, b'a', 7 << 5, 255], &mut dst).is_err());
    // match control with no distance byte
    assert!(decompress(&[0, b'a', 1 << 5], &mut dst).is_err());
    // far sentinel with one distance byte
    assert!(decompress(&[0, b'a', 1 << 5 | 31, 255, 0], &mut dst).is_err());
}

#[test]
fn output_capacity_is_enforced() {
    let src = sample();
    let comp = compressed(&src);
    let mut small = vec![0u8; src.len() - 1];
    assert_eq!(decompress(&comp, &mut small), Err(DecompressError::MalformedInput));
    let mut exact = vec![0u8; src.len()];
    assert_eq!(decompress(&comp, &mut exact), Ok(src.len()));
}

#[test]
fn every_truncation_is_handled() {
    let src = sample();
    let comp = compressed(&src);
    let mut dst = vec![0u8; src.len()];
    for cut in 0..comp.len() {
        if let Ok(n) = decompress(&comp[..cut], &mut dst) {
            assert!(n <= src.len());
            assert_eq!(dst[..n], src[..n]);
        }
    }
}

#[test]
fn corrupted_streams_never_panic() {
    let src = sample();
    let comp = compressed(&src);
    let mut dst = vec![0u8; src.len() * 2];
    for i in 0..comp.len() {
        for flip in [0x01u8, 0x20, 0x80, 0xFF] {
            let mut bad = comp.clone();
            bad[i] ^= flip;
            let _ = decompress(&bad, &mut dst);
        }
    }
}

#[test]
fn arbitrary_bytes_never_panic() {
    let mut x: u64 = 0x9E37_79B9_7F4A_7C15;
    let mut dst = vec![0u8; 4096];
    for len in 0..200usize {
        let junk: Vec<u8> = (0..len)
            .map(|_| {
                x = x.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
                (x >> 56) as u8
            })
            .collect();
        let _ = decompress(&junk, &mut dst);
    }
}
