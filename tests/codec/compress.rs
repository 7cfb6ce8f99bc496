// Integration tests for `bdelta::codec::compress` and `compress_bound`.

use bdelta::codec::{compress, compress_bound, decompress, CompressError};

/// Deterministic xorshift bytes; effectively incompressible.
fn noise(len: usize, seed: u32) -> Vec<u8> {
    let mut x = seed | 1;
    (0..len)
        .map(|_| {
            x ^= x << 13;
            x ^= x >> 17;
            x ^= x << 5;
            (x >> 7) as u8
        })
        .collect()
}

fn text(len: usize) -> Vec<u8> {
    b"the quick brown fox jumps over the lazy dog; "
        .iter()
        .copied()
        .cycle()
        .take(len)
        .collect()
}

fn round_trip(src: &[u8]) -> usize {
    let mut comp = vec![0u8; compress_bound(src.len())];
    let n = compress(src, &mut comp).expect("compress");
    let mut back = vec![0u8; src.len()];
    let m = decompress(&comp[..n], &mut back).expect("decompress");
    assert_eq!(m, src.len());
    assert_eq!(back, src);
    n
}

// ─────────────────────────────────────────────────────────────────────────────
// Bound
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn bound_formula() {
    assert_eq!(compress_bound(0), 4);
    assert_eq!(compress_bound(31), 35);
    assert_eq!(compress_bound(32), 37);
    assert_eq!(compress_bound(1 << 20), (1 << 20) + (1 << 15) + 4);
}

#[test]
fn output_never_exceeds_bound() {
    for len in [4usize, 5, 13, 31, 32, 33, 100, 1000, 8191, 8192, 8193, 70_000] {
        let src = noise(len, len as u32);
        let n = round_trip(&src);
        assert!(n <= compress_bound(len), "len {}: {} > {}", len, n, compress_bound(len));
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Round trips
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn every_small_length_round_trips() {
    for len in 0..300usize {
        round_trip(&text(len));
        round_trip(&noise(len, 7));
    }
}

#[test]
fn repetitive_data_shrinks() {
    let src = text(64 * 1024);
    let n = round_trip(&src);
    assert!(n < src.len() / 10, "{} bytes", n);
}

#[test]
fn mixed_runs_and_far_repeats_round_trip() {
    let block = noise(3000, 99);
    let mut src = Vec::new();
    for i in 0..30u8 {
        src.extend_from_slice(&block);
        src.extend(std::iter::repeat(i).take(i as usize * 37));
        src.extend_from_slice(&noise(5000 + i as usize, i as u32));
    }
    round_trip(&src);
}

#[test]
fn input_past_far_window_round_trips() {
    // Repeats at distances beyond 65535 + 8192 must not be referenced.
    let block = noise(80_000, 3);
    let mut src = block.clone();
    src.extend_from_slice(&block);
    round_trip(&src);
}

// ─────────────────────────────────────────────────────────────────────────────
// Capacity
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn too_small_output_is_an_error() {
    let src = noise(500, 1);
    for cap in [0usize, 1, 10, 499] {
        let mut dst = vec![0u8; cap];
        assert_eq!(compress(&src, &mut dst), Err(CompressError::OutputTooSmall), "cap {}", cap);
    }
}

#[test]
fn exact_capacity_is_enough() {
    let src = text(1000);
    let mut big = vec![0u8; compress_bound(src.len())];
    let n = compress(&src, &mut big).unwrap();
    let mut exact = vec![0u8; n];
    assert_eq!(compress(&src, &mut exact), Ok(n));
    assert_eq!(exact, big[..n]);
}

#[test]
fn compression_is_deterministic() {
    let src = text(10_000);
    let mut a = vec![0u8; compress_bound(src.len())];
    let mut b = vec![0xFFu8; compress_bound(src.len())];
    let na = compress(&src, &mut a).unwrap();
    let nb = compress(&src, &mut b).unwrap();
    assert_eq!(a[..na], b[..nb]);
}
