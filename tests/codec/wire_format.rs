// Byte-exact checks of the token stream produced by `bdelta::codec::compress`.
//
// Each vector pins one encoding rule: literal run splitting, the extended
// length class, near distances, the far-distance sentinel, and the rejected
// distance of exactly 8192.

use bdelta::codec::{compress, compress_bound, decompress, MAX_DISTANCE};

fn compress_vec(src: &[u8]) -> Vec<u8> {
    let mut dst = vec![0u8; compress_bound(src.len())];
    let n = compress(src, &mut dst).expect("compress");
    dst.truncate(n);
    dst
}

fn decompress_vec(src: &[u8], size: usize) -> Vec<u8> {
    let mut dst = vec![0u8; size];
    let n = decompress(src, &mut dst).expect("decompress");
    dst.truncate(n);
    dst
}

// ─────────────────────────────────────────────────────────────────────────────
// Literal runs
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn short_input_has_no_version_marker() {
    assert_eq!(compress_vec(b"ab"), vec![1, b'a', b'b']);
    assert_eq!(compress_vec(b"xyz"), vec![2, b'x', b'y', b'z']);
}

#[test]
fn literal_runs_split_at_32_bytes() {
    let src: Vec<u8> = (0..40u8).chain(0..40u8).collect();
    let out = compress_vec(&src);

    let mut expected = vec![31 | 0x20];
    expected.extend(0..32u8);
    expected.push(7);
    expected.extend(32..40u8);
    // 37-byte match at distance 40, then the last three bytes as literals
    expected.extend_from_slice(&[0xE0, 28, 39]);
    expected.extend_from_slice(&[2, 37, 38, 39]);
    assert_eq!(out, expected);
    assert_eq!(decompress_vec(&out, src.len()), src);
}

// ─────────────────────────────────────────────────────────────────────────────
// Matches
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn near_match_with_length_extension() {
    let src = b"abcdefgh".repeat(4);
    let out = compress_vec(&src);
    assert_eq!(
        out,
        vec![7 | 0x20, b'a', b'b', b'c', b'd', b'e', b'f', b'g', b'h', 0xE0, 12, 7, 2, b'f', b'g', b'h']
    );
    assert_eq!(decompress_vec(&out, src.len()), src);
}

#[test]
fn long_run_uses_distance_one() {
    let src = [0xAAu8; 100];
    let out = compress_vec(&src);
    assert_eq!(out, vec![0x21, 0xAA, 0xAA, 0xE0, 86, 0, 2, 0xAA, 0xAA, 0xAA]);
    assert_eq!(decompress_vec(&out, src.len()), src);
}

#[test]
fn far_match_uses_sentinel_and_explicit_distance() {
    let mut src = b"headQZXWV".to_vec();
    src.extend(std::iter::repeat(0u8).take(9000));
    src.extend_from_slice(b"QZXWV");
    src.extend_from_slice(b"tail-of-the-input");
    let out = compress_vec(&src);

    // 5-byte match at distance 9005: class 3, high bits 31, sentinel 255,
    // then 9005 - 1 - 8192 = 812 as two bytes.
    let far = [3 << 5 | 31, 255, 0x03, 0x2C];
    assert!(out.windows(4).any(|w| w == far), "far token missing: {:?}", out);
    assert_eq!(out.len(), 71);
    assert_eq!(decompress_vec(&out, src.len()), src);
}

#[test]
fn distance_of_exactly_8192_is_never_emitted() {
    let mut src = b"abMNOPQ".to_vec();
    src.extend(std::iter::repeat(0u8).take(MAX_DISTANCE - 5));
    src.extend_from_slice(b"MNOPQ");
    src.extend_from_slice(&[b'z'; 16]);
    assert_eq!(src[2..7], src[2 + MAX_DISTANCE..7 + MAX_DISTANCE]);

    let out = compress_vec(&src);
    // Both copies of MNOPQ go out as literals.
    assert_eq!(out.windows(5).filter(|w| *w == b"MNOPQ").count(), 2);
    assert_eq!(decompress_vec(&out, src.len()), src);
}

#[test]
fn first_byte_carries_version_marker() {
    for len in 4..64usize {
        let src: Vec<u8> = (0..len as u8).collect();
        let out = compress_vec(&src);
        assert_eq!(out[0] & 0x20, 0x20, "len {}", len);
    }
}
