//! E2E: bitshuffle as a preconditioner for the codec.
//!
//! Typed arrays are shuffled, compressed, decompressed and unshuffled again,
//! the same pipeline the `.bdz` frame applies per chunk.

use bdelta::{bitshuffle, bitunshuffle, compress, compress_bound, decompress, default_block_size};

fn pipeline(src: &[u8], elem_size: usize, block_size: usize) -> usize {
    let size = src.len() / elem_size;
    let mut shuffled = vec![0u8; src.len()];
    assert_eq!(bitshuffle(src, &mut shuffled, size, elem_size, block_size), Ok(size * elem_size));
    shuffled[size * elem_size..].copy_from_slice(&src[size * elem_size..]);

    let mut comp = vec![0u8; compress_bound(shuffled.len())];
    let n = compress(&shuffled, &mut comp).unwrap();

    let mut unpacked = vec![0u8; src.len()];
    assert_eq!(decompress(&comp[..n], &mut unpacked), Ok(src.len()));
    assert_eq!(unpacked, shuffled);

    let mut back = vec![0u8; src.len()];
    bitunshuffle(&unpacked, &mut back, size, elem_size, block_size).unwrap();
    back[size * elem_size..].copy_from_slice(&unpacked[size * elem_size..]);
    assert_eq!(back, src);
    n
}

fn compressed_len(src: &[u8]) -> usize {
    let mut comp = vec![0u8; compress_bound(src.len())];
    compress(src, &mut comp).unwrap()
}

#[test]
fn counters_shrink_after_shuffle() {
    let src: Vec<u8> = (0..100_000u32).flat_map(|i| (i * 3).to_le_bytes()).collect();
    let shuffled = pipeline(&src, 4, 0);
    assert!(shuffled < compressed_len(&src), "{} vs {}", shuffled, compressed_len(&src));
}

#[test]
fn doubles_round_trip_with_explicit_blocks() {
    let src: Vec<u8> = (0..30_001).flat_map(|i| (i as f64).sqrt().to_le_bytes()).collect();
    for block in [0, 8, 64, default_block_size(8)] {
        pipeline(&src, 8, block);
    }
}

#[test]
fn odd_widths_and_tails() {
    let src: Vec<u8> = (0..12_345u32).map(|i| (i % 7 * 31 + i / 100) as u8).collect();
    for elem in [1usize, 2, 3, 6, 10, 24] {
        pipeline(&src, elem, 0);
    }
}
