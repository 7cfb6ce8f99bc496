//! Scalar bit transpose kernels and the blocked bitshuffle entry points.
//!
//! Only the portable (non-SIMD) kernel is provided.
//!
//! Within a block of `size` elements (`size % 8 == 0`), bit `j` of byte `b`
//! of element `i` moves to bit `i % 8` of output byte
//! `(b * 8 + j) * (size / 8) + i / 8`: one row of `size` bits per bit plane.

use super::blocked::{run_blocked, IoChain};
use super::BlockError;

/// 8×8 bit-matrix transpose of a little-endian `u64`: bit `k` of byte `t`
/// becomes bit `t` of byte `k`.
#[inline(always)]
fn transpose_8x8(mut x: u64) -> u64 {
    let t = (x ^ (x >> 7)) & 0x00AA_00AA_00AA_00AA;
    x = x ^ t ^ (t << 7);
    let t = (x ^ (x >> 14)) & 0x0000_CCCC_0000_CCCC;
    x = x ^ t ^ (t << 14);
    let t = (x ^ (x >> 28)) & 0x0000_0000_F0F0_F0F0;
    x ^ t ^ (t << 28)
}

fn check_dims(input: &[u8], output: &[u8], size: usize, elem_size: usize) -> Result<usize, BlockError> {
    if size % 8 != 0 {
        return Err(BlockError::SizeNotMultiple);
    }
    let nbytes = size.checked_mul(elem_size).ok_or(BlockError::BufferTooSmall)?;
    if input.len() < nbytes || output.len() < nbytes {
        return Err(BlockError::BufferTooSmall);
    }
    Ok(nbytes)
}

/// Transpose the bits of `size` elements of `elem_size` bytes.
///
/// Returns the number of bytes processed (`size * elem_size`).
pub fn trans_bit_elem(
    input: &[u8],
    output: &mut [u8],
    size: usize,
    elem_size: usize,
) -> Result<usize, BlockError> {
    let nbytes = check_dims(input, output, size, elem_size)?;
    let row = size / 8;

    for g in 0..row {
        let group = &input[g * 8 * elem_size..(g + 1) * 8 * elem_size];
        for b in 0..elem_size {
            let mut x = 0u64;
            for t in 0..8 {
                x |= (group[t * elem_size + b] as u64) << (8 * t);
            }
            let x = transpose_8x8(x);
            for k in 0..8 {
                output[(b * 8 + k) * row + g] = (x >> (8 * k)) as u8;
            }
        }
    }
    Ok(nbytes)
}

/// Inverse of [`trans_bit_elem`].
pub fn untrans_bit_elem(
    input: &[u8],
    output: &mut [u8],
    size: usize,
    elem_size: usize,
) -> Result<usize, BlockError> {
    let nbytes = check_dims(input, output, size, elem_size)?;
    let row = size / 8;

    for g in 0..row {
        let group = &mut output[g * 8 * elem_size..(g + 1) * 8 * elem_size];
        for b in 0..elem_size {
            let mut x = 0u64;
            for k in 0..8 {
                x |= (input[(b * 8 + k) * row + g] as u64) << (8 * k);
            }
            let x = transpose_8x8(x);
            for t in 0..8 {
                group[t * elem_size + b] = (x >> (8 * t)) as u8;
            }
        }
    }
    Ok(nbytes)
}

/// Bitshuffle one block claimed from `chain`.
pub fn bitshuffle_block(chain: &IoChain<'_>, size: usize, elem_size: usize) -> Result<usize, BlockError> {
    let nbytes = size * elem_size;
    let (input, output) = chain.claim(nbytes, nbytes)?;
    trans_bit_elem(input, output, size, elem_size)
}

/// Bitunshuffle one block claimed from `chain`.
pub fn bitunshuffle_block(chain: &IoChain<'_>, size: usize, elem_size: usize) -> Result<usize, BlockError> {
    let nbytes = size * elem_size;
    let (input, output) = chain.claim(nbytes, nbytes)?;
    untrans_bit_elem(input, output, size, elem_size)
}

/// Bitshuffle `size` elements in blocks of `block_size` (0 = default).
///
/// Returns the number of bytes processed.  Data must be unshuffled with the
/// same `size`, `elem_size` and `block_size`.
pub fn bitshuffle(
    input: &[u8],
    output: &mut [u8],
    size: usize,
    elem_size: usize,
    block_size: usize,
) -> Result<usize, BlockError> {
    run_blocked(bitshuffle_block, input, output, size, elem_size, block_size)
}

/// Undo [`bitshuffle`].
pub fn bitunshuffle(
    input: &[u8],
    output: &mut [u8],
    size: usize,
    elem_size: usize,
    block_size: usize,
) -> Result<usize, BlockError> {
    run_blocked(bitunshuffle_block, input, output, size, elem_size, block_size)
}
