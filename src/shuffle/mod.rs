//! Blocked bit-transposition for typed arrays.
//!
//! [`blocked`] holds the scheduler that cuts a buffer into element blocks and
//! runs a per-block transform across the rayon pool; [`bitshuffle`] holds the
//! bit-transpose kernels that run on top of it.

use core::fmt;

pub mod bitshuffle;
pub mod blocked;

pub use bitshuffle::{bitshuffle, bitunshuffle, trans_bit_elem, untrans_bit_elem};
pub use blocked::{default_block_size, run_blocked, run_blocked_in, IoChain};

/// Errors produced by the blocked scheduler and its transforms.
///
/// Each variant maps to the negative integer code used by the bitshuffle C
/// API (see [`BlockError::code`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockError {
    /// A block's element count is not a multiple of 8.
    SizeNotMultiple,
    /// The requested block size is not a multiple of 8.
    BlockSizeNotMultiple,
    /// An input or output buffer is shorter than `size * elem_size`.
    BufferTooSmall,
    /// A transform-specific failure carrying its own code.
    Transform(i64),
}

impl BlockError {
    pub fn code(&self) -> i64 {
        match *self {
            BlockError::SizeNotMultiple => -80,
            BlockError::BlockSizeNotMultiple => -81,
            BlockError::BufferTooSmall => -90,
            BlockError::Transform(code) => code,
        }
    }
}

impl fmt::Display for BlockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockError::SizeNotMultiple => f.write_str("block size is not a multiple of 8 elements"),
            BlockError::BlockSizeNotMultiple => f.write_str("requested block size is not a multiple of 8"),
            BlockError::BufferTooSmall => f.write_str("buffer too small for the requested elements"),
            BlockError::Transform(code) => write!(f, "block transform failed with code {}", code),
        }
    }
}

impl std::error::Error for BlockError {}
