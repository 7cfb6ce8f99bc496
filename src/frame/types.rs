//! `.bdz` container types, constants, and error handling.
//!
//! Layout (all integers big-endian):
//!
//! ```text
//! magic        4   "BDZ\x01"
//! flags        1   bit 0 = chunks are bit-shuffled, other bits reserved (0)
//! elem_size    4   element width used by the shuffle (0 when not shuffled)
//! chunk_size   4   uncompressed bytes per chunk (last chunk may be shorter)
//! content_size 8   total uncompressed length
//! chunk_count  4
//! chunk * n        len (4, high bit = stored raw) + payload
//! checksum     4   XXH32 (seed 0) of the uncompressed content
//! ```

use core::fmt;

use crate::codec::{CompressError, DecompressError};
use crate::shuffle::BlockError;

// ─────────────────────────────────────────────────────────────────────────────
// Format constants
// ─────────────────────────────────────────────────────────────────────────────

pub const BDZ_MAGIC: [u8; 4] = *b"BDZ\x01";

/// Size of the fixed frame header.
pub const HEADER_SIZE: usize = 4 + 1 + 4 + 4 + 8 + 4;

/// Size of a chunk length prefix.
pub const CH_SIZE: usize = 4;

/// Size of the content checksum trailer.
pub const CHECKSUM_SIZE: usize = 4;

/// Flag bit: chunk contents were bit-shuffled before compression.
pub const FLAG_SHUFFLED: u8 = 0x01;

/// High bit of a chunk length: the payload is the chunk stored verbatim.
pub const CHUNK_STORED_FLAG: u32 = 0x8000_0000;

/// Largest chunk size the length prefix can describe.
pub const CHUNK_SIZE_MAX: usize = 1 << 30;

/// Largest element width accepted for shuffling.
pub const ELEM_SIZE_MAX: usize = 1 << 16;

// ─────────────────────────────────────────────────────────────────────────────
// Header
// ─────────────────────────────────────────────────────────────────────────────

/// Decoded fixed frame header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    pub shuffled: bool,
    pub elem_size: u32,
    pub chunk_size: u32,
    pub content_size: u64,
    pub chunk_count: u32,
}

impl FrameHeader {
    /// Uncompressed length of chunk `index`.
    pub fn chunk_len(&self, index: u32) -> usize {
        let start = index as u64 * self.chunk_size as u64;
        self.content_size.saturating_sub(start).min(self.chunk_size as u64) as usize
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Compression preferences
// ─────────────────────────────────────────────────────────────────────────────

/// Knobs for [`compress_frame`](crate::frame::compress_frame).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FramePrefs {
    /// Uncompressed bytes per chunk.
    pub chunk_size: usize,
    /// Bit-shuffle each chunk as elements of this many bytes; 0 disables.
    pub elem_size: usize,
}

impl Default for FramePrefs {
    fn default() -> Self {
        FramePrefs { chunk_size: crate::config::CHUNK_SIZE_DEFAULT, elem_size: 0 }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameError {
    /// Fewer bytes than a full header.
    HeaderIncomplete,
    /// The magic number does not match.
    FrameTypeUnknown,
    /// A reserved flag bit is set.
    ReservedFlagSet,
    /// Chunk size is 0 or above [`CHUNK_SIZE_MAX`].
    ChunkSizeInvalid,
    /// Element size is 0 with shuffling on, or above [`ELEM_SIZE_MAX`].
    ElemSizeInvalid,
    /// Chunk count disagrees with content and chunk sizes.
    ChunkCountWrong,
    /// The frame ends inside a chunk or before the checksum.
    FrameTruncated,
    /// Bytes follow the checksum.
    TrailingData,
    /// A chunk decoded to the wrong length.
    ChunkSizeWrong,
    /// The content checksum does not match.
    ContentChecksumInvalid,
    /// A chunk failed to compress.
    Compression(CompressError),
    /// A chunk's token stream is malformed.
    Decompression(DecompressError),
    /// The bit-shuffle step failed.
    Shuffle(BlockError),
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameError::HeaderIncomplete => f.write_str("frame header incomplete"),
            FrameError::FrameTypeUnknown => f.write_str("unknown frame type (bad magic number)"),
            FrameError::ReservedFlagSet => f.write_str("reserved flag set in frame header"),
            FrameError::ChunkSizeInvalid => f.write_str("invalid chunk size"),
            FrameError::ElemSizeInvalid => f.write_str("invalid element size"),
            FrameError::ChunkCountWrong => f.write_str("chunk count does not match content size"),
            FrameError::FrameTruncated => f.write_str("frame truncated"),
            FrameError::TrailingData => f.write_str("trailing data after frame"),
            FrameError::ChunkSizeWrong => f.write_str("chunk decoded to the wrong size"),
            FrameError::ContentChecksumInvalid => f.write_str("content checksum mismatch"),
            FrameError::Compression(e) => write!(f, "chunk compression failed: {}", e),
            FrameError::Decompression(e) => write!(f, "chunk decompression failed: {}", e),
            FrameError::Shuffle(e) => write!(f, "bitshuffle failed: {}", e),
        }
    }
}

impl std::error::Error for FrameError {}

impl From<CompressError> for FrameError {
    fn from(e: CompressError) -> Self {
        FrameError::Compression(e)
    }
}

impl From<DecompressError> for FrameError {
    fn from(e: DecompressError) -> Self {
        FrameError::Decompression(e)
    }
}

impl From<BlockError> for FrameError {
    fn from(e: BlockError) -> Self {
        FrameError::Shuffle(e)
    }
}
