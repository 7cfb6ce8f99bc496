//! Frame header encoding, validation, and chunk-count arithmetic.

use crate::endian::{read_u32_be, read_u64_be, write_u32_be, write_u64_be};
use crate::frame::types::{
    FrameError, FrameHeader, BDZ_MAGIC, CHUNK_SIZE_MAX, ELEM_SIZE_MAX, FLAG_SHUFFLED, HEADER_SIZE,
};

/// Number of chunks needed to hold `content_size` bytes in `chunk_size` pieces.
#[inline]
pub fn chunk_count_for(content_size: u64, chunk_size: u64) -> u64 {
    content_size.div_ceil(chunk_size)
}

/// Serialise `h` into its fixed 25-byte form.
pub fn write_header(h: &FrameHeader) -> [u8; HEADER_SIZE] {
    let mut out = [0u8; HEADER_SIZE];
    out[0..4].copy_from_slice(&BDZ_MAGIC);
    out[4] = if h.shuffled { FLAG_SHUFFLED } else { 0 };
    write_u32_be(&mut out[5..9], h.elem_size);
    write_u32_be(&mut out[9..13], h.chunk_size);
    write_u64_be(&mut out[13..21], h.content_size);
    write_u32_be(&mut out[21..25], h.chunk_count);
    out
}

/// Parse and validate the header at the start of `src`.
pub fn read_header(src: &[u8]) -> Result<FrameHeader, FrameError> {
    if src.len() < 4 {
        return Err(FrameError::HeaderIncomplete);
    }
    if src[0..4] != BDZ_MAGIC {
        return Err(FrameError::FrameTypeUnknown);
    }
    if src.len() < HEADER_SIZE {
        return Err(FrameError::HeaderIncomplete);
    }

    let flags = src[4];
    if flags & !FLAG_SHUFFLED != 0 {
        return Err(FrameError::ReservedFlagSet);
    }

    let h = FrameHeader {
        shuffled: flags & FLAG_SHUFFLED != 0,
        elem_size: read_u32_be(&src[5..9]),
        chunk_size: read_u32_be(&src[9..13]),
        content_size: read_u64_be(&src[13..21]),
        chunk_count: read_u32_be(&src[21..25]),
    };

    if h.chunk_size == 0 || h.chunk_size as usize > CHUNK_SIZE_MAX {
        return Err(FrameError::ChunkSizeInvalid);
    }
    if h.elem_size as usize > ELEM_SIZE_MAX || (h.shuffled && h.elem_size == 0) {
        return Err(FrameError::ElemSizeInvalid);
    }
    if chunk_count_for(h.content_size, h.chunk_size as u64) != h.chunk_count as u64 {
        return Err(FrameError::ChunkCountWrong);
    }
    Ok(h)
}
