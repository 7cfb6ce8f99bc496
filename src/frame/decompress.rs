//! One-shot `.bdz` frame decompression.
//!
//! The chunk table is walked once up front so that every payload is located
//! and bounds-checked before any output is allocated; chunks are then
//! decoded in parallel straight into their slot of the output buffer.

use rayon::prelude::*;

use crate::codec::decompress;
use crate::endian::read_u32_be;
use crate::frame::compress::shuffle_chunk;
use crate::frame::header::read_header;
use crate::frame::types::{
    FrameError, FrameHeader, CHECKSUM_SIZE, CHUNK_STORED_FLAG, CH_SIZE, HEADER_SIZE,
};

/// Upper bound on decoded bytes per token-stream byte.
const MAX_EXPANSION: usize = 256;

/// One located chunk payload.
struct ChunkRef<'a> {
    stored: bool,
    payload: &'a [u8],
}

/// Walk the chunk table following the header.
///
/// Returns the chunk payloads and the offset of the checksum trailer.
fn locate_chunks<'a>(src: &'a [u8], h: &FrameHeader) -> Result<(Vec<ChunkRef<'a>>, usize), FrameError> {
    let mut pos = HEADER_SIZE;
    let mut chunks = Vec::with_capacity((h.chunk_count as usize).min(src.len() / CH_SIZE));
    for index in 0..h.chunk_count {
        if src.len() < pos + CH_SIZE {
            return Err(FrameError::FrameTruncated);
        }
        let raw = read_u32_be(&src[pos..]);
        pos += CH_SIZE;
        let len = (raw & !CHUNK_STORED_FLAG) as usize;
        if src.len() - pos < len {
            return Err(FrameError::FrameTruncated);
        }
        let stored = raw & CHUNK_STORED_FLAG != 0;
        // A token stream cannot expand any byte more than MAX_EXPANSION times,
        // which caps the allocation a forged header can ask for.
        let expected = h.chunk_len(index);
        if (stored && len != expected) || (!stored && expected > len.saturating_mul(MAX_EXPANSION)) {
            return Err(FrameError::ChunkSizeWrong);
        }
        chunks.push(ChunkRef { stored, payload: &src[pos..pos + len] });
        pos += len;
    }
    if src.len() < pos + CHECKSUM_SIZE {
        return Err(FrameError::FrameTruncated);
    }
    if src.len() > pos + CHECKSUM_SIZE {
        return Err(FrameError::TrailingData);
    }
    Ok((chunks, pos))
}

fn decode_chunk(chunk: &ChunkRef<'_>, dst: &mut [u8], h: &FrameHeader) -> Result<(), FrameError> {
    if chunk.stored {
        if chunk.payload.len() != dst.len() {
            return Err(FrameError::ChunkSizeWrong);
        }
        dst.copy_from_slice(chunk.payload);
    } else if decompress(chunk.payload, dst)? != dst.len() {
        return Err(FrameError::ChunkSizeWrong);
    }

    if h.shuffled {
        let plain = shuffle_chunk(dst, h.elem_size as usize, false)?;
        dst.copy_from_slice(&plain);
    }
    Ok(())
}

/// Read and validate only the frame header.
pub fn frame_info(src: &[u8]) -> Result<FrameHeader, FrameError> {
    read_header(src)
}

/// Decompress a complete `.bdz` frame and verify its content checksum.
pub fn decompress_frame(src: &[u8]) -> Result<Vec<u8>, FrameError> {
    let h = read_header(src)?;
    let (chunks, trailer) = locate_chunks(src, &h)?;

    let content_size = usize::try_from(h.content_size).map_err(|_| FrameError::ChunkSizeWrong)?;
    let mut out = vec![0u8; content_size];

    out.par_chunks_mut(h.chunk_size as usize)
        .zip(chunks.par_iter())
        .try_for_each(|(dst, chunk)| decode_chunk(chunk, dst, &h))?;

    if read_u32_be(&src[trailer..]) != xxhash_rust::xxh32::xxh32(&out, 0) {
        return Err(FrameError::ContentChecksumInvalid);
    }
    Ok(out)
}
