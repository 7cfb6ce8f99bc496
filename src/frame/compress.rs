//! One-shot `.bdz` frame compression.
//!
//! The input is cut into `chunk_size` pieces; every chunk is (optionally)
//! bit-shuffled and compressed on its own, in parallel across the current
//! rayon pool, then the results are written out in input order.  A chunk that
//! does not shrink is stored verbatim with [`CHUNK_STORED_FLAG`] set.

use rayon::prelude::*;

use crate::codec::{compress, compress_bound};
use crate::displaylevel;
use crate::endian::encode_u32_be;
use crate::frame::header::write_header;
use crate::frame::types::{
    FrameError, FrameHeader, FramePrefs, CHECKSUM_SIZE, CHUNK_SIZE_MAX, CHUNK_STORED_FLAG,
    CH_SIZE, ELEM_SIZE_MAX, HEADER_SIZE,
};
use crate::shuffle::{bitshuffle, bitunshuffle};

// ─────────────────────────────────────────────────────────────────────────────
// Chunk shuffling (shared with decompression)
// ─────────────────────────────────────────────────────────────────────────────

/// Bit-shuffle (`forward`) or unshuffle `chunk` as `elem_size`-byte elements.
///
/// Trailing bytes that do not make up a whole element are copied unchanged.
pub(crate) fn shuffle_chunk(chunk: &[u8], elem_size: usize, forward: bool) -> Result<Vec<u8>, FrameError> {
    let size = chunk.len() / elem_size;
    let body = size * elem_size;
    let mut out = vec![0u8; chunk.len()];
    if forward {
        bitshuffle(chunk, &mut out, size, elem_size, 0)?;
    } else {
        bitunshuffle(chunk, &mut out, size, elem_size, 0)?;
    }
    out[body..].copy_from_slice(&chunk[body..]);
    Ok(out)
}

// ─────────────────────────────────────────────────────────────────────────────
// Chunk encoding
// ─────────────────────────────────────────────────────────────────────────────

/// Encode one chunk as its length prefix followed by its payload.
fn encode_chunk(chunk: &[u8], elem_size: usize) -> Result<Vec<u8>, FrameError> {
    let shuffled;
    let data = if elem_size > 0 {
        shuffled = shuffle_chunk(chunk, elem_size, true)?;
        &shuffled[..]
    } else {
        chunk
    };

    let mut out = vec![0u8; CH_SIZE + compress_bound(data.len())];
    let n = compress(data, &mut out[CH_SIZE..])?;

    if n >= data.len() {
        // Incompressible: store as is.
        out.truncate(CH_SIZE);
        out[..CH_SIZE].copy_from_slice(&encode_u32_be(data.len() as u32 | CHUNK_STORED_FLAG));
        out.extend_from_slice(data);
    } else {
        out.truncate(CH_SIZE + n);
        out[..CH_SIZE].copy_from_slice(&encode_u32_be(n as u32));
    }
    Ok(out)
}

// ─────────────────────────────────────────────────────────────────────────────
// Frame
// ─────────────────────────────────────────────────────────────────────────────

/// Compress `src` into a complete `.bdz` frame.
pub fn compress_frame(src: &[u8], prefs: &FramePrefs) -> Result<Vec<u8>, FrameError> {
    if prefs.chunk_size == 0 || prefs.chunk_size > CHUNK_SIZE_MAX {
        return Err(FrameError::ChunkSizeInvalid);
    }
    if prefs.elem_size > ELEM_SIZE_MAX {
        return Err(FrameError::ElemSizeInvalid);
    }

    let chunk_count = src.len().div_ceil(prefs.chunk_size);
    let chunk_count = u32::try_from(chunk_count).map_err(|_| FrameError::ChunkCountWrong)?;
    let header = FrameHeader {
        shuffled: prefs.elem_size > 0,
        elem_size: prefs.elem_size as u32,
        chunk_size: prefs.chunk_size as u32,
        content_size: src.len() as u64,
        chunk_count,
    };

    let encoded: Vec<Vec<u8>> = src
        .par_chunks(prefs.chunk_size)
        .enumerate()
        .map(|(i, chunk)| {
            let out = encode_chunk(chunk, prefs.elem_size)?;
            displaylevel!(3, "chunk {}: {} -> {} bytes\n", i, chunk.len(), out.len() - CH_SIZE);
            Ok(out)
        })
        .collect::<Result<_, FrameError>>()?;

    let body: usize = encoded.iter().map(Vec::len).sum();
    let mut frame = Vec::with_capacity(HEADER_SIZE + body + CHECKSUM_SIZE);
    frame.extend_from_slice(&write_header(&header));
    for chunk in &encoded {
        frame.extend_from_slice(chunk);
    }
    frame.extend_from_slice(&encode_u32_be(xxhash_rust::xxh32::xxh32(src, 0)));
    Ok(frame)
}

/// Upper bound on the frame size for `src_size` input bytes.
pub fn compress_frame_bound(src_size: usize, chunk_size: usize) -> usize {
    let chunks = src_size.div_ceil(chunk_size.max(1));
    HEADER_SIZE + chunks * CH_SIZE + src_size + CHECKSUM_SIZE
}
