//! bdelta decompression.
//!
//! # Security boundary
//!
//! This is the path that consumes untrusted bytes.  Every token is checked
//! before it is replayed:
//!   - a back-reference reaching before the start of `dst`,
//!   - a write past the end of `dst`,
//!   - a token needing more input bytes than remain,
//!
//! each return `Err(DecompressError::MalformedInput)` with nothing written for
//! that token.  `Ok(0)` only ever means the input was empty.  The `abi`
//! shims fold every error into a 0 return.
//!
//! Back-references are replayed front to back, one element at a time, because
//! the source range may overlap bytes the same copy is producing.

use core::fmt;

use crate::config::STRICT_ALIGN;

use super::types::{FAR_MARKER, FAR_SENTINEL, LEN_EXTENDED, LEN_SHIFT, MAX_COPY, MAX_DISTANCE};

// ─────────────────────────────────────────────────────────────────────────────
// Error type
// ─────────────────────────────────────────────────────────────────────────────

/// Errors returned by [`decompress`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecompressError {
    /// The token stream is malformed or truncated, or does not fit `dst`.
    MalformedInput,
}

impl fmt::Display for DecompressError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("malformed or truncated bdelta stream")
    }
}

impl std::error::Error for DecompressError {}

#[inline(always)]
fn output_error<T>() -> Result<T, DecompressError> {
    Err(DecompressError::MalformedInput)
}

#[inline(always)]
fn next_byte(src: &[u8], ip: &mut usize) -> Result<usize, DecompressError> {
    let b = *src.get(*ip).ok_or(DecompressError::MalformedInput)?;
    *ip += 1;
    Ok(b as usize)
}

// ─────────────────────────────────────────────────────────────────────────────
// Back-reference replay
// ─────────────────────────────────────────────────────────────────────────────

/// Copy `count` bytes from `dst[from..]` to `dst[op..]`, front to back.
///
/// `from < op`; the ranges may overlap.  When unaligned pairs are cheap and
/// the distance is at least 2, each step moves two bytes whose source lies
/// entirely behind the write frontier.
#[inline(always)]
fn copy_back_reference(dst: &mut [u8], mut from: usize, mut op: usize, mut count: usize) {
    if !STRICT_ALIGN && op - from >= 2 {
        while count >= 2 {
            dst.copy_within(from..from + 2, op);
            from += 2;
            op += 2;
            count -= 2;
        }
    }
    while count > 0 {
        dst[op] = dst[from];
        from += 1;
        op += 1;
        count -= 1;
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Decompression
// ─────────────────────────────────────────────────────────────────────────────

/// Decompress a bdelta token stream into `dst`.
///
/// Returns the number of bytes written.  `dst.len()` is the output capacity;
/// the stream does not record the decompressed size, so the caller must
/// supply a buffer at least that large.
pub fn decompress(src: &[u8], dst: &mut [u8]) -> Result<usize, DecompressError> {
    if src.is_empty() {
        return Ok(0);
    }

    let ip_limit = src.len();
    let op_limit = dst.len();
    let mut ip = 1;
    let mut op: usize = 0;

    // The first byte is always a literal run; mask off the version marker.
    let mut ctrl = (src[0] as usize) & (MAX_COPY - 1);

    loop {
        if ctrl >= MAX_COPY {
            // ── Match ─────────────────────────────────────────────────────
            let mut len = (ctrl >> LEN_SHIFT) - 1;
            let ofs = (ctrl & FAR_MARKER as usize) << 8;

            if len == LEN_EXTENDED - 1 {
                loop {
                    let code = next_byte(src, &mut ip)?;
                    len += code;
                    if code != 255 {
                        break;
                    }
                }
            }

            let code = next_byte(src, &mut ip)?;
            // `back` is the distance from `op` to the reference *before* the
            // final decrement; 0 marks a run of the preceding byte.
            let back = if code == FAR_SENTINEL as usize && ofs == (FAR_MARKER as usize) << 8 {
                let hi = next_byte(src, &mut ip)?;
                let lo = next_byte(src, &mut ip)?;
                ((hi << 8) | lo) + MAX_DISTANCE
            } else {
                ofs + code
            };

            let count = len + 3;
            match op.checked_add(count) {
                Some(end) if end <= op_limit => {}
                _ => return output_error(),
            }
            if back + 1 > op {
                return output_error();
            }

            if back == 0 {
                let b = dst[op - 1];
                dst[op..op + count].fill(b);
            } else {
                copy_back_reference(dst, op - back - 1, op, count);
            }
            op += count;

            if ip >= ip_limit {
                break;
            }
            ctrl = src[ip] as usize;
            ip += 1;
        } else {
            // ── Literal run ───────────────────────────────────────────────
            let run = ctrl + 1;
            if op + run > op_limit || ip + run > ip_limit {
                return output_error();
            }
            dst[op..op + run].copy_from_slice(&src[ip..ip + run]);
            op += run;
            ip += run;

            if ip >= ip_limit {
                break;
            }
            ctrl = src[ip] as usize;
            ip += 1;
        }
    }

    Ok(op)
}
