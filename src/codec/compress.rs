//! bdelta compression: greedy single-pass LZ77 encoder.
//!
//! The scan walks the input once; at every position it asks the
//! [`HashTable`] for a match (repeated-byte shortcut first, then the
//! single-slot hash probe), extends a hit as far as the safety bound allows,
//! and otherwise emits the byte as a literal.
//!
//! Every output write is checked: a too-small `dst` yields
//! [`CompressError::OutputTooSmall`] rather than a partial stream.  The token
//! stream produced for an adequately sized `dst` is unaffected.

use core::fmt;

use super::encode::TokenWriter;
use super::hash::{extend_match, HashTable};
use super::types::{BOUND_MARGIN, INPUT_MARGIN, MAX_INPUT_SIZE, MIN_MATCH, SHORT_INPUT};

// ─────────────────────────────────────────────────────────────────────────────
// Error type
// ─────────────────────────────────────────────────────────────────────────────

/// Errors returned by [`compress`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressError {
    /// The output buffer is too small to hold the compressed data.
    OutputTooSmall,
    /// The input exceeds [`MAX_INPUT_SIZE`].
    InputTooLarge,
}

impl fmt::Display for CompressError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompressError::OutputTooSmall => f.write_str("destination buffer too small"),
            CompressError::InputTooLarge => f.write_str("source too large"),
        }
    }
}

impl std::error::Error for CompressError {}

// ─────────────────────────────────────────────────────────────────────────────
// Utility
// ─────────────────────────────────────────────────────────────────────────────

/// Worst-case compressed size for `input_size` bytes.
///
/// Every match token (plus the literal placeholder that follows it) costs no
/// more than the bytes it replaces, so the worst case is all literals: one
/// control byte per 32 bytes on top of the data.
#[inline]
pub fn compress_bound(input_size: usize) -> usize {
    input_size + input_size / 32 + 4
}

// ─────────────────────────────────────────────────────────────────────────────
// Compression
// ─────────────────────────────────────────────────────────────────────────────

/// Compress `src` into `dst`, returning the number of bytes written.
///
/// - Empty input writes nothing and returns `Ok(0)`.
/// - Inputs of 1–3 bytes become one literal record: a count byte
///   (`len - 1`) followed by the bytes, `len + 1` in total.  This record
///   does not carry the version marker.
/// - Anything longer is a token stream whose first byte has bit 5 set.
///
/// `dst.len()` >= [`compress_bound`]`(src.len())` always suffices.
pub fn compress(src: &[u8], dst: &mut [u8]) -> Result<usize, CompressError> {
    let length = src.len();
    if length > MAX_INPUT_SIZE {
        return Err(CompressError::InputTooLarge);
    }

    if length < SHORT_INPUT {
        if length == 0 {
            return Ok(0);
        }
        if dst.len() < length + 1 {
            return Err(CompressError::OutputTooSmall);
        }
        dst[0] = (length - 1) as u8;
        dst[1..=length].copy_from_slice(src);
        return Ok(length + 1);
    }

    // Match extension never reads at or past `ip_bound`; no new match is
    // attempted from `ip_limit` on.
    let ip_bound = length - BOUND_MARGIN;
    let ip_limit = length.saturating_sub(INPUT_MARGIN);

    let mut table = HashTable::new();
    let mut out = TokenWriter::new(dst);

    // The stream always opens with a literal run holding the first two bytes.
    out.start_literals()?;
    out.literal(src[0])?;
    out.literal(src[1])?;
    let mut ip = 2;

    while ip < ip_limit {
        let anchor = ip;
        let Some(m) = table.find_match(src, anchor) else {
            out.literal(src[anchor])?;
            ip = anchor + 1;
            continue;
        };

        let end = extend_match(src, anchor, m, ip_bound);
        out.close_literals();

        // `end - 1` is the first byte not covered; the token length is
        // biased so that 1 means a 3-byte match.
        let last = end - MIN_MATCH;
        out.match_token(last - anchor, m.distance - 1)?;

        // Seed the table with the two positions at the match boundary.
        table.insert(src, last);
        table.insert(src, last + 1);
        ip = last + 2;

        out.start_literals()?;
    }

    // Left-over bytes go out as literals.
    for &b in &src[ip..] {
        out.literal(b)?;
    }

    Ok(out.finish())
}
