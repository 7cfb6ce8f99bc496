//! bdelta wire-format constants and shared helpers.
//!
//!   - Token-layout constants (MAX_COPY, MAX_DISTANCE, MAX_FARDISTANCE, ...)
//!   - Hash-table sizing (HASH_LOG, HASH_SIZE, HASH_MASK)
//!   - `read_u16` / `hash2`

// ─────────────────────────────────────────────────────────────────────────────
// Token layout
// ─────────────────────────────────────────────────────────────────────────────

/// Longest literal run carried by one control byte.  The control byte stores
/// `run - 1`, so every literal control byte is `< MAX_COPY`.
pub const MAX_COPY: usize = 32;

/// Near-distance ceiling.  Distances at or past this value use the far
/// encoding (sentinel 255 + two explicit bytes).
pub const MAX_DISTANCE: usize = 8192;

/// Exclusive upper bound on a match distance accepted by the encoder.
pub const MAX_FARDISTANCE: usize = 65_535 + MAX_DISTANCE - 1;

/// Shortest match the encoder emits.
pub const MIN_MATCH: usize = 3;

/// Shortest match worth encoding at a far distance (4 bytes of token).
pub const MIN_FAR_MATCH: usize = 5;

/// Bits of the control byte holding the length class.
pub const LEN_SHIFT: u32 = 5;

/// Length class meaning "extension bytes follow".
pub const LEN_EXTENDED: usize = 7;

/// Distance-high value marking a (potential) far match.
pub const FAR_MARKER: u8 = 31;

/// Low distance byte that, combined with [`FAR_MARKER`], announces the
/// 16-bit far-distance extension.
pub const FAR_SENTINEL: u8 = 255;

/// Bit forced on in the first output byte to tag the bdelta variant.
pub const VERSION_MARKER: u8 = 1 << 5;

/// Inputs shorter than this are stored as a single literal record.
pub const SHORT_INPUT: usize = 4;

/// The match search stops this many bytes before the end of the input; the
/// tail is always emitted as literals.
pub const INPUT_MARGIN: usize = 12;

/// Match extension never reads at or past `len - BOUND_MARGIN`.
pub const BOUND_MARGIN: usize = 2;

/// Largest input the encoder accepts: hash slots are 32-bit offsets.
pub const MAX_INPUT_SIZE: usize = u32::MAX as usize;

// ─────────────────────────────────────────────────────────────────────────────
// Hash-table sizing
// ─────────────────────────────────────────────────────────────────────────────

/// Number of bits kept from each hash value.
pub const HASH_LOG: u32 = 12;
/// Number of single-candidate slots (4096).
pub const HASH_SIZE: usize = 1 << HASH_LOG;
pub const HASH_MASK: u32 = (HASH_SIZE as u32) - 1;

// ─────────────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Little-endian 16-bit read at `pos`, on every target.
#[inline(always)]
pub fn read_u16(src: &[u8], pos: usize) -> u32 {
    u16::from_le_bytes([src[pos], src[pos + 1]]) as u32
}

/// Hash of the three bytes at `pos`, `pos + 1`, `pos + 2`, reduced to
/// [`HASH_LOG`] bits.
#[inline(always)]
pub fn hash2(src: &[u8], pos: usize) -> usize {
    let v = read_u16(src, pos);
    let v = v ^ read_u16(src, pos + 1) ^ (v >> (16 - HASH_LOG));
    (v & HASH_MASK) as usize
}
