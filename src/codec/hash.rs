//! Match finder: single-slot hash cache plus match validation and extension.
//!
//! Each of the [`HASH_SIZE`] slots holds the most recent input offset seen for
//! its hash value.  Inserting overwrites the previous occupant, so a lookup
//! yields at most one candidate.  The compression ratio therefore depends on
//! collision behaviour rather than on an exhaustive search; that is the
//! intended trade-off of the format, not something to improve here.

use super::types::{
    hash2, read_u16, HASH_SIZE, MAX_DISTANCE, MAX_FARDISTANCE, MIN_FAR_MATCH, MIN_MATCH,
};

// ─────────────────────────────────────────────────────────────────────────────
// Candidate match
// ─────────────────────────────────────────────────────────────────────────────

/// A validated back-reference found at some anchor position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    /// Unbiased distance from the anchor back to the reference (`>= 1`).
    pub distance: usize,
    /// Number of bytes already verified from the anchor (3, or 5 when far).
    pub verified: usize,
}

impl Match {
    /// `true` for the distance-1 repeated-byte case.
    #[inline]
    pub fn is_run(&self) -> bool {
        self.distance == 1
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Hash table
// ─────────────────────────────────────────────────────────────────────────────

/// Fixed 4096-slot cache of input offsets, indexed by [`hash2`].
///
/// Offsets are stored as `u32` indices into the input, never as pointers.
pub struct HashTable {
    slots: [u32; HASH_SIZE],
}

impl Default for HashTable {
    fn default() -> Self {
        Self::new()
    }
}

impl HashTable {
    /// A table with every slot pointing at offset 0.
    pub fn new() -> Self {
        HashTable { slots: [0; HASH_SIZE] }
    }

    /// Zero every slot.
    pub fn reset(&mut self) {
        self.slots.fill(0);
    }

    /// Current occupant of the slot for `hash`.
    #[inline]
    pub fn get(&self, hash: usize) -> usize {
        self.slots[hash] as usize
    }

    /// Record `pos` as the latest occurrence of the hash of `src[pos..pos + 3]`.
    #[inline]
    pub fn insert(&mut self, src: &[u8], pos: usize) {
        self.slots[hash2(src, pos)] = pos as u32;
    }

    /// Look for a match starting at `anchor`.
    ///
    /// First tests the repeated-byte shortcut: `src[anchor - 1..anchor + 3]`
    /// all equal yields a distance-1 match without touching the table.
    /// Otherwise probes the slot for `anchor`, unconditionally replaces it with
    /// `anchor`, and validates the previous occupant: 3 matching bytes for a
    /// near candidate, 5 for a far one.
    ///
    /// Requires `1 <= anchor` and `anchor + 5 <= src.len()`.
    pub fn find_match(&mut self, src: &[u8], anchor: usize) -> Option<Match> {
        if src[anchor] == src[anchor - 1] && read_u16(src, anchor - 1) == read_u16(src, anchor + 1)
        {
            return Some(Match { distance: 1, verified: MIN_MATCH });
        }

        let hash = hash2(src, anchor);
        let candidate = self.get(hash);
        self.slots[hash] = anchor as u32;

        let distance = anchor.checked_sub(candidate)?;
        // A true distance of exactly MAX_DISTANCE biases to 8191, whose
        // near encoding (high bits 31, low byte 255) collides with the
        // far-distance sentinel.  It has no valid encoding.
        if distance == 0 || distance >= MAX_FARDISTANCE || distance == MAX_DISTANCE {
            return None;
        }
        if src[candidate..candidate + MIN_MATCH] != src[anchor..anchor + MIN_MATCH] {
            return None;
        }
        if distance < MAX_DISTANCE {
            return Some(Match { distance, verified: MIN_MATCH });
        }
        if src[candidate + MIN_MATCH..candidate + MIN_FAR_MATCH]
            != src[anchor + MIN_MATCH..anchor + MIN_FAR_MATCH]
        {
            return None;
        }
        Some(Match { distance, verified: MIN_FAR_MATCH })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Match extension
// ─────────────────────────────────────────────────────────────────────────────

#[inline(always)]
fn read_u64(src: &[u8], pos: usize) -> u64 {
    let mut b = [0u8; 8];
    b.copy_from_slice(&src[pos..pos + 8]);
    u64::from_le_bytes(b)
}

/// Extend `m` forward from `anchor + m.verified`, never reading at or past
/// `bound`.
///
/// Returns the position one past the first mismatching byte, or `bound` when
/// the scan ran into it.  Every byte in `anchor..result - 1` matches its
/// reference.
///
/// For a run the scan compares against the repeated byte and stops on it;
/// otherwise it compares eight bytes per step while a full word fits before
/// `bound`, then finishes byte by byte.
pub fn extend_match(src: &[u8], anchor: usize, m: Match, bound: usize) -> usize {
    let mut ip = anchor + m.verified;
    let mut r = ip - m.distance;

    if m.is_run() {
        let x = src[ip - 1];
        while ip < bound {
            if src[r] != x {
                break;
            }
            r += 1;
            ip += 1;
        }
        return ip;
    }

    while ip + 8 <= bound {
        let diff = read_u64(src, r) ^ read_u64(src, ip);
        if diff != 0 {
            let common = (diff.trailing_zeros() / 8) as usize;
            return ip + common + 1;
        }
        r += 8;
        ip += 8;
    }
    while ip < bound {
        let same = src[r] == src[ip];
        r += 1;
        ip += 1;
        if !same {
            break;
        }
    }
    ip
}
