//! Blocked, data-parallel transform scheduler.
//!
//! A buffer of `size` elements is cut into blocks of
//! `block_size` elements; each block is handed to a per-block transform that
//! claims its own input/output sub-range from a shared [`IoChain`].
//!
//! Phases, in order:
//! 1. `size / block_size` full blocks, dispatched across the current rayon
//!    pool one block per task.
//!    Block order is unspecified; the transform must be block-local.
//! 2. After the parallel loop has joined: one final block of
//!    `size % block_size` elements rounded down to [`BLOCKED_MULT`].
//! 3. The remaining `size % BLOCKED_MULT` elements, copied verbatim.
//!
//! A failing block does not cancel its siblings.  The first error recorded is
//! returned once every block has run; output written by successful blocks is
//! left in place.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, OnceLock, PoisonError};

use rayon::prelude::*;

use super::BlockError;
use crate::displaylevel;

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Block sizes must be a multiple of this many elements.
pub const BLOCKED_MULT: usize = 8;

/// Byte size the default block is aimed at (fits comfortably in L1).
pub const TARGET_BLOCK_SIZE_B: usize = 8192;

/// Smallest default block, in elements.
pub const MIN_RECOMMEND_BLOCK: usize = 128;

/// Default block size, in elements, for `elem_size`-byte elements.
///
/// Shuffled data can only be read back with the block size it was written
/// with, so this function's output must never change between versions.
/// `elem_size == 0` yields
/// [`MIN_RECOMMEND_BLOCK`].
pub fn default_block_size(elem_size: usize) -> usize {
    let block_size = TARGET_BLOCK_SIZE_B.checked_div(elem_size).unwrap_or(0);
    let block_size = (block_size / BLOCKED_MULT) * BLOCKED_MULT;
    block_size.max(MIN_RECOMMEND_BLOCK)
}

// ─────────────────────────────────────────────────────────────────────────────
// IoChain: shared cursor over the unclaimed input/output
// ─────────────────────────────────────────────────────────────────────────────

struct Cursor<'a> {
    input: &'a [u8],
    output: &'a mut [u8],
}

/// Cursor pair handed to every block transform.
///
/// [`claim`](IoChain::claim) is the only shared mutable state in a blocked
/// run: it splits the next `in_len` / `out_len` bytes off the unclaimed input
/// and output under one lock, so concurrent transforms always get disjoint
/// ranges.  Once claimed, a range is owned by its transform and needs no
/// further synchronisation.
pub struct IoChain<'a> {
    cursor: Mutex<Cursor<'a>>,
}

impl<'a> IoChain<'a> {
    pub fn new(input: &'a [u8], output: &'a mut [u8]) -> Self {
        IoChain { cursor: Mutex::new(Cursor { input, output }) }
    }

    /// Claim the next `in_len` input bytes and `out_len` output bytes.
    ///
    /// Fails with [`BlockError::BufferTooSmall`] (claiming nothing) when
    /// either side has fewer bytes left.
    pub fn claim(
        &self,
        in_len: usize,
        out_len: usize,
    ) -> Result<(&'a [u8], &'a mut [u8]), BlockError> {
        let mut cur = self.cursor.lock().unwrap_or_else(PoisonError::into_inner);
        if cur.input.len() < in_len || cur.output.len() < out_len {
            return Err(BlockError::BufferTooSmall);
        }
        let input: &'a [u8] = cur.input;
        let (claimed_in, rest_in) = input.split_at(in_len);
        cur.input = rest_in;

        let output: &'a mut [u8] = std::mem::take(&mut cur.output);
        let (claimed_out, rest_out) = output.split_at_mut(out_len);
        cur.output = rest_out;

        Ok((claimed_in, claimed_out))
    }

    /// Unclaimed `(input, output)` byte counts.
    pub fn remaining(&self) -> (usize, usize) {
        let cur = self.cursor.lock().unwrap_or_else(PoisonError::into_inner);
        (cur.input.len(), cur.output.len())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Scheduler
// ─────────────────────────────────────────────────────────────────────────────

/// Apply `transform` block-wise over `size` elements of `elem_size` bytes.
///
/// `transform(chain, block_elems, elem_size)` must claim its ranges from
/// `chain` and return the number of bytes it processed.  A `block_size` of 0
/// selects [`default_block_size`]; any other value must be a multiple of
/// [`BLOCKED_MULT`].
///
/// Returns the sum of the per-block counts plus the verbatim tail bytes.
pub fn run_blocked<F>(
    transform: F,
    input: &[u8],
    output: &mut [u8],
    size: usize,
    elem_size: usize,
    block_size: usize,
) -> Result<usize, BlockError>
where
    F: Fn(&IoChain<'_>, usize, usize) -> Result<usize, BlockError> + Sync,
{
    let block_size = if block_size == 0 { default_block_size(elem_size) } else { block_size };
    if block_size % BLOCKED_MULT != 0 {
        return Err(BlockError::BlockSizeNotMultiple);
    }

    let nbytes = size.checked_mul(elem_size).ok_or(BlockError::BufferTooSmall)?;
    if input.len() < nbytes || output.len() < nbytes {
        return Err(BlockError::BufferTooSmall);
    }

    let chain = IoChain::new(&input[..nbytes], &mut output[..nbytes]);
    let cum_count = AtomicUsize::new(0);
    let first_err: OnceLock<BlockError> = OnceLock::new();

    let run_block = |block_elems: usize| match transform(&chain, block_elems, elem_size) {
        Ok(count) => {
            cum_count.fetch_add(count, Ordering::Relaxed);
        }
        Err(e) => {
            displaylevel!(4, "blocked transform: block of {} elements failed: {}\n", block_elems, e);
            let _ = first_err.set(e);
        }
    };

    (0..size / block_size)
        .into_par_iter()
        .with_max_len(1)
        .for_each(|_| run_block(block_size));

    // The parallel loop has joined; the cursor now sits after the last full block.
    let last_block_size = size % block_size;
    let last_block_size = last_block_size - last_block_size % BLOCKED_MULT;
    if last_block_size > 0 {
        run_block(last_block_size);
    }

    if let Some(e) = first_err.into_inner() {
        return Err(e);
    }

    let leftover_bytes = (size % BLOCKED_MULT) * elem_size;
    let (last_in, last_out) = chain.claim(leftover_bytes, leftover_bytes)?;
    last_out.copy_from_slice(last_in);

    Ok(cum_count.into_inner() + leftover_bytes)
}

/// [`run_blocked`] on an explicit worker pool instead of the current one.
pub fn run_blocked_in<F>(
    pool: &rayon::ThreadPool,
    transform: F,
    input: &[u8],
    output: &mut [u8],
    size: usize,
    elem_size: usize,
    block_size: usize,
) -> Result<usize, BlockError>
where
    F: Fn(&IoChain<'_>, usize, usize) -> Result<usize, BlockError> + Sync + Send,
{
    pool.install(|| run_blocked(transform, input, output, size, elem_size, block_size))
}
