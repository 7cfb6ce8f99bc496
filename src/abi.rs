//! C-ABI shims: export the bdelta and bitshuffle entry points with C
//! signatures.
//!
//! Enabled with:
//!   cargo build --release --features c-abi
//!
//! The produced `target/release/libbdelta.a` can be linked by a C host in
//! place of `bdelta.o` / `bitshuffle-generic.o`.

use std::os::raw::{c_int, c_void};
use std::slice;

use crate::codec::{compress, decompress};
use crate::shuffle::{bitshuffle, bitunshuffle, default_block_size};

// ─── helpers ─────────────────────────────────────────────────────────────────

/// Return 0 for any failure (error sentinel of the C API).
#[inline(always)]
fn ok_or_zero<E>(r: Result<usize, E>) -> c_int {
    match r {
        Ok(n) => c_int::try_from(n).unwrap_or(0),
        Err(_) => 0,
    }
}

/// Borrow the `(input, length)` / `(output, maxout)` pairs, or `None` when
/// either is unusable.
unsafe fn buffers<'a>(
    input: *const c_void,
    length: c_int,
    output: *mut c_void,
    maxout: c_int,
) -> Option<(&'a [u8], &'a mut [u8])> {
    if length < 0 || maxout < 0 || (length > 0 && input.is_null()) || (maxout > 0 && output.is_null()) {
        return None;
    }
    let src = if length == 0 { &[][..] } else { slice::from_raw_parts(input as *const u8, length as usize) };
    let dst = if maxout == 0 {
        &mut [][..]
    } else {
        slice::from_raw_parts_mut(output as *mut u8, maxout as usize)
    };
    Some((src, dst))
}

// ─────────────────────────────────────────────────────────────────────────────
// bdelta_compress
//
// int bdelta_compress(const void* input, int length, void* output, int maxout,
//                     const void* dref, int drefsize);
//
// Returns the number of bytes written, or 0 on failure.  `dref` / `drefsize`
// are accepted and ignored.
// ─────────────────────────────────────────────────────────────────────────────
#[no_mangle]
pub unsafe extern "C" fn bdelta_compress(
    input: *const c_void,
    length: c_int,
    output: *mut c_void,
    maxout: c_int,
    _dref: *const c_void,
    _drefsize: c_int,
) -> c_int {
    match buffers(input, length, output, maxout) {
        Some((src, dst)) => ok_or_zero(compress(src, dst)),
        None => 0,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// bdelta_decompress
//
// int bdelta_decompress(const void* input, int length, void* output, int maxout,
//                       const void* dref, int drefsize);
//
// Returns the number of bytes written, or 0 on failure.
// ─────────────────────────────────────────────────────────────────────────────
#[no_mangle]
pub unsafe extern "C" fn bdelta_decompress(
    input: *const c_void,
    length: c_int,
    output: *mut c_void,
    maxout: c_int,
    _dref: *const c_void,
    _drefsize: c_int,
) -> c_int {
    match buffers(input, length, output, maxout) {
        Some((src, dst)) => ok_or_zero(decompress(src, dst)),
        None => 0,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// bshuf_bitshuffle / bshuf_bitunshuffle
//
// int64_t bshuf_bitshuffle(const void* in, void* out, size_t size,
//                          size_t elem_size, size_t block_size);
//
// Returns the number of bytes processed, or a negative error code.
// ─────────────────────────────────────────────────────────────────────────────

unsafe fn shuffle_buffers<'a>(
    input: *const c_void,
    output: *mut c_void,
    size: usize,
    elem_size: usize,
) -> Option<(&'a [u8], &'a mut [u8])> {
    let nbytes = size.checked_mul(elem_size)?;
    if nbytes == 0 {
        return Some((&[][..], &mut [][..]));
    }
    if input.is_null() || output.is_null() {
        return None;
    }
    Some((
        slice::from_raw_parts(input as *const u8, nbytes),
        slice::from_raw_parts_mut(output as *mut u8, nbytes),
    ))
}

#[no_mangle]
pub unsafe extern "C" fn bshuf_bitshuffle(
    input: *const c_void,
    output: *mut c_void,
    size: usize,
    elem_size: usize,
    block_size: usize,
) -> i64 {
    match shuffle_buffers(input, output, size, elem_size) {
        Some((src, dst)) => match bitshuffle(src, dst, size, elem_size, block_size) {
            Ok(n) => n as i64,
            Err(e) => e.code(),
        },
        None => crate::shuffle::BlockError::BufferTooSmall.code(),
    }
}

#[no_mangle]
pub unsafe extern "C" fn bshuf_bitunshuffle(
    input: *const c_void,
    output: *mut c_void,
    size: usize,
    elem_size: usize,
    block_size: usize,
) -> i64 {
    match shuffle_buffers(input, output, size, elem_size) {
        Some((src, dst)) => match bitunshuffle(src, dst, size, elem_size, block_size) {
            Ok(n) => n as i64,
            Err(e) => e.code(),
        },
        None => crate::shuffle::BlockError::BufferTooSmall.code(),
    }
}

#[no_mangle]
pub extern "C" fn bshuf_default_block_size(elem_size: usize) -> usize {
    default_block_size(elem_size)
}
