//! Byte and word delta filters against a reference buffer.
//!
//! `encode*` replaces each element of `dest` with its difference from the
//! matching element of `src`; `decode*` adds it back.  All arithmetic wraps.
//! The 32-bit variants work on native-endian `u32` words and only touch the
//! 4-byte-aligned prefix; trailing bytes are left alone.
//!
//! Both slices are walked up to the shorter of the two lengths, and each
//! function returns the number of bytes examined.

const WORD: usize = 4;

#[inline]
fn word(b: &[u8]) -> u32 {
    u32::from_ne_bytes([b[0], b[1], b[2], b[3]])
}

pub fn encode8(src: &[u8], dest: &mut [u8]) -> usize {
    let n = src.len().min(dest.len());
    for (d, &s) in dest[..n].iter_mut().zip(&src[..n]) {
        *d = d.wrapping_sub(s);
    }
    n
}

pub fn decode8(src: &[u8], dest: &mut [u8]) -> usize {
    let n = src.len().min(dest.len());
    for (d, &s) in dest[..n].iter_mut().zip(&src[..n]) {
        *d = d.wrapping_add(s);
    }
    n
}

pub fn encode32(src: &[u8], dest: &mut [u8]) -> usize {
    let n = src.len().min(dest.len());
    let words = n / WORD * WORD;
    for (d, s) in dest[..words].chunks_exact_mut(WORD).zip(src[..words].chunks_exact(WORD)) {
        d.copy_from_slice(&word(d).wrapping_sub(word(s)).to_ne_bytes());
    }
    n
}

pub fn decode32(src: &[u8], dest: &mut [u8]) -> usize {
    let n = src.len().min(dest.len());
    let words = n / WORD * WORD;
    for (d, s) in dest[..words].chunks_exact_mut(WORD).zip(src[..words].chunks_exact(WORD)) {
        d.copy_from_slice(&word(d).wrapping_add(word(s)).to_ne_bytes());
    }
    n
}
