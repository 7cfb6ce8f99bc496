//! Big-endian integer codec.
//!
//! Every integer that lands in a persisted header
//! (see [`crate::frame`]) goes through these helpers so the byte layout stays
//! identical across versions and host endianness.
//!
//! The slice-based `write_*` / `read_*` functions operate on the first 4 or 8
//! bytes of the buffer and panic if it is shorter, like indexing does.

/// Encode `num` as 8 big-endian bytes.
#[inline]
pub fn encode_u64_be(num: u64) -> [u8; 8] {
    num.to_be_bytes()
}

/// Decode 8 big-endian bytes.
#[inline]
pub fn decode_u64_be(bytes: [u8; 8]) -> u64 {
    u64::from_be_bytes(bytes)
}

/// Encode `num` as 4 big-endian bytes.
#[inline]
pub fn encode_u32_be(num: u32) -> [u8; 4] {
    num.to_be_bytes()
}

/// Decode 4 big-endian bytes.
#[inline]
pub fn decode_u32_be(bytes: [u8; 4]) -> u32 {
    u32::from_be_bytes(bytes)
}

/// Write a 64-bit unsigned integer to `buf[..8]` in big-endian order.
#[inline]
pub fn write_u64_be(buf: &mut [u8], num: u64) {
    buf[..8].copy_from_slice(&encode_u64_be(num));
}

/// Read a 64-bit unsigned integer from `buf[..8]` in big-endian order.
#[inline]
pub fn read_u64_be(buf: &[u8]) -> u64 {
    let mut b = [0u8; 8];
    b.copy_from_slice(&buf[..8]);
    decode_u64_be(b)
}

/// Write a 32-bit unsigned integer to `buf[..4]` in big-endian order.
#[inline]
pub fn write_u32_be(buf: &mut [u8], num: u32) {
    buf[..4].copy_from_slice(&encode_u32_be(num));
}

/// Read a 32-bit unsigned integer from `buf[..4]` in big-endian order.
#[inline]
pub fn read_u32_be(buf: &[u8]) -> u32 {
    let mut b = [0u8; 4];
    b.copy_from_slice(&buf[..4]);
    decode_u32_be(b)
}
