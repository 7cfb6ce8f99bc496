// bdelta: LZ77 byte-stream codec, blocked bitshuffle and the .bdz container

pub mod config;
pub mod endian;
pub mod codec;
pub mod shuffle;
pub mod delta;
pub mod frame;
pub mod util;
pub mod io;
pub mod cli;

#[cfg(feature = "c-abi")]
pub mod abi;

// ── Version constants ────────────────────────────────────────────────────────
pub const BDELTA_VERSION_MAJOR: u32 = 0;
pub const BDELTA_VERSION_MINOR: u32 = 1;
pub const BDELTA_VERSION_RELEASE: u32 = 0;
pub const BDELTA_VERSION_NUMBER: u32 =
    BDELTA_VERSION_MAJOR * 100 * 100 + BDELTA_VERSION_MINOR * 100 + BDELTA_VERSION_RELEASE;
pub const BDELTA_VERSION_STRING: &str = env!("CARGO_PKG_VERSION");

pub fn version_number() -> u32 {
    BDELTA_VERSION_NUMBER
}

pub fn version_string() -> &'static str {
    BDELTA_VERSION_STRING
}

// ── Top-level re-exports ─────────────────────────────────────────────────────
pub use codec::{compress, compress_bound, decompress, CompressError, DecompressError};
pub use shuffle::{bitshuffle, bitunshuffle, default_block_size, BlockError};
