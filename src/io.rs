//! Public API surface for `.bdz` file operations.
//!
//! This module assembles the file-layer sub-modules and re-exports the
//! symbols consumed by the CLI and library users.

pub mod compress;
pub mod decompress;
pub mod file_io;
pub mod prefs;

// ── Core type re-exports ─────────────────────────────────────────────────────
pub use prefs::Prefs;
pub use compress::CompressStats;
pub use decompress::DecompressStats;

// ── Special I/O sentinels ────────────────────────────────────────────────────
pub use file_io::{NUL_MARK, STDIN_MARK, STDOUT_MARK};

// ── Compression ──────────────────────────────────────────────────────────────
pub use compress::{compress_buffer_to, compress_filename, compress_multiple_filenames};

// ── Decompression ────────────────────────────────────────────────────────────
pub use decompress::{decompress_filename, decompress_multiple_filenames, test_filename};
