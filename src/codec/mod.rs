//! bdelta byte-stream codec.
//!
//! This module contains the bdelta token-stream engine:
//!
//! | Submodule      | Responsibility |
//! |----------------|----------------|
//! | [`types`]      | Wire-format constants and the 2-byte hash. |
//! | [`hash`]       | Match finder: single-slot hash cache, match validation and extension. |
//! | [`encode`]     | Token encoder: literal runs with retro-patched counts, match tokens. |
//! | [`compress`]   | Greedy single-pass compressor driving the two above. |
//! | [`decompress`] | Bounds-checked token decoder. |
//!
//! # Token stream
//!
//! ```text
//! ctrl < 32      literal run: ctrl + 1 raw bytes follow
//! ctrl >= 32     match: ctrl >> 5 = length class, ctrl & 31 = distance high bits
//!   class 7        + length extension bytes, each added, ending at the first < 255
//!                  + distance low byte
//!   high 31, low 255
//!                  + two bytes (high, low) added to 8192
//! ```
//!
//! Bit 5 of the first byte is forced on to tag the bdelta variant.

pub mod compress;
pub mod decompress;
pub mod encode;
pub mod hash;
pub mod types;

pub use compress::{compress, compress_bound, CompressError};
pub use decompress::{decompress, DecompressError};
pub use types::{MAX_DISTANCE, MAX_FARDISTANCE, MAX_INPUT_SIZE};
