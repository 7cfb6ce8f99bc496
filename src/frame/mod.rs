//! `.bdz` container: a chunked, checksummed wrapper around bdelta streams
//! used by the command-line tool.
//!
//! | Submodule      | Responsibility |
//! |----------------|----------------|
//! | [`types`]      | Layout constants, [`FrameHeader`], [`FramePrefs`], [`FrameError`]. |
//! | [`header`]     | Header serialisation and validation. |
//! | [`compress`]   | Parallel chunk compression into a complete frame. |
//! | [`decompress`] | Chunk-table walk, parallel decode, checksum verification. |

pub mod compress;
pub mod decompress;
pub mod header;
pub mod types;

pub use compress::{compress_frame, compress_frame_bound};
pub use decompress::{decompress_frame, frame_info};
pub use types::{FrameError, FrameHeader, FramePrefs};
