//! Operation mode selection for the CLI.

use crate::cli::constants::BDZ_EXTENSION;

/// What the CLI should do with its inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpMode {
    Compress,
    Decompress,
    /// Verify frame integrity without writing output.
    Test,
}

/// Infer the operation mode from `filename`'s extension.
pub fn determine_op_mode(filename: &str) -> OpMode {
    if filename.ends_with(BDZ_EXTENSION) {
        OpMode::Decompress
    } else {
        OpMode::Compress
    }
}
