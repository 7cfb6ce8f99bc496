//! Command-line interface for the `bdelta` binary.
//!
//! | Submodule     | Responsibility |
//! |---------------|---------------|
//! | [`constants`] | Program identity strings, size multipliers, the shared `DISPLAY_LEVEL` atomic and display macros. |
//! | [`arg_utils`] | Size parsing with K/M/G suffixes. |
//! | [`op_mode`]   | `OpMode` enum and extension-based mode inference. |
//! | [`args`]      | `ParsedArgs`: clap-based parsing into the final set of runtime options. |
//!
//! Typical call sequence: `parse_args` → dispatch to the I/O layer.

pub mod constants;
pub mod arg_utils;
pub mod op_mode;
pub mod args;
