//! Binary entry point for the `bdelta` command-line tool.
//!
//! # Control flow
//!
//! 1. [`parse_args`] processes all flags and builds a [`ParsedArgs`] value.
//! 2. [`run`] checks the destination, dispatches to the file layer and
//!    returns an exit code.

use std::io::IsTerminal;

use bdelta::cli::args::{parse_args, ParsedArgs};
use bdelta::cli::constants::{set_display_level, BDZ_EXTENSION, COMPRESSOR_NAME};
use bdelta::cli::op_mode::OpMode;
use bdelta::io::{
    compress_filename, compress_multiple_filenames, decompress_filename,
    decompress_multiple_filenames, test_filename, NUL_MARK, STDOUT_MARK,
};

/// Execute the operation selected by argument parsing.
///
/// Returns the process exit code (0 = success, non-zero = error).
fn run(args: ParsedArgs) -> i32 {
    set_display_level(args.display_level);
    bdelta::displaylevel!(
        3,
        "*** {} v{} {}-bit ***\n",
        COMPRESSOR_NAME,
        bdelta::BDELTA_VERSION_STRING,
        std::mem::size_of::<*const ()>() * 8
    );

    let prefs = args.prefs;

    // Compressed data on a terminal is never what the user wants.
    if args.op_mode == OpMode::Compress
        && args.output_filename == STDOUT_MARK
        && !args.force_stdout
        && std::io::stdout().is_terminal()
    {
        bdelta::displaylevel!(1, "{}: refusing to write compressed data to a terminal (use -c to force)\n", COMPRESSOR_NAME);
        return 1;
    }

    if args.multiple_inputs {
        let srcs: Vec<&str> = args.in_file_names.iter().map(String::as_str).collect();
        let missed = match args.op_mode {
            OpMode::Decompress => {
                let suffix = if args.output_filename == STDOUT_MARK { STDOUT_MARK } else { BDZ_EXTENSION };
                decompress_multiple_filenames(&srcs, suffix, &prefs)
            }
            OpMode::Test => decompress_multiple_filenames(&srcs, NUL_MARK, &prefs),
            OpMode::Compress => {
                let suffix = if args.output_filename == STDOUT_MARK { STDOUT_MARK } else { BDZ_EXTENSION };
                compress_multiple_filenames(&srcs, suffix, &prefs)
            }
        };
        return i32::from(missed > 0);
    }

    let src = args.input_filename.as_str();
    let dst = args.output_filename.as_str();
    let result = match args.op_mode {
        OpMode::Test => test_filename(src, &prefs).map(|_| ()),
        OpMode::Decompress => decompress_filename(src, dst, &prefs).map(|_| ()),
        OpMode::Compress => compress_filename(src, dst, &prefs).map(|_| ()),
    };

    match result {
        Ok(()) => 0,
        Err(e) => {
            bdelta::displaylevel!(1, "{}: {:#}\n", COMPRESSOR_NAME, e);
            1
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    let args = match parse_args() {
        Ok(a) => a,
        Err(e) => match e.downcast::<clap::Error>() {
            // --help / --version print and exit 0; usage errors exit 2.
            Ok(clap_err) => clap_err.exit(),
            Err(e) => {
                bdelta::display!("{}: {}\n", COMPRESSOR_NAME, e);
                std::process::exit(1);
            }
        },
    };

    let exit_code = run(args);
    std::process::exit(exit_code);
}
