//! Command-line argument parsing for the `bdelta` binary.
//!
//! The entry points are [`parse_args`] (reads `std::env::args()`) and
//! [`parse_args_from`] (takes an explicit list, suitable for unit-testing).
//! Both return a [`ParsedArgs`] value holding the resolved operation, file
//! names and file-layer [`Prefs`].
//!
//! Positional arguments are `INPUT [OUTPUT]`, or any number of inputs with
//! `-m`.  A missing input means stdin.  Errors from clap (including the
//! `--help` / `--version` displays) come back as a `clap::Error` inside the
//! `anyhow::Error`, so the caller can let clap print and exit.

use anyhow::bail;
use clap::{ArgAction, Parser};

use crate::cli::arg_utils::parse_size;
use crate::cli::constants::BDZ_EXTENSION;
use crate::cli::op_mode::{determine_op_mode, OpMode};
use crate::config::{init_nb_workers, CHUNK_SIZE_MIN};
use crate::frame::types::{CHUNK_SIZE_MAX, ELEM_SIZE_MAX};
use crate::io::file_io::{NUL_MARK, STDIN_MARK, STDOUT_MARK};
use crate::io::prefs::Prefs;

// ── clap definition ──────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "bdelta",
    version,
    about = "Compress or decompress files with the bdelta LZ77 codec",
    after_help = "With no INPUT, or when INPUT is -, read standard input."
)]
struct Cli {
    /// Force compression
    #[arg(short = 'z', long = "compress", conflicts_with_all = ["decompress", "test"])]
    compress: bool,

    /// Decompress
    #[arg(short = 'd', long = "decompress", conflicts_with = "test")]
    decompress: bool,

    /// Test the integrity of compressed files (no output written)
    #[arg(short = 't', long = "test")]
    test: bool,

    /// Bit-shuffle chunks as ELEM-byte elements before compressing
    #[arg(long = "shuffle", value_name = "ELEM")]
    shuffle: Option<usize>,

    /// Number of worker threads (0 = one per core)
    #[arg(short = 'T', long = "threads", value_name = "N")]
    threads: Option<usize>,

    /// Chunk size, e.g. 64K or 4M
    #[arg(short = 'B', long = "chunk-size", value_name = "SIZE", value_parser = parse_size)]
    chunk_size: Option<usize>,

    /// Overwrite existing output files
    #[arg(short = 'f', long = "force")]
    force: bool,

    /// Write to standard output
    #[arg(short = 'c', long = "stdout")]
    stdout: bool,

    /// Treat every positional argument as an input file
    #[arg(short = 'm', long = "multiple")]
    multiple: bool,

    /// Remove the source file after a successful operation
    #[arg(long = "rm")]
    rm: bool,

    /// More verbose output (repeatable)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,

    /// Less verbose output (repeatable)
    #[arg(short = 'q', long = "quiet", action = ArgAction::Count)]
    quiet: u8,

    #[arg(value_name = "FILE")]
    files: Vec<String>,
}

// ── Public output type ───────────────────────────────────────────────────────

/// Complete set of options and filenames produced by argument parsing.
#[derive(Debug)]
pub struct ParsedArgs {
    /// File-layer preferences.
    pub prefs: Prefs,
    /// Resolved operation mode; an unflagged input is classified by its suffix.
    pub op_mode: OpMode,
    /// `-c` given: output goes to stdout even if it is a terminal.
    pub force_stdout: bool,
    /// `-m` given: every positional argument is an input.
    pub multiple_inputs: bool,
    /// Single input (`"stdin"` when none was given).
    pub input_filename: String,
    /// Single output, resolved from flags and the input name.
    pub output_filename: String,
    /// Inputs in multiple-input mode.
    pub in_file_names: Vec<String>,
    /// Display level after applying `-v` / `-q` to the default of 2.
    pub display_level: u32,
}

// ── Public API ───────────────────────────────────────────────────────────────

/// Parse `std::env::args()`.
pub fn parse_args() -> anyhow::Result<ParsedArgs> {
    parse_args_from(std::env::args())
}

/// Parse an explicit argument list; the first item is the program name.
pub fn parse_args_from<I, T>(argv: I) -> anyhow::Result<ParsedArgs>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = Cli::try_parse_from(argv)?;

    let display_level = (2 + cli.verbose as u32).saturating_sub(cli.quiet as u32);

    let mut prefs = Prefs::default();
    prefs.set_overwrite(cli.force);
    prefs.set_remove_src_file(cli.rm);
    prefs.set_nb_workers(cli.threads.unwrap_or_else(init_nb_workers));

    if let Some(size) = cli.chunk_size {
        if !(CHUNK_SIZE_MIN..=CHUNK_SIZE_MAX).contains(&size) {
            bail!("bad usage: chunk size must be between {} and {} bytes", CHUNK_SIZE_MIN, CHUNK_SIZE_MAX);
        }
        prefs.set_chunk_size(size);
    }
    if let Some(elem) = cli.shuffle {
        if elem == 0 || elem > ELEM_SIZE_MAX {
            bail!("bad usage: --shuffle element size must be between 1 and {}", ELEM_SIZE_MAX);
        }
        prefs.set_elem_size(elem);
    }

    let mut files = cli.files.into_iter().map(|f| if f == "-" { STDIN_MARK.to_owned() } else { f });
    let (input_filename, explicit_output, in_file_names) = if cli.multiple {
        let all: Vec<String> = files.collect();
        if all.is_empty() {
            bail!("bad usage: -m requires at least one input file");
        }
        (String::new(), None, all)
    } else {
        let input = files.next().unwrap_or_else(|| STDIN_MARK.to_owned());
        let output = files.next();
        if let Some(extra) = files.next() {
            bail!("bad usage: unexpected extra argument '{}' (use -m for several inputs)", extra);
        }
        (input, output, Vec::new())
    };

    let op_mode = if cli.test {
        OpMode::Test
    } else if cli.decompress {
        OpMode::Decompress
    } else if cli.compress {
        OpMode::Compress
    } else if cli.multiple {
        OpMode::Compress
    } else {
        determine_op_mode(&input_filename)
    };

    let output_filename = if cli.multiple {
        if cli.stdout { STDOUT_MARK.to_owned() } else { String::new() }
    } else {
        resolve_output(op_mode, &input_filename, explicit_output, cli.stdout)?
    };

    Ok(ParsedArgs {
        prefs,
        op_mode,
        force_stdout: cli.stdout,
        multiple_inputs: cli.multiple,
        input_filename,
        output_filename,
        in_file_names,
        display_level,
    })
}

/// Pick the destination for a single-input run.
///
/// Test mode discards; `-c` or a stdin source means stdout; otherwise the
/// name is derived by adding or removing [`BDZ_EXTENSION`].
pub fn resolve_output(
    op_mode: OpMode,
    input: &str,
    explicit: Option<String>,
    to_stdout: bool,
) -> anyhow::Result<String> {
    if op_mode == OpMode::Test {
        return Ok(NUL_MARK.to_owned());
    }
    if to_stdout {
        return Ok(STDOUT_MARK.to_owned());
    }
    if let Some(out) = explicit {
        return Ok(out);
    }
    if input == STDIN_MARK {
        return Ok(STDOUT_MARK.to_owned());
    }
    match op_mode {
        OpMode::Decompress => match input.strip_suffix(BDZ_EXTENSION) {
            Some(stem) if !stem.is_empty() => Ok(stem.to_owned()),
            _ => bail!("cannot determine an output filename for {} (no {} suffix)", input, BDZ_EXTENSION),
        },
        _ => Ok(format!("{}{}", input, BDZ_EXTENSION)),
    }
}
