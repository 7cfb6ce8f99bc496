//! Source and destination resolution for the file layer.
//!
//! - [`read_src`]: reads a whole source into memory, handling the `"stdin"`
//!   sentinel and rejecting directories.
//! - [`open_dst_file`]: resolves a path to a [`DstFile`], handling the
//!   `"stdout"` and null-device sentinels and enforcing the overwrite policy.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Read, Write};
use std::path::Path;

use anyhow::{bail, Context};

use crate::displaylevel;
use crate::io::prefs::Prefs;

// ---------------------------------------------------------------------------
// Sentinel strings
// ---------------------------------------------------------------------------

/// Sentinel: read from standard input.
pub const STDIN_MARK: &str = "stdin";

/// Sentinel: write to standard output.
pub const STDOUT_MARK: &str = "stdout";

/// Sentinel: discard output.
#[cfg(windows)]
pub const NUL_MARK: &str = "nul";
#[cfg(not(windows))]
pub const NUL_MARK: &str = "/dev/null";

// ---------------------------------------------------------------------------
// Source
// ---------------------------------------------------------------------------

/// Read the whole of `path` (or stdin) into memory.
pub fn read_src(path: &str) -> anyhow::Result<Vec<u8>> {
    let mut buf = Vec::new();
    if path == STDIN_MARK {
        displaylevel!(4, "Using stdin for input\n");
        io::stdin().lock().read_to_end(&mut buf).context("stdin: read error")?;
        return Ok(buf);
    }

    if Path::new(path).is_dir() {
        bail!("{}: is a directory -- ignored", path);
    }
    File::open(path)
        .and_then(|mut f| f.read_to_end(&mut buf))
        .with_context(|| format!("{}: cannot read", path))?;
    Ok(buf)
}

// ---------------------------------------------------------------------------
// Destination
// ---------------------------------------------------------------------------

/// A write-capable destination produced by [`open_dst_file`].
pub struct DstFile {
    inner: Box<dyn Write>,
    pub is_stdout: bool,
}

impl Write for DstFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.write(buf)
    }
    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// Open a destination for writing.
///
/// An existing regular file is only replaced when `prefs.overwrite` is set.
pub fn open_dst_file(path: &str, prefs: &Prefs) -> anyhow::Result<DstFile> {
    if path == STDOUT_MARK {
        displaylevel!(4, "Using stdout for output\n");
        return Ok(DstFile { inner: Box::new(io::stdout()), is_stdout: true });
    }

    if path == NUL_MARK {
        return Ok(DstFile { inner: Box::new(io::sink()), is_stdout: false });
    }

    if !prefs.overwrite && Path::new(path).exists() {
        bail!("{} already exists; not overwritten (use -f to force)", path);
    }

    let f = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .with_context(|| format!("{}: cannot open for writing", path))?;
    Ok(DstFile { inner: Box::new(BufWriter::new(f)), is_stdout: false })
}
