//! File-level compression into `.bdz` frames.

use std::io::Write;
use std::time::Instant;

use anyhow::Context;

use crate::displaylevel;
use crate::frame::compress_frame;
use crate::io::file_io::{open_dst_file, read_src, STDOUT_MARK};
use crate::io::prefs::Prefs;
use crate::util::build_pool;

/// Byte counts for one compressed file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompressStats {
    /// Uncompressed source bytes.
    pub bytes_in: u64,
    /// Frame bytes written to the destination.
    pub bytes_out: u64,
}

impl CompressStats {
    /// Compressed size as a percentage of the input (100 for empty input).
    pub fn ratio(&self) -> f64 {
        if self.bytes_in == 0 {
            100.0
        } else {
            self.bytes_out as f64 / self.bytes_in as f64 * 100.0
        }
    }
}

/// Compress the in-memory `src` and write the frame to `dst`.
pub fn compress_buffer_to(src: &[u8], dst: &str, prefs: &Prefs) -> anyhow::Result<CompressStats> {
    let pool = build_pool(prefs.nb_workers)?;
    displaylevel!(4, "Using {} worker threads\n", pool.current_num_threads());
    let frame_prefs = prefs.frame_prefs();
    let frame = pool.install(|| compress_frame(src, &frame_prefs))?;

    let mut out = open_dst_file(dst, prefs)?;
    out.write_all(&frame).with_context(|| format!("{}: write error", dst))?;
    out.flush().with_context(|| format!("{}: write error", dst))?;

    Ok(CompressStats { bytes_in: src.len() as u64, bytes_out: frame.len() as u64 })
}

/// Compress a single file.
///
/// `src` may be `"stdin"`; `dst` may be `"stdout"` or the null device.
pub fn compress_filename(src: &str, dst: &str, prefs: &Prefs) -> anyhow::Result<CompressStats> {
    let start = Instant::now();
    let data = read_src(src)?;
    displaylevel!(3, "Compressing {} ({} bytes)\n", src, data.len());

    let stats = compress_buffer_to(&data, dst, prefs)?;

    displaylevel!(
        2,
        "{:<20} : Compressed {} bytes into {} bytes ==> {:.2}%\n",
        src,
        stats.bytes_in,
        stats.bytes_out,
        stats.ratio()
    );
    displaylevel!(3, "Done in {:.2} s\n", start.elapsed().as_secs_f64());

    if prefs.remove_src_file && src != crate::io::file_io::STDIN_MARK {
        std::fs::remove_file(src).with_context(|| format!("{}: cannot remove", src))?;
    }
    Ok(stats)
}

/// Compress several files, writing each to `<name><suffix>` (or all to
/// stdout when `suffix` is `"stdout"`).
///
/// Returns the number of files that could not be compressed.
pub fn compress_multiple_filenames(srcs: &[&str], suffix: &str, prefs: &Prefs) -> usize {
    let mut missed = 0;
    for &src in srcs {
        let dst = if suffix == STDOUT_MARK { STDOUT_MARK.to_owned() } else { format!("{}{}", src, suffix) };
        if let Err(e) = compress_filename(src, &dst, prefs) {
            displaylevel!(1, "bdelta: {:#}\n", e);
            missed += 1;
        }
    }
    missed
}
