//! File-level decompression and integrity testing of `.bdz` frames.

use std::io::Write;
use std::time::Instant;

use anyhow::Context;

use crate::displaylevel;
use crate::frame::decompress_frame;
use crate::io::file_io::{open_dst_file, read_src, NUL_MARK, STDIN_MARK, STDOUT_MARK};
use crate::io::prefs::Prefs;
use crate::util::build_pool;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecompressStats {
    pub decompressed_bytes: u64,
}

/// Decompress a single `.bdz` file.
///
/// `src` may be `"stdin"`; `dst` may be `"stdout"` or the null device.
pub fn decompress_filename(src: &str, dst: &str, prefs: &Prefs) -> anyhow::Result<DecompressStats> {
    let start = Instant::now();
    let frame = read_src(src)?;

    let pool = build_pool(prefs.nb_workers)?;
    let data = pool
        .install(|| decompress_frame(&frame))
        .with_context(|| format!("{}: cannot decode", src))?;

    let mut out = open_dst_file(dst, prefs)?;
    out.write_all(&data).with_context(|| format!("{}: write error", dst))?;
    out.flush().with_context(|| format!("{}: write error", dst))?;

    displaylevel!(2, "{:<20} : decoded {} bytes\n", src, data.len());
    displaylevel!(3, "Done in {:.2} s\n", start.elapsed().as_secs_f64());

    if prefs.remove_src_file && src != STDIN_MARK && dst != NUL_MARK {
        std::fs::remove_file(src).with_context(|| format!("{}: cannot remove", src))?;
    }
    Ok(DecompressStats { decompressed_bytes: data.len() as u64 })
}

/// Decode `src` fully and verify its checksum without writing anything.
pub fn test_filename(src: &str, prefs: &Prefs) -> anyhow::Result<DecompressStats> {
    let mut prefs = prefs.clone();
    prefs.set_remove_src_file(false);
    decompress_filename(src, NUL_MARK, &prefs)
}

/// Decompress several files, stripping `suffix` from each name (or writing
/// all to stdout / the null device when `suffix` is one of those sentinels).
///
/// Returns the number of files that were skipped or failed.
pub fn decompress_multiple_filenames(srcs: &[&str], suffix: &str, prefs: &Prefs) -> usize {
    let mut missed = 0;
    for &src in srcs {
        let dst = if suffix == STDOUT_MARK || suffix == NUL_MARK {
            suffix.to_owned()
        } else if let Some(stem) = src.strip_suffix(suffix) {
            stem.to_owned()
        } else {
            displaylevel!(1, "bdelta: {}: unknown suffix -- ignored\n", src);
            missed += 1;
            continue;
        };
        if let Err(e) = decompress_filename(src, &dst, prefs) {
            displaylevel!(1, "bdelta: {:#}\n", e);
            missed += 1;
        }
    }
    missed
}
