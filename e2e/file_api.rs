//! E2E: file-level API.
//!
//! Exercises `compress_filename`, `decompress_filename`, `test_filename` and
//! the multiple-file helpers against real files in a temporary directory.

use std::fs;
use std::path::{Path, PathBuf};

use bdelta::frame::frame_info;
use bdelta::io::{
    compress_filename, compress_multiple_filenames, decompress_filename,
    decompress_multiple_filenames, test_filename, Prefs, NUL_MARK,
};
use tempfile::TempDir;

fn s(p: &Path) -> &str {
    p.to_str().unwrap()
}

fn write_input(dir: &TempDir, name: &str, data: &[u8]) -> PathBuf {
    let p = dir.path().join(name);
    fs::write(&p, data).unwrap();
    p
}

fn sample(len: usize) -> Vec<u8> {
    (0..len as u32).flat_map(|i| ((i / 8) as u16).to_le_bytes()).take(len).collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Single file
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn compress_then_decompress_file() {
    let dir = TempDir::new().unwrap();
    let data = sample(300_000);
    let src = write_input(&dir, "data.bin", &data);
    let packed = dir.path().join("data.bin.bdz");
    let out = dir.path().join("data.out");

    let mut prefs = Prefs::default();
    prefs.set_chunk_size(64 << 10);
    prefs.set_nb_workers(2);

    let stats = compress_filename(s(&src), s(&packed), &prefs).unwrap();
    assert_eq!(stats.bytes_in, data.len() as u64);
    assert!(stats.ratio() < 100.0);

    let h = frame_info(&fs::read(&packed).unwrap()).unwrap();
    assert_eq!(h.chunk_size, 64 << 10);
    assert_eq!(h.chunk_count, 5);

    let d = decompress_filename(s(&packed), s(&out), &prefs).unwrap();
    assert_eq!(d.decompressed_bytes, data.len() as u64);
    assert_eq!(fs::read(&out).unwrap(), data);
}

#[test]
fn shuffled_file_round_trips() {
    let dir = TempDir::new().unwrap();
    let data = sample(100_001);
    let src = write_input(&dir, "typed.bin", &data);
    let packed = dir.path().join("typed.bdz");
    let out = dir.path().join("typed.out");

    let mut prefs = Prefs::default();
    prefs.set_elem_size(2);
    compress_filename(s(&src), s(&packed), &prefs).unwrap();
    assert!(frame_info(&fs::read(&packed).unwrap()).unwrap().shuffled);

    decompress_filename(s(&packed), s(&out), &Prefs::default()).unwrap();
    assert_eq!(fs::read(&out).unwrap(), data);
}

#[test]
fn existing_destination_needs_overwrite() {
    let dir = TempDir::new().unwrap();
    let src = write_input(&dir, "a", b"some data some data some data");
    let dst = write_input(&dir, "a.bdz", b"keep me");

    let mut prefs = Prefs::default();
    assert!(compress_filename(s(&src), s(&dst), &prefs).is_err());
    assert_eq!(fs::read(&dst).unwrap(), b"keep me");

    prefs.set_overwrite(true);
    compress_filename(s(&src), s(&dst), &prefs).unwrap();
    assert_ne!(fs::read(&dst).unwrap(), b"keep me");
}

#[test]
fn test_mode_verifies_without_writing() {
    let dir = TempDir::new().unwrap();
    let src = write_input(&dir, "t.bin", &sample(10_000));
    let packed = dir.path().join("t.bin.bdz");
    compress_filename(s(&src), s(&packed), &Prefs::default()).unwrap();

    let stats = test_filename(s(&packed), &Prefs::default()).unwrap();
    assert_eq!(stats.decompressed_bytes, 10_000);
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 2);

    let mut frame = fs::read(&packed).unwrap();
    let last = frame.len() - 1;
    frame[last] ^= 1;
    fs::write(&packed, &frame).unwrap();
    let err = test_filename(s(&packed), &Prefs::default()).unwrap_err();
    assert!(format!("{:#}", err).contains("checksum"), "{:#}", err);
}

#[test]
fn remove_source_after_success() {
    let dir = TempDir::new().unwrap();
    let src = write_input(&dir, "gone.txt", &sample(5000));
    let packed = dir.path().join("gone.txt.bdz");

    let mut prefs = Prefs::default();
    prefs.set_remove_src_file(true);
    compress_filename(s(&src), s(&packed), &prefs).unwrap();
    assert!(!src.exists());
    assert!(packed.exists());

    // decoding to the null device keeps the source
    decompress_filename(s(&packed), NUL_MARK, &prefs).unwrap();
    assert!(packed.exists());
}

#[test]
fn missing_source_is_an_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope");
    let out = dir.path().join("nope.bdz");
    assert!(compress_filename(s(&missing), s(&out), &Prefs::default()).is_err());
    assert!(!out.exists());
}

// ─────────────────────────────────────────────────────────────────────────────
// Multiple files
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn multiple_files_round_trip() {
    let dir = TempDir::new().unwrap();
    let names = ["one.dat", "two.dat", "three.dat"];
    let inputs: Vec<PathBuf> = names
        .iter()
        .enumerate()
        .map(|(i, n)| write_input(&dir, n, &sample(1000 * (i + 1))))
        .collect();
    let srcs: Vec<&str> = inputs.iter().map(|p| s(p)).collect();

    assert_eq!(compress_multiple_filenames(&srcs, ".bdz", &Prefs::default()), 0);

    for p in &inputs {
        fs::remove_file(p).unwrap();
    }
    let packed: Vec<String> = srcs.iter().map(|p| format!("{}.bdz", p)).collect();
    let packed_refs: Vec<&str> = packed.iter().map(String::as_str).collect();
    assert_eq!(decompress_multiple_filenames(&packed_refs, ".bdz", &Prefs::default()), 0);

    for (i, p) in inputs.iter().enumerate() {
        assert_eq!(fs::read(p).unwrap(), sample(1000 * (i + 1)));
    }
}

#[test]
fn multiple_files_count_failures() {
    let dir = TempDir::new().unwrap();
    let good = write_input(&dir, "ok.dat", &sample(100));
    let missing = dir.path().join("missing.dat");
    let srcs = [s(&good), s(&missing)];
    assert_eq!(compress_multiple_filenames(&srcs, ".bdz", &Prefs::default()), 1);

    let wrong_suffix = write_input(&dir, "plain.txt", b"not a frame");
    assert_eq!(decompress_multiple_filenames(&[s(&wrong_suffix)], ".bdz", &Prefs::default()), 1);
}
