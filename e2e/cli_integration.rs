// e2e/cli_integration.rs: black-box tests of the `bdelta` binary.
//
// Covers compress/decompress dispatch, output naming, test mode, stdout
// streaming, the overwrite policy, --shuffle, and exit codes.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tempfile::TempDir;

/// Locate the `bdelta` binary produced by Cargo.
fn bdelta_bin() -> PathBuf {
    // CARGO_BIN_EXE_bdelta is set by Cargo when running integration tests.
    // Fall back to walking up from the test binary location.
    if let Ok(p) = std::env::var("CARGO_BIN_EXE_bdelta") {
        return PathBuf::from(p);
    }
    let mut p = std::env::current_exe().unwrap();
    p.pop();
    if p.ends_with("deps") {
        p.pop();
    }
    p.push("bdelta");
    p
}

/// Create a TempDir containing a ~64 KB file of sensor-like samples.
fn make_temp_input() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let input_path = dir.path().join("samples.raw");
    let content: Vec<u8> = (0..16_384u32).flat_map(|i| (20_000 + i % 500).to_le_bytes()).collect();
    fs::write(&input_path, content).unwrap();
    (dir, input_path)
}

fn s(p: &Path) -> &str {
    p.to_str().unwrap()
}

fn run(dir: &Path, args: &[&str]) -> std::process::Output {
    Command::new(bdelta_bin())
        .args(args)
        .current_dir(dir)
        .stdin(Stdio::null())
        .output()
        .expect("failed to run bdelta")
}

// ── 1. Compress / decompress round trip ──────────────────────────────────────

#[test]
fn test_cli_compress_decompress_roundtrip() {
    let (dir, input) = make_temp_input();
    let original = fs::read(&input).unwrap();
    let compressed = dir.path().join("out.bdz");
    let roundtrip = dir.path().join("roundtrip.raw");

    let out = run(dir.path(), &["-f", s(&input), s(&compressed)]);
    assert!(out.status.success(), "compress: {}", String::from_utf8_lossy(&out.stderr));
    assert!(fs::metadata(&compressed).unwrap().len() < original.len() as u64);

    let out = run(dir.path(), &["-d", "-f", s(&compressed), s(&roundtrip)]);
    assert!(out.status.success(), "decompress: {}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(fs::read(&roundtrip).unwrap(), original);
}

// ── 2. Default output names ──────────────────────────────────────────────────

#[test]
fn test_cli_default_names() {
    let (dir, input) = make_temp_input();
    let original = fs::read(&input).unwrap();

    let out = run(dir.path(), &["samples.raw"]);
    assert!(out.status.success());
    let packed = dir.path().join("samples.raw.bdz");
    assert!(packed.exists());

    fs::remove_file(&input).unwrap();
    // .bdz suffix selects decompression without -d
    let out = run(dir.path(), &["samples.raw.bdz"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(fs::read(&input).unwrap(), original);
}

// ── 3. Test mode ─────────────────────────────────────────────────────────────

#[test]
fn test_cli_test_mode() {
    let (dir, input) = make_temp_input();
    assert!(run(dir.path(), &["samples.raw"]).status.success());

    let out = run(dir.path(), &["-t", "samples.raw.bdz"]);
    assert!(out.status.success());
    assert!(out.stdout.is_empty());

    let packed = dir.path().join("samples.raw.bdz");
    let mut frame = fs::read(&packed).unwrap();
    let mid = frame.len() / 2;
    frame[mid] ^= 0x55;
    fs::write(&packed, &frame).unwrap();
    let out = run(dir.path(), &["-t", "samples.raw.bdz"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(input.exists());
}

// ── 4. stdin → stdout pipeline ───────────────────────────────────────────────

#[test]
fn test_cli_stdin_stdout_pipeline() {
    let data: Vec<u8> = b"pipe me through bdelta ".repeat(500);

    let mut child = Command::new(bdelta_bin())
        .arg("-c")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .unwrap();
    child.stdin.take().unwrap().write_all(&data).unwrap();
    let packed = child.wait_with_output().unwrap();
    assert!(packed.status.success());
    assert_eq!(&packed.stdout[..4], b"BDZ\x01");

    let mut child = Command::new(bdelta_bin())
        .args(["-d", "-c"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .unwrap();
    child.stdin.take().unwrap().write_all(&packed.stdout).unwrap();
    let plain = child.wait_with_output().unwrap();
    assert!(plain.status.success());
    assert_eq!(plain.stdout, data);
}

// ── 5. Overwrite policy ──────────────────────────────────────────────────────

#[test]
fn test_cli_refuses_to_overwrite_without_force() {
    let (dir, input) = make_temp_input();
    let dst = dir.path().join("taken.bdz");
    fs::write(&dst, b"precious").unwrap();

    let out = run(dir.path(), &[s(&input), s(&dst)]);
    assert_eq!(out.status.code(), Some(1));
    assert_eq!(fs::read(&dst).unwrap(), b"precious");
    assert!(String::from_utf8_lossy(&out.stderr).contains("already exists"));

    let out = run(dir.path(), &["-f", s(&input), s(&dst)]);
    assert!(out.status.success());
    assert_ne!(fs::read(&dst).unwrap(), b"precious");
}

// ── 6. --shuffle and chunk size ──────────────────────────────────────────────

#[test]
fn test_cli_shuffle_and_chunk_size() {
    let (dir, input) = make_temp_input();
    let original = fs::read(&input).unwrap();

    let out = run(dir.path(), &["--shuffle", "4", "-B", "16K", "-T", "2", "samples.raw", "s.bdz"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let frame = fs::read(dir.path().join("s.bdz")).unwrap();
    assert_eq!(frame[4] & 1, 1);
    assert_eq!(&frame[9..13], &(16u32 << 10).to_be_bytes());

    let out = run(dir.path(), &["-d", "s.bdz", "s.raw"]);
    assert!(out.status.success());
    assert_eq!(fs::read(dir.path().join("s.raw")).unwrap(), original);
}

// ── 7. Multiple inputs and --rm ──────────────────────────────────────────────

#[test]
fn test_cli_multiple_inputs_with_rm() {
    let dir = TempDir::new().unwrap();
    for name in ["a.txt", "b.txt"] {
        fs::write(dir.path().join(name), name.repeat(300)).unwrap();
    }
    let out = run(dir.path(), &["-m", "--rm", "a.txt", "b.txt"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert!(!dir.path().join("a.txt").exists());
    assert!(dir.path().join("a.txt.bdz").exists());
    assert!(dir.path().join("b.txt.bdz").exists());

    let out = run(dir.path(), &["-d", "-m", "a.txt.bdz", "b.txt.bdz"]);
    assert!(out.status.success());
    assert_eq!(fs::read(dir.path().join("b.txt")).unwrap(), "b.txt".repeat(300).as_bytes());
}

// ── 8. Usage errors and informational flags ──────────────────────────────────

#[test]
fn test_cli_bad_usage_exit_codes() {
    let dir = TempDir::new().unwrap();
    // unknown flag: clap usage error
    assert_eq!(run(dir.path(), &["--no-such-flag"]).status.code(), Some(2));
    // conflicting modes
    assert_eq!(run(dir.path(), &["-d", "-t", "x"]).status.code(), Some(2));
    // chunk size out of range
    assert_eq!(run(dir.path(), &["-B", "12", "x"]).status.code(), Some(1));
    // missing input file
    assert_eq!(run(dir.path(), &["missing.raw"]).status.code(), Some(1));
}

#[test]
fn test_cli_version_and_help() {
    let dir = TempDir::new().unwrap();
    let out = run(dir.path(), &["--version"]);
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains(env!("CARGO_PKG_VERSION")));

    let out = run(dir.path(), &["--help"]);
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).to_lowercase().contains("usage"));
}
