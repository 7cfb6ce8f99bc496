//! E2E: one-shot codec over realistic payloads.
//!
//! Drives `bdelta::compress` / `bdelta::decompress` through the crate root
//! with buffers shaped like real traffic: text, structured records, sparse
//! binary, and data with repeats beyond the near window.

use bdelta::{compress, compress_bound, decompress};

fn round_trip(label: &str, src: &[u8]) -> usize {
    let mut comp = vec![0u8; compress_bound(src.len())];
    let n = compress(src, &mut comp).unwrap_or_else(|e| panic!("{}: compress failed: {}", label, e));
    let mut back = vec![0u8; src.len()];
    let m = decompress(&comp[..n], &mut back).unwrap_or_else(|e| panic!("{}: decompress failed: {}", label, e));
    assert_eq!(m, src.len(), "{}: length", label);
    assert_eq!(back, src, "{}: content", label);
    n
}

// ─────────────────────────────────────────────────────────────────────────────
// Payloads
// ─────────────────────────────────────────────────────────────────────────────

fn log_lines(n: usize) -> Vec<u8> {
    let mut out = Vec::new();
    for i in 0..n {
        let line = format!(
            "2024-03-{:02}T12:{:02}:{:02}Z level={} module=net::conn peer=10.0.{}.{} bytes={}\n",
            1 + i % 28,
            i % 60,
            (i * 7) % 60,
            ["info", "warn", "debug"][i % 3],
            i % 4,
            (i * 13) % 256,
            i * 31 % 9000
        );
        out.extend_from_slice(line.as_bytes());
    }
    out
}

fn records(n: usize) -> Vec<u8> {
    let mut out = Vec::new();
    for i in 0..n as u32 {
        out.extend_from_slice(&i.to_le_bytes());
        out.extend_from_slice(&(i / 16).to_le_bytes());
        out.extend_from_slice(&[0, 0, 0, 1]);
        out.extend_from_slice(&(i as f32 * 0.5).to_le_bytes());
    }
    out
}

fn sparse(len: usize) -> Vec<u8> {
    let mut v = vec![0u8; len];
    for i in (0..len).step_by(997) {
        v[i] = (i % 255) as u8 + 1;
    }
    v
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn text_logs_compress_well() {
    let src = log_lines(5000);
    let n = round_trip("logs", &src);
    assert!(n * 2 < src.len(), "logs: {} of {}", n, src.len());
}

#[test]
fn structured_records_round_trip() {
    round_trip("records", &records(20_000));
}

#[test]
fn sparse_buffers_collapse_to_runs() {
    let src = sparse(1 << 20);
    let n = round_trip("sparse", &src);
    assert!(n < src.len() / 50, "sparse: {} bytes", n);
}

#[test]
fn repeats_in_the_far_window_round_trip() {
    // A 20 KB block repeated: every second copy sits 20 KB back, inside the
    // far window but outside the near one.
    let block = log_lines(400);
    assert!(block.len() > 20_000, "log block: {} bytes", block.len());
    let block = &block[..20_000];
    let mut src = Vec::new();
    for _ in 0..4 {
        src.extend_from_slice(block);
        src.extend_from_slice(&sparse(3000));
    }
    round_trip("far", &src);
}

#[test]
fn boundary_lengths_round_trip() {
    let base = log_lines(100);
    for len in [0usize, 1, 2, 3, 4, 5, 11, 12, 13, 14, 31, 32, 33, 63, 64, 65, 255, 256, 257] {
        round_trip(&format!("len {}", len), &base[..len]);
    }
}
