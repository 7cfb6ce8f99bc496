// Integration tests for the match finder in `bdelta::codec::hash`.

use bdelta::codec::hash::{extend_match, HashTable, Match};
use bdelta::codec::types::{hash2, MAX_DISTANCE, MAX_FARDISTANCE};

/// `len` bytes with no 3-byte sequence repeated nearby.
fn filler(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i as u32).wrapping_mul(2_654_435_761).rotate_left(11) as u8).collect()
}

fn with_pattern_at(len: usize, positions: &[usize], pattern: &[u8]) -> Vec<u8> {
    let mut v = filler(len);
    for &p in positions {
        v[p..p + pattern.len()].copy_from_slice(pattern);
    }
    v
}

// ─────────────────────────────────────────────────────────────────────────────
// find_match
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn run_shortcut_takes_precedence() {
    let data = b"xaaaaaay";
    let mut t = HashTable::new();
    assert_eq!(t.find_match(data, 2), Some(Match { distance: 1, verified: 3 }));
}

#[test]
fn near_candidate_needs_three_bytes() {
    let data = b"abcdefabcXYZabcdefgh";
    let mut t = HashTable::new();
    t.insert(data, 0);
    assert_eq!(t.find_match(data, 6), Some(Match { distance: 6, verified: 3 }));
    // the probe moved the slot to 6
    assert_eq!(t.get(hash2(data, 0)), 6);
    assert_eq!(t.find_match(data, 12), Some(Match { distance: 6, verified: 3 }));
}

#[test]
fn stale_slot_without_equal_bytes_is_not_a_match() {
    let data = b"abcdefghijklmnop";
    let mut t = HashTable::new();
    t.insert(data, 1);
    assert_eq!(t.find_match(data, 8), None);
    // the probe always leaves the anchor in its slot
    assert_eq!(t.get(hash2(data, 8)), 8);
}

#[test]
fn far_candidate_needs_five_bytes() {
    let far = MAX_DISTANCE + 500;
    let data = with_pattern_at(far + 64, &[10, 10 + far], b"PQRST");
    let mut t = HashTable::new();
    t.insert(&data, 10);
    assert_eq!(t.find_match(&data, 10 + far), Some(Match { distance: far, verified: 5 }));

    let mut data = data;
    data[10 + far + 4] ^= 0xFF;
    let mut t = HashTable::new();
    t.insert(&data, 10);
    assert_eq!(t.find_match(&data, 10 + far), None);
}

#[test]
fn distance_8192_is_rejected() {
    let data = with_pattern_at(MAX_DISTANCE + 64, &[10, 10 + MAX_DISTANCE], b"PQRST");
    let mut t = HashTable::new();
    t.insert(&data, 10);
    assert_eq!(t.find_match(&data, 10 + MAX_DISTANCE), None);
}

#[test]
fn distance_at_far_limit_is_rejected() {
    let data = with_pattern_at(MAX_FARDISTANCE + 64, &[10, 10 + MAX_FARDISTANCE - 1], b"PQRST");
    let mut t = HashTable::new();
    t.insert(&data, 10);
    assert_eq!(
        t.find_match(&data, 10 + MAX_FARDISTANCE - 1),
        Some(Match { distance: MAX_FARDISTANCE - 1, verified: 5 })
    );

    let data = with_pattern_at(MAX_FARDISTANCE + 64, &[10, 10 + MAX_FARDISTANCE], b"PQRST");
    let mut t = HashTable::new();
    t.insert(&data, 10);
    assert_eq!(t.find_match(&data, 10 + MAX_FARDISTANCE), None);
}

// ─────────────────────────────────────────────────────────────────────────────
// extend_match
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn extend_stops_one_past_mismatch() {
    let data = b"abcdefabcdefXYZWV";
    let m = Match { distance: 6, verified: 3 };
    assert_eq!(extend_match(data, 6, m, data.len() - 2), 13);
}

#[test]
fn extend_compares_whole_words() {
    let mut data = b"0123456789abcdef0123456789abcdef".to_vec();
    data.extend_from_slice(b"!!!!!!!!!!!!!!!!");
    let m = Match { distance: 16, verified: 3 };
    assert_eq!(extend_match(&data, 16, m, data.len() - 2), 33);
}

#[test]
fn extend_never_passes_bound() {
    let data = [9u8; 64];
    let m = Match { distance: 4, verified: 3 };
    assert_eq!(extend_match(&data, 8, m, 30), 30);
    let run = Match { distance: 1, verified: 3 };
    assert_eq!(extend_match(&data, 8, run, 62), 62);
}

#[test]
fn extend_run_stops_at_new_byte() {
    let mut data = vec![5u8; 20];
    data.extend_from_slice(&[6u8; 10]);
    let m = Match { distance: 1, verified: 3 };
    assert_eq!(extend_match(&data, 2, m, data.len() - 2), 21);
}
