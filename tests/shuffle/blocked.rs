// Integration tests for the blocked scheduler with caller-supplied
// transforms.

use std::collections::HashSet;
use std::sync::Mutex;

use bdelta::shuffle::{default_block_size, run_blocked, run_blocked_in, BlockError, IoChain};
use bdelta::util::build_pool;

/// Adds one to every byte of the block.
fn bump(chain: &IoChain<'_>, size: usize, elem_size: usize) -> Result<usize, BlockError> {
    let n = size * elem_size;
    let (input, output) = chain.claim(n, n)?;
    for (o, i) in output.iter_mut().zip(input) {
        *o = i.wrapping_add(1);
    }
    Ok(n)
}

#[test]
fn default_block_sizes() {
    assert_eq!(default_block_size(1), 8192);
    assert_eq!(default_block_size(4), 2048);
    assert_eq!(default_block_size(24), 336);
    assert_eq!(default_block_size(1000), 128);
}

#[test]
fn every_block_is_visited_once() {
    let size = 8 * 1000 + 8 * 3 + 5;
    let input: Vec<u8> = (0..size).map(|i| i as u8).collect();
    let mut output = vec![0u8; size];
    let n = run_blocked(bump, &input, &mut output, size, 1, 64).unwrap();
    assert_eq!(n, size);
    let body = size - 5;
    for i in 0..body {
        assert_eq!(output[i], input[i].wrapping_add(1), "byte {}", i);
    }
    assert_eq!(output[body..], input[body..]);
}

#[test]
fn block_sizes_seen_by_transform() {
    let seen = Mutex::new(Vec::new());
    let record = |chain: &IoChain<'_>, size: usize, elem_size: usize| -> Result<usize, BlockError> {
        seen.lock().unwrap().push(size);
        bump(chain, size, elem_size)
    };
    let input = vec![0u8; 100 * 2];
    let mut output = vec![0u8; 200];
    run_blocked(record, &input, &mut output, 100, 2, 32).unwrap();

    let mut sizes = seen.into_inner().unwrap();
    sizes.sort_unstable();
    // three full blocks; the 4-element remainder is too short for a final
    // block and is copied as the tail
    assert_eq!(sizes, vec![32, 32, 32]);
}

#[test]
fn runs_on_the_given_pool() {
    let pool = build_pool(3).unwrap();
    let names = Mutex::new(HashSet::new());
    let named = |chain: &IoChain<'_>, size: usize, elem_size: usize| -> Result<usize, BlockError> {
        if let Some(name) = std::thread::current().name() {
            names.lock().unwrap().insert(name.to_owned());
        }
        bump(chain, size, elem_size)
    };
    let input = vec![1u8; 8 * 64];
    let mut output = vec![0u8; input.len()];
    let n = run_blocked_in(&pool, named, &input, &mut output, 64, 8, 8).unwrap();
    assert_eq!(n, input.len());
    assert!(output.iter().all(|&b| b == 2));
    let names = names.into_inner().unwrap();
    assert!(!names.is_empty());
    assert!(names.iter().all(|n| n.starts_with("bdelta-worker-")), "{:?}", names);
}

#[test]
fn first_failure_wins_and_tail_is_not_written() {
    let fail = |chain: &IoChain<'_>, size: usize, elem_size: usize| -> Result<usize, BlockError> {
        let n = size * elem_size;
        chain.claim(n, n)?;
        Err(BlockError::Transform(-12))
    };
    let input = vec![5u8; 20];
    let mut output = vec![0u8; 20];
    assert_eq!(run_blocked(fail, &input, &mut output, 20, 1, 8), Err(BlockError::Transform(-12)));
    assert!(output[16..].iter().all(|&b| b == 0));
}

#[test]
fn over_claiming_transform_reports_buffer_error() {
    let greedy = |chain: &IoChain<'_>, size: usize, elem_size: usize| -> Result<usize, BlockError> {
        let n = size * elem_size * 2;
        chain.claim(n, n)?;
        Ok(n)
    };
    let input = vec![0u8; 8];
    let mut output = vec![0u8; 8];
    assert_eq!(run_blocked(greedy, &input, &mut output, 8, 1, 8), Err(BlockError::BufferTooSmall));
}
