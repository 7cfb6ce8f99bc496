// Integration tests for `.bdz` header encoding and validation.

use bdelta::frame::header::{chunk_count_for, read_header, write_header};
use bdelta::frame::types::{BDZ_MAGIC, CHUNK_SIZE_MAX, HEADER_SIZE};
use bdelta::frame::{frame_info, FrameError, FrameHeader};

fn header(content_size: u64, chunk_size: u32) -> FrameHeader {
    FrameHeader {
        shuffled: false,
        elem_size: 0,
        chunk_size,
        content_size,
        chunk_count: chunk_count_for(content_size, chunk_size as u64) as u32,
    }
}

#[test]
fn header_is_25_bytes_starting_with_magic() {
    let bytes = write_header(&header(10, 4));
    assert_eq!(bytes.len(), HEADER_SIZE);
    assert_eq!(HEADER_SIZE, 25);
    assert_eq!(bytes[..4], BDZ_MAGIC);
    assert_eq!(bytes[4], 0);
    assert_eq!(&bytes[21..], &[0, 0, 0, 3]);
}

#[test]
fn chunk_lengths_cover_content() {
    let h = header(10, 4);
    assert_eq!((0..h.chunk_count).map(|i| h.chunk_len(i)).collect::<Vec<_>>(), vec![4, 4, 2]);
    let h = header(8, 4);
    assert_eq!(h.chunk_len(1), 4);
    assert_eq!(h.chunk_len(2), 0);
}

#[test]
fn largest_chunk_size_is_accepted() {
    let h = header(1, CHUNK_SIZE_MAX as u32);
    assert_eq!(read_header(&write_header(&h)), Ok(h));

    let mut bytes = write_header(&h);
    bytes[9..13].copy_from_slice(&((CHUNK_SIZE_MAX as u32) + 1).to_be_bytes());
    assert_eq!(read_header(&bytes), Err(FrameError::ChunkSizeInvalid));
}

#[test]
fn unshuffled_header_may_not_carry_shuffle_bit_without_elem_size() {
    let mut bytes = write_header(&header(0, 64));
    bytes[4] = 0x01;
    assert_eq!(read_header(&bytes), Err(FrameError::ElemSizeInvalid));
    bytes[5..9].copy_from_slice(&[0, 0, 0, 2]);
    assert!(read_header(&bytes).unwrap().shuffled);
}

#[test]
fn frame_info_reads_only_the_header() {
    let h = header(1000, 100);
    let bytes = write_header(&h);
    assert_eq!(frame_info(&bytes), Ok(h));
    assert_eq!(frame_info(b"XYZ\x01"), Err(FrameError::FrameTypeUnknown));
    assert_eq!(frame_info(b"BD"), Err(FrameError::HeaderIncomplete));
}
