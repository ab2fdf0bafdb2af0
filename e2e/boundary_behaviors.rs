//! Boundary and malformed-input behaviors: truncation, a bad endian marker,
//! an empty element stream, a missing file, and an oversized inline
//! element length — exercised end-to-end rather than only at the unit
//! level.

use std::fs;
use std::io::Write;

use matfive::{load_by_name, load_first_of_rank, try_load_by_name, try_load_first_of_rank, MatError};

fn header_with_marker(marker: &[u8; 2]) -> Vec<u8> {
    let mut buf = vec![0u8; 128];
    buf[124..126].copy_from_slice(&0x0100u16.to_le_bytes());
    buf[126..128].copy_from_slice(marker);
    buf
}

#[test]
fn truncated_file_is_not_a_container() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("short.mat");
    fs::File::create(&path).unwrap().write_all(&[0u8; 32]).unwrap();

    let result = load_first_of_rank(&path, 2);
    assert!(matches!(result, Err(MatError::NotAContainer)));
}

#[test]
fn unrecognized_endian_marker_is_not_a_container() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad_marker.mat");
    fs::File::create(&path).unwrap().write_all(&header_with_marker(b"ZZ")).unwrap();

    assert!(matches!(load_first_of_rank(&path, 2), Err(MatError::NotAContainer)));
}

#[test]
fn empty_element_stream_yields_no_match_not_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty_stream.mat");
    fs::File::create(&path).unwrap().write_all(&header_with_marker(b"IM")).unwrap();

    assert!(load_first_of_rank(&path, 2).unwrap().is_none());
    assert!(load_by_name(&path, "anything", 2).unwrap().is_none());
}

#[test]
fn missing_file_is_reported_through_both_layers() {
    let path = "/nonexistent/path/for/matfive/tests.mat";
    assert!(load_first_of_rank(path, 2).is_err());
    assert!(try_load_first_of_rank(path, 2).is_none());
    assert!(try_load_by_name(path, "x", 2).is_none());
}

#[test]
fn malformed_element_tag_is_reported_and_does_not_panic() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad_tag.mat");
    let mut buf = header_with_marker(b"IM");
    // A short-form tag claiming a 5-byte inline payload, which is illegal
    // (short form caps inline payloads at 4 bytes).
    let w0: u32 = 2 | (5u32 << 16);
    buf.extend_from_slice(&w0.to_le_bytes());
    buf.extend_from_slice(&[0u8; 4]);
    fs::File::create(&path).unwrap().write_all(&buf).unwrap();

    assert!(load_first_of_rank(&path, 2).is_err());
}
