//! The emitter: encodes a header and a matrix element, and writes them to a
//! file either as a fresh container or appended to an existing one.
//!
//! Builds a header, then streams elements, adapted from a streaming `Write`
//! wrapper to whole-element-buffer encoding since this format has no
//! equivalent to a block-by-block frame API.

use std::fs::{File, OpenOptions};
use std::io::{Read, Write};
use std::path::Path;

use crate::config::{HEADER_LEN, MAX_NAME_LEN, VERSION_WORD};
use crate::cube::Cube;
use crate::endian::Endian;
use crate::error::MatError;

const TYPE_MATRIX: u32 = 14;
const TYPE_ARRAY_FLAGS: u32 = 6;
const TYPE_DIMENSIONS: u32 = 5;
const TYPE_NAME: u32 = 1;

/// Encodes a 128-byte container header.
///
/// `description` is truncated to 116 bytes if longer; the remaining header
/// fields are fixed by this crate: version word [`VERSION_WORD`] and the
/// `"IM"` endian marker, since the emitter always writes little-endian.
pub fn encode_header(description: &str) -> [u8; HEADER_LEN] {
    let mut header = [0u8; HEADER_LEN];
    let desc_bytes = description.as_bytes();
    let n = desc_bytes.len().min(116);
    header[..n].copy_from_slice(&desc_bytes[..n]);
    header[124..126].copy_from_slice(&VERSION_WORD.to_le_bytes());
    header[126..128].copy_from_slice(b"IM");
    header
}

/// Encodes a long-form tagged element: 4-byte type, 4-byte length, payload,
/// zero-padded to the next 8-byte boundary.
fn encode_long_tag(type_code: u32, payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(8 + payload.len() + 8);
    out.extend_from_slice(&type_code.to_le_bytes());
    out.extend_from_slice(&(payload.len() as u32).to_le_bytes());
    out.extend_from_slice(payload);
    let pad = (8 - payload.len() % 8) % 8;
    out.extend(std::iter::repeat(0u8).take(pad));
    out
}

/// Encodes a complete matrix element (array-flags, dimensions, name, real
/// data sub-elements in canonical order) for `cube` under `name`.
///
/// `name` is truncated to [`MAX_NAME_LEN`] bytes, matching
/// [`crate::cube::MatrixDescriptor::new`]'s read-side behavior.
pub fn encode_matrix(name: &str, cube: &Cube) -> Vec<u8> {
    let mut truncated = name.to_string();
    truncated.truncate(MAX_NAME_LEN);

    let mut flags_payload = [0u8; 8];
    flags_payload[0] = cube.dtype().class_code();
    let array_flags = encode_long_tag(TYPE_ARRAY_FLAGS, &flags_payload);

    let dims = cube.dims();
    let rank = cube.rank() as usize;
    let mut dims_payload = Vec::with_capacity(rank * 4);
    for &d in &dims[..rank] {
        dims_payload.extend_from_slice(&(d as u32).to_le_bytes());
    }
    let dimensions = encode_long_tag(TYPE_DIMENSIONS, &dims_payload);

    let name_element = encode_long_tag(TYPE_NAME, truncated.as_bytes());

    // Cube data is always stored little-endian in memory; on a big-endian
    // host it must be swapped back before hitting the wire, since this
    // emitter only ever produces little-endian output.
    let mut data = cube.data().to_vec();
    host_to_le_bytes(&mut data, cube.dtype().byte_width());
    let data_element = encode_long_tag(cube.dtype().data_type_code(), &data);

    let mut payload = Vec::with_capacity(
        array_flags.len() + dimensions.len() + name_element.len() + data_element.len(),
    );
    payload.extend(array_flags);
    payload.extend(dimensions);
    payload.extend(name_element);
    payload.extend(data_element);

    encode_long_tag(TYPE_MATRIX, &payload)
}

/// Writes a fresh container at `path` holding a single matrix, overwriting
/// any existing file.
pub fn save_cube(path: impl AsRef<Path>, description: &str, name: &str, cube: &Cube) -> Result<(), MatError> {
    let mut file = File::create(path.as_ref())?;
    file.write_all(&encode_header(description))?;
    file.write_all(&encode_matrix(name, cube))?;
    Ok(())
}

/// Appends a matrix to an existing container, or creates a fresh one if
/// `path` doesn't exist yet.
///
/// Refuses to append to a big-endian container: this crate's emitter only
/// ever produces little-endian bytes, and appending them after a
/// big-endian header would leave the file internally inconsistent.
pub fn append_cube(path: impl AsRef<Path>, description: &str, name: &str, cube: &Cube) -> Result<(), MatError> {
    if !path.as_ref().exists() {
        return save_cube(path, description, name, cube);
    }

    let mut existing_header = [0u8; HEADER_LEN];
    {
        let mut file = File::open(path.as_ref())?;
        file.read_exact(&mut existing_header).map_err(|_| MatError::NotAContainer)?;
    }
    let marker = &existing_header[126..128];
    if marker != b"IM" {
        return Err(MatError::UnsupportedMatrix("cannot append little-endian data to a non-little-endian container"));
    }

    let mut file = OpenOptions::new().append(true).open(path.as_ref())?;
    file.write_all(&encode_matrix(name, cube))?;
    Ok(())
}

/// Host-to-little-endian conversion for a payload's elements, used when the
/// host is big-endian and raw numeric bytes need byte-swapping before
/// they're written. A no-op on a little-endian host.
pub fn host_to_le_bytes(bytes: &mut [u8], elem_width: usize) {
    if Endian::host().is_little() {
        return;
    }
    swap_elements(bytes, elem_width);
}

/// Reverses every `elem_width`-byte chunk of `bytes` in place. Split out from
/// [`host_to_le_bytes`] so the swap itself can be unit-tested without
/// depending on the test machine's actual endianness.
fn swap_elements(bytes: &mut [u8], elem_width: usize) {
    for chunk in bytes.chunks_exact_mut(elem_width) {
        chunk.reverse();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cube::DataType;
    use crate::matrix::{parse_matrix, MatrixOutcome};

    #[test]
    fn header_round_trips_endian_marker_and_version() {
        let header = encode_header("a description");
        assert_eq!(&header[126..128], b"IM");
        assert_eq!(u16::from_le_bytes([header[124], header[125]]), VERSION_WORD);
        assert!(header.starts_with(b"a description"));
    }

    #[test]
    fn long_description_is_truncated() {
        let header = encode_header(&"x".repeat(200));
        assert_eq!(&header[116..124], &[0u8; 8]);
    }

    #[test]
    fn encoded_matrix_round_trips_through_the_parser() {
        let cube = Cube::new(vec![0u8; 8 * 6], [2, 3, 1], 2, DataType::Float64).unwrap();
        let element = encode_matrix("roundtrip", &cube);
        // Strip the outer type14 long-form tag to get back to the payload
        // parse_matrix expects.
        let payload = &element[8..];
        match parse_matrix(payload, Endian::Little).unwrap() {
            MatrixOutcome::Supported { descriptor, cube: parsed } => {
                assert_eq!(descriptor.name, "roundtrip");
                assert_eq!(parsed.dims(), [2, 3, 1]);
                assert_eq!(parsed.dtype(), DataType::Float64);
            }
            MatrixOutcome::Unsupported(why) => panic!("unexpected unsupported: {why}"),
        }
    }

    #[test]
    fn save_then_append_produces_two_matrices() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("two.mat");
        let cube_a = Cube::new(vec![1u8; 8 * 4], [2, 2, 1], 2, DataType::Float64).unwrap();
        let cube_b = Cube::new(vec![2u8; 2 * 4], [2, 2, 1], 2, DataType::Uint16).unwrap();

        save_cube(&path, "desc", "a", &cube_a).unwrap();
        append_cube(&path, "desc", "b", &cube_b).unwrap();

        let container = crate::container::Container::open(&path).unwrap();
        let mut visitor = crate::visitors::ListVisitor::new(None);
        crate::walker::scan_elements(container.element_stream(), container.endian(), 0, &mut visitor).unwrap();
        let names: Vec<_> = visitor.into_descriptors().into_iter().map(|d| d.name).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn append_creates_a_fresh_file_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fresh.mat");
        let cube = Cube::new(vec![0u8; 8], [1, 1, 1], 2, DataType::Float64).unwrap();
        append_cube(&path, "desc", "only", &cube).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn swap_elements_reverses_every_chunk() {
        let mut bytes = vec![0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08];
        swap_elements(&mut bytes, 4);
        assert_eq!(bytes, vec![0x04, 0x03, 0x02, 0x01, 0x08, 0x07, 0x06, 0x05]);
    }

    #[test]
    fn swap_elements_is_a_no_op_on_single_byte_width() {
        let mut bytes = vec![0xAA, 0xBB, 0xCC];
        swap_elements(&mut bytes, 1);
        assert_eq!(bytes, vec![0xAA, 0xBB, 0xCC]);
    }

    /// Encodes one long-form tag with every word big-endian, to build a
    /// matrix payload as a genuine big-endian file would carry it.
    fn big_endian_long_tag(type_code: u32, payload: &[u8]) -> Vec<u8> {
        let mut out = Vec::with_capacity(8 + payload.len() + 8);
        out.extend_from_slice(&type_code.to_be_bytes());
        out.extend_from_slice(&(payload.len() as u32).to_be_bytes());
        out.extend_from_slice(payload);
        let pad = (8 - payload.len() % 8) % 8;
        out.extend(std::iter::repeat(0u8).take(pad));
        out
    }

    /// Simulates a big-endian host's emitted matrix payload (every
    /// multi-byte word reversed, including the real-data elements the way
    /// `host_to_le_bytes`/`swap_elements` would swap them before writing),
    /// and confirms the parser's load-side swap (see `matrix.rs`) recovers
    /// the original little-endian bytes.
    #[test]
    fn simulated_big_endian_host_round_trips_through_the_loader() {
        let mut original = Vec::new();
        for v in [1.0f64, 2.0, 3.0, 4.0] {
            original.extend_from_slice(&v.to_le_bytes());
        }
        let cube = Cube::new(original.clone(), [4, 1, 1], 2, DataType::Float64).unwrap();

        let mut flags_payload = [0u8; 8];
        let flags_word: u32 = cube.dtype().class_code() as u32;
        flags_payload[0..4].copy_from_slice(&flags_word.to_be_bytes());
        let array_flags = big_endian_long_tag(TYPE_ARRAY_FLAGS, &flags_payload);

        let mut dims_payload = Vec::new();
        for &d in &cube.dims()[..cube.rank() as usize] {
            dims_payload.extend_from_slice(&(d as u32).to_be_bytes());
        }
        let dimensions = big_endian_long_tag(TYPE_DIMENSIONS, &dims_payload);
        let name_element = big_endian_long_tag(TYPE_NAME, b"sim");

        let mut swapped_data = cube.data().to_vec();
        swap_elements(&mut swapped_data, cube.dtype().byte_width());
        let data_element = big_endian_long_tag(cube.dtype().data_type_code(), &swapped_data);

        let mut payload = Vec::new();
        payload.extend(array_flags);
        payload.extend(dimensions);
        payload.extend(name_element);
        payload.extend(data_element);

        match parse_matrix(&payload, Endian::Big).unwrap() {
            MatrixOutcome::Supported { cube: loaded, .. } => {
                assert_eq!(loaded.data(), original.as_slice());
            }
            MatrixOutcome::Unsupported(why) => panic!("unexpected unsupported: {why}"),
        }
    }
}
