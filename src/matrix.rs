//! Parses a matrix element's payload (array-flags, dimensions, name, real
//! data) in canonical sub-element order.
//!
//! Cross-checked against the reference parser in
//! `other_examples/eb7207f8_nbrr-matfile__src-parse.rs.rs` for the exact
//! array-flags bit layout and sub-element ordering, written independently of
//! that parser's `nom`-combinator style in favor of hand-rolled byte-level
//! decoding.

use crate::arith::{checked_mul, product};
use crate::cube::{Cube, DataType, MatrixDescriptor};
use crate::element::{decode_element, Decoded};
use crate::endian::{read_u32, Endian};
use crate::error::MatError;

/// Bit in the array-flags word's low 32-bit half marking a complex array.
const COMPLEX_FLAG: u32 = 0x0800;

/// The outcome of parsing one matrix element's payload.
pub enum MatrixOutcome {
    /// A numeric, real-valued, rank-2-or-3 matrix this crate can represent.
    Supported { descriptor: MatrixDescriptor, cube: Cube },
    /// Structurally well-formed but not something this crate loads: complex
    /// data, a non-numeric class, or a class/data-type mismatch. Carries the
    /// reason for diagnostics; callers skip it and keep scanning.
    Unsupported(&'static str),
}

/// Parses a matrix element's sub-elements in the canonical order
/// (array-flags, dimensions, name, real data), skipping any sub-element that
/// doesn't match what the current stage expects rather than failing on it.
pub fn parse_matrix(payload: &[u8], endian: Endian) -> Result<MatrixOutcome, MatError> {
    let mut cursor = 0usize;
    let mut dtype: Option<DataType> = None;
    let mut dims: Option<(Vec<usize>, u8)> = None;
    let mut name = String::new();
    let mut name_seen = false;
    let mut data: Option<Vec<u8>> = None;

    while dtype.is_none() || dims.is_none() || data.is_none() {
        let (tag_type, tag_payload, next) = match decode_element(payload, cursor, endian)? {
            Decoded::EndOfStream => break,
            Decoded::Element { tag, next_cursor } => (tag.type_code, tag.payload, next_cursor),
        };
        cursor = next;

        if dtype.is_none() {
            if tag_type != 6 || tag_payload.len() < 8 {
                continue; // not array-flags yet; tolerate and keep scanning
            }
            let flags_word = read_u32(tag_payload, 0, endian);
            if flags_word & COMPLEX_FLAG != 0 {
                return Ok(MatrixOutcome::Unsupported("complex arrays are not supported"));
            }
            let class_byte = (flags_word & 0xFF) as u8;
            match DataType::from_class_code(class_byte) {
                Some(dt) => dtype = Some(dt),
                None => return Ok(MatrixOutcome::Unsupported("non-numeric array class")),
            }
            continue;
        }

        if dims.is_none() {
            let width = match tag_type {
                5 | 6 => 4usize,
                12 | 13 => 8usize,
                _ => continue, // not a dimensions element yet
            };
            if tag_payload.len() % width != 0 {
                return Err(MatError::MalformedElement("dimensions payload not a multiple of element width"));
            }
            let count = tag_payload.len() / width;
            if !(2..=3).contains(&count) {
                return Ok(MatrixOutcome::Unsupported("only rank-2 and rank-3 arrays are supported"));
            }
            let mut parsed = Vec::with_capacity(count);
            for i in 0..count {
                let offset = i * width;
                let v = if width == 4 {
                    read_u32(tag_payload, offset, endian) as u64
                } else {
                    crate::endian::read_u64(tag_payload, offset, endian)
                };
                parsed.push(v as usize);
            }
            dims = Some((parsed, count as u8));
            continue;
        }

        if !name_seen {
            if matches!(tag_type, 1 | 2 | 16 | 17 | 18) {
                // Raw bytes, not decoded as UTF-16/UTF-32 even for those
                // type codes (see DESIGN.md, Open Question 3).
                name = String::from_utf8_lossy(tag_payload).trim_end_matches('\0').to_string();
                name_seen = true;
                continue;
            }
        }

        if data.is_none() {
            let expected_code = dtype.expect("dtype set before data stage").data_type_code();
            if tag_type != expected_code {
                return Ok(MatrixOutcome::Unsupported("data sub-element type does not match array class"));
            }
            data = Some(tag_payload.to_vec());
            break;
        }
    }

    let dtype = match dtype {
        Some(dt) => dt,
        None => return Ok(MatrixOutcome::Unsupported("matrix missing array-flags sub-element")),
    };
    let (dim_values, rank) = match dims {
        Some(d) => d,
        None => return Ok(MatrixOutcome::Unsupported("matrix missing dimensions sub-element")),
    };
    let mut data = match data {
        Some(d) => d,
        None => return Ok(MatrixOutcome::Unsupported("matrix missing real-data sub-element")),
    };

    // Copy-out normalizes every cube to little-endian in memory, matching
    // what the emitter always produces: a big-endian source file is
    // byte-swapped element-by-element here; single-byte elements are a
    // no-op either way.
    if endian == Endian::Big {
        let width = dtype.byte_width();
        if width > 1 {
            for chunk in data.chunks_exact_mut(width) {
                chunk.reverse();
            }
        }
    }

    let mut dims3 = [1usize; 3];
    for (i, v) in dim_values.iter().enumerate() {
        dims3[i] = *v;
    }
    if dims3[..rank as usize].iter().any(|&d| d == 0) {
        return Ok(MatrixOutcome::Unsupported("dimension must be positive"));
    }

    let expected_len = checked_mul(product(&dims3[..rank as usize])?, dtype.byte_width())?;
    if data.len() != expected_len {
        return Ok(MatrixOutcome::Unsupported("real-data length does not match dims * element size"));
    }

    let cube = Cube::new(data, dims3, rank, dtype)?;
    let descriptor = MatrixDescriptor::new(&name, dims3, dtype);
    Ok(MatrixOutcome::Supported { descriptor, cube })
}
