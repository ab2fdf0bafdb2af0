//! The tagged-element decoder: short-form vs. long-form disambiguation,
//! inline vs. trailing payload, and the alignment-overshoot tolerance real
//! files rely on.
//!
//! Byte-order helpers are widened from fixed little-endian to a
//! runtime-selected [`Endian`] since the container negotiates its own byte
//! order per file.

use crate::arith::align8;
use crate::endian::{read_u32, Endian};
use crate::error::MatError;

/// One decoded element: a type code and a zero-copy view into its payload.
#[derive(Debug, Clone, Copy)]
pub struct ElementTag<'a> {
    pub type_code: u32,
    pub payload: &'a [u8],
}

/// The result of attempting to decode one element at the current cursor.
#[derive(Debug)]
pub enum Decoded<'a> {
    /// An element was decoded; the stream's cursor should advance to
    /// `next_cursor`.
    Element { tag: ElementTag<'a>, next_cursor: usize },
    /// Fewer than 8 bytes remain. Not an error — trailing garbage after the
    /// last real element is tolerated.
    EndOfStream,
}

/// Decodes one element from `data` at byte offset `cursor` under `endian`.
///
/// Requires at least 8 bytes remaining to attempt a decode; returns
/// [`Decoded::EndOfStream`] otherwise rather than failing. Never panics on
/// malformed input — out-of-range lengths are reported as
/// [`MatError::MalformedElement`].
pub fn decode_element<'a>(
    data: &'a [u8],
    cursor: usize,
    endian: Endian,
) -> Result<Decoded<'a>, MatError> {
    if data.len().saturating_sub(cursor) < 8 {
        return Ok(Decoded::EndOfStream);
    }

    let w0 = read_u32(data, cursor, endian);
    let upper16 = w0 >> 16;

    if upper16 != 0 {
        // Short form: type in the low 16 bits of w0, length in the high 16
        // bits, payload inline in the next 4 bytes.
        let type_code = w0 & 0xFFFF;
        let len = upper16 as usize;
        if len > 4 {
            return Err(MatError::MalformedElement("short-form payload length exceeds 4"));
        }
        let payload = &data[cursor + 4..cursor + 4 + len];
        Ok(Decoded::Element {
            tag: ElementTag { type_code, payload },
            next_cursor: cursor + 8,
        })
    } else {
        // Long form: two 32-bit words (type, length), then `length` payload
        // bytes, then zero-padding to the next 8-byte boundary.
        let type_code = w0;
        let len = read_u32(data, cursor + 4, endian) as usize;
        let remaining = data.len() - (cursor + 8);
        if len > remaining {
            return Err(MatError::MalformedElement("long-form payload exceeds remaining stream"));
        }
        let payload_end = cursor + 8 + len;
        let padded_len = align8(len)?;
        let padded_end = cursor + 8 + padded_len;

        // Tolerance: some real files omit trailing padding on the final
        // element. Clamp the advance to the payload end rather than failing
        // when the padded end would overshoot the stream.
        let next_cursor = if padded_end <= data.len() { padded_end } else { payload_end };

        Ok(Decoded::Element {
            tag: ElementTag { type_code, payload: &data[cursor + 8..payload_end] },
            next_cursor,
        })
    }
}
