//! Recursive-descent element scanner: walks a top-level element stream,
//! dispatching matrix elements to a visitor and transparently descending
//! into compressed sub-streams.
//!
//! The depth cap refuses to recurse past a fixed bound on crafted input,
//! applied here to nested compressed elements.

use std::ops::ControlFlow;

use crate::config::MAX_NESTING_DEPTH;
use crate::element::{decode_element, Decoded};
use crate::endian::Endian;
use crate::error::MatError;
use crate::inflate::inflate_all;
use crate::matrix::{parse_matrix, MatrixOutcome};

/// Type code for a matrix element.
const TYPE_MATRIX: u32 = 14;
/// Type code for a DEFLATE-compressed sub-stream.
const TYPE_COMPRESSED: u32 = 15;

/// Receives each matrix found while scanning an element stream.
///
/// Returning [`ControlFlow::Break`] stops the scan early (used by
/// "find the first matching matrix" operations); [`ControlFlow::Continue`]
/// keeps walking.
pub trait ElementVisitor {
    fn visit_matrix(&mut self, outcome: MatrixOutcome) -> ControlFlow<()>;
}

/// Walks every element in `data`, dispatching matrices to `visitor` and
/// recursing into compressed sub-streams up to [`MAX_NESTING_DEPTH`].
///
/// Unknown top-level element types are skipped, not rejected. A matrix
/// element whose payload fails to parse is also skipped — the scan keeps
/// going, since one bad matrix shouldn't hide the rest of the file. Only a
/// malformed top-level tag (bad length), a corrupt compressed sub-stream, or
/// nesting past [`MAX_NESTING_DEPTH`] aborts the whole scan.
pub fn scan_elements(
    data: &[u8],
    endian: Endian,
    depth: u32,
    visitor: &mut dyn ElementVisitor,
) -> Result<ControlFlow<()>, MatError> {
    if depth > MAX_NESTING_DEPTH {
        log::warn!("compressed element nesting exceeded {MAX_NESTING_DEPTH} levels, aborting scan");
        return Err(MatError::MalformedElement("compressed element nesting too deep"));
    }

    let mut cursor = 0usize;
    loop {
        let (type_code, element_payload, next_cursor) = match decode_element(data, cursor, endian)? {
            Decoded::EndOfStream => break,
            Decoded::Element { tag, next_cursor } => (tag.type_code, tag.payload, next_cursor),
        };
        cursor = next_cursor;

        match type_code {
            TYPE_MATRIX => {
                log::debug!("dispatching matrix element at depth {depth} ({} byte payload)", element_payload.len());
                let outcome = match parse_matrix(element_payload, endian) {
                    Ok(outcome) => outcome,
                    Err(e) => {
                        log::warn!("skipping malformed matrix element: {e}");
                        continue;
                    }
                };
                if let ControlFlow::Break(()) = visitor.visit_matrix(outcome) {
                    return Ok(ControlFlow::Break(()));
                }
            }
            TYPE_COMPRESSED => {
                log::debug!("descending into compressed sub-stream at depth {depth}");
                let inflated = match inflate_all(element_payload) {
                    Ok(inflated) => inflated,
                    Err(e) => {
                        log::warn!("corrupt compressed sub-stream, aborting scan: {e}");
                        return Err(e);
                    }
                };
                if let ControlFlow::Break(()) = scan_elements(&inflated, endian, depth + 1, visitor)? {
                    return Ok(ControlFlow::Break(()));
                }
            }
            _ => {
                log::trace!("skipping unknown top-level element type {type_code}");
            }
        }
    }

    Ok(ControlFlow::Continue(()))
}
