//! Error taxonomy for the MAT5 container reader/writer.
//!
//! A hand-rolled enum with an explicit `Display`/`std::error::Error` impl
//! rather than a derive-macro error crate — this crate's error set is small
//! and fixed, and every variant already needs a hand-written message
//! tailored to its cause.

use std::fmt;

/// Everything that can go wrong reading or writing a MAT5 container.
///
/// Internal layers return `Result<_, MatError>`; the public API in
/// [`crate::api`] collapses this into the boolean/`Option` surface the
/// format's C heritage expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatError {
    /// `open`, `stat`, map/read, or write failed.
    IoUnavailable,
    /// File shorter than 128 bytes, or the header's endian marker is neither
    /// `"IM"` nor `"MI"`.
    NotAContainer,
    /// Short-form payload length > 4, long-form payload length exceeds the
    /// remaining stream, or alignment arithmetic would overflow. Carries a
    /// short cause string for diagnostics.
    MalformedElement(&'static str),
    /// Inflate did not end in stream-end (truncated or corrupt DEFLATE data).
    CorruptCompressedStream,
    /// Structurally valid matrix that fails a support criterion: complex
    /// numbers, non-numeric class, class/data-type mismatch, dimension
    /// product × element size ≠ payload bytes, or a non-positive dimension.
    UnsupportedMatrix(&'static str),
    /// Allocation failed during copy, decompression, or descriptor growth.
    AllocationFailure,
    /// A size multiply/add/align would have wrapped.
    Overflow(&'static str),
    /// `load_by_name` found no match, or `load_first_of_rank` found no
    /// supported matrix of the requested rank.
    NotFound,
}

impl fmt::Display for MatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatError::IoUnavailable => write!(f, "I/O unavailable"),
            MatError::NotAContainer => write!(f, "not a MAT5 container"),
            MatError::MalformedElement(why) => write!(f, "malformed element: {why}"),
            MatError::CorruptCompressedStream => write!(f, "corrupt compressed stream"),
            MatError::UnsupportedMatrix(why) => write!(f, "unsupported matrix: {why}"),
            MatError::AllocationFailure => write!(f, "allocation failure"),
            MatError::Overflow(what) => write!(f, "size overflow in {what}"),
            MatError::NotFound => write!(f, "not found"),
        }
    }
}

impl std::error::Error for MatError {}

impl From<std::io::Error> for MatError {
    fn from(_: std::io::Error) -> Self {
        MatError::IoUnavailable
    }
}
