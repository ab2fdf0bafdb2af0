//! The numeric element type table, the owned N-dimensional [`Cube`], and the
//! [`MatrixDescriptor`] used by the listing API.
//!
//! Prefers an explicit `DataType` enum over raw integer codes, with a single
//! table translating between the in-memory enum, class code, container
//! data-type code, and byte width.

use crate::config::MAX_NAME_LEN;
use crate::error::MatError;

/// The six numeric element types this crate reads and writes.
///
/// Two integer codes exist per variant in the container format: the *class
/// code* (embedded in a matrix's array-flags word) and the *data-type code*
/// (the tag type of a raw sub-element). Both must agree for a matrix to be
/// accepted — see [`DataType::class_code`] and [`DataType::data_type_code`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    Float64,
    Float32,
    Uint8,
    Uint16,
    Int8,
    Int16,
}

impl DataType {
    /// Byte width of one element: one of 1, 2, 4, 8.
    #[inline]
    pub fn byte_width(self) -> usize {
        match self {
            DataType::Float64 => 8,
            DataType::Float32 => 4,
            DataType::Uint8 => 1,
            DataType::Uint16 => 2,
            DataType::Int8 => 1,
            DataType::Int16 => 2,
        }
    }

    /// The 8-bit class code stored in a matrix's array-flags word.
    #[inline]
    pub fn class_code(self) -> u8 {
        match self {
            DataType::Float64 => 6,
            DataType::Float32 => 7,
            DataType::Int8 => 8,
            DataType::Uint8 => 9,
            DataType::Int16 => 10,
            DataType::Uint16 => 11,
        }
    }

    /// Resolves a class code to a [`DataType`]; `None` for any non-numeric
    /// or unrecognized class (cell, struct, object, char, sparse, ...).
    pub fn from_class_code(code: u8) -> Option<Self> {
        match code {
            6 => Some(DataType::Float64),
            7 => Some(DataType::Float32),
            8 => Some(DataType::Int8),
            9 => Some(DataType::Uint8),
            10 => Some(DataType::Int16),
            11 => Some(DataType::Uint16),
            _ => None,
        }
    }

    /// The container data-type code used for the raw "real data" sub-element.
    #[inline]
    pub fn data_type_code(self) -> u32 {
        match self {
            DataType::Int8 => 1,
            DataType::Uint8 => 2,
            DataType::Int16 => 3,
            DataType::Uint16 => 4,
            DataType::Float32 => 7,
            DataType::Float64 => 9,
        }
    }

    /// Resolves a data-type code to a [`DataType`]; `None` for any code this
    /// crate does not accept as matrix payload data (including int32/uint32,
    /// int64/uint64, matrix, compressed, and the utf8/16/32 string codes).
    pub fn from_data_type_code(code: u32) -> Option<Self> {
        match code {
            1 => Some(DataType::Int8),
            2 => Some(DataType::Uint8),
            3 => Some(DataType::Int16),
            4 => Some(DataType::Uint16),
            7 => Some(DataType::Float32),
            9 => Some(DataType::Float64),
            _ => None,
        }
    }
}

/// An owned rank-2 or rank-3 numeric array.
///
/// Invariants (checked by [`Cube::new`]):
/// - `data.len() == product(dims) * dtype.byte_width()`
/// - every entry of `dims` (up to `rank`) is strictly positive
/// - `rank` is 2 or 3
/// - when `rank == 2`, `dims[2] == 1`
#[derive(Debug, Clone)]
pub struct Cube {
    data: Vec<u8>,
    dims: [usize; 3],
    rank: u8,
    dtype: DataType,
}

impl Cube {
    /// Builds a cube, checking every structural invariant: rank is 2 or 3,
    /// a rank-2 cube has a trailing unit dimension, every active dimension
    /// is positive, and the buffer length matches `dims * element size`.
    pub fn new(data: Vec<u8>, dims: [usize; 3], rank: u8, dtype: DataType) -> Result<Self, MatError> {
        if rank != 2 && rank != 3 {
            return Err(MatError::UnsupportedMatrix("rank must be 2 or 3"));
        }
        if rank == 2 && dims[2] != 1 {
            return Err(MatError::UnsupportedMatrix("rank-2 cube must have dims[2] == 1"));
        }
        let active = &dims[..rank as usize];
        if active.iter().any(|&d| d == 0) {
            return Err(MatError::UnsupportedMatrix("dimension must be positive"));
        }
        let count = crate::arith::product(active)?;
        let expected = crate::arith::checked_mul(count, dtype.byte_width())?;
        if data.len() != expected {
            return Err(MatError::UnsupportedMatrix("buffer length does not match dims * element size"));
        }
        Ok(Cube { data, dims, rank, dtype })
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    pub fn dims(&self) -> [usize; 3] {
        self.dims
    }

    pub fn rank(&self) -> u8 {
        self.rank
    }

    pub fn dtype(&self) -> DataType {
        self.dtype
    }
}

/// A name plus shape descriptor, with no payload — what [`crate::api`]'s
/// list operations return.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixDescriptor {
    pub name: String,
    pub dims: [usize; 3],
    pub dtype: DataType,
}

impl MatrixDescriptor {
    /// Builds a descriptor, truncating `name` to [`MAX_NAME_LEN`] bytes and
    /// falling back to the literal `"unnamed"` for an empty name, matching
    /// the list visitor's behavior.
    pub fn new(name: &str, dims: [usize; 3], dtype: DataType) -> Self {
        let name = if name.is_empty() {
            "unnamed".to_string()
        } else {
            let mut truncated = name.to_string();
            truncated.truncate(MAX_NAME_LEN);
            truncated
        };
        MatrixDescriptor { name, dims, dtype }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_and_data_type_codes_round_trip() {
        for dt in [
            DataType::Float64,
            DataType::Float32,
            DataType::Uint8,
            DataType::Uint16,
            DataType::Int8,
            DataType::Int16,
        ] {
            assert_eq!(DataType::from_class_code(dt.class_code()), Some(dt));
            assert_eq!(DataType::from_data_type_code(dt.data_type_code()), Some(dt));
        }
    }

    #[test]
    fn unknown_codes_reject() {
        assert_eq!(DataType::from_class_code(1), None); // cell
        assert_eq!(DataType::from_class_code(5), None); // sparse
        assert_eq!(DataType::from_data_type_code(5), None); // int32
        assert_eq!(DataType::from_data_type_code(6), None); // uint32
        assert_eq!(DataType::from_data_type_code(12), None); // int64
    }

    #[test]
    fn cube_new_checks_buffer_length() {
        let ok = Cube::new(vec![0u8; 8 * 8], [2, 2, 2], 3, DataType::Float64);
        assert!(ok.is_ok());
        let bad = Cube::new(vec![0u8; 7], [2, 2, 2], 3, DataType::Float64);
        assert!(bad.is_err());
    }

    #[test]
    fn cube_new_rejects_zero_dimension() {
        let bad = Cube::new(vec![], [0, 1, 1], 3, DataType::Uint8);
        assert!(bad.is_err());
    }

    #[test]
    fn cube_new_rank2_requires_trailing_one() {
        let bad = Cube::new(vec![0u8; 2], [2, 1, 2], 2, DataType::Uint8);
        assert!(bad.is_err());
        let ok = Cube::new(vec![0u8; 2], [2, 1, 1], 2, DataType::Uint8);
        assert!(ok.is_ok());
    }

    #[test]
    fn descriptor_falls_back_to_unnamed() {
        let d = MatrixDescriptor::new("", [1, 1, 1], DataType::Float64);
        assert_eq!(d.name, "unnamed");
    }

    #[test]
    fn descriptor_truncates_long_name() {
        let long = "a".repeat(500);
        let d = MatrixDescriptor::new(&long, [1, 1, 1], DataType::Float64);
        assert_eq!(d.name.len(), MAX_NAME_LEN);
    }
}
