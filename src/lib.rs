//! A reader and writer for MAT5 binary scientific array containers.
//!
//! Supports the subset of the format used to exchange rank-2 and rank-3 real
//! numeric arrays: `double`, `single`, `int8`, `uint8`, `int16`, `uint16`.
//! Complex data, cell/struct/object/sparse/char classes, and non-numeric
//! matrices are recognized but not loaded — see [`cube::DataType`].

mod arith;
mod config;
mod container;
mod element;
mod endian;
mod inflate;
mod matrix;
mod walker;
mod writer;

pub mod api;
pub mod cube;
pub mod error;
pub mod visitors;

pub use api::{
    append_cube, append_wavelengths, list_matrices, list_rank_2, list_rank_3, load_by_name,
    load_by_name_rank2, load_by_name_rank3, load_first_of_rank, load_first_of_rank_3, save_cube,
    save_rank3_cube, try_append_cube, try_append_wavelengths, try_load_by_name,
    try_load_first_of_rank, try_save_cube,
};
pub use cube::{Cube, DataType, MatrixDescriptor};
pub use error::MatError;
