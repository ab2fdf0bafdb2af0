//! Public entry points: load the first matrix of a given rank, load one by
//! name, list matrices, save a cube, and append a wavelength vector.
//!
//! Grounded in `examples/original_source/HSIView/MatHelper.c`'s split between
//! `load_first_3d_double_cube` (convenience, first-match-wins) and a
//! name-addressed load, and its boolean-returning save functions — carried
//! here as a thin `Option`/`bool` convenience layer over a `Result`-returning
//! core, per this crate's decision to expose both (see DESIGN.md).

use std::path::Path;

use crate::container::Container;
use crate::cube::{Cube, DataType, MatrixDescriptor};
use crate::error::MatError;
use crate::visitors::{LoadVisitor, ListVisitor};
use crate::walker::scan_elements;
use crate::writer;

const WAVELENGTHS_NAME: &str = "wavelengths";

/// Loads the first supported matrix of the given rank (2 or 3).
///
/// "First" means first-encountered in a depth-first scan of the element
/// stream, descending into compressed sub-streams as it goes. When more
/// than one matrix of the requested rank exists, earlier scan order wins —
/// this crate takes no position on which the caller "meant".
pub fn load_first_of_rank(path: impl AsRef<Path>, rank: u8) -> Result<Option<(MatrixDescriptor, Cube)>, MatError> {
    log::debug!("loading first rank-{rank} matrix from {:?}", path.as_ref());
    let container = Container::open(path)?;
    let mut visitor = LoadVisitor::first_of_rank(rank);
    scan_elements(container.element_stream(), container.endian(), 0, &mut visitor)?;
    Ok(visitor.into_found())
}

/// Loads the first supported matrix of `rank` with the given name.
///
/// When multiple same-rank matrices share a name, the first match in scan
/// order wins; later same-name matrices are never reached because the scan
/// stops at the first match (see DESIGN.md for this decision).
pub fn load_by_name(path: impl AsRef<Path>, name: &str, rank: u8) -> Result<Option<(MatrixDescriptor, Cube)>, MatError> {
    log::debug!("loading rank-{rank} matrix named {name:?} from {:?}", path.as_ref());
    let container = Container::open(path)?;
    let mut visitor = LoadVisitor::by_name(name, rank);
    scan_elements(container.element_stream(), container.endian(), 0, &mut visitor)?;
    Ok(visitor.into_found())
}

/// Lists every supported matrix's descriptor, optionally filtered to one
/// rank.
pub fn list_matrices(path: impl AsRef<Path>, rank_filter: Option<u8>) -> Result<Vec<MatrixDescriptor>, MatError> {
    log::debug!("listing matrices in {:?} (rank filter: {:?})", path.as_ref(), rank_filter);
    let container = Container::open(path)?;
    let mut visitor = ListVisitor::new(rank_filter);
    scan_elements(container.element_stream(), container.endian(), 0, &mut visitor)?;
    Ok(visitor.into_descriptors())
}

/// Writes a fresh container holding a single named cube, overwriting any
/// file already at `path`.
pub fn save_cube(path: impl AsRef<Path>, description: &str, name: &str, cube: &Cube) -> Result<(), MatError> {
    log::info!("saving cube {name:?} ({:?}) to {:?}", cube.dims(), path.as_ref());
    writer::save_cube(path, description, name, cube)
}

/// Appends a named cube to a container, creating it fresh if `path` doesn't
/// exist yet. Refuses to append to a big-endian container (see
/// [`writer::append_cube`]).
pub fn append_cube(path: impl AsRef<Path>, description: &str, name: &str, cube: &Cube) -> Result<(), MatError> {
    log::info!("appending cube {name:?} ({:?}) to {:?}", cube.dims(), path.as_ref());
    writer::append_cube(path, description, name, cube)
}

/// Appends a wavelength vector (an `Nx1` `Float64` matrix named
/// `"wavelengths"`) to a container, creating it fresh if it doesn't exist.
///
/// Mirrors the original tool's `save_wavelengths`, which is always an
/// append — a spectral cube and its wavelength axis are written as separate
/// calls rather than one combined matrix.
pub fn append_wavelengths(path: impl AsRef<Path>, description: &str, wavelengths: &[f64]) -> Result<(), MatError> {
    log::info!("appending {} wavelengths to {:?}", wavelengths.len(), path.as_ref());
    let mut data = Vec::with_capacity(wavelengths.len() * 8);
    for w in wavelengths {
        data.extend_from_slice(&w.to_le_bytes());
    }
    let cube = Cube::new(data, [wavelengths.len(), 1, 1], 2, DataType::Float64)?;
    writer::append_cube(path, description, WAVELENGTHS_NAME, &cube)
}

/// `Option`-collapsing convenience over [`load_first_of_rank`]: any error is
/// logged and reported as `None` rather than propagated.
pub fn try_load_first_of_rank(path: impl AsRef<Path>, rank: u8) -> Option<(MatrixDescriptor, Cube)> {
    match load_first_of_rank(path, rank) {
        Ok(found) => found,
        Err(e) => {
            log::warn!("load_first_of_rank failed: {e}");
            None
        }
    }
}

/// `Option`-collapsing convenience over [`load_by_name`].
pub fn try_load_by_name(path: impl AsRef<Path>, name: &str, rank: u8) -> Option<(MatrixDescriptor, Cube)> {
    match load_by_name(path, name, rank) {
        Ok(found) => found,
        Err(e) => {
            log::warn!("load_by_name failed: {e}");
            None
        }
    }
}

// Named, rank-fixed entry points as thin wrappers over the rank-generic
// core above — kept separate so callers can reach for the exact operation
// they mean without reconstructing the rank argument each time.

/// Load the first supported rank-3 matrix.
pub fn load_first_of_rank_3(path: impl AsRef<Path>) -> Result<Option<(MatrixDescriptor, Cube)>, MatError> {
    load_first_of_rank(path, 3)
}

/// Load a rank-3 matrix by exact name.
pub fn load_by_name_rank3(path: impl AsRef<Path>, name: &str) -> Result<Option<(MatrixDescriptor, Cube)>, MatError> {
    load_by_name(path, name, 3)
}

/// Load a rank-2 matrix by exact name.
pub fn load_by_name_rank2(path: impl AsRef<Path>, name: &str) -> Result<Option<(MatrixDescriptor, Cube)>, MatError> {
    load_by_name(path, name, 2)
}

/// List every supported rank-3 matrix.
pub fn list_rank_3(path: impl AsRef<Path>) -> Result<Vec<MatrixDescriptor>, MatError> {
    list_matrices(path, Some(3))
}

/// List every supported rank-2 matrix.
pub fn list_rank_2(path: impl AsRef<Path>) -> Result<Vec<MatrixDescriptor>, MatError> {
    list_matrices(path, Some(2))
}

/// Save a rank-3 cube to a fresh file.
pub fn save_rank3_cube(path: impl AsRef<Path>, description: &str, name: &str, cube: &Cube) -> Result<(), MatError> {
    if cube.rank() != 3 {
        return Err(MatError::UnsupportedMatrix("save_rank3_cube requires a rank-3 cube"));
    }
    save_cube(path, description, name, cube)
}

/// `bool`-collapsing convenience over [`save_cube`].
pub fn try_save_cube(path: impl AsRef<Path>, description: &str, name: &str, cube: &Cube) -> bool {
    match save_cube(path, description, name, cube) {
        Ok(()) => true,
        Err(e) => {
            log::warn!("save_cube failed: {e}");
            false
        }
    }
}

/// `bool`-collapsing convenience over [`append_cube`].
pub fn try_append_cube(path: impl AsRef<Path>, description: &str, name: &str, cube: &Cube) -> bool {
    match append_cube(path, description, name, cube) {
        Ok(()) => true,
        Err(e) => {
            log::warn!("append_cube failed: {e}");
            false
        }
    }
}

/// `bool`-collapsing convenience over [`append_wavelengths`].
pub fn try_append_wavelengths(path: impl AsRef<Path>, description: &str, wavelengths: &[f64]) -> bool {
    match append_wavelengths(path, description, wavelengths) {
        Ok(()) => true,
        Err(e) => {
            log::warn!("append_wavelengths failed: {e}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_then_load_first_of_rank_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roundtrip.mat");
        let cube = Cube::new(vec![7u8; 8 * 6], [2, 3, 1], 2, DataType::Float64).unwrap();
        save_cube(&path, "test file", "m", &cube).unwrap();

        let (descriptor, loaded) = load_first_of_rank(&path, 2).unwrap().unwrap();
        assert_eq!(descriptor.name, "m");
        assert_eq!(loaded.data(), cube.data());
    }

    #[test]
    fn load_by_name_returns_none_when_absent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.mat");
        let cube = Cube::new(vec![0u8; 8], [1, 1, 1], 2, DataType::Float64).unwrap();
        save_cube(&path, "test file", "only", &cube).unwrap();
        assert!(load_by_name(&path, "missing", 2).unwrap().is_none());
    }

    #[test]
    fn append_wavelengths_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wl.mat");
        let wavelengths = vec![400.0, 450.5, 500.25];
        append_wavelengths(&path, "test file", &wavelengths).unwrap();

        let (descriptor, cube) = load_by_name(&path, WAVELENGTHS_NAME, 2).unwrap().unwrap();
        assert_eq!(descriptor.dims, [3, 1, 1]);
        let recovered: Vec<f64> =
            cube.data().chunks_exact(8).map(|c| f64::from_le_bytes(c.try_into().unwrap())).collect();
        assert_eq!(recovered, wavelengths);
    }

    #[test]
    fn try_wrappers_collapse_errors_to_false_or_none() {
        assert!(!try_save_cube("/nonexistent/dir/x.mat", "d", "n", &Cube::new(vec![0u8; 8], [1, 1, 1], 2, DataType::Float64).unwrap()));
        assert!(try_load_first_of_rank("/nonexistent/dir/x.mat", 2).is_none());
    }

    #[test]
    fn list_matrices_filters_by_rank() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("list.mat");
        let cube2 = Cube::new(vec![0u8; 8], [1, 1, 1], 2, DataType::Float64).unwrap();
        let cube3 = Cube::new(vec![0u8; 8], [1, 1, 1], 3, DataType::Float64).unwrap();
        save_cube(&path, "d", "a", &cube2).unwrap();
        writer::append_cube(&path, "d", "b", &cube3).unwrap();

        let rank2 = list_matrices(&path, Some(2)).unwrap();
        assert_eq!(rank2.len(), 1);
        assert_eq!(rank2[0].name, "a");
        let all = list_matrices(&path, None).unwrap();
        assert_eq!(all.len(), 2);
    }
}
