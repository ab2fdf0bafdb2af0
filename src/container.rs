//! Container-level file access: mmap-backed loading with a heap-read
//! fallback, and the 128-byte header's validation and endian negotiation.
//!
//! Adapted from a streaming descriptor wrapper to a whole-file memory view
//! since this format is read in one shot rather than streamed.

use std::fs::File;
use std::path::Path;

use memmap2::Mmap;

use crate::config::HEADER_LEN;
use crate::endian::Endian;
use crate::error::MatError;

/// Byte offset of the 2-byte endian marker within the header.
const ENDIAN_MARKER_OFFSET: usize = 126;

/// Backing storage for a loaded container: either a memory-mapped view of
/// the file, or — when mapping isn't available — the whole file read onto
/// the heap.
enum Backing {
    Mapped(Mmap),
    Owned(Vec<u8>),
}

impl Backing {
    fn as_slice(&self) -> &[u8] {
        match self {
            Backing::Mapped(m) => m,
            Backing::Owned(v) => v,
        }
    }
}

/// A MAT5 file opened for reading: a validated header plus a byte view of
/// the element stream that follows it.
pub struct Container {
    backing: Backing,
    endian: Endian,
}

impl Container {
    /// Opens `path`, memory-mapping it when possible and falling back to a
    /// full heap read otherwise (e.g. the path names a pipe or another
    /// non-mappable file).
    ///
    /// Validates that the file is at least [`HEADER_LEN`] bytes long and
    /// carries a recognized endian marker; returns
    /// [`MatError::NotAContainer`] otherwise.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, MatError> {
        let file = File::open(path.as_ref())?;
        let backing = match unsafe { Mmap::map(&file) } {
            Ok(mmap) => Backing::Mapped(mmap),
            Err(_) => Backing::Owned(std::fs::read(path.as_ref())?),
        };

        let slice = backing.as_slice();
        if slice.len() < HEADER_LEN {
            return Err(MatError::NotAContainer);
        }
        let marker = &slice[ENDIAN_MARKER_OFFSET..ENDIAN_MARKER_OFFSET + 2];
        let endian = match marker {
            b"IM" => Endian::Little,
            b"MI" => Endian::Big,
            _ => return Err(MatError::NotAContainer),
        };

        Ok(Container { backing, endian })
    }

    /// The byte order declared by the header.
    pub fn endian(&self) -> Endian {
        self.endian
    }

    /// The element stream following the 128-byte header.
    pub fn element_stream(&self) -> &[u8] {
        &self.backing.as_slice()[HEADER_LEN..]
    }

    /// The raw 116-byte description field, trimmed of trailing NULs/spaces.
    pub fn description(&self) -> &str {
        let raw = &self.backing.as_slice()[0..116];
        let end = raw.iter().position(|&b| b == 0).unwrap_or(raw.len());
        std::str::from_utf8(&raw[..end]).unwrap_or("").trim_end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_header(endian_marker: &[u8; 2]) -> Vec<u8> {
        let mut buf = vec![0u8; HEADER_LEN];
        let desc = b"MATLAB 5.0 MAT-file, written for tests";
        buf[..desc.len()].copy_from_slice(desc);
        buf[124..126].copy_from_slice(&0x0100u16.to_le_bytes());
        buf[126..128].copy_from_slice(endian_marker);
        buf
    }

    #[test]
    fn opens_a_little_endian_file() {
        let mut buf = write_header(b"IM");
        buf.extend_from_slice(&[1, 2, 3, 4]);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("little.mat");
        std::fs::File::create(&path).unwrap().write_all(&buf).unwrap();

        let container = Container::open(&path).unwrap();
        assert_eq!(container.endian(), Endian::Little);
        assert_eq!(container.element_stream(), &[1, 2, 3, 4]);
        assert!(container.description().starts_with("MATLAB 5.0"));
    }

    #[test]
    fn opens_a_big_endian_file() {
        let buf = write_header(b"MI");
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big.mat");
        std::fs::File::create(&path).unwrap().write_all(&buf).unwrap();

        let container = Container::open(&path).unwrap();
        assert_eq!(container.endian(), Endian::Big);
    }

    #[test]
    fn rejects_a_truncated_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("short.mat");
        std::fs::File::create(&path).unwrap().write_all(&[0u8; 16]).unwrap();
        assert!(Container::open(&path).is_err());
    }

    #[test]
    fn rejects_an_unrecognized_endian_marker() {
        let buf = write_header(b"XX");
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.mat");
        std::fs::File::create(&path).unwrap().write_all(&buf).unwrap();
        assert!(Container::open(&path).is_err());
    }

    #[test]
    fn rejects_a_missing_file() {
        assert!(Container::open("/nonexistent/path/to/nowhere.mat").is_err());
    }
}
