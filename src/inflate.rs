//! DEFLATE decompression for type-15 compressed sub-streams, via `flate2`.
//!
//! Grows a destination buffer as output arrives rather than requiring the
//! caller to pre-size it, since a compressed element carries no uncompressed
//! size field.

use std::io::Read;

use flate2::read::ZlibDecoder;

use crate::arith::checked_mul;
use crate::config::INITIAL_INFLATE_CAPACITY;
use crate::error::MatError;

/// Maximum size a single inflate is allowed to grow to, guarding against a
/// compressed bomb expanding without bound.
const MAX_INFLATE_OUTPUT: usize = 1usize << 32;

/// Inflates a complete zlib/DEFLATE stream, growing the output buffer in
/// doubling steps starting from [`INITIAL_INFLATE_CAPACITY`].
///
/// Returns [`MatError::CorruptCompressedStream`] if the stream ends before a
/// valid DEFLATE end-of-stream marker, and [`MatError::Overflow`] if the
/// output would exceed [`MAX_INFLATE_OUTPUT`].
pub fn inflate_all(compressed: &[u8]) -> Result<Vec<u8>, MatError> {
    let mut decoder = ZlibDecoder::new(compressed);
    let mut out = Vec::with_capacity(INITIAL_INFLATE_CAPACITY);
    let mut chunk = vec![0u8; INITIAL_INFLATE_CAPACITY];

    loop {
        let n = decoder.read(&mut chunk).map_err(|_| MatError::CorruptCompressedStream)?;
        if n == 0 {
            break;
        }
        out.extend_from_slice(&chunk[..n]);
        if out.len() >= MAX_INFLATE_OUTPUT {
            return Err(MatError::Overflow("inflate output"));
        }
        if chunk.len() < MAX_INFLATE_OUTPUT {
            let grown = checked_mul(chunk.len(), 2)?;
            chunk.resize(grown.min(MAX_INFLATE_OUTPUT), 0);
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::ZlibEncoder;
    use flate2::Compression;
    use std::io::Write;

    fn zlib_compress(data: &[u8]) -> Vec<u8> {
        let mut enc = ZlibEncoder::new(Vec::new(), Compression::default());
        enc.write_all(data).unwrap();
        enc.finish().unwrap()
    }

    #[test]
    fn round_trips_small_payload() {
        let original = b"the quick brown fox jumps over the lazy dog".repeat(50);
        let compressed = zlib_compress(&original);
        let decompressed = inflate_all(&compressed).unwrap();
        assert_eq!(decompressed, original);
    }

    #[test]
    fn empty_payload_round_trips() {
        let compressed = zlib_compress(&[]);
        let decompressed = inflate_all(&compressed).unwrap();
        assert!(decompressed.is_empty());
    }

    #[test]
    fn truncated_stream_is_corrupt() {
        let original = vec![0x42u8; 10_000];
        let compressed = zlib_compress(&original);
        let truncated = &compressed[..compressed.len() / 2];
        assert!(inflate_all(truncated).is_err());
    }

    #[test]
    fn garbage_input_is_corrupt() {
        let garbage = [0xDE, 0xAD, 0xBE, 0xEF, 0x00, 0x01, 0x02];
        assert!(inflate_all(&garbage).is_err());
    }
}
