//! Byte-order primitives: host-endian detection, 16/32/64-bit byte swaps, and
//! bounds-checked word reads at a runtime-selected endianness.
//!
//! Widened to support both endiannesses since the container negotiates its
//! own byte order via the header marker rather than always being
//! little-endian.

/// Which byte order a stream of raw bytes should be interpreted under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endian {
    Little,
    Big,
}

impl Endian {
    /// The byte order of the machine running this code.
    ///
    /// A pure function — no implicit singleton, no global state.
    #[inline]
    pub fn host() -> Self {
        if cfg!(target_endian = "big") {
            Endian::Big
        } else {
            Endian::Little
        }
    }

    #[inline]
    pub fn is_little(self) -> bool {
        matches!(self, Endian::Little)
    }
}

/// Reads a `u32` from `src` at `offset` under the given endianness.
///
/// # Panics
/// Panics if `offset + 4 > src.len()`. Callers in this crate always
/// bounds-check before calling, per the parser's invariant that reads
/// assume the caller has validated the offset.
#[inline]
pub fn read_u32(src: &[u8], offset: usize, endian: Endian) -> u32 {
    let bytes: [u8; 4] = src[offset..offset + 4].try_into().unwrap();
    match endian {
        Endian::Little => u32::from_le_bytes(bytes),
        Endian::Big => u32::from_be_bytes(bytes),
    }
}

/// Reads a `u64` from `src` at `offset` under the given endianness.
///
/// # Panics
/// Panics if `offset + 8 > src.len()`.
#[inline]
pub fn read_u64(src: &[u8], offset: usize, endian: Endian) -> u64 {
    let bytes: [u8; 8] = src[offset..offset + 8].try_into().unwrap();
    match endian {
        Endian::Little => u64::from_le_bytes(bytes),
        Endian::Big => u64::from_be_bytes(bytes),
    }
}

/// Byte-swaps a `u16` in place semantics (pure, returns the swapped value).
#[inline]
pub fn swap16(v: u16) -> u16 {
    v.swap_bytes()
}

/// Byte-swaps a `u32`.
#[inline]
pub fn swap32(v: u32) -> u32 {
    v.swap_bytes()
}

/// Byte-swaps a `u64`.
#[inline]
pub fn swap64(v: u64) -> u64 {
    v.swap_bytes()
}

/// Writes a `u32` into `dst` at `offset` as little-endian bytes.
///
/// The emitter always produces little-endian output, so this helper, unlike
/// the readers above, never takes an `Endian` parameter.
#[inline]
pub fn write_u32_le(dst: &mut [u8], offset: usize, value: u32) {
    dst[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_u32_little() {
        let buf = [0x78, 0x56, 0x34, 0x12];
        assert_eq!(read_u32(&buf, 0, Endian::Little), 0x1234_5678);
    }

    #[test]
    fn read_u32_big() {
        let buf = [0x12, 0x34, 0x56, 0x78];
        assert_eq!(read_u32(&buf, 0, Endian::Big), 0x1234_5678);
    }

    #[test]
    fn read_u32_offset() {
        let buf = [0xff, 0x78, 0x56, 0x34, 0x12];
        assert_eq!(read_u32(&buf, 1, Endian::Little), 0x1234_5678);
    }

    #[test]
    fn read_u64_roundtrip_both_endians() {
        let mut buf = [0u8; 8];
        buf.copy_from_slice(&0x0102_0304_0506_0708u64.to_le_bytes());
        assert_eq!(read_u64(&buf, 0, Endian::Little), 0x0102_0304_0506_0708);
        buf.copy_from_slice(&0x0102_0304_0506_0708u64.to_be_bytes());
        assert_eq!(read_u64(&buf, 0, Endian::Big), 0x0102_0304_0506_0708);
    }

    #[test]
    fn swap_roundtrips() {
        assert_eq!(swap16(swap16(0xABCD)), 0xABCD);
        assert_eq!(swap32(swap32(0xDEAD_BEEF)), 0xDEAD_BEEF);
        assert_eq!(swap64(swap64(u64::MAX)), u64::MAX);
    }

    #[test]
    fn write_u32_le_roundtrip() {
        let mut buf = [0u8; 4];
        write_u32_le(&mut buf, 0, 0x1234_5678);
        assert_eq!(read_u32(&buf, 0, Endian::Little), 0x1234_5678);
    }

    #[test]
    fn host_is_pure() {
        assert_eq!(Endian::host(), Endian::host());
    }
}
