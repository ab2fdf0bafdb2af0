//! Compile-time configuration constants.
//!
//! Collected here instead of scattered as magic numbers through the parser
//! and emitter, mirroring how the format's few tunables (nesting depth, name
//! length, buffer growth) are all small integers with no runtime override.

/// Maximum recursion depth for nested compressed elements.
///
/// Real files nest at most once (a single compressed wrapper around the
/// whole element stream); this bounds malicious inputs that would otherwise
/// recurse the decompressor until the stack overflows.
pub const MAX_NESTING_DEPTH: u32 = 32;

/// Maximum bytes copied into a matrix name slot, not counting the
/// terminating NUL.
pub const MAX_NAME_LEN: usize = 255;

/// Starting capacity for the inflate sink; doubled on overflow.
pub const INITIAL_INFLATE_CAPACITY: usize = 64 * 1024;

/// Starting capacity for a descriptor list produced by the list visitor;
/// doubled on overflow.
pub const INITIAL_DESCRIPTOR_CAPACITY: usize = 8;

/// Byte length of the MAT5 file header (description + reserved + version +
/// endian marker).
pub const HEADER_LEN: usize = 128;

/// Version word written into header bytes 124-125, little-endian.
pub const VERSION_WORD: u16 = 0x0100;
