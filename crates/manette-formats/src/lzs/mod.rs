//! LZS sliding-window codec for archived payloads
//!
//! Payloads stored in `SQUARESOFT` archives are often shrunk with a 4 KiB
//! sliding-window scheme: every group of up to 8 tokens is preceded by one
//! control byte whose bit *i* (least-significant first) marks token *i* as a
//! literal (1) or a back-reference (0). A back-reference packs a 12-bit
//! window offset and a 4-bit match length into two bytes:
//!
//! ```text
//! byte 0: offset bits 0..8
//! byte 1: offset bits 8..12 in the high nibble; (length - 3) in the low
//! ```
//!
//! Both directions are stateless free functions over whole in-memory
//! buffers, mirroring how the archive engine itself works; the container
//! never calls them — callers apply them to extracted payload bytes.
//!
//! # Usage
//!
//! ```rust
//! use manette_formats::lzs;
//!
//! let original = b"abcabcabcabcabc".to_vec();
//! let packed = lzs::compress(&original);
//! assert_eq!(lzs::decompress(&packed), original);
//! ```

mod compress;
mod decompress;

pub use compress::compress;
pub use decompress::decompress;

/// Window size addressable by a back-reference (12-bit offsets)
pub const WINDOW_SIZE: usize = 4096;

/// Shortest encodable match
pub const MIN_MATCH: usize = 3;

/// Longest encodable match; also the gap between the window's ring origin
/// and the stream start
pub const MAX_MATCH: usize = 18;
