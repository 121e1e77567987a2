//! # Opera LZSS
//!
//! Streaming LZSS codec compatible with the compression format used by
//! the 3DO SDK.
//!
//! The format encodes a byte stream as a sequence of tokens, each a
//! 1-bit tag followed by either a raw byte (tag 1) or a 12-bit window
//! offset plus 4-bit length back-reference (tag 0), packed MSB-first
//! into 32-bit big-endian words. Phrases of 3 to 18 bytes are matched
//! against a 4096-byte sliding window; a zero offset terminates the
//! stream.
//!
//! Both directions are streaming: input may arrive in arbitrary chunk
//! sizes and the codec suspends and resumes without loss. The output
//! side is a [`WordSink`](opera_core::WordSink) callback receiving one
//! completed word at a time.
//!
//! ## Example
//!
//! ```rust
//! use opera_lzss::{compress_words, decompress_words};
//!
//! let data = [0x41424344, 0x41424344, 0x41424344];
//! let packed = compress_words(&data);
//! let unpacked = decompress_words(&packed).unwrap();
//! assert_eq!(unpacked, data);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod decode;
pub mod encode;
pub mod tree;

pub use decode::{LzssDecoder, decompress_words, simple_decompress};
pub use encode::{LzssEncoder, compress_words, simple_compress};
pub use tree::MatchTree;

/// Width in bits of a window-offset field.
pub const INDEX_BITS: u32 = 12;

/// Width in bits of a match-length field.
pub const LENGTH_BITS: u32 = 4;

/// Sliding window length in bytes.
pub const WINDOW_SIZE: usize = 1 << INDEX_BITS;

/// Minimum useful match length minus one; shorter matches cost more
/// bits than the literals they replace.
pub const BREAK_EVEN: usize = 2;

/// Length of a phrase, and of the encoder's look-ahead region.
pub const LOOK_AHEAD_SIZE: usize = (1 << LENGTH_BITS) + BREAK_EVEN;

/// Index of the dummy tree root node.
pub const TREE_ROOT: usize = WINDOW_SIZE;

/// Null sentinel for tree links; also the window position that is never
/// used as a match source.
pub const UNUSED: usize = 0;

/// Offset value that terminates the compressed stream.
pub const END_OF_STREAM: usize = 0;

/// Window arithmetic modulo [`WINDOW_SIZE`].
#[inline]
pub const fn mod_window(a: usize) -> usize {
    a & (WINDOW_SIZE - 1)
}
