//! # Opera Core
//!
//! Foundation crate for the opera LZSS codec.
//!
//! The 3DO compression format is a stream of 32-bit big-endian words with
//! bit fields packed MSB-first across word boundaries. This crate provides
//! the pieces both codec directions share:
//!
//! - [`bitstream`]: [`BitWriter`] and [`BitReader`] for word-oriented,
//!   MSB-first bit packing
//! - [`sink`]: the [`WordSink`] output abstraction plus bounded-buffer and
//!   `io::Write`-backed implementations
//! - [`error`]: error types
//!
//! Words are handled as logical `u32` values throughout; the big-endian
//! byte order of the wire is materialized only where words meet actual
//! I/O, via `u32::to_be_bytes` / `u32::from_be_bytes`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bitstream;
pub mod error;
pub mod sink;

pub use bitstream::{BitReader, BitWriter};
pub use error::{OperaError, Result};
pub use sink::{BoundedSink, IoSink, WordSink};
