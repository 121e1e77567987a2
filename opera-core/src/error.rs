//! Error types for codec operations.

use std::io;
use thiserror::Error;

/// The error type for opera codec operations.
#[derive(Debug, Error)]
pub enum OperaError {
    /// I/O error from an underlying reader/writer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A bounded output buffer ran out of space.
    #[error("Output buffer overflow: capacity {capacity_words} words exhausted")]
    Overflow {
        /// Capacity of the buffer that overflowed, in 32-bit words.
        capacity_words: usize,
    },

    /// The compressed stream ended before the end-of-stream token.
    #[error("Compressed data ended before the end-of-stream token")]
    DataMissing,

    /// Input words were left over after the end-of-stream token.
    #[error("{trailing_words} word(s) of input remain after the end-of-stream token")]
    DataRemains {
        /// Number of unconsumed input words.
        trailing_words: usize,
    },
}

/// Result type alias for opera codec operations.
pub type Result<T> = std::result::Result<T, OperaError>;
