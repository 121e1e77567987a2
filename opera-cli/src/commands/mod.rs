//! Subcommand implementations.

pub mod check;
pub mod compress;
pub mod decompress;

/// Shared result type for subcommands.
pub type CmdResult = Result<(), Box<dyn std::error::Error>>;
