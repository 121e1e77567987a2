//! Opera CLI - 3DO-compatible LZSS compression tool
//!
//! Compresses and decompresses files in the format used by the 3DO SDK
//! compression library: bit-packed LZSS tokens in 32-bit big-endian words.

mod commands;
mod utils;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "opera")]
#[command(author, version, about = "3DO-compatible LZSS compression tool")]
#[command(long_about = "
Compresses and decompresses files in the LZSS format used by the 3DO SDK
compression library.

Examples:
  opera compress game.cel
  opera compress game.cel game.cel.lz
  opera decompress game.cel.compressed
  opera check
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress a file
    #[command(alias = "c")]
    Compress {
        /// Input file
        input: PathBuf,

        /// Output file (default: input + '.compressed')
        output: Option<PathBuf>,
    },

    /// Decompress a file
    #[command(alias = "d")]
    Decompress {
        /// Input file
        input: PathBuf,

        /// Output file (default: input + '.decompressed')
        output: Option<PathBuf>,
    },

    /// Run the built-in codec self-test
    Check,
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Compress { input, output } => commands::compress::run(&input, output.as_deref()),
        Commands::Decompress { input, output } => {
            commands::decompress::run(&input, output.as_deref())
        }
        Commands::Check => commands::check::run(),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
