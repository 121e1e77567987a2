//! Shared file and reporting helpers for the subcommands.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Read a file as a sequence of big-endian 32-bit words.
///
/// Returns the words and the original byte length; a trailing partial
/// word is padded with zeros, matching how the SDK library consumed
/// files that were not a multiple of 4 bytes.
pub fn read_words(path: &Path) -> io::Result<(Vec<u32>, u64)> {
    let bytes = fs::read(path)?;
    let byte_len = bytes.len() as u64;

    let mut words = Vec::with_capacity(bytes.len().div_ceil(4));
    for chunk in bytes.chunks(4) {
        let mut word = [0u8; 4];
        word[..chunk.len()].copy_from_slice(chunk);
        words.push(u32::from_be_bytes(word));
    }

    Ok((words, byte_len))
}

/// Default output path: the input path with `suffix` appended.
pub fn default_output_path(input: &Path, suffix: &str) -> PathBuf {
    let mut name = input.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}

/// Whether a byte count is a whole number of 32-bit words.
pub fn multiple_of_4(len: u64) -> bool {
    len & 0x3 == 0
}

/// Print the input/output size report.
pub fn print_report(src: &Path, src_bytes: u64, dst: &Path, dst_bytes: u64) {
    println!("- input:");
    println!("  - filepath: {}", src.display());
    println!("  - size_in_bytes: {}", src_bytes);
    println!("  - size_in_words: {}", src_bytes / 4);
    println!("- output:");
    println!("  - filepath: {}", dst.display());
    println!("  - size_in_bytes: {}", dst_bytes);
    println!("  - size_in_words: {}", dst_bytes / 4);
}
