//! The `decompress` subcommand.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use opera_core::sink::IoSink;
use opera_lzss::LzssDecoder;

use crate::commands::CmdResult;
use crate::utils::{default_output_path, multiple_of_4, print_report, read_words};

/// Decompress `input` into `output` (default: input + ".decompressed").
pub fn run(input: &Path, output: Option<&Path>) -> CmdResult {
    let output = match output {
        Some(path) => path.to_path_buf(),
        None => default_output_path(input, ".decompressed"),
    };

    let (words, byte_len) = read_words(input)?;
    if !multiple_of_4(byte_len) {
        eprintln!(
            "WARNING - input file is not a multiple of 4 bytes. \
             The file may be corrupted or not a 3DO compressed file."
        );
    }

    let writer = BufWriter::new(File::create(&output)?);
    let mut decoder = LzssDecoder::new(IoSink::new(writer));
    decoder.feed(&words);

    let sink = decoder.finish()?;
    let out_bytes = sink.words_written() * 4;
    let mut writer = sink.into_inner()?;
    writer.flush()?;

    print_report(input, byte_len, &output, out_bytes);
    Ok(())
}
