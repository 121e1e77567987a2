//! The `check` subcommand: built-in codec self-test.
//!
//! Verifies the compressor and decompressor against wire fixtures whose
//! exact bits match streams produced by the 3DO SDK compression library,
//! plus round-trip, chunking, and error-handling checks over generated
//! data.

use opera_core::OperaError;
use opera_lzss::{LzssDecoder, LzssEncoder, compress_words, decompress_words, simple_compress};

use crate::commands::CmdResult;

type CheckResult = Result<(), String>;

/// Run every self-test case, reporting OK/FAILED per case.
pub fn run() -> CmdResult {
    let cases: &[(&str, fn() -> CheckResult)] = &[
        ("empty stream is a bare terminator", check_empty_stream),
        ("single word encodes as four literals", check_single_word),
        ("repeated bytes use a back-reference", check_back_reference),
        ("round-trip over data patterns", check_round_trips),
        ("chunked feeds match whole feeds", check_chunked_feeds),
        ("truncated stream reports missing data", check_truncation),
        ("trailing words are reported", check_trailing_words),
        ("bounded buffer overflow is reported", check_overflow),
    ];

    let mut failed = 0usize;
    for (name, case) in cases {
        match case() {
            Ok(()) => println!("  OK: {}", name),
            Err(e) => {
                failed += 1;
                println!("  FAILED: {} - {}", name, e);
            }
        }
    }

    println!();
    println!("Check results:");
    println!("  Total cases: {}", cases.len());
    println!("  OK: {}", cases.len() - failed);
    println!("  Failed: {}", failed);

    if failed > 0 {
        std::process::exit(2);
    }

    println!();
    println!("All cases OK");
    Ok(())
}

fn expect_eq<T: PartialEq + std::fmt::Debug>(actual: T, expected: T, what: &str) -> CheckResult {
    if actual == expected {
        Ok(())
    } else {
        Err(format!("{}: got {:?}, expected {:?}", what, actual, expected))
    }
}

fn check_empty_stream() -> CheckResult {
    let compressed = compress_words(&[]);
    let decoded = decompress_words(&compressed).map_err(|e| e.to_string())?;

    expect_eq(compressed, vec![0x00000000], "compressed words")?;
    expect_eq(decoded.len(), 0, "decoded word count")
}

fn check_single_word() -> CheckResult {
    let compressed = compress_words(&[0x41424344]);
    let decoded = decompress_words(&compressed).map_err(|e| e.to_string())?;

    expect_eq(compressed, vec![0xA0D0A874, 0x40000000], "compressed words")?;
    expect_eq(decoded, vec![0x41424344], "decoded words")
}

fn check_back_reference() -> CheckResult {
    // Sixteen 'A' bytes: literal + (offset 1, length field 12) reference.
    let source = vec![0x41414141u32; 4];
    let compressed = compress_words(&source);
    let decoded = decompress_words(&compressed).map_err(|e| e.to_string())?;

    expect_eq(compressed, vec![0xA0800700, 0x00000000], "compressed words")?;
    expect_eq(decoded, source, "decoded words")
}

fn check_round_trips() -> CheckResult {
    for (name, data) in [
        ("uniform", vec![0xAAAAAAAAu32; 512]),
        ("counter", (0..2048u32).collect()),
        ("lcg", lcg_words(4096)),
        ("sparse", (0..1024u32).map(|i| u32::from(i % 7 == 0)).collect()),
    ] {
        let compressed = compress_words(&data);
        let decoded =
            decompress_words(&compressed).map_err(|e| format!("{}: {}", name, e))?;
        if decoded != data {
            return Err(format!("{}: round-trip mismatch", name));
        }
    }
    Ok(())
}

fn check_chunked_feeds() -> CheckResult {
    let data = lcg_words(1000);
    let whole = compress_words(&data);

    for chunks in [vec![1, 999], vec![500, 500], vec![333, 333, 334]] {
        let mut encoder = LzssEncoder::new(Vec::new());
        let mut offset = 0;
        for &n in &chunks {
            encoder.feed(&data[offset..offset + n]);
            offset += n;
        }
        if encoder.finish() != whole {
            return Err(format!("encoding differs for chunk sizes {:?}", chunks));
        }
    }

    let mut decoder = LzssDecoder::new(Vec::new());
    for word in &whole {
        decoder.feed(std::slice::from_ref(word));
    }
    let decoded = decoder.finish().map_err(|e| e.to_string())?;
    expect_eq(decoded == data, true, "word-by-word decode round-trip")
}

fn check_truncation() -> CheckResult {
    let compressed = compress_words(&lcg_words(256));
    match decompress_words(&compressed[..compressed.len() - 1]) {
        Err(OperaError::DataMissing) => Ok(()),
        other => Err(format!("expected DataMissing, got {:?}", other.map(|v| v.len()))),
    }
}

fn check_trailing_words() -> CheckResult {
    let mut compressed = compress_words(&[0x01020304]);
    compressed.push(0xDEADBEEF);
    match decompress_words(&compressed) {
        Err(OperaError::DataRemains { trailing_words: 1 }) => Ok(()),
        other => Err(format!("expected DataRemains, got {:?}", other.map(|v| v.len()))),
    }
}

fn check_overflow() -> CheckResult {
    let data = lcg_words(256);
    let mut small = [0u32; 8];
    match simple_compress(&data, &mut small) {
        Err(OperaError::Overflow { capacity_words: 8 }) => Ok(()),
        other => Err(format!("expected Overflow, got {:?}", other)),
    }
}

/// Deterministic pseudorandom words.
fn lcg_words(count: usize) -> Vec<u32> {
    let mut seed: u64 = 0x123456789ABCDEF0;
    (0..count)
        .map(|_| {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
            (seed >> 32) as u32
        })
        .collect()
}
