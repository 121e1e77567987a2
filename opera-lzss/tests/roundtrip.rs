//! Integration tests for the streaming LZSS codec.
//!
//! These exercise the public API end to end: exact wire fixtures,
//! round-trips across data patterns and past the window wraparound,
//! chunk-boundary equivalence, and the error paths.

use opera_core::{BitReader, OperaError};
use opera_lzss::{
    INDEX_BITS, LENGTH_BITS, LzssDecoder, LzssEncoder, compress_words, decompress_words,
    simple_compress, simple_decompress,
};

/// Deterministic pseudorandom words (same generator the benches use).
fn lcg_words(count: usize) -> Vec<u32> {
    let mut seed: u64 = 0x123456789ABCDEF0;
    (0..count)
        .map(|_| {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
            (seed >> 32) as u32
        })
        .collect()
}

fn patterns() -> Vec<(&'static str, Vec<u32>)> {
    vec![
        ("empty", vec![]),
        ("single", vec![0xCAFEBABE]),
        ("uniform", vec![0x41414141; 64]),
        ("counter", (0..512u32).collect()),
        ("random_small", lcg_words(100)),
        // 32 KiB: several full window laps.
        ("random_large", lcg_words(8192)),
        ("repetitive", {
            let block: Vec<u32> = (0..16u32).map(|i| 0x10101010 + i).collect();
            block.iter().cycle().take(2000).copied().collect()
        }),
    ]
}

// ============================================================================
// Wire fixtures
// ============================================================================

#[test]
fn test_empty_input_wire_fixture() {
    let compressed = compress_words(&[]);
    assert_eq!(compressed, vec![0x00000000]);
    assert_eq!(decompress_words(&compressed).unwrap(), vec![]);
}

#[test]
fn test_single_word_wire_fixture() {
    let compressed = compress_words(&[0x41424344]);
    assert_eq!(compressed, vec![0xA0D0A874, 0x40000000]);
    assert_eq!(decompress_words(&compressed).unwrap(), vec![0x41424344]);
}

#[test]
fn test_back_reference_wire_fixture() {
    let compressed = compress_words(&[0x41414141; 4]);
    assert_eq!(compressed, vec![0xA0800700, 0x00000000]);
    assert_eq!(decompress_words(&compressed).unwrap(), vec![0x41414141; 4]);
}

// ============================================================================
// Round-trip and determinism
// ============================================================================

#[test]
fn test_round_trip_all_patterns() {
    for (name, data) in patterns() {
        let compressed = compress_words(&data);
        let decoded = decompress_words(&compressed)
            .unwrap_or_else(|e| panic!("{name}: decode failed: {e}"));
        assert_eq!(decoded, data, "{name}: round-trip mismatch");
    }
}

#[test]
fn test_compression_is_deterministic() {
    for (name, data) in patterns() {
        assert_eq!(
            compress_words(&data),
            compress_words(&data),
            "{name}: nondeterministic output"
        );
    }
}

#[test]
fn test_compressible_data_shrinks() {
    let data = vec![0x41414141u32; 1024];
    let compressed = compress_words(&data);
    assert!(compressed.len() * 8 < data.len());
}

// ============================================================================
// Streaming equivalence
// ============================================================================

#[test]
fn test_encoder_chunk_boundaries() {
    let data = lcg_words(1000);
    let whole = compress_words(&data);

    for chunks in [vec![1, 999], vec![500, 500], vec![333, 333, 334]] {
        let mut encoder = LzssEncoder::new(Vec::new());
        let mut offset = 0;
        for &n in &chunks {
            encoder.feed(&data[offset..offset + n]);
            offset += n;
        }
        assert_eq!(
            encoder.finish(),
            whole,
            "chunk sizes {chunks:?} changed the output"
        );
    }
}

#[test]
fn test_encoder_word_at_a_time() {
    let data = lcg_words(300);
    let whole = compress_words(&data);

    let mut encoder = LzssEncoder::new(Vec::new());
    for word in &data {
        encoder.feed(std::slice::from_ref(word));
    }
    assert_eq!(encoder.finish(), whole);
}

#[test]
fn test_encoder_interleaved_empty_feeds() {
    let data = lcg_words(64);
    let whole = compress_words(&data);

    let mut encoder = LzssEncoder::new(Vec::new());
    for word in &data {
        encoder.feed(&[]);
        encoder.feed(std::slice::from_ref(word));
    }
    encoder.feed(&[]);
    assert_eq!(encoder.finish(), whole);
}

#[test]
fn test_decoder_word_at_a_time() {
    let data = lcg_words(500);
    let compressed = compress_words(&data);

    let mut decoder = LzssDecoder::new(Vec::new());
    for word in &compressed {
        decoder.feed(std::slice::from_ref(word));
    }
    assert_eq!(decoder.finish().unwrap(), data);
}

// ============================================================================
// Token accounting
// ============================================================================

#[test]
fn test_bit_accounting_matches_word_count() {
    // Parse the compressed stream token by token: the total bit count is
    // 9 per literal, 17 per reference, plus the 13-bit terminator, and
    // the stream is that many bits rounded up to whole words.
    for (name, data) in patterns() {
        let compressed = compress_words(&data);

        let mut reader = BitReader::new();
        reader.begin_feed();
        let mut literals = 0usize;
        let mut references = 0usize;
        loop {
            if reader.read_bits(&compressed, 1) != 0 {
                reader.read_bits(&compressed, 8);
                literals += 1;
            } else {
                let offset = reader.read_bits(&compressed, INDEX_BITS);
                if offset == 0 {
                    break;
                }
                reader.read_bits(&compressed, LENGTH_BITS);
                references += 1;
            }
        }
        assert!(!reader.error(), "{name}: unexpected underflow");

        let total_bits = 9 * literals + 17 * references + 13;
        assert_eq!(
            compressed.len(),
            total_bits.div_ceil(32),
            "{name}: {literals} literals / {references} references"
        );
    }
}

// ============================================================================
// Error paths
// ============================================================================

#[test]
fn test_truncated_stream_yields_prefix_and_data_missing() {
    let data = lcg_words(400);
    let compressed = compress_words(&data);

    let mut sink = Vec::new();
    let mut decoder = LzssDecoder::new(&mut sink);
    decoder.feed(&compressed[..compressed.len() - 1]);
    assert!(matches!(decoder.finish(), Err(OperaError::DataMissing)));

    assert!(sink.len() < data.len());
    assert_eq!(sink.as_slice(), &data[..sink.len()]);
}

#[test]
fn test_trailing_words_yield_data_remains() {
    let mut compressed = compress_words(&lcg_words(16));
    compressed.push(0);
    compressed.push(0);
    assert!(matches!(
        decompress_words(&compressed),
        Err(OperaError::DataRemains { trailing_words: 2 })
    ));
}

// ============================================================================
// One-shot helpers
// ============================================================================

#[test]
fn test_simple_round_trip() {
    let data = lcg_words(200);

    let mut compressed = vec![0u32; 400];
    let packed = simple_compress(&data, &mut compressed).unwrap();

    let mut decompressed = vec![0u32; 200];
    let unpacked = simple_decompress(&compressed[..packed], &mut decompressed).unwrap();

    assert_eq!(unpacked, 200);
    assert_eq!(decompressed, data);
}

#[test]
fn test_simple_compress_overflow() {
    let data = lcg_words(256);
    let mut tiny = [0u32; 4];
    assert!(matches!(
        simple_compress(&data, &mut tiny),
        Err(OperaError::Overflow { capacity_words: 4 })
    ));
}

#[test]
fn test_simple_decompress_overflow() {
    let compressed = compress_words(&lcg_words(64));
    let mut tiny = [0u32; 8];
    assert!(matches!(
        simple_decompress(&compressed, &mut tiny),
        Err(OperaError::Overflow { capacity_words: 8 })
    ));
}
