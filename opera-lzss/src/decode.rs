//! Streaming LZSS decoder.
//!
//! The decoder reads 1-bit tags from the compressed word stream and
//! either takes the next 8 bits as a literal byte or the next 12+4 bits
//! as an (offset, length) back-reference into its window. Every decoded
//! byte passes through one path that maintains the window and packs
//! output bytes into 32-bit big-endian words for the sink; a zero offset
//! terminates the stream.
//!
//! Input arrives in arbitrary word chunks. The bit buffer carries across
//! chunks, and a token is only started while a full token's worth of
//! bits remains available, so a token can straddle a chunk boundary
//! without underflowing mid-stream; whatever is left in the buffer when
//! the stream ends is drained by [`LzssDecoder::finish`].

use opera_core::bitstream::BitReader;
use opera_core::error::{OperaError, Result};
use opera_core::sink::{BoundedSink, WordSink};

use crate::{BREAK_EVEN, END_OF_STREAM, INDEX_BITS, LENGTH_BITS, WINDOW_SIZE, mod_window};

/// Widest token on the wire: a tag bit plus offset and length fields.
const MAX_TOKEN_BITS: usize = (1 + INDEX_BITS + LENGTH_BITS) as usize;

/// Streaming LZSS decoder emitting decompressed words to a [`WordSink`].
#[derive(Debug)]
pub struct LzssDecoder<S: WordSink> {
    sink: S,
    reader: BitReader,
    window: Vec<u8>,
    pos: usize,
    word_buffer: u32,
    bytes_left: u32,
    finished: bool,
    trailing_words: usize,
}

impl<S: WordSink> LzssDecoder<S> {
    /// Create a decoder writing decompressed words to `sink`.
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            reader: BitReader::new(),
            window: vec![0u8; WINDOW_SIZE],
            pos: 1,
            word_buffer: 0,
            bytes_left: 4,
            finished: false,
            trailing_words: 0,
        }
    }

    /// Consume compressed words, emitting decompressed words as they
    /// complete.
    ///
    /// Words fed after the end-of-stream token are not decoded; they are
    /// reported as [`OperaError::DataRemains`] by
    /// [`LzssDecoder::finish`].
    pub fn feed(&mut self, words: &[u32]) {
        if self.finished {
            self.trailing_words += words.len();
            return;
        }

        self.reader.begin_feed();

        while self.remaining_bits(words) >= MAX_TOKEN_BITS {
            if !self.next_token(words) {
                return;
            }
        }
    }

    /// Flush a final complete output word and report stream errors.
    ///
    /// Returns [`OperaError::DataMissing`] if the input ran out before
    /// the end-of-stream token, or [`OperaError::DataRemains`] if words
    /// were left over after it. The final-word flush happens either way,
    /// so a truncated stream still yields a prefix of the original data.
    pub fn finish(mut self) -> Result<S> {
        // Tokens narrower than the feed threshold can still sit in the
        // bit buffer; with the stream over, parse them until the
        // terminator or a genuine underflow.
        self.reader.begin_feed();
        while !self.finished && !self.reader.error() && self.reader.bits_available() >= 9 {
            self.next_token(&[]);
        }

        if self.bytes_left == 0 {
            self.sink.put_word(self.word_buffer);
        }

        if !self.finished || self.reader.error() {
            return Err(OperaError::DataMissing);
        }
        if self.trailing_words > 0 {
            return Err(OperaError::DataRemains {
                trailing_words: self.trailing_words,
            });
        }
        Ok(self.sink)
    }

    /// Bits not yet parsed: buffered ones plus unconsumed input words.
    fn remaining_bits(&self, words: &[u32]) -> usize {
        self.reader.bits_available() as usize
            + 32 * (words.len() - self.reader.words_consumed())
    }

    /// Decode one token. Returns false once the stream has terminated.
    fn next_token(&mut self, words: &[u32]) -> bool {
        if self.reader.read_bits(words, 1) != 0 {
            let c = self.reader.read_bits(words, 8) as u8;
            self.put_byte(c);
            return true;
        }

        let match_pos = self.reader.read_bits(words, INDEX_BITS) as usize;
        if match_pos == END_OF_STREAM {
            // Position 0 is never a match source; a zero offset is the
            // terminator (or an underflow, which finish() reports).
            self.finished = true;
            self.trailing_words += words.len() - self.reader.words_consumed();
            return false;
        }

        let match_len = self.reader.read_bits(words, LENGTH_BITS) as usize + BREAK_EVEN;
        for i in match_pos..=match_pos + match_len {
            let c = self.window[mod_window(i)];
            self.put_byte(c);
        }
        true
    }

    /// Route one decoded byte into the window and the word assembly.
    ///
    /// The assembly flushes lazily: a completed word goes to the sink
    /// only when the following byte arrives, and [`LzssDecoder::finish`]
    /// emits the last one.
    fn put_byte(&mut self, c: u8) {
        if self.bytes_left == 0 {
            self.sink.put_word(self.word_buffer);
            self.word_buffer = u32::from(c);
            self.bytes_left = 3;
        } else {
            self.word_buffer = (self.word_buffer << 8) | u32::from(c);
            self.bytes_left -= 1;
        }

        self.window[self.pos] = c;
        self.pos = mod_window(self.pos + 1);
    }
}

/// Decompress `source` into the caller-provided `result` buffer.
///
/// Returns the number of words produced. Stream errors take precedence
/// over [`OperaError::Overflow`], matching the streaming decoder.
pub fn simple_decompress(source: &[u32], result: &mut [u32]) -> Result<usize> {
    let capacity_words = result.len();
    let mut sink = BoundedSink::new(result);

    let mut decoder = LzssDecoder::new(&mut sink);
    decoder.feed(source);
    decoder.finish()?;

    if sink.overflowed() {
        Err(OperaError::Overflow { capacity_words })
    } else {
        Ok(sink.len())
    }
}

/// Decompress `words` into a freshly allocated vector.
pub fn decompress_words(words: &[u32]) -> Result<Vec<u32>> {
    let mut decoder = LzssDecoder::new(Vec::new());
    decoder.feed(words);
    decoder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_terminator_decodes_to_nothing() {
        assert_eq!(decompress_words(&[0x00000000]).unwrap(), vec![]);
    }

    #[test]
    fn test_four_literals() {
        // "ABCD" as four literals plus terminator.
        let words = decompress_words(&[0xA0D0A874, 0x40000000]).unwrap();
        assert_eq!(words, vec![0x41424344]);
    }

    #[test]
    fn test_overlapping_back_reference() {
        // One literal 'A' then a reference (offset 1, length field 12):
        // fifteen bytes copied out of a one-byte history.
        let words = decompress_words(&[0xA0800700, 0x00000000]).unwrap();
        assert_eq!(words, vec![0x41414141; 4]);
    }

    #[test]
    fn test_truncated_stream_reports_data_missing() {
        // The terminator never arrives.
        let err = decompress_words(&[0xA0D0A874]).unwrap_err();
        assert!(matches!(err, OperaError::DataMissing));
    }

    #[test]
    fn test_trailing_words_report_data_remains() {
        let err = decompress_words(&[0x00000000, 0xDEADBEEF]).unwrap_err();
        assert!(matches!(
            err,
            OperaError::DataRemains { trailing_words: 1 }
        ));
    }

    #[test]
    fn test_feed_after_end_of_stream_does_not_decode() {
        let mut decoder = LzssDecoder::new(Vec::new());
        decoder.feed(&[0x00000000]);
        decoder.feed(&[0xA0D0A874, 0x40000000]);
        let err = decoder.finish().unwrap_err();
        assert!(matches!(
            err,
            OperaError::DataRemains { trailing_words: 2 }
        ));
    }

    #[test]
    fn test_truncated_output_is_flushed_prefix() {
        // Compressing "ABCDEFGH" gives 8 literals + terminator = 85 bits
        // over three words; dropping the last word loses the terminator
        // but the first complete output word must still be flushed.
        let mut sink = Vec::new();
        let mut decoder = LzssDecoder::new(&mut sink);
        let compressed = crate::encode::compress_words(&[0x41424344, 0x45464748]);
        assert_eq!(compressed.len(), 3);
        decoder.feed(&compressed[..2]);
        assert!(matches!(
            decoder.finish(),
            Err(OperaError::DataMissing)
        ));
        assert_eq!(sink, vec![0x41424344]);
    }

    #[test]
    fn test_single_word_feeds_match_whole_feed() {
        let compressed = crate::encode::compress_words(&[0x11223344, 0x55667788, 0x11223344]);

        let whole = decompress_words(&compressed).unwrap();

        let mut decoder = LzssDecoder::new(Vec::new());
        for &word in &compressed {
            decoder.feed(&[word]);
        }
        assert_eq!(decoder.finish().unwrap(), whole);
    }
}
