//! Streaming LZSS encoder.
//!
//! The encoder slides a 4096-byte window over the input, keeping every
//! 18-byte phrase currently inside it indexed in a [`MatchTree`]. Each
//! step emits either a literal byte or an (offset, length) back-reference
//! and then slides the window through the bytes that token covered,
//! deleting the phrase about to be overwritten and inserting the phrase
//! at the new position.
//!
//! Input may arrive in arbitrary chunk sizes: when it runs out mid-slide
//! the encoder parks in an explicit resumption state and the next
//! [`LzssEncoder::feed`] continues exactly where it stopped, so chunked
//! and whole-input runs emit identical bits.

use opera_core::bitstream::BitWriter;
use opera_core::error::{OperaError, Result};
use opera_core::sink::{BoundedSink, WordSink};

use crate::tree::MatchTree;
use crate::{
    BREAK_EVEN, END_OF_STREAM, INDEX_BITS, LENGTH_BITS, LOOK_AHEAD_SIZE, WINDOW_SIZE, mod_window,
};

/// Where the encoder resumes when more input arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EncoderState {
    /// Loading the initial look-ahead; `look_ahead` is the next window
    /// slot to fill.
    FillingLookAhead,
    /// Ready to emit the next token.
    EmitToken,
    /// Sliding the window through the bytes of the last emitted token.
    InReplaceLoop,
    /// Suspended mid-slide: the stale phrase is already deleted and the
    /// replacement byte has not arrived yet.
    AwaitingByte,
}

/// Streaming LZSS encoder emitting compressed words to a [`WordSink`].
#[derive(Debug)]
pub struct LzssEncoder<S: WordSink> {
    window: Vec<u8>,
    tree: MatchTree,
    writer: BitWriter<S>,
    state: EncoderState,
    look_ahead: usize,
    current_pos: usize,
    match_len: usize,
    match_pos: usize,
    replace_cnt: usize,
}

impl<S: WordSink> LzssEncoder<S> {
    /// Create an encoder writing compressed words to `sink`.
    pub fn new(sink: S) -> Self {
        let window = vec![0u8; WINDOW_SIZE];
        let mut tree = MatchTree::new();
        // Position 1 seeds the tree; position 0 would collide with the
        // end-of-stream offset and is never used.
        tree.insert_and_find_best(&window, 1);

        Self {
            window,
            tree,
            writer: BitWriter::new(sink),
            state: EncoderState::FillingLookAhead,
            look_ahead: 1,
            current_pos: 1,
            match_len: 0,
            match_pos: 0,
            replace_cnt: 0,
        }
    }

    /// Consume input words, emitting compressed words as they complete.
    ///
    /// The words are treated as a byte stream in big-endian order. The
    /// call returns when the input is exhausted; all state needed to
    /// resume is kept on the encoder.
    pub fn feed(&mut self, words: &[u32]) {
        let mut bytes = words.iter().copied().flat_map(u32::to_be_bytes);

        loop {
            match self.state {
                EncoderState::FillingLookAhead => {
                    while self.look_ahead <= LOOK_AHEAD_SIZE {
                        match bytes.next() {
                            Some(b) => {
                                self.window[self.look_ahead] = b;
                                self.look_ahead += 1;
                            }
                            None => return,
                        }
                    }
                    self.look_ahead -= 1;
                    self.state = EncoderState::EmitToken;
                }

                EncoderState::EmitToken => {
                    self.emit_token();
                    self.state = EncoderState::InReplaceLoop;
                }

                EncoderState::InReplaceLoop => {
                    while self.replace_cnt > 0 {
                        self.replace_cnt -= 1;
                        self.tree
                            .delete(mod_window(self.current_pos + LOOK_AHEAD_SIZE));
                        match bytes.next() {
                            Some(b) => self.take_byte(b),
                            None => {
                                self.state = EncoderState::AwaitingByte;
                                return;
                            }
                        }
                    }
                    self.state = EncoderState::EmitToken;
                }

                EncoderState::AwaitingByte => match bytes.next() {
                    Some(b) => {
                        self.take_byte(b);
                        self.state = EncoderState::InReplaceLoop;
                    }
                    None => return,
                },
            }
        }
    }

    /// Flush the remaining look-ahead, emit the end-of-stream token, and
    /// return the sink.
    pub fn finish(mut self) -> S {
        match self.state {
            EncoderState::FillingLookAhead => {
                // look_ahead is still the fill cursor: one past the last
                // loaded byte.
                self.look_ahead -= 1;
            }
            EncoderState::AwaitingByte => {
                // The interrupted slide: its stale phrase is already
                // deleted, and no replacement byte will come.
                self.slide_without_input();
                self.drain_replace_loop();
            }
            EncoderState::InReplaceLoop => self.drain_replace_loop(),
            EncoderState::EmitToken => {}
        }

        while self.look_ahead > 0 {
            self.emit_token();
            for _ in 0..self.replace_cnt {
                self.tree
                    .delete(mod_window(self.current_pos + LOOK_AHEAD_SIZE));
                self.slide_without_input();
            }
        }

        self.writer.write_token(0, END_OF_STREAM as u32, INDEX_BITS);
        self.writer.finish()
    }

    /// Emit one token for the phrase at `current_pos`.
    ///
    /// A match never promises more bytes than the look-ahead holds, and
    /// anything at or below the break-even length goes out as a literal.
    fn emit_token(&mut self) {
        if self.match_len > self.look_ahead {
            self.match_len = self.look_ahead;
        }

        if self.match_len <= BREAK_EVEN {
            self.replace_cnt = 1;
            self.writer
                .write_token(1, u32::from(self.window[self.current_pos]), 8);
        } else {
            self.replace_cnt = self.match_len;
            let code = ((self.match_pos as u32) << LENGTH_BITS)
                | (self.match_len - (BREAK_EVEN + 1)) as u32;
            self.writer.write_token(0, code, INDEX_BITS + LENGTH_BITS);
        }
    }

    /// One slide step with input: store the new byte in the slot vacated
    /// ahead of the look-ahead, advance, and index the new phrase.
    fn take_byte(&mut self, byte: u8) {
        self.window[mod_window(self.current_pos + LOOK_AHEAD_SIZE)] = byte;
        self.current_pos = mod_window(self.current_pos + 1);

        if self.look_ahead > 0 {
            (self.match_len, self.match_pos) = self
                .tree
                .insert_and_find_best(&self.window, self.current_pos);
        }
    }

    /// One slide step at flush time: no byte arrives, so the look-ahead
    /// shrinks instead.
    fn slide_without_input(&mut self) {
        self.look_ahead -= 1;
        self.current_pos = mod_window(self.current_pos + 1);

        if self.look_ahead > 0 {
            (self.match_len, self.match_pos) = self
                .tree
                .insert_and_find_best(&self.window, self.current_pos);
        }
    }

    /// Finish the slides of a token interrupted by input exhaustion.
    fn drain_replace_loop(&mut self) {
        while self.replace_cnt > 0 {
            self.replace_cnt -= 1;
            self.tree
                .delete(mod_window(self.current_pos + LOOK_AHEAD_SIZE));
            self.slide_without_input();
        }
    }
}

/// Compress `source` into the caller-provided `result` buffer.
///
/// Returns the number of words produced, or
/// [`OperaError::Overflow`] if `result` was too small.
pub fn simple_compress(source: &[u32], result: &mut [u32]) -> Result<usize> {
    let capacity_words = result.len();
    let mut sink = BoundedSink::new(result);

    let mut encoder = LzssEncoder::new(&mut sink);
    encoder.feed(source);
    encoder.finish();

    if sink.overflowed() {
        Err(OperaError::Overflow { capacity_words })
    } else {
        Ok(sink.len())
    }
}

/// Compress `words` into a freshly allocated vector.
pub fn compress_words(words: &[u32]) -> Vec<u32> {
    let mut encoder = LzssEncoder::new(Vec::new());
    encoder.feed(words);
    encoder.finish()
}
