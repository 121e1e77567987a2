//! Word-oriented output sinks.
//!
//! Both codec directions produce one complete 32-bit word at a time and
//! hand it to a [`WordSink`]. The sink contract is fail-silent: `put_word`
//! cannot error, and implementations that can fail (bounded buffers, I/O)
//! record the condition for the caller to inspect after the run.

use std::io::{self, Write};

/// Receives one 32-bit word at a time, in stream order.
pub trait WordSink {
    /// Accept the next output word.
    fn put_word(&mut self, word: u32);
}

impl<S: WordSink + ?Sized> WordSink for &mut S {
    fn put_word(&mut self, word: u32) {
        (**self).put_word(word);
    }
}

impl WordSink for Vec<u32> {
    fn put_word(&mut self, word: u32) {
        self.push(word);
    }
}

/// A sink over a caller-provided fixed buffer.
///
/// Words past the end of the buffer are dropped and the overflow flag is
/// raised; the run itself continues. Used by the one-shot
/// `simple_compress`/`simple_decompress` helpers.
#[derive(Debug)]
pub struct BoundedSink<'a> {
    dest: &'a mut [u32],
    len: usize,
    overflow: bool,
}

impl<'a> BoundedSink<'a> {
    /// Create a sink writing into `dest` from the start.
    pub fn new(dest: &'a mut [u32]) -> Self {
        Self {
            dest,
            len: 0,
            overflow: false,
        }
    }

    /// Number of words written so far.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether no words have been written.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Total capacity in words.
    pub fn capacity(&self) -> usize {
        self.dest.len()
    }

    /// Whether a word did not fit.
    pub fn overflowed(&self) -> bool {
        self.overflow
    }
}

impl WordSink for BoundedSink<'_> {
    fn put_word(&mut self, word: u32) {
        if self.len >= self.dest.len() {
            self.overflow = true;
        } else {
            self.dest[self.len] = word;
            self.len += 1;
        }
    }
}

/// A sink that writes words big-endian to any [`Write`] implementation.
///
/// The first I/O error is retained and all subsequent words are dropped;
/// call [`IoSink::into_inner`] to surface it once the stream is done.
#[derive(Debug)]
pub struct IoSink<W: Write> {
    writer: W,
    words_written: u64,
    error: Option<io::Error>,
}

impl<W: Write> IoSink<W> {
    /// Create a sink wrapping the given writer.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            words_written: 0,
            error: None,
        }
    }

    /// Number of words successfully written.
    pub fn words_written(&self) -> u64 {
        self.words_written
    }

    /// Finish the stream, returning the writer or the first deferred error.
    pub fn into_inner(mut self) -> io::Result<W> {
        match self.error.take() {
            Some(e) => Err(e),
            None => Ok(self.writer),
        }
    }
}

impl<W: Write> WordSink for IoSink<W> {
    fn put_word(&mut self, word: u32) {
        if self.error.is_some() {
            return;
        }
        match self.writer.write_all(&word.to_be_bytes()) {
            Ok(()) => self.words_written += 1,
            Err(e) => self.error = Some(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec_sink() {
        let mut out = Vec::new();
        out.put_word(0xDEADBEEF);
        out.put_word(0x12345678);
        assert_eq!(out, vec![0xDEADBEEF, 0x12345678]);
    }

    #[test]
    fn test_bounded_sink_fits() {
        let mut buf = [0u32; 4];
        let mut sink = BoundedSink::new(&mut buf);
        sink.put_word(1);
        sink.put_word(2);
        assert_eq!(sink.len(), 2);
        assert!(!sink.overflowed());
        assert_eq!(&buf[..2], &[1, 2]);
    }

    #[test]
    fn test_bounded_sink_overflow() {
        let mut buf = [0u32; 2];
        let mut sink = BoundedSink::new(&mut buf);
        sink.put_word(1);
        sink.put_word(2);
        sink.put_word(3);
        assert_eq!(sink.len(), 2);
        assert!(sink.overflowed());
        assert_eq!(buf, [1, 2]);
    }

    #[test]
    fn test_io_sink_big_endian() {
        let mut sink = IoSink::new(Vec::new());
        sink.put_word(0x41424344);
        assert_eq!(sink.words_written(), 1);
        let bytes = sink.into_inner().unwrap();
        assert_eq!(bytes, b"ABCD");
    }
}
