//! Pull-based byte and code-point streams.
//!
//! Every codec in OxiText is written against three small contracts:
//!
//! - [`ByteSource`]: pull one byte at a time, `None` at end of stream
//! - [`ByteSink`]: push single bytes or byte runs
//! - [`CodePointSource`]: pull one Unicode scalar value at a time
//!
//! None of them buffer or seek. End of stream is sticky: once a source has
//! returned `None` it keeps doing so.
//!
//! Adapters over slices, strings and `std::io` readers/writers are provided.
//! The `std::io` adapters never fail in-band; they remember the first I/O
//! error, report end of stream (or drop further output), and let the caller
//! collect the error afterwards with `take_error`.

use std::io::{self, Read, Write};

/// A source of bytes.
pub trait ByteSource {
    /// Read the next byte, or `None` at end of stream.
    fn read_byte(&mut self) -> Option<u8>;
}

/// A sink for bytes.
pub trait ByteSink {
    /// Write a single byte.
    fn write_byte(&mut self, byte: u8);

    /// Write a run of bytes.
    fn write_bytes(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.write_byte(b);
        }
    }
}

/// A source of Unicode scalar values.
pub trait CodePointSource {
    /// Read the next scalar value, or `None` at end of stream.
    fn read_char(&mut self) -> Option<char>;

    /// Read scalar values into `buf`.
    ///
    /// Returns the number of values stored, or `None` if the stream had
    /// already ended and nothing was read. An empty buffer yields `Some(0)`.
    fn read_into(&mut self, buf: &mut [char]) -> Option<usize> {
        if buf.is_empty() {
            return Some(0);
        }
        let mut count = 0;
        while count < buf.len() {
            match self.read_char() {
                Some(c) => {
                    buf[count] = c;
                    count += 1;
                }
                None => break,
            }
        }
        if count == 0 { None } else { Some(count) }
    }
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    fn read_byte(&mut self) -> Option<u8> {
        (**self).read_byte()
    }
}

impl<S: ByteSink + ?Sized> ByteSink for &mut S {
    fn write_byte(&mut self, byte: u8) {
        (**self).write_byte(byte);
    }

    fn write_bytes(&mut self, bytes: &[u8]) {
        (**self).write_bytes(bytes);
    }
}

impl<S: CodePointSource + ?Sized> CodePointSource for &mut S {
    fn read_char(&mut self) -> Option<char> {
        (**self).read_char()
    }
}

impl ByteSink for Vec<u8> {
    fn write_byte(&mut self, byte: u8) {
        self.push(byte);
    }

    fn write_bytes(&mut self, bytes: &[u8]) {
        self.extend_from_slice(bytes);
    }
}

/// A [`ByteSource`] over an in-memory byte slice.
#[derive(Debug, Clone)]
pub struct SliceSource<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> SliceSource<'a> {
    /// Create a source that yields the bytes of `data` in order.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Number of bytes handed out so far.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// The bytes not yet read.
    pub fn remaining(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }
}

impl ByteSource for SliceSource<'_> {
    fn read_byte(&mut self) -> Option<u8> {
        let b = *self.data.get(self.pos)?;
        self.pos += 1;
        Some(b)
    }
}

/// A [`ByteSource`] over any [`Read`] implementation.
///
/// Reads are buffered internally in small chunks. The first I/O error ends
/// the stream and is kept for [`ReaderSource::take_error`].
#[derive(Debug)]
pub struct ReaderSource<R> {
    inner: R,
    buf: Box<[u8]>,
    pos: usize,
    len: usize,
    done: bool,
    error: Option<io::Error>,
}

impl<R: Read> ReaderSource<R> {
    const CHUNK: usize = 8192;

    /// Wrap a reader.
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            buf: vec![0u8; Self::CHUNK].into_boxed_slice(),
            pos: 0,
            len: 0,
            done: false,
            error: None,
        }
    }

    /// Take the I/O error that ended the stream, if any.
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }

    /// Unwrap the underlying reader.
    pub fn into_inner(self) -> R {
        self.inner
    }

    fn fill(&mut self) {
        loop {
            match self.inner.read(&mut self.buf) {
                Ok(0) => {
                    self.done = true;
                    return;
                }
                Ok(n) => {
                    self.pos = 0;
                    self.len = n;
                    return;
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.error = Some(e);
                    self.done = true;
                    return;
                }
            }
        }
    }
}

impl<R: Read> ByteSource for ReaderSource<R> {
    fn read_byte(&mut self) -> Option<u8> {
        if self.pos >= self.len {
            if self.done {
                return None;
            }
            self.fill();
            if self.done {
                return None;
            }
        }
        let b = self.buf[self.pos];
        self.pos += 1;
        Some(b)
    }
}

/// A [`ByteSink`] over any [`Write`] implementation.
///
/// After the first I/O error further output is dropped; the error is kept
/// for [`WriterSink::finish`] or [`WriterSink::take_error`].
#[derive(Debug)]
pub struct WriterSink<W: Write> {
    inner: W,
    error: Option<io::Error>,
}

impl<W: Write> WriterSink<W> {
    /// Wrap a writer.
    pub fn new(inner: W) -> Self {
        Self { inner, error: None }
    }

    /// Take the first I/O error seen, if any.
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }

    /// Flush the writer and return it, or the first I/O error seen.
    pub fn finish(mut self) -> io::Result<W> {
        if let Some(e) = self.error.take() {
            return Err(e);
        }
        self.inner.flush()?;
        Ok(self.inner)
    }
}

impl<W: Write> ByteSink for WriterSink<W> {
    fn write_byte(&mut self, byte: u8) {
        self.write_bytes(&[byte]);
    }

    fn write_bytes(&mut self, bytes: &[u8]) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = self.inner.write_all(bytes) {
            self.error = Some(e);
        }
    }
}

/// A [`CodePointSource`] over a string slice.
#[derive(Debug, Clone)]
pub struct StrSource<'a> {
    chars: std::str::Chars<'a>,
}

impl<'a> StrSource<'a> {
    /// Create a source that yields the characters of `text` in order.
    pub fn new(text: &'a str) -> Self {
        Self {
            chars: text.chars(),
        }
    }
}

impl CodePointSource for StrSource<'_> {
    fn read_char(&mut self) -> Option<char> {
        self.chars.next()
    }
}
