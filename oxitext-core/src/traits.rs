//! Core traits for decoding and encoding.
//!
//! A [`Decoder`] turns bytes pulled from a [`ByteSource`] into Unicode scalar
//! values one at a time. An [`Encoder`] turns scalar values into bytes pushed
//! to a [`ByteSink`]. Both are bound to exactly one logical stream.
//!
//! Results travel in-band: a decoder reports [`Decoded::Error`] for malformed
//! input and carries on, an encoder reports [`Encoded::Unmappable`] for a
//! character it cannot represent. What to do about it is the caller's call.

use crate::stream::{ByteSink, ByteSource, CodePointSource};

/// Raw sentinel for end of stream.
pub const END: i32 = -1;

/// Raw sentinel for a decode or encode error.
pub const ERROR: i32 = -2;

/// Result of one decode step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Decoded {
    /// A decoded scalar value.
    Char(char),
    /// A malformed byte sequence was consumed.
    Error,
    /// The input is exhausted and no output is pending.
    End,
}

impl Decoded {
    /// The value on the shared `i32` channel: a code point, [`ERROR`] or [`END`].
    pub fn to_raw(self) -> i32 {
        match self {
            Decoded::Char(c) => u32::from(c) as i32,
            Decoded::Error => ERROR,
            Decoded::End => END,
        }
    }

    /// Parse a value from the shared `i32` channel.
    ///
    /// Negative values other than [`END`] and surrogate or out-of-range
    /// values all read as [`Decoded::Error`].
    pub fn from_raw(raw: i32) -> Self {
        if raw == END {
            return Decoded::End;
        }
        u32::try_from(raw)
            .ok()
            .and_then(char::from_u32)
            .map_or(Decoded::Error, Decoded::Char)
    }

    /// The decoded character, if any.
    pub fn char(self) -> Option<char> {
        match self {
            Decoded::Char(c) => Some(c),
            _ => None,
        }
    }
}

impl From<char> for Decoded {
    fn from(c: char) -> Self {
        Decoded::Char(c)
    }
}

/// Result of one encode step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Encoded {
    /// The given number of bytes were written.
    Written(usize),
    /// End of stream was signalled and nothing more remains to be written.
    Finished,
    /// The character cannot be represented; nothing was written for it.
    Unmappable,
}

impl Encoded {
    /// The value on the shared `i32` channel: a byte count, [`END`] or [`ERROR`].
    pub fn to_raw(self) -> i32 {
        match self {
            Encoded::Written(n) => i32::try_from(n).unwrap_or(i32::MAX),
            Encoded::Finished => END,
            Encoded::Unmappable => ERROR,
        }
    }
}

/// A streaming decoder.
pub trait Decoder {
    /// Decode the next scalar value from `input`.
    ///
    /// Bytes the decoder reads ahead and does not consume are kept inside the
    /// decoder and re-read on the next call, so the same `input` must be
    /// passed for the whole stream.
    fn read_char(&mut self, input: &mut dyn ByteSource) -> Decoded;

    /// Decode everything left in `input`, replacing errors with U+FFFD.
    fn decode_all(&mut self, input: &mut dyn ByteSource) -> String {
        let mut out = String::new();
        loop {
            match self.read_char(input) {
                Decoded::Char(c) => out.push(c),
                Decoded::Error => out.push(char::REPLACEMENT_CHARACTER),
                Decoded::End => return out,
            }
        }
    }
}

/// A streaming encoder.
pub trait Encoder {
    /// Encode one scalar value, or signal end of stream with `None`.
    ///
    /// Stateful encoders may have closing bytes to write at end of stream; in
    /// that case `encode(None, ..)` returns [`Encoded::Written`] and must be
    /// called again until it returns [`Encoded::Finished`].
    fn encode(&mut self, c: Option<char>, output: &mut dyn ByteSink) -> Encoded;

    /// Encode every value from `input`, then finish the stream.
    ///
    /// Unmappable characters are replaced with `replacement`. Returns the
    /// number of characters that needed replacing.
    fn encode_all(
        &mut self,
        input: &mut dyn CodePointSource,
        output: &mut dyn ByteSink,
        replacement: u8,
    ) -> usize {
        let mut replaced = 0;
        while let Some(c) = input.read_char() {
            if self.encode(Some(c), output) == Encoded::Unmappable {
                output.write_byte(replacement);
                replaced += 1;
            }
        }
        while self.encode(None, output) != Encoded::Finished {}
        replaced
    }
}

impl<D: Decoder + ?Sized> Decoder for Box<D> {
    fn read_char(&mut self, input: &mut dyn ByteSource) -> Decoded {
        (**self).read_char(input)
    }
}

impl<E: Encoder + ?Sized> Encoder for Box<E> {
    fn encode(&mut self, c: Option<char>, output: &mut dyn ByteSink) -> Encoded {
        (**self).encode(c, output)
    }
}
