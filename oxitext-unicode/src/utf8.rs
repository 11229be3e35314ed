//! UTF-8.
//!
//! The decoder counts continuation bytes against the number the lead byte
//! announced. For the lead bytes 0xE0, 0xED, 0xF0 and 0xF4 the range of the
//! first continuation byte is narrowed so that overlong forms, surrogates and
//! values above U+10FFFF are rejected at the earliest possible byte.

use oxitext_core::{ByteSink, ByteSource, Decoded, Decoder, DecoderState, Encoded, Encoder};

const DEFAULT_LOWER: u8 = 0x80;
const DEFAULT_UPPER: u8 = 0xBF;

/// UTF-8 decoder.
#[derive(Debug, Clone)]
pub struct Utf8Decoder {
    state: DecoderState,
    code_point: u32,
    bytes_seen: u8,
    bytes_needed: u8,
    lower: u8,
    upper: u8,
}

impl Default for Utf8Decoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Utf8Decoder {
    /// Create a decoder at the start of a stream.
    pub fn new() -> Self {
        Self {
            state: DecoderState::new(),
            code_point: 0,
            bytes_seen: 0,
            bytes_needed: 0,
            lower: DEFAULT_LOWER,
            upper: DEFAULT_UPPER,
        }
    }

    fn reset(&mut self) {
        self.code_point = 0;
        self.bytes_seen = 0;
        self.bytes_needed = 0;
        self.lower = DEFAULT_LOWER;
        self.upper = DEFAULT_UPPER;
    }
}

impl Decoder for Utf8Decoder {
    fn read_char(&mut self, input: &mut dyn ByteSource) -> Decoded {
        loop {
            let Some(b) = self.state.read_input_byte(input) else {
                if self.bytes_needed != 0 {
                    self.reset();
                    return Decoded::Error;
                }
                return Decoded::End;
            };

            if self.bytes_needed == 0 {
                match b {
                    0x00..=0x7F => return Decoded::Char(char::from(b)),
                    0xC2..=0xDF => {
                        self.bytes_needed = 1;
                        self.code_point = u32::from(b & 0x1F);
                    }
                    0xE0..=0xEF => {
                        match b {
                            0xE0 => self.lower = 0xA0,
                            0xED => self.upper = 0x9F,
                            _ => {}
                        }
                        self.bytes_needed = 2;
                        self.code_point = u32::from(b & 0x0F);
                    }
                    0xF0..=0xF4 => {
                        match b {
                            0xF0 => self.lower = 0x90,
                            0xF4 => self.upper = 0x8F,
                            _ => {}
                        }
                        self.bytes_needed = 3;
                        self.code_point = u32::from(b & 0x07);
                    }
                    _ => return Decoded::Error,
                }
                continue;
            }

            if b < self.lower || b > self.upper {
                // The byte may start a valid sequence of its own
                self.reset();
                self.state.prepend_one(b);
                return Decoded::Error;
            }

            self.lower = DEFAULT_LOWER;
            self.upper = DEFAULT_UPPER;
            self.code_point = (self.code_point << 6) | u32::from(b & 0x3F);
            self.bytes_seen += 1;
            if self.bytes_seen != self.bytes_needed {
                continue;
            }

            let cp = self.code_point;
            self.reset();
            return char::from_u32(cp).map_or(Decoded::Error, Decoded::Char);
        }
    }
}

/// UTF-8 encoder.
///
/// Holds no per-stream state; one instance may serve any number of streams.
#[derive(Debug, Clone, Copy, Default)]
pub struct Utf8Encoder;

impl Utf8Encoder {
    /// Create an encoder.
    pub fn new() -> Self {
        Self
    }
}

impl Encoder for Utf8Encoder {
    fn encode(&mut self, c: Option<char>, output: &mut dyn ByteSink) -> Encoded {
        let Some(c) = c else {
            return Encoded::Finished;
        };
        let mut buf = [0u8; 4];
        let bytes = c.encode_utf8(&mut buf).as_bytes();
        output.write_bytes(bytes);
        Encoded::Written(bytes.len())
    }
}
