//! Big5 with the HKSCS extensions.
//!
//! Four pointers decode to a base letter followed by a combining mark; the
//! second code point is queued and returned by the next call.

use crate::index::BIG5;
use oxitext_core::{ByteSink, ByteSource, Decoded, Decoder, DecoderState, Encoded, Encoder};

/// Pointers that decode to two code points.
fn combining_pair(pointer: usize) -> Option<(char, char)> {
    match pointer {
        1133 => Some(('\u{CA}', '\u{304}')),
        1135 => Some(('\u{CA}', '\u{30C}')),
        1164 => Some(('\u{EA}', '\u{304}')),
        1166 => Some(('\u{EA}', '\u{30C}')),
        _ => None,
    }
}

/// Big5 decoder.
#[derive(Debug, Clone, Default)]
pub struct Big5Decoder {
    state: DecoderState,
    lead: Option<u8>,
}

impl Big5Decoder {
    /// Create a decoder at the start of a stream.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Decoder for Big5Decoder {
    fn read_char(&mut self, input: &mut dyn ByteSource) -> Decoded {
        if self.state.has_pending() {
            return self.state.get_char();
        }
        loop {
            let Some(b) = self.state.read_input_byte(input) else {
                return match self.lead.take() {
                    Some(_) => Decoded::Error,
                    None => Decoded::End,
                };
            };

            if let Some(lead) = self.lead.take() {
                if matches!(b, 0x40..=0x7E | 0xA1..=0xFE) {
                    let offset = if b < 0x7F { 0x40 } else { 0x62 };
                    let pointer = usize::from(lead - 0x81) * 157 + usize::from(b - offset);
                    if let Some((base, mark)) = combining_pair(pointer) {
                        self.state.append_char(Decoded::Char(mark));
                        return Decoded::Char(base);
                    }
                    if let Some(c) = BIG5.code_point(pointer) {
                        return Decoded::Char(c);
                    }
                }
                if b.is_ascii() {
                    self.state.prepend_one(b);
                }
                return Decoded::Error;
            }

            match b {
                0x00..=0x7F => return Decoded::Char(char::from(b)),
                0x81..=0xFE => self.lead = Some(b),
                _ => return Decoded::Error,
            }
        }
    }
}

/// Big5 encoder.
///
/// Holds no per-stream state; one instance may serve any number of streams.
#[derive(Debug, Clone, Copy, Default)]
pub struct Big5Encoder;

impl Big5Encoder {
    /// Create an encoder.
    pub fn new() -> Self {
        Self
    }
}

impl Encoder for Big5Encoder {
    fn encode(&mut self, c: Option<char>, output: &mut dyn ByteSink) -> Encoded {
        let Some(c) = c else {
            return Encoded::Finished;
        };
        if c.is_ascii() {
            output.write_byte(c as u8);
            return Encoded::Written(1);
        }
        let Some(pointer) = BIG5.pointer(c) else {
            return Encoded::Unmappable;
        };
        let lead = pointer / 157 + 0x81;
        let trail = pointer % 157;
        let trail = trail + if trail < 0x3F { 0x40 } else { 0x62 };
        output.write_bytes(&[lead as u8, trail as u8]);
        Encoded::Written(2)
    }
}
