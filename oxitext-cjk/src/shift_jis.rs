//! Shift_JIS.
//!
//! Single bytes cover ASCII, U+0080 and half-width katakana (0xA1..=0xDF).
//! Two-byte sequences address JIS X 0208 through a 188-column grid, and
//! pointers 8836..=10715 map linearly onto the Private Use Area.

use crate::index::{JIS0208, JIS0208_SHIFT_JIS, SHIFT_JIS_PUA, fold_minus};
use oxitext_core::{ByteSink, ByteSource, Decoded, Decoder, DecoderState, Encoded, Encoder};

/// Shift_JIS decoder.
#[derive(Debug, Clone, Default)]
pub struct ShiftJisDecoder {
    state: DecoderState,
    lead: Option<u8>,
}

impl ShiftJisDecoder {
    /// Create a decoder at the start of a stream.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Decoder for ShiftJisDecoder {
    fn read_char(&mut self, input: &mut dyn ByteSource) -> Decoded {
        loop {
            let Some(b) = self.state.read_input_byte(input) else {
                return match self.lead.take() {
                    Some(_) => Decoded::Error,
                    None => Decoded::End,
                };
            };

            if let Some(lead) = self.lead.take() {
                if matches!(b, 0x40..=0x7E | 0x80..=0xFC) {
                    let lead_offset = if lead < 0xA0 { 0x81 } else { 0xC1 };
                    let offset = if b < 0x7F { 0x40 } else { 0x41 };
                    let pointer = usize::from(lead - lead_offset) * 188 + usize::from(b - offset);
                    if SHIFT_JIS_PUA.contains(&pointer) {
                        let pua = 0xE000 + (pointer - SHIFT_JIS_PUA.start()) as u32;
                        return char::from_u32(pua).map_or(Decoded::Error, Decoded::Char);
                    }
                    if let Some(c) = JIS0208.code_point(pointer) {
                        return Decoded::Char(c);
                    }
                }
                if b.is_ascii() {
                    self.state.prepend_one(b);
                }
                return Decoded::Error;
            }

            match b {
                0x00..=0x80 => return Decoded::Char(char::from(b)),
                0xA1..=0xDF => {
                    return char::from_u32(0xFF61 - 0xA1 + u32::from(b))
                        .map_or(Decoded::Error, Decoded::Char);
                }
                0x81..=0x9F | 0xE0..=0xFC => self.lead = Some(b),
                _ => return Decoded::Error,
            }
        }
    }
}

/// Shift_JIS encoder.
///
/// Holds no per-stream state; one instance may serve any number of streams.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShiftJisEncoder;

impl ShiftJisEncoder {
    /// Create an encoder.
    pub fn new() -> Self {
        Self
    }
}

impl Encoder for ShiftJisEncoder {
    fn encode(&mut self, c: Option<char>, output: &mut dyn ByteSink) -> Encoded {
        let Some(c) = c else {
            return Encoded::Finished;
        };
        let single = match c {
            '\u{00}'..='\u{80}' => Some(c as u8),
            '\u{A5}' => Some(0x5C),
            '\u{203E}' => Some(0x7E),
            '\u{FF61}'..='\u{FF9F}' => Some((u32::from(c) - 0xFF61 + 0xA1) as u8),
            _ => None,
        };
        if let Some(b) = single {
            output.write_byte(b);
            return Encoded::Written(1);
        }

        let Some(pointer) = JIS0208_SHIFT_JIS.pointer(fold_minus(c)) else {
            return Encoded::Unmappable;
        };
        let (lead, trail) = (pointer / 188, pointer % 188);
        let lead = lead + if lead < 0x1F { 0x81 } else { 0xC1 };
        let trail = trail + if trail < 0x3F { 0x40 } else { 0x41 };
        output.write_bytes(&[lead as u8, trail as u8]);
        Encoded::Written(2)
    }
}
