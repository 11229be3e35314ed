//! EUC-JP.
//!
//! Two bytes in 0xA1..=0xFE address JIS X 0208. The single shifts select
//! the other planes: 0x8E introduces one half-width katakana byte and 0x8F
//! introduces a two-byte JIS X 0212 sequence. JIS X 0212 is decode-only.

use crate::index::{JIS_PLANE, JIS0208, JIS0212, Index, fold_minus};
use oxitext_core::{ByteSink, ByteSource, Decoded, Decoder, DecoderState, Encoded, Encoder};

/// EUC-JP decoder.
#[derive(Debug, Clone, Default)]
pub struct EucJpDecoder {
    state: DecoderState,
    lead: Option<u8>,
    jis0212: bool,
}

impl EucJpDecoder {
    /// Create a decoder at the start of a stream.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Decoder for EucJpDecoder {
    fn read_char(&mut self, input: &mut dyn ByteSource) -> Decoded {
        loop {
            let Some(b) = self.state.read_input_byte(input) else {
                self.jis0212 = false;
                return match self.lead.take() {
                    Some(_) => Decoded::Error,
                    None => Decoded::End,
                };
            };

            if let Some(lead) = self.lead.take() {
                if lead == 0x8E && (0xA1..=0xDF).contains(&b) {
                    return char::from_u32(0xFF61 - 0xA1 + u32::from(b))
                        .map_or(Decoded::Error, Decoded::Char);
                }
                if lead == 0x8F && (0xA1..=0xFE).contains(&b) {
                    self.jis0212 = true;
                    self.lead = Some(b);
                    continue;
                }

                let plane: &Index = if std::mem::take(&mut self.jis0212) {
                    &JIS0212
                } else {
                    &JIS0208
                };
                if (0xA1..=0xFE).contains(&lead) && (0xA1..=0xFE).contains(&b) {
                    let pointer = usize::from(lead - 0xA1) * 94 + usize::from(b - 0xA1);
                    if let Some(c) = plane.code_point(pointer) {
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
                0x8E | 0x8F | 0xA1..=0xFE => self.lead = Some(b),
                _ => return Decoded::Error,
            }
        }
    }
}

/// EUC-JP encoder.
///
/// Holds no per-stream state; one instance may serve any number of streams.
#[derive(Debug, Clone, Copy, Default)]
pub struct EucJpEncoder;

impl EucJpEncoder {
    /// Create an encoder.
    pub fn new() -> Self {
        Self
    }
}

impl Encoder for EucJpEncoder {
    fn encode(&mut self, c: Option<char>, output: &mut dyn ByteSink) -> Encoded {
        let Some(c) = c else {
            return Encoded::Finished;
        };
        match c {
            '\u{00}'..='\u{7F}' => {
                output.write_byte(c as u8);
                return Encoded::Written(1);
            }
            '\u{A5}' => {
                output.write_byte(0x5C);
                return Encoded::Written(1);
            }
            '\u{203E}' => {
                output.write_byte(0x7E);
                return Encoded::Written(1);
            }
            '\u{FF61}'..='\u{FF9F}' => {
                output.write_bytes(&[0x8E, (u32::from(c) - 0xFF61 + 0xA1) as u8]);
                return Encoded::Written(2);
            }
            _ => {}
        }

        match JIS0208.pointer(fold_minus(c)) {
            Some(pointer) if pointer < JIS_PLANE => {
                output.write_bytes(&[(pointer / 94 + 0xA1) as u8, (pointer % 94 + 0xA1) as u8]);
                Encoded::Written(2)
            }
            _ => Encoded::Unmappable,
        }
    }
}
