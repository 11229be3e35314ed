//! EUC-KR, as extended by Unified Hangul Code (windows-949).

use crate::index::EUC_KR;
use oxitext_core::{ByteSink, ByteSource, Decoded, Decoder, DecoderState, Encoded, Encoder};

/// EUC-KR decoder.
#[derive(Debug, Clone, Default)]
pub struct EucKrDecoder {
    state: DecoderState,
    lead: Option<u8>,
}

impl EucKrDecoder {
    /// Create a decoder at the start of a stream.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Decoder for EucKrDecoder {
    fn read_char(&mut self, input: &mut dyn ByteSource) -> Decoded {
        loop {
            let Some(b) = self.state.read_input_byte(input) else {
                return match self.lead.take() {
                    Some(_) => Decoded::Error,
                    None => Decoded::End,
                };
            };

            if let Some(lead) = self.lead.take() {
                if (0x41..=0xFE).contains(&b) {
                    let pointer = usize::from(lead - 0x81) * 190 + usize::from(b - 0x41);
                    if let Some(c) = EUC_KR.code_point(pointer) {
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

/// EUC-KR encoder.
///
/// Holds no per-stream state; one instance may serve any number of streams.
#[derive(Debug, Clone, Copy, Default)]
pub struct EucKrEncoder;

impl EucKrEncoder {
    /// Create an encoder.
    pub fn new() -> Self {
        Self
    }
}

impl Encoder for EucKrEncoder {
    fn encode(&mut self, c: Option<char>, output: &mut dyn ByteSink) -> Encoded {
        let Some(c) = c else {
            return Encoded::Finished;
        };
        if c.is_ascii() {
            output.write_byte(c as u8);
            return Encoded::Written(1);
        }
        let Some(pointer) = EUC_KR.pointer(c) else {
            return Encoded::Unmappable;
        };
        output.write_bytes(&[(pointer / 190 + 0x81) as u8, (pointer % 190 + 0x41) as u8]);
        Encoded::Written(2)
    }
}
