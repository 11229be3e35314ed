//! x-user-defined: ASCII, with bytes 0x80..=0xFF mapped onto the private-use
//! range U+F780..=U+F7FF.

use oxitext_core::{ByteSink, ByteSource, Decoded, Decoder, Encoded, Encoder};

const BASE: u32 = 0xF780 - 0x80;

/// x-user-defined decoder. Never reports an error.
///
/// Holds no per-stream state; one instance may serve any number of streams.
#[derive(Debug, Clone, Copy, Default)]
pub struct XUserDefinedDecoder;

impl Decoder for XUserDefinedDecoder {
    fn read_char(&mut self, input: &mut dyn ByteSource) -> Decoded {
        match input.read_byte() {
            None => Decoded::End,
            Some(b) if b.is_ascii() => Decoded::Char(char::from(b)),
            Some(b) => char::from_u32(BASE + u32::from(b)).map_or(Decoded::Error, Decoded::Char),
        }
    }
}

/// x-user-defined encoder.
///
/// Holds no per-stream state; one instance may serve any number of streams.
#[derive(Debug, Clone, Copy, Default)]
pub struct XUserDefinedEncoder;

impl Encoder for XUserDefinedEncoder {
    fn encode(&mut self, c: Option<char>, output: &mut dyn ByteSink) -> Encoded {
        let Some(c) = c else {
            return Encoded::Finished;
        };
        let cp = u32::from(c);
        let byte = match cp {
            0x00..=0x7F => cp as u8,
            0xF780..=0xF7FF => (cp - BASE) as u8,
            _ => return Encoded::Unmappable,
        };
        output.write_byte(byte);
        Encoded::Written(1)
    }
}
