//! ISO-8859-1 in its original sense: every byte is the code point of the
//! same value.
//!
//! The web profile maps the label `iso-8859-1` to windows-1252 instead; this
//! codec is what the email profile hands out.

use oxitext_core::{ByteSink, ByteSource, Decoded, Decoder, Encoded, Encoder};

/// Latin-1 decoder. Never reports an error.
///
/// Holds no per-stream state; one instance may serve any number of streams.
#[derive(Debug, Clone, Copy, Default)]
pub struct Latin1Decoder;

impl Decoder for Latin1Decoder {
    fn read_char(&mut self, input: &mut dyn ByteSource) -> Decoded {
        input
            .read_byte()
            .map_or(Decoded::End, |b| Decoded::Char(char::from(b)))
    }
}

/// Latin-1 encoder: U+0000..=U+00FF only.
///
/// Holds no per-stream state; one instance may serve any number of streams.
#[derive(Debug, Clone, Copy, Default)]
pub struct Latin1Encoder;

impl Encoder for Latin1Encoder {
    fn encode(&mut self, c: Option<char>, output: &mut dyn ByteSink) -> Encoded {
        let Some(c) = c else {
            return Encoded::Finished;
        };
        match u8::try_from(c) {
            Ok(b) => {
                output.write_byte(b);
                Encoded::Written(1)
            }
            Err(_) => Encoded::Unmappable,
        }
    }
}
