//! US-ASCII.

use oxitext_core::{ByteSink, ByteSource, Decoded, Decoder, Encoded, Encoder};

/// US-ASCII decoder: bytes 0x00..=0x7F decode to themselves, anything higher
/// is an error.
///
/// Holds no per-stream state; one instance may serve any number of streams.
#[derive(Debug, Clone, Copy, Default)]
pub struct AsciiDecoder;

impl Decoder for AsciiDecoder {
    fn read_char(&mut self, input: &mut dyn ByteSource) -> Decoded {
        match input.read_byte() {
            None => Decoded::End,
            Some(b) if b.is_ascii() => Decoded::Char(char::from(b)),
            Some(_) => Decoded::Error,
        }
    }
}

/// US-ASCII encoder.
///
/// Holds no per-stream state; one instance may serve any number of streams.
#[derive(Debug, Clone, Copy, Default)]
pub struct AsciiEncoder;

impl Encoder for AsciiEncoder {
    fn encode(&mut self, c: Option<char>, output: &mut dyn ByteSink) -> Encoded {
        match c {
            None => Encoded::Finished,
            Some(c) if c.is_ascii() => {
                output.write_byte(c as u8);
                Encoded::Written(1)
            }
            Some(_) => Encoded::Unmappable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxitext_core::SliceSource;

    #[test]
    fn test_decode() {
        let mut src = SliceSource::new(&[0x41, 0x80, 0x7F]);
        let mut dec = AsciiDecoder;
        assert_eq!(dec.read_char(&mut src), Decoded::Char('A'));
        assert_eq!(dec.read_char(&mut src), Decoded::Error);
        assert_eq!(dec.read_char(&mut src), Decoded::Char('\u{7F}'));
        assert_eq!(dec.read_char(&mut src), Decoded::End);
    }

    #[test]
    fn test_encode() {
        let mut out = Vec::new();
        let mut enc = AsciiEncoder;
        assert_eq!(enc.encode(Some('z'), &mut out), Encoded::Written(1));
        assert_eq!(enc.encode(Some('\u{80}'), &mut out), Encoded::Unmappable);
        assert_eq!(enc.encode(None, &mut out), Encoded::Finished);
        assert_eq!(out, b"z");
    }
}
