//! Code-point sources over decoded byte streams.

use crate::algorithms::BomSniffingDecoder;
use crate::registry::Encoding;
use oxitext_core::{ByteSource, CodePointSource, Decoded, Decoder};

/// A [`CodePointSource`] that pulls bytes from `source` through `decoder`.
///
/// Decode errors come out as U+FFFD; end of stream is `None`.
#[derive(Debug)]
pub struct DecoderInput<D, S> {
    decoder: D,
    source: S,
}

impl<D: Decoder, S: ByteSource> DecoderInput<D, S> {
    /// Pair a decoder with the byte source it will read.
    pub fn new(decoder: D, source: S) -> Self {
        Self { decoder, source }
    }

    /// The decoder.
    pub fn decoder(&self) -> &D {
        &self.decoder
    }

    /// Give back the decoder and the byte source.
    pub fn into_parts(self) -> (D, S) {
        (self.decoder, self.source)
    }

    /// Read the next raw result, without error replacement.
    pub fn read_decoded(&mut self) -> Decoded {
        self.decoder.read_char(&mut self.source)
    }
}

impl<D: Decoder, S: ByteSource> CodePointSource for DecoderInput<D, S> {
    fn read_char(&mut self) -> Option<char> {
        match self.read_decoded() {
            Decoded::Char(c) => Some(c),
            Decoded::Error => Some(char::REPLACEMENT_CHARACTER),
            Decoded::End => None,
        }
    }
}

impl<D: Decoder, S: ByteSource> Iterator for DecoderInput<D, S> {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        CodePointSource::read_char(self)
    }
}

/// Decode `source` with `encoding`. No byte order mark is looked for.
pub fn decode_input<S: ByteSource>(
    encoding: Encoding,
    source: S,
) -> DecoderInput<Box<dyn Decoder + Send>, S> {
    DecoderInput::new(encoding.new_decoder(), source)
}

/// Decode `source`, letting a byte order mark override `encoding`.
///
/// A UTF-8, UTF-16BE or UTF-16LE byte order mark selects that encoding and
/// is dropped; otherwise the stream is decoded with `encoding` from its
/// first byte.
pub fn decode_input_skip_bom<S: ByteSource>(
    encoding: Encoding,
    source: S,
) -> DecoderInput<BomSniffingDecoder, S> {
    DecoderInput::new(BomSniffingDecoder::new(encoding), source)
}

/// Collect everything left in `input` into a string.
pub fn input_to_string(input: &mut dyn CodePointSource) -> String {
    let mut out = String::new();
    while let Some(c) = input.read_char() {
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxitext_core::{SliceSource, StrSource};

    #[test]
    fn test_errors_become_replacement_characters() {
        let mut input = decode_input(Encoding::Utf8, SliceSource::new(b"a\xFFb"));
        assert_eq!(input_to_string(&mut input), "a\u{FFFD}b");
        assert_eq!(CodePointSource::read_char(&mut input), None);
    }

    #[test]
    fn test_raw_results() {
        let mut input = decode_input(Encoding::UsAscii, SliceSource::new(b"\x80"));
        assert_eq!(input.read_decoded(), Decoded::Error);
        assert_eq!(input.read_decoded(), Decoded::End);
    }

    #[test]
    fn test_bom_is_not_stripped() {
        let input = decode_input(Encoding::Utf8, SliceSource::new(b"\xEF\xBB\xBFx"));
        assert_eq!(input.collect::<String>(), "\u{FEFF}x");
    }

    #[test]
    fn test_bulk_read() {
        let mut input = decode_input(Encoding::Latin1, SliceSource::new(b"abc"));
        let mut buf = ['\0'; 2];
        assert_eq!(input.read_into(&mut buf), Some(2));
        assert_eq!(buf, ['a', 'b']);
        assert_eq!(input.read_into(&mut buf), Some(1));
        assert_eq!(input.read_into(&mut buf), None);
    }

    #[test]
    fn test_into_parts() {
        let input = decode_input(Encoding::Utf8, SliceSource::new(b"xyz"));
        let (_, source) = input.into_parts();
        assert_eq!(source.remaining(), b"xyz");
        assert_eq!(input_to_string(&mut StrSource::new("ok")), "ok");
    }
}
