//! The decode and encode algorithms of the Encoding Standard.
//!
//! - [`BomSniffingDecoder`]: "decode", a byte order mark overrides the
//!   fallback encoding
//! - [`utf8_decode`] / [`utf8_decode_without_bom`]: the UTF-8 variants
//! - [`NcrFallbackEncoder`] and [`encode_with_fallback`]: "encode", with
//!   unmappable characters written as decimal numeric character references
//! - [`utf8_encode`]

use crate::input::DecoderInput;
use crate::registry::Encoding;
use oxitext_core::{
    ByteSink, ByteSource, CodePointSource, Decoded, Decoder, DecoderState, Encoded, Encoder,
};
use oxitext_unicode::Utf8Decoder;
use tracing::{debug, trace};

/// A decoder that looks for a byte order mark before the first character.
///
/// Up to three bytes are read on the first call. A UTF-8 BOM
/// (`EF BB BF`) selects UTF-8, `FE FF` selects UTF-16BE and `FF FE`
/// selects UTF-16LE; the mark itself is dropped. Without a mark every
/// peeked byte is handed to the fallback encoding's decoder.
pub struct BomSniffingDecoder {
    fallback: Encoding,
    utf8_only: bool,
    state: DecoderState,
    active: Option<(Encoding, Box<dyn Decoder + Send>)>,
}

impl BomSniffingDecoder {
    /// Sniff for any of the three byte order marks.
    pub fn new(fallback: Encoding) -> Self {
        Self {
            fallback,
            utf8_only: false,
            state: DecoderState::new(),
            active: None,
        }
    }

    /// Decode UTF-8, dropping a leading UTF-8 byte order mark only.
    pub fn utf8() -> Self {
        Self {
            utf8_only: true,
            ..Self::new(Encoding::Utf8)
        }
    }

    /// The encoding in use, known once the first character has been read.
    pub fn encoding(&self) -> Option<Encoding> {
        self.active.as_ref().map(|&(encoding, _)| encoding)
    }

    fn sniff(&mut self, input: &mut dyn ByteSource) -> Encoding {
        let mut peek = Vec::with_capacity(3);
        while peek.len() < 3 {
            match input.read_byte() {
                Some(b) => peek.push(b),
                None => break,
            }
        }

        let (found, mark_len) = match peek.as_slice() {
            [0xEF, 0xBB, 0xBF] => (Some(Encoding::Utf8), 3),
            [0xFE, 0xFF, ..] if !self.utf8_only => (Some(Encoding::Utf16Be), 2),
            [0xFF, 0xFE, ..] if !self.utf8_only => (Some(Encoding::Utf16Le), 2),
            _ => (None, 0),
        };
        self.state.prepend(&peek[mark_len..]);

        match found {
            Some(encoding) => {
                if encoding != self.fallback {
                    debug!(
                        bom = %encoding,
                        fallback = %self.fallback,
                        "byte order mark overrides fallback encoding"
                    );
                }
                encoding
            }
            None => self.fallback,
        }
    }
}

impl Decoder for BomSniffingDecoder {
    fn read_char(&mut self, input: &mut dyn ByteSource) -> Decoded {
        if self.active.is_none() {
            let encoding = self.sniff(input);
            self.active = Some((encoding, encoding.new_decoder()));
        }
        match self.active.as_mut() {
            Some((_, decoder)) => decoder.read_char(&mut self.state.source(input)),
            None => Decoded::End,
        }
    }
}

/// UTF-8 decode: a leading UTF-8 byte order mark is dropped.
pub fn utf8_decode<S: ByteSource>(source: S) -> DecoderInput<BomSniffingDecoder, S> {
    DecoderInput::new(BomSniffingDecoder::utf8(), source)
}

/// UTF-8 decode without BOM: a leading U+FEFF is kept as a character.
pub fn utf8_decode_without_bom<S: ByteSource>(source: S) -> DecoderInput<Utf8Decoder, S> {
    DecoderInput::new(Utf8Decoder::new(), source)
}

/// An encoder that writes unmappable characters as `&#NNN;`.
///
/// The reference is itself encoded through the wrapped encoder, so it comes
/// out correctly in UTF-16 or after an ISO-2022-JP designation.
#[derive(Debug, Clone, Default)]
pub struct NcrFallbackEncoder<E> {
    inner: E,
    escaped: usize,
}

impl<E: Encoder> NcrFallbackEncoder<E> {
    /// Wrap `inner`.
    pub fn new(inner: E) -> Self {
        Self { inner, escaped: 0 }
    }

    /// How many characters have been written as references so far.
    pub fn escaped(&self) -> usize {
        self.escaped
    }

    /// Give back the wrapped encoder.
    pub fn into_inner(self) -> E {
        self.inner
    }
}

/// Decimal numeric character reference for `c`.
pub(crate) fn numeric_reference(c: char) -> String {
    format!("&#{};", u32::from(c))
}

impl<E: Encoder> Encoder for NcrFallbackEncoder<E> {
    fn encode(&mut self, c: Option<char>, output: &mut dyn ByteSink) -> Encoded {
        match (self.inner.encode(c, output), c) {
            (Encoded::Unmappable, Some(c)) => {
                trace!(code_point = u32::from(c), "numeric character reference fallback");
                self.escaped += 1;
                let written = numeric_reference(c)
                    .chars()
                    .map(|ch| match self.inner.encode(Some(ch), output) {
                        Encoded::Written(n) => n,
                        _ => 0,
                    })
                    .sum();
                Encoded::Written(written)
            }
            (result, _) => result,
        }
    }
}

/// Encode all of `input` into `output`, escaping unmappable characters as
/// numeric character references. Returns the number of bytes written.
pub fn encode_with_fallback(
    input: &mut dyn CodePointSource,
    encoding: Encoding,
    output: &mut dyn ByteSink,
) -> usize {
    let mut encoder = NcrFallbackEncoder::new(encoding.new_encoder());
    let mut total = 0;
    loop {
        match encoder.encode(input.read_char(), output) {
            Encoded::Written(n) => total += n,
            Encoded::Finished => return total,
            Encoded::Unmappable => {}
        }
    }
}

/// UTF-8 encode. Returns the number of bytes written.
pub fn utf8_encode(input: &mut dyn CodePointSource, output: &mut dyn ByteSink) -> usize {
    encode_with_fallback(input, Encoding::Utf8, output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::input_to_string;
    use oxitext_core::{SliceSource, StrSource};
    use oxitext_sbcs::CodePage;

    fn sniff(bytes: &[u8], fallback: Encoding) -> (String, Option<Encoding>) {
        let mut input = DecoderInput::new(BomSniffingDecoder::new(fallback), SliceSource::new(bytes));
        let text = input_to_string(&mut input);
        (text, input.decoder().encoding())
    }

    #[test]
    fn test_utf8_bom() {
        let (text, enc) = sniff(b"\xEF\xBB\xBFcaf\xC3\xA9", Encoding::Latin1);
        assert_eq!(text, "caf\u{E9}");
        assert_eq!(enc, Some(Encoding::Utf8));
    }

    #[test]
    fn test_utf16_boms() {
        let (text, enc) = sniff(b"\xFE\xFF\x00A\x00B", Encoding::Utf8);
        assert_eq!((text.as_str(), enc), ("AB", Some(Encoding::Utf16Be)));

        let (text, enc) = sniff(b"\xFF\xFEA\x00B\x00", Encoding::Utf8);
        assert_eq!((text.as_str(), enc), ("AB", Some(Encoding::Utf16Le)));

        // Mark only
        let (text, enc) = sniff(b"\xFF\xFE", Encoding::Utf8);
        assert_eq!((text.as_str(), enc), ("", Some(Encoding::Utf16Le)));
    }

    #[test]
    fn test_no_bom_uses_fallback() {
        let windows_1252 = Encoding::SingleByte(CodePage::Windows1252);
        let (text, enc) = sniff(b"\x80ab", windows_1252);
        assert_eq!((text.as_str(), enc), ("\u{20AC}ab", Some(windows_1252)));

        // Short streams are re-read in full
        let (text, _) = sniff(b"\xEF\xBB", windows_1252);
        assert_eq!(text, "\u{EF}\u{BB}");
        let (text, _) = sniff(b"\xFE", Encoding::Latin1);
        assert_eq!(text, "\u{FE}");
        let (text, enc) = sniff(b"", Encoding::Utf8);
        assert_eq!((text.as_str(), enc), ("", Some(Encoding::Utf8)));
    }

    #[test]
    fn test_utf8_decode_ignores_utf16_marks() {
        let text = input_to_string(&mut utf8_decode(SliceSource::new(b"\xEF\xBB\xBFx")));
        assert_eq!(text, "x");
        let text = input_to_string(&mut utf8_decode(SliceSource::new(b"\xFF\xFEx")));
        assert_eq!(text, "\u{FFFD}\u{FFFD}x");
        let text = input_to_string(&mut utf8_decode_without_bom(SliceSource::new(b"\xEF\xBB\xBFx")));
        assert_eq!(text, "\u{FEFF}x");
    }

    #[test]
    fn test_numeric_references() {
        let mut out = Vec::new();
        let n = encode_with_fallback(&mut StrSource::new("a\u{3042}\u{1F600}b"), Encoding::UsAscii, &mut out);
        assert_eq!(out, b"a&#12354;&#128512;b");
        assert_eq!(n, out.len());

        let mut out = Vec::new();
        encode_with_fallback(&mut StrSource::new("\u{0}"), Encoding::Utf8, &mut out);
        assert_eq!(out, b"\0");
    }

    #[test]
    fn test_references_go_through_the_encoder() {
        let mut out = Vec::new();
        let n = encode_with_fallback(&mut StrSource::new("\u{E5E5}"), Encoding::Gb18030, &mut out);
        assert_eq!(out, b"&#58853;");
        assert_eq!(n, 8);

        let mut enc = NcrFallbackEncoder::new(Encoding::Iso2022Jp.new_encoder());
        let mut out = Vec::new();
        assert_eq!(enc.encode(Some('\u{3042}'), &mut out), Encoded::Written(5));
        assert_eq!(enc.encode(Some('\u{20AC}'), &mut out), Encoded::Written(10));
        assert_eq!(enc.encode(None, &mut out), Encoded::Finished);
        assert_eq!(out, b"\x1B$B\x24\x22\x1B(B&#8364;");
        assert_eq!(enc.escaped(), 1);
    }

    #[test]
    fn test_utf8_encode() {
        let mut out = Vec::new();
        assert_eq!(utf8_encode(&mut StrSource::new("\u{E9}\u{10000}"), &mut out), 6);
        assert_eq!(out, b"\xC3\xA9\xF0\x90\x80\x80");
    }
}
