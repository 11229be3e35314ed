//! Whole-buffer and streaming conversions.
//!
//! The lenient helpers never fail on content: decode errors become U+FFFD
//! and unmappable characters are replaced according to [`EncodeFallback`].
//! The `_strict` variants stop at the first problem instead.

use crate::algorithms::NcrFallbackEncoder;
use crate::input::{decode_input, decode_input_skip_bom};
use crate::registry::Encoding;
use oxitext_core::{
    ByteSink, CodePointSource, Decoded, Encoded, Encoder, ReaderSource, Result, SliceSource,
    StrSource, TextError, WriterSink,
};
use std::io::{Read, Write};

/// What to write in place of a character the target encoding lacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EncodeFallback {
    /// A question mark (0x3F).
    #[default]
    Question,
    /// A decimal numeric character reference such as `&#8364;`.
    NumericReference,
}

/// Counters from a conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConvertStats {
    /// Characters read from the input.
    pub chars: usize,
    /// Characters that had to be replaced on output.
    pub replaced: usize,
}

/// Encode everything from `input`, then finish the stream.
fn encode_into(
    input: &mut dyn CodePointSource,
    encoding: Encoding,
    output: &mut dyn ByteSink,
    fallback: EncodeFallback,
) -> ConvertStats {
    let mut stats = ConvertStats::default();
    let mut counting = CountingSource {
        inner: input,
        count: &mut stats.chars,
    };
    stats.replaced = match fallback {
        EncodeFallback::Question => {
            encoding
                .new_encoder()
                .encode_all(&mut counting, output, b'?')
        }
        EncodeFallback::NumericReference => {
            let mut encoder = NcrFallbackEncoder::new(encoding.new_encoder());
            encoder.encode_all(&mut counting, output, b'?');
            encoder.escaped()
        }
    };
    stats
}

struct CountingSource<'a> {
    inner: &'a mut dyn CodePointSource,
    count: &'a mut usize,
}

impl CodePointSource for CountingSource<'_> {
    fn read_char(&mut self) -> Option<char> {
        let c = self.inner.read_char()?;
        *self.count += 1;
        Some(c)
    }
}

/// Decode `bytes`, replacing malformed sequences with U+FFFD.
///
/// No byte order mark is looked for; see
/// [`decode_input_skip_bom`](crate::decode_input_skip_bom) for that.
pub fn decode_to_string(encoding: Encoding, bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    out.extend(decode_input(encoding, SliceSource::new(bytes)));
    out
}

/// Encode `text`, writing `?` for characters `encoding` lacks.
pub fn encode_to_bytes(text: &str, encoding: Encoding) -> Vec<u8> {
    encode_to_bytes_with(text, encoding, EncodeFallback::Question)
}

/// Encode `text` with the given fallback for unmappable characters.
pub fn encode_to_bytes_with(text: &str, encoding: Encoding, fallback: EncodeFallback) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    encode_into(&mut StrSource::new(text), encoding, &mut out, fallback);
    out
}

/// Encode `text` into `writer`, writing `?` for unmappable characters.
pub fn encode_to_writer<W: Write>(text: &str, encoding: Encoding, writer: W) -> Result<W> {
    let mut sink = WriterSink::new(writer);
    encode_into(
        &mut StrSource::new(text),
        encoding,
        &mut sink,
        EncodeFallback::Question,
    );
    Ok(sink.finish()?)
}

/// Decode `bytes`, failing at the first malformed sequence.
pub fn decode_strict(encoding: Encoding, bytes: &[u8]) -> Result<String> {
    let mut input = decode_input(encoding, SliceSource::new(bytes));
    let mut out = String::with_capacity(bytes.len());
    loop {
        match input.read_decoded() {
            Decoded::Char(c) => out.push(c),
            Decoded::Error => return Err(TextError::malformed(out.chars().count())),
            Decoded::End => return Ok(out),
        }
    }
}

/// Encode `text`, failing at the first character `encoding` lacks.
pub fn encode_strict(text: &str, encoding: Encoding) -> Result<Vec<u8>> {
    let mut encoder = encoding.new_encoder();
    let mut out = Vec::with_capacity(text.len());
    for (position, c) in text.chars().enumerate() {
        if encoder.encode(Some(c), &mut out) == Encoded::Unmappable {
            return Err(TextError::unmappable(c, position));
        }
    }
    while encoder.encode(None, &mut out) != Encoded::Finished {}
    Ok(out)
}

/// Options for [`transcode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranscodeOptions {
    /// Let a byte order mark override the source encoding.
    pub sniff_bom: bool,
    /// Replacement for characters the target encoding lacks.
    pub fallback: EncodeFallback,
}

impl Default for TranscodeOptions {
    fn default() -> Self {
        Self {
            sniff_bom: true,
            fallback: EncodeFallback::Question,
        }
    }
}

/// Stream `reader` from one encoding into `writer` in another.
///
/// Returns the writer and the conversion counters. I/O errors on either
/// side are reported after the stream has been drained.
pub fn transcode<R: Read, W: Write>(
    reader: R,
    from: Encoding,
    writer: W,
    to: Encoding,
    options: TranscodeOptions,
) -> Result<(W, ConvertStats)> {
    let mut sink = WriterSink::new(writer);
    let source = ReaderSource::new(reader);

    let (stats, mut source) = if options.sniff_bom {
        let mut input = decode_input_skip_bom(from, source);
        let stats = encode_into(&mut input, to, &mut sink, options.fallback);
        (stats, input.into_parts().1)
    } else {
        let mut input = decode_input(from, source);
        let stats = encode_into(&mut input, to, &mut sink, options.fallback);
        (stats, input.into_parts().1)
    };

    if let Some(err) = source.take_error() {
        return Err(err.into());
    }
    Ok((sink.finish()?, stats))
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxitext_sbcs::CodePage;

    #[test]
    fn test_decode_to_string() {
        assert_eq!(decode_to_string(Encoding::Utf8, b"ok\xFF"), "ok\u{FFFD}");
        assert_eq!(
            decode_to_string(Encoding::SingleByte(CodePage::Koi8R), b"\xE1\xC2"),
            "\u{410}\u{431}"
        );
        assert_eq!(decode_to_string(Encoding::Replacement, b"abc"), "\u{FFFD}");
    }

    #[test]
    fn test_encode_to_bytes() {
        assert_eq!(encode_to_bytes("a\u{3042}", Encoding::UsAscii), b"a?");
        assert_eq!(
            encode_to_bytes_with("a\u{3042}", Encoding::UsAscii, EncodeFallback::NumericReference),
            b"a&#12354;"
        );
        assert_eq!(encode_to_bytes("\u{FFFD}", Encoding::Replacement), b"\xEF\xBF\xBD");
    }

    #[test]
    fn test_encode_to_writer() {
        let out = encode_to_writer("\u{E9}t\u{E9}", Encoding::Latin1, Vec::new())
            .unwrap_or_default();
        assert_eq!(out, b"\xE9t\xE9");
    }

    #[test]
    fn test_strict() {
        assert_eq!(decode_strict(Encoding::Utf8, b"abc").ok().as_deref(), Some("abc"));
        match decode_strict(Encoding::Utf8, b"ab\xC3(") {
            Err(TextError::Malformed { offset }) => assert_eq!(offset, 2),
            other => panic!("unexpected {other:?}"),
        }
        match encode_strict("x\u{E9}\u{3042}", Encoding::Latin1) {
            Err(TextError::Unmappable { ch, position }) => {
                assert_eq!((ch, position), ('\u{3042}', 2));
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(
            encode_strict("\u{3042}", Encoding::Iso2022Jp).ok(),
            Some(b"\x1B$B\x24\x22\x1B(B".to_vec())
        );
    }

    #[test]
    fn test_transcode() {
        let input: &[u8] = b"\xEF\xBB\xBF\xE2\x82\xAC1 \xE6\x97\xA5";
        let (out, stats) = transcode(
            input,
            Encoding::SingleByte(CodePage::Windows1252),
            Vec::new(),
            Encoding::ShiftJis,
            TranscodeOptions::default(),
        )
        .unwrap_or_else(|e| panic!("{e}"));
        // The BOM wins over the declared source encoding
        assert_eq!(out, b"?1 \x93\xFA");
        assert_eq!(stats, ConvertStats { chars: 4, replaced: 1 });
    }

    #[test]
    fn test_transcode_without_sniffing() {
        let options = TranscodeOptions {
            sniff_bom: false,
            fallback: EncodeFallback::NumericReference,
        };
        let input: &[u8] = b"\xEF\xBB\xBFa";
        let (out, stats) = transcode(input, Encoding::Utf8, Vec::new(), Encoding::UsAscii, options)
            .unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(out, b"&#65279;a");
        assert_eq!(stats.replaced, 1);
    }
}
