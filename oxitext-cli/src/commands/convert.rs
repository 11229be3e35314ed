//! Convert command implementation.

use crate::utils::{encoding_for, open_input, open_output};
use oxitext::{ConvertStats, EncodeFallback, Encoding, TranscodeOptions, transcode};
use std::io::{Read, Write};
use std::path::Path;
use tracing::debug;

/// Options for converting a file or stream.
pub struct ConvertOptions<'a> {
    pub input: Option<&'a Path>,
    pub output: Option<&'a Path>,
    pub from: &'a str,
    pub to: &'a str,
    pub email: bool,
    pub ncr: bool,
    pub sniff_bom: bool,
    pub stats: bool,
}

impl ConvertOptions<'_> {
    fn transcode_options(&self) -> TranscodeOptions {
        TranscodeOptions {
            sniff_bom: self.sniff_bom,
            fallback: if self.ncr {
                EncodeFallback::NumericReference
            } else {
                EncodeFallback::Question
            },
        }
    }
}

pub fn cmd_convert(options: &ConvertOptions) -> Result<(), Box<dyn std::error::Error>> {
    // Resolve both labels before touching any file
    let from = encoding_for(options.from, options.email)?;
    let to = encoding_for(options.to, options.email)?;
    debug!(%from, %to, "converting");

    let reader = open_input(options.input)?;
    let writer = open_output(options.output)?;
    let stats = convert_stream(reader, from, writer, to, options.transcode_options())?;

    if options.stats {
        eprintln!("From: {}", from);
        eprintln!("To: {}", to);
        eprintln!("Characters: {}", stats.chars);
        eprintln!("Replaced: {}", stats.replaced);
    }

    Ok(())
}

fn convert_stream<R: Read, W: Write>(
    reader: R,
    from: Encoding,
    writer: W,
    to: Encoding,
    options: TranscodeOptions,
) -> Result<ConvertStats, Box<dyn std::error::Error>> {
    let (mut writer, stats) = transcode(reader, from, writer, to, options)?;
    writer.flush()?;
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(input: &[u8], from: &str, to: &str, options: TranscodeOptions) -> (Vec<u8>, ConvertStats) {
        let from = encoding_for(from, true).unwrap_or_else(|e| panic!("{e}"));
        let to = encoding_for(to, true).unwrap_or_else(|e| panic!("{e}"));
        let mut out = Vec::new();
        let stats =
            convert_stream(input, from, &mut out, to, options).unwrap_or_else(|e| panic!("{e}"));
        (out, stats)
    }

    #[test]
    fn test_shift_jis_to_utf8() {
        let (out, stats) = run(b"\x93\xFA\x96\x7B", "sjis", "utf-8", TranscodeOptions::default());
        assert_eq!(out, "\u{65E5}\u{672C}".as_bytes());
        assert_eq!(stats, ConvertStats { chars: 2, replaced: 0 });
    }

    #[test]
    fn test_fallbacks() {
        let options = ConvertOptions {
            input: None,
            output: None,
            from: "utf-8",
            to: "iso-8859-1",
            email: true,
            ncr: false,
            sniff_bom: true,
            stats: false,
        };
        let (out, stats) = run("a\u{3042}".as_bytes(), "utf-8", "iso-8859-1", options.transcode_options());
        assert_eq!(out, b"a?");
        assert_eq!(stats.replaced, 1);

        let ncr = ConvertOptions { ncr: true, ..options };
        let (out, _) = run("a\u{3042}".as_bytes(), "utf-8", "iso-8859-1", ncr.transcode_options());
        assert_eq!(out, b"a&#12354;");
    }

    #[test]
    fn test_bom_switch() {
        let (out, _) = run(b"\xFF\xFEA\x00", "windows-1252", "utf-8", TranscodeOptions::default());
        assert_eq!(out, b"A");

        let raw = TranscodeOptions {
            sniff_bom: false,
            ..TranscodeOptions::default()
        };
        let (out, _) = run(b"\xFF\xFEA\x00", "windows-1252", "utf-8", raw);
        assert_eq!(out, "\u{FF}\u{FE}A\u{0}".as_bytes());
    }

    #[test]
    fn test_utf7_needs_email_profile() {
        let (out, _) = run(b"1+1", "utf-8", "utf-7", TranscodeOptions::default());
        assert_eq!(out, b"1+-1");
        assert!(encoding_for("utf-7", false).is_err());
    }
}
