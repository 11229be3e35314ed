//! UTF-16LE and UTF-16BE.
//!
//! One decoder and one encoder type serve both byte orders, selected by a
//! flag at construction.
//!
//! When a high surrogate is followed by a code unit that is not a low
//! surrogate, the decoder reports an error and hands both bytes of the
//! offending unit back, so the next call decodes that unit on its own. A
//! high surrogate followed by a second high surrogate therefore produces two
//! errors in a row: one now, and one when the second surrogate in turn finds
//! no partner.

use oxitext_core::{ByteSink, ByteSource, Decoded, Decoder, DecoderState, Encoded, Encoder};

/// UTF-16 decoder for either byte order.
#[derive(Debug, Clone)]
pub struct Utf16Decoder {
    state: DecoderState,
    big_endian: bool,
    lead: Option<u8>,
    surrogate: Option<u16>,
}

impl Utf16Decoder {
    /// Create a decoder for the given byte order.
    pub fn new(big_endian: bool) -> Self {
        Self {
            state: DecoderState::new(),
            big_endian,
            lead: None,
            surrogate: None,
        }
    }

    /// UTF-16LE decoder.
    pub fn le() -> Self {
        Self::new(false)
    }

    /// UTF-16BE decoder.
    pub fn be() -> Self {
        Self::new(true)
    }
}

impl Decoder for Utf16Decoder {
    fn read_char(&mut self, input: &mut dyn ByteSource) -> Decoded {
        loop {
            let Some(b) = self.state.read_input_byte(input) else {
                if self.lead.is_some() || self.surrogate.is_some() {
                    self.lead = None;
                    self.surrogate = None;
                    return Decoded::Error;
                }
                return Decoded::End;
            };

            let Some(lead) = self.lead.take() else {
                self.lead = Some(b);
                continue;
            };

            let unit = if self.big_endian {
                u16::from_be_bytes([lead, b])
            } else {
                u16::from_le_bytes([lead, b])
            };

            if let Some(high) = self.surrogate.take() {
                if (0xDC00..=0xDFFF).contains(&unit) {
                    let cp = 0x10000
                        + ((u32::from(high) - 0xD800) << 10)
                        + (u32::from(unit) - 0xDC00);
                    return char::from_u32(cp).map_or(Decoded::Error, Decoded::Char);
                }
                self.state.prepend_two(lead, b);
                return Decoded::Error;
            }

            match unit {
                0xD800..=0xDBFF => {
                    self.surrogate = Some(unit);
                }
                0xDC00..=0xDFFF => return Decoded::Error,
                _ => {
                    return char::from_u32(u32::from(unit)).map_or(Decoded::Error, Decoded::Char);
                }
            }
        }
    }
}

/// UTF-16 encoder for either byte order.
///
/// Holds no per-stream state; one instance may serve any number of streams.
#[derive(Debug, Clone, Copy)]
pub struct Utf16Encoder {
    big_endian: bool,
}

impl Utf16Encoder {
    /// Create an encoder for the given byte order.
    pub fn new(big_endian: bool) -> Self {
        Self { big_endian }
    }

    /// UTF-16LE encoder.
    pub fn le() -> Self {
        Self::new(false)
    }

    /// UTF-16BE encoder.
    pub fn be() -> Self {
        Self::new(true)
    }
}

impl Encoder for Utf16Encoder {
    fn encode(&mut self, c: Option<char>, output: &mut dyn ByteSink) -> Encoded {
        let Some(c) = c else {
            return Encoded::Finished;
        };
        let mut units = [0u16; 2];
        let units = c.encode_utf16(&mut units);
        for unit in units.iter() {
            let bytes = if self.big_endian {
                unit.to_be_bytes()
            } else {
                unit.to_le_bytes()
            };
            output.write_bytes(&bytes);
        }
        Encoded::Written(units.len() * 2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxitext_core::SliceSource;

    fn decode(dec: &mut Utf16Decoder, bytes: &[u8]) -> Vec<Decoded> {
        let mut src = SliceSource::new(bytes);
        std::iter::from_fn(|| match dec.read_char(&mut src) {
            Decoded::End => None,
            d => Some(d),
        })
        .collect()
    }

    #[test]
    fn test_byte_order() {
        assert_eq!(
            decode(&mut Utf16Decoder::le(), &[0x42, 0x30, 0x41, 0x00]),
            vec![Decoded::Char('\u{3042}'), Decoded::Char('A')]
        );
        assert_eq!(
            decode(&mut Utf16Decoder::be(), &[0x30, 0x42, 0x00, 0x41]),
            vec![Decoded::Char('\u{3042}'), Decoded::Char('A')]
        );
    }

    #[test]
    fn test_surrogate_pair() {
        assert_eq!(
            decode(&mut Utf16Decoder::be(), &[0xD8, 0x3D, 0xDE, 0x00]),
            vec![Decoded::Char('\u{1F600}')]
        );
        assert_eq!(
            decode(&mut Utf16Decoder::le(), &[0x3D, 0xD8, 0x00, 0xDE]),
            vec![Decoded::Char('\u{1F600}')]
        );
    }

    #[test]
    fn test_high_surrogate_then_plain_unit() {
        // The unit after the lone high surrogate is decoded on the next call
        assert_eq!(
            decode(&mut Utf16Decoder::be(), &[0xD8, 0x00, 0x00, 0x41]),
            vec![Decoded::Error, Decoded::Char('A')]
        );
        assert_eq!(
            decode(&mut Utf16Decoder::le(), &[0x00, 0xD8, 0x41, 0x00]),
            vec![Decoded::Error, Decoded::Char('A')]
        );
    }

    #[test]
    fn test_two_high_surrogates_yield_two_errors() {
        assert_eq!(
            decode(&mut Utf16Decoder::be(), &[0xD8, 0x00, 0xD8, 0x00]),
            vec![Decoded::Error, Decoded::Error]
        );
        // The second high surrogate can still pair with what follows it
        assert_eq!(
            decode(&mut Utf16Decoder::be(), &[0xD8, 0x00, 0xD8, 0x3D, 0xDE, 0x00]),
            vec![Decoded::Error, Decoded::Char('\u{1F600}')]
        );
    }

    #[test]
    fn test_lone_low_surrogate_and_odd_length() {
        assert_eq!(
            decode(&mut Utf16Decoder::le(), &[0x00, 0xDC, 0x41, 0x00]),
            vec![Decoded::Error, Decoded::Char('A')]
        );
        assert_eq!(
            decode(&mut Utf16Decoder::le(), &[0x41, 0x00, 0x42]),
            vec![Decoded::Char('A'), Decoded::Error]
        );
        assert_eq!(
            decode(&mut Utf16Decoder::le(), &[0x3D, 0xD8]),
            vec![Decoded::Error]
        );
    }

    #[test]
    fn test_encoder() {
        let mut out = Vec::new();
        let mut enc = Utf16Encoder::be();
        assert_eq!(enc.encode(Some('A'), &mut out), Encoded::Written(2));
        assert_eq!(enc.encode(Some('\u{1F600}'), &mut out), Encoded::Written(4));
        assert_eq!(enc.encode(None, &mut out), Encoded::Finished);
        assert_eq!(out, vec![0x00, 0x41, 0xD8, 0x3D, 0xDE, 0x00]);

        let mut out = Vec::new();
        let mut enc = Utf16Encoder::le();
        enc.encode(Some('\u{1F600}'), &mut out);
        assert_eq!(out, vec![0x3D, 0xD8, 0x00, 0xDE]);
    }
}
