//! GB18030 and GBK.
//!
//! Both share one decoder. Sequences are one byte (ASCII, and 0x80 for the
//! euro sign), two bytes through the GB18030 index, or four bytes of the
//! form `[81-FE] [30-39] [81-FE] [30-39]` addressing a linear pointer space
//! (see [`crate::ranges`]). The GBK encoder is the GB18030 encoder without
//! four-byte output.

use crate::index::{GB18030, gb18030_pua_pointer};
use crate::ranges;
use oxitext_core::{ByteSink, ByteSource, Decoded, Decoder, DecoderState, Encoded, Encoder};

/// Bytes of an unfinished sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum Pending {
    #[default]
    None,
    One(u8),
    Two(u8, u8),
    Three(u8, u8, u8),
}

/// GB18030 decoder, also used for GBK.
#[derive(Debug, Clone, Default)]
pub struct Gb18030Decoder {
    state: DecoderState,
    pending: Pending,
}

impl Gb18030Decoder {
    /// Create a decoder at the start of a stream.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Decoder for Gb18030Decoder {
    fn read_char(&mut self, input: &mut dyn ByteSource) -> Decoded {
        loop {
            let Some(b) = self.state.read_input_byte(input) else {
                return match std::mem::take(&mut self.pending) {
                    Pending::None => Decoded::End,
                    _ => Decoded::Error,
                };
            };

            match std::mem::take(&mut self.pending) {
                Pending::Three(first, second, third) => {
                    if !(0x30..=0x39).contains(&b) {
                        self.state.prepend_three(second, third, b);
                        return Decoded::Error;
                    }
                    let pointer = (u32::from(first) - 0x81) * (10 * 126 * 10)
                        + (u32::from(second) - 0x30) * (10 * 126)
                        + (u32::from(third) - 0x81) * 10
                        + (u32::from(b) - 0x30);
                    return ranges::code_point(pointer).map_or(Decoded::Error, Decoded::Char);
                }
                Pending::Two(first, second) => {
                    if (0x81..=0xFE).contains(&b) {
                        self.pending = Pending::Three(first, second, b);
                        continue;
                    }
                    self.state.prepend_two(second, b);
                    return Decoded::Error;
                }
                Pending::One(first) => {
                    if (0x30..=0x39).contains(&b) {
                        self.pending = Pending::Two(first, b);
                        continue;
                    }
                    if matches!(b, 0x40..=0x7E | 0x80..=0xFE) {
                        let offset = if b < 0x7F { 0x40 } else { 0x41 };
                        let pointer = usize::from(first - 0x81) * 190 + usize::from(b - offset);
                        if let Some(c) = GB18030.code_point(pointer) {
                            return Decoded::Char(c);
                        }
                    }
                    if b.is_ascii() {
                        self.state.prepend_one(b);
                    }
                    return Decoded::Error;
                }
                Pending::None => match b {
                    0x00..=0x7F => return Decoded::Char(char::from(b)),
                    0x80 => return Decoded::Char('\u{20AC}'),
                    0x81..=0xFE => self.pending = Pending::One(b),
                    _ => return Decoded::Error,
                },
            }
        }
    }
}

/// GB18030 or GBK encoder.
///
/// Holds no per-stream state; one instance may serve any number of streams.
#[derive(Debug, Clone, Copy)]
pub struct Gb18030Encoder {
    gbk: bool,
}

impl Default for Gb18030Encoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Gb18030Encoder {
    /// GB18030 encoder: every scalar value except U+E5E5 is encodable.
    pub fn new() -> Self {
        Self { gbk: false }
    }

    /// GBK encoder: two-byte sequences only, and 0x80 for the euro sign.
    pub fn gbk() -> Self {
        Self { gbk: true }
    }

    /// Whether this is the GBK flavour.
    pub fn is_gbk(&self) -> bool {
        self.gbk
    }
}

impl Encoder for Gb18030Encoder {
    fn encode(&mut self, c: Option<char>, output: &mut dyn ByteSink) -> Encoded {
        let Some(c) = c else {
            return Encoded::Finished;
        };
        if c.is_ascii() {
            output.write_byte(c as u8);
            return Encoded::Written(1);
        }
        if c == '\u{E5E5}' {
            return Encoded::Unmappable;
        }
        if self.gbk && c == '\u{20AC}' {
            output.write_byte(0x80);
            return Encoded::Written(1);
        }

        if let Some(pointer) = gb18030_pua_pointer(c).or_else(|| GB18030.pointer(c)) {
            let lead = pointer / 190 + 0x81;
            let trail = pointer % 190;
            let trail = trail + if trail < 0x3F { 0x40 } else { 0x41 };
            output.write_bytes(&[lead as u8, trail as u8]);
            return Encoded::Written(2);
        }
        if self.gbk {
            return Encoded::Unmappable;
        }

        let pointer = ranges::pointer(c);
        let (first, rest) = (pointer / (10 * 126 * 10), pointer % (10 * 126 * 10));
        let (second, rest) = (rest / (10 * 126), rest % (10 * 126));
        let (third, fourth) = (rest / 10, rest % 10);
        output.write_bytes(&[
            (first + 0x81) as u8,
            (second + 0x30) as u8,
            (third + 0x81) as u8,
            (fourth + 0x30) as u8,
        ]);
        Encoded::Written(4)
    }
}
