//! ISO-2022-JP.
//!
//! A seven-bit encoding that switches character sets with escape sequences:
//!
//! | Sequence     | Bytes      | Set                    |
//! |--------------|------------|------------------------|
//! | `ESC ( B`    | 1B 28 42   | ASCII                  |
//! | `ESC ( J`    | 1B 28 4A   | JIS X 0201 Roman       |
//! | `ESC ( I`    | 1B 28 49   | JIS X 0201 katakana    |
//! | `ESC $ @`    | 1B 24 40   | JIS X 0208 (1978)      |
//! | `ESC $ B`    | 1B 24 42   | JIS X 0208 (1983)      |
//!
//! An escape the decoder does not recognize is reported as one error, after
//! which its bytes are decoded again as ordinary text. Two escapes with
//! nothing decoded between them are also an error.

use crate::index::{JIS0208, JIS_PLANE, fold_minus, full_width_katakana};
use oxitext_core::{ByteSink, ByteSource, Decoded, Decoder, DecoderState, Encoded, Encoder};

const ESC: u8 = 0x1B;

/// Decoder states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Ascii,
    Roman,
    Katakana,
    LeadByte,
    TrailByte,
    EscapeStart,
    Escape,
}

/// ISO-2022-JP decoder.
#[derive(Debug, Clone)]
pub struct Iso2022JpDecoder {
    state: DecoderState,
    mode: Mode,
    // Mode to fall back to after an escape sequence
    output_mode: Mode,
    lead: u8,
    // Set by an escape sequence, cleared by any output
    escaped: bool,
}

impl Default for Iso2022JpDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Iso2022JpDecoder {
    /// Create a decoder in the ASCII state.
    pub fn new() -> Self {
        Self {
            state: DecoderState::new(),
            mode: Mode::Ascii,
            output_mode: Mode::Ascii,
            lead: 0,
            escaped: false,
        }
    }

    fn emit(&mut self, c: u32) -> Decoded {
        self.escaped = false;
        char::from_u32(c).map_or(Decoded::Error, Decoded::Char)
    }

    fn error(&mut self) -> Decoded {
        self.escaped = false;
        Decoded::Error
    }
}

impl Decoder for Iso2022JpDecoder {
    fn read_char(&mut self, input: &mut dyn ByteSource) -> Decoded {
        loop {
            let byte = self.state.read_input_byte(input);
            match self.mode {
                Mode::Ascii => match byte {
                    Some(ESC) => self.mode = Mode::EscapeStart,
                    Some(b @ (0x00..=0x0D | 0x10..=0x1A | 0x1C..=0x7F)) => {
                        return self.emit(u32::from(b));
                    }
                    Some(_) => return self.error(),
                    None => return Decoded::End,
                },
                Mode::Roman => match byte {
                    Some(ESC) => self.mode = Mode::EscapeStart,
                    Some(0x5C) => return self.emit(0xA5),
                    Some(0x7E) => return self.emit(0x203E),
                    Some(b @ (0x00..=0x0D | 0x10..=0x1A | 0x1C..=0x7F)) => {
                        return self.emit(u32::from(b));
                    }
                    Some(_) => return self.error(),
                    None => return Decoded::End,
                },
                Mode::Katakana => match byte {
                    Some(ESC) => self.mode = Mode::EscapeStart,
                    Some(b @ 0x21..=0x5F) => return self.emit(0xFF61 - 0x21 + u32::from(b)),
                    Some(_) => return self.error(),
                    None => return Decoded::End,
                },
                Mode::LeadByte => match byte {
                    Some(ESC) => self.mode = Mode::EscapeStart,
                    Some(b @ 0x21..=0x7E) => {
                        self.escaped = false;
                        self.lead = b;
                        self.mode = Mode::TrailByte;
                    }
                    Some(_) => return self.error(),
                    None => return Decoded::End,
                },
                Mode::TrailByte => {
                    if byte == Some(ESC) {
                        self.mode = Mode::EscapeStart;
                        return Decoded::Error;
                    }
                    self.mode = Mode::LeadByte;
                    if let Some(b @ 0x21..=0x7E) = byte {
                        let pointer = usize::from(self.lead - 0x21) * 94 + usize::from(b - 0x21);
                        return JIS0208
                            .code_point(pointer)
                            .map_or(Decoded::Error, Decoded::Char);
                    }
                    return Decoded::Error;
                }
                Mode::EscapeStart => match byte {
                    Some(b @ (0x24 | 0x28)) => {
                        self.lead = b;
                        self.mode = Mode::Escape;
                    }
                    other => {
                        if let Some(b) = other {
                            self.state.prepend_one(b);
                        }
                        self.mode = self.output_mode;
                        return self.error();
                    }
                },
                Mode::Escape => {
                    let lead = std::mem::take(&mut self.lead);
                    let designated = match (lead, byte) {
                        (0x28, Some(0x42)) => Some(Mode::Ascii),
                        (0x28, Some(0x4A)) => Some(Mode::Roman),
                        (0x28, Some(0x49)) => Some(Mode::Katakana),
                        (0x24, Some(0x40 | 0x42)) => Some(Mode::LeadByte),
                        _ => None,
                    };
                    if let Some(next) = designated {
                        self.mode = next;
                        self.output_mode = next;
                        if std::mem::replace(&mut self.escaped, true) {
                            return Decoded::Error;
                        }
                        continue;
                    }
                    match byte {
                        Some(b) => self.state.prepend_two(lead, b),
                        None => self.state.prepend_one(lead),
                    }
                    self.mode = self.output_mode;
                    return self.error();
                }
            }
        }
    }
}

/// Encoder states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Designation {
    Ascii,
    Roman,
    Jis0208,
}

impl Designation {
    fn escape(self) -> &'static [u8; 3] {
        match self {
            Designation::Ascii => b"\x1B(B",
            Designation::Roman => b"\x1B(J",
            Designation::Jis0208 => b"\x1B$B",
        }
    }
}

/// ISO-2022-JP encoder.
///
/// Writes an escape sequence only when the character set changes, and
/// returns to ASCII at end of stream. Half-width katakana is written as its
/// full-width JIS X 0208 equivalent.
#[derive(Debug, Clone)]
pub struct Iso2022JpEncoder {
    designation: Designation,
}

impl Default for Iso2022JpEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Iso2022JpEncoder {
    /// Create an encoder in the ASCII state.
    pub fn new() -> Self {
        Self {
            designation: Designation::Ascii,
        }
    }

    /// Switch to `next`, returning the number of bytes written.
    fn designate(&mut self, next: Designation, output: &mut dyn ByteSink) -> usize {
        if self.designation == next {
            return 0;
        }
        self.designation = next;
        output.write_bytes(next.escape());
        3
    }
}

impl Encoder for Iso2022JpEncoder {
    fn encode(&mut self, c: Option<char>, output: &mut dyn ByteSink) -> Encoded {
        let Some(c) = c else {
            return match self.designate(Designation::Ascii, output) {
                0 => Encoded::Finished,
                n => Encoded::Written(n),
            };
        };

        // Shift-out, shift-in and escape would corrupt the designation state
        if matches!(c, '\u{0E}' | '\u{0F}' | '\u{1B}') {
            return Encoded::Unmappable;
        }

        let roman = match c {
            '\u{A5}' => Some(0x5C),
            '\u{203E}' => Some(0x7E),
            '\u{5C}' | '\u{7E}' => None,
            _ if c.is_ascii() => Some(c as u8),
            _ => None,
        };
        if let (Designation::Roman, Some(b)) = (self.designation, roman) {
            output.write_byte(b);
            return Encoded::Written(1);
        }
        if c.is_ascii() {
            let n = self.designate(Designation::Ascii, output);
            output.write_byte(c as u8);
            return Encoded::Written(n + 1);
        }
        if let Some(b) = roman {
            let n = self.designate(Designation::Roman, output);
            output.write_byte(b);
            return Encoded::Written(n + 1);
        }

        let c = full_width_katakana(fold_minus(c));
        match JIS0208.pointer(c) {
            Some(pointer) if pointer < JIS_PLANE => {
                let n = self.designate(Designation::Jis0208, output);
                output.write_bytes(&[(pointer / 94 + 0x21) as u8, (pointer % 94 + 0x21) as u8]);
                Encoded::Written(n + 2)
            }
            _ => Encoded::Unmappable,
        }
    }
}
