//! UTF-7 (RFC 2152).
//!
//! Printable ASCII travels as itself. Everything else is written as a
//! modified-base64 run of UTF-16 code units between `+` and an optional `-`.
//!
//! Decoding a run goes through three stages: 6-bit alphabet values are
//! accumulated into bytes, bytes are paired into code units, and code units
//! are paired into scalar values. The last two stages live in
//! [`CodeUnitAppender`], which also reports what is left over when a run
//! ends: an unpaired surrogate, an odd byte, or non-zero padding bits each
//! produce an error.

use oxitext_core::{ByteSink, ByteSource, Decoded, Decoder, DecoderState, Encoded, Encoder};

const BASE64: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

fn alphabet_value(b: u8) -> Option<u32> {
    let v = match b {
        b'A'..=b'Z' => b - b'A',
        b'a'..=b'z' => b - b'a' + 26,
        b'0'..=b'9' => b - b'0' + 52,
        b'+' => 62,
        b'/' => 63,
        _ => return None,
    };
    Some(u32::from(v))
}

/// What a byte outside a base64 run decodes to.
fn direct_char(b: u8) -> Decoded {
    match b {
        0x09 | 0x0A | 0x0D => Decoded::Char(char::from(b)),
        0x00..=0x1F | 0x5C | 0x7E..=0xFF => Decoded::Error,
        _ => Decoded::Char(char::from(b)),
    }
}

/// Pairs bytes into UTF-16 code units and code units into scalar values.
#[derive(Debug, Clone, Default)]
struct CodeUnitAppender {
    surrogate: Option<u16>,
    last_byte: Option<u8>,
}

impl CodeUnitAppender {
    fn reset(&mut self) {
        self.surrogate = None;
        self.last_byte = None;
    }

    fn append_byte(&mut self, value: u8, state: &mut DecoderState) {
        match self.last_byte.take() {
            Some(hi) => self.append_code_unit(u16::from_be_bytes([hi, value]), state),
            None => self.last_byte = Some(value),
        }
    }

    /// Mark the run as ending inside a byte.
    fn append_incomplete_byte(&mut self) {
        self.last_byte = Some(0);
    }

    fn append_code_unit(&mut self, unit: u16, state: &mut DecoderState) {
        let is_high = unit & 0xFC00 == 0xD800;
        let is_low = unit & 0xFC00 == 0xDC00;
        match self.surrogate.take() {
            Some(high) if is_low => {
                let cp =
                    0x10000 + (u32::from(unit) - 0xDC00) + ((u32::from(high) - 0xD800) << 10);
                state.append_char(char::from_u32(cp).map_or(Decoded::Error, Decoded::Char));
            }
            Some(_) if is_high => {
                state.append_char(Decoded::Error);
                self.surrogate = Some(unit);
            }
            Some(_) => {
                state.append_char(Decoded::Error);
                state.append_char(Self::unit_char(unit));
            }
            None if is_low => state.append_char(Decoded::Error),
            None if is_high => self.surrogate = Some(unit),
            None => state.append_char(Self::unit_char(unit)),
        }
    }

    fn unit_char(unit: u16) -> Decoded {
        char::from_u32(u32::from(unit)).map_or(Decoded::Error, Decoded::Char)
    }

    /// Report anything left over at the end of a run, then reset.
    fn finalize_and_reset(&mut self, state: &mut DecoderState) {
        if self.surrogate.is_some() {
            state.append_char(Decoded::Error);
        }
        if self.last_byte.is_some() {
            state.append_char(Decoded::Error);
        }
        self.reset();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Direct,
    RunStart,
    Run,
}

/// UTF-7 decoder.
#[derive(Debug, Clone)]
pub struct Utf7Decoder {
    state: DecoderState,
    appender: CodeUnitAppender,
    mode: Mode,
    bits: u32,
    count: u8,
}

impl Default for Utf7Decoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Utf7Decoder {
    /// Create a decoder at the start of a stream.
    pub fn new() -> Self {
        Self {
            state: DecoderState::new(),
            appender: CodeUnitAppender::default(),
            mode: Mode::Direct,
            bits: 0,
            count: 0,
        }
    }

    fn push_sextet(&mut self, value: u32) {
        self.bits = (self.bits << 6) | value;
        self.count += 1;
    }

    /// Flush the partial group when a run ends.
    fn end_run(&mut self) {
        match self.count {
            1 => self.appender.append_incomplete_byte(),
            2 => {
                let bits = self.bits << 12;
                self.appender.append_byte((bits >> 16) as u8, &mut self.state);
                if bits & 0xFFFF != 0 {
                    self.appender.append_incomplete_byte();
                }
            }
            3 => {
                let bits = self.bits << 6;
                self.appender.append_byte((bits >> 16) as u8, &mut self.state);
                self.appender.append_byte((bits >> 8) as u8, &mut self.state);
                if bits & 0xFF != 0 {
                    self.appender.append_incomplete_byte();
                }
            }
            _ => {}
        }
        self.appender.finalize_and_reset(&mut self.state);
        self.bits = 0;
        self.count = 0;
    }
}

impl Decoder for Utf7Decoder {
    fn read_char(&mut self, input: &mut dyn ByteSource) -> Decoded {
        loop {
            let pending = self.state.get_char();
            if pending != Decoded::End {
                return pending;
            }

            let b = self.state.read_input_byte(input);
            match self.mode {
                Mode::Direct => match b {
                    None => return Decoded::End,
                    Some(b'+') => {
                        self.mode = Mode::RunStart;
                        self.bits = 0;
                        self.count = 0;
                        self.appender.reset();
                    }
                    Some(b) => return direct_char(b),
                },
                Mode::RunStart => {
                    self.mode = Mode::Direct;
                    match b {
                        None => return Decoded::Error,
                        Some(b'-') => return Decoded::Char('+'),
                        Some(b) if b >= 0x80 => {
                            // One error for the lone '+', one for the byte
                            self.state.append_char(Decoded::Error);
                            self.state.append_char(Decoded::Error);
                        }
                        Some(b) => match alphabet_value(b) {
                            Some(v) => {
                                self.mode = Mode::Run;
                                self.push_sextet(v);
                            }
                            None => {
                                self.state.append_char(Decoded::Error);
                                self.state.append_char(direct_char(b));
                            }
                        },
                    }
                }
                Mode::Run => match b.and_then(alphabet_value) {
                    Some(v) => {
                        self.push_sextet(v);
                        if self.count == 4 {
                            let bits = self.bits;
                            self.appender.append_byte((bits >> 16) as u8, &mut self.state);
                            self.appender.append_byte((bits >> 8) as u8, &mut self.state);
                            self.appender.append_byte(bits as u8, &mut self.state);
                            self.bits = 0;
                            self.count = 0;
                        }
                    }
                    None => {
                        self.mode = Mode::Direct;
                        self.end_run();
                        match b {
                            None => return self.state.get_char(),
                            // A '-' closing the run is absorbed
                            Some(b'-') => {}
                            Some(b) => self.state.append_char(direct_char(b)),
                        }
                    }
                },
            }
        }
    }
}

/// UTF-7 encoder.
///
/// Every character outside the directly encoded set becomes its own
/// `+...-` run. Holds no per-stream state; one instance may serve any number
/// of streams.
#[derive(Debug, Clone, Copy, Default)]
pub struct Utf7Encoder;

impl Utf7Encoder {
    /// Create an encoder.
    pub fn new() -> Self {
        Self
    }
}

fn is_direct(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r') || (c >= ' ' && c < '\u{7E}' && c != '\\')
}

impl Encoder for Utf7Encoder {
    fn encode(&mut self, c: Option<char>, output: &mut dyn ByteSink) -> Encoded {
        let Some(c) = c else {
            return Encoded::Finished;
        };
        if c == '+' {
            output.write_bytes(b"+-");
            return Encoded::Written(2);
        }
        if is_direct(c) {
            output.write_byte(c as u8);
            return Encoded::Written(1);
        }

        let mut units = [0u16; 2];
        let mut bytes = [0u8; 4];
        let mut len = 0;
        for unit in c.encode_utf16(&mut units).iter() {
            bytes[len..len + 2].copy_from_slice(&unit.to_be_bytes());
            len += 2;
        }

        let mut run = [0u8; 8];
        let mut n = 0;
        run[n] = b'+';
        n += 1;
        // Zero-padded groups of six bits, most significant first
        let total_bits = len * 8;
        let mut bit = 0;
        while bit < total_bits {
            let mut sextet = 0u8;
            for i in 0..6 {
                let pos = bit + i;
                let set = pos < total_bits && bytes[pos / 8] & (0x80 >> (pos % 8)) != 0;
                sextet = (sextet << 1) | u8::from(set);
            }
            run[n] = BASE64[usize::from(sextet)];
            n += 1;
            bit += 6;
        }
        run[n] = b'-';
        n += 1;
        output.write_bytes(&run[..n]);
        Encoded::Written(n)
    }
}
