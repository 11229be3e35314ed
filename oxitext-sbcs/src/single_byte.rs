//! Table-driven legacy single-byte code pages.
//!
//! Bytes 0x00..=0x7F are ASCII in every page. The upper half goes through a
//! 128-entry table per page; unassigned bytes decode to an error and nothing
//! encodes to them.

use crate::tables;
use oxitext_core::{ByteSink, ByteSource, Decoded, Decoder, Encoded, Encoder};

/// A legacy single-byte code page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum CodePage {
    Ibm866,
    Iso8859_2,
    Iso8859_3,
    Iso8859_4,
    Iso8859_5,
    Iso8859_6,
    Iso8859_7,
    Iso8859_8,
    Iso8859_8I,
    Iso8859_10,
    Iso8859_13,
    Iso8859_14,
    Iso8859_15,
    Iso8859_16,
    Koi8R,
    Koi8U,
    Macintosh,
    Windows874,
    Windows1250,
    Windows1251,
    Windows1252,
    Windows1253,
    Windows1254,
    Windows1255,
    Windows1256,
    Windows1257,
    Windows1258,
    XMacCyrillic,
}

impl CodePage {
    /// Every supported code page.
    pub const ALL: [CodePage; 28] = [
        CodePage::Ibm866,
        CodePage::Iso8859_2,
        CodePage::Iso8859_3,
        CodePage::Iso8859_4,
        CodePage::Iso8859_5,
        CodePage::Iso8859_6,
        CodePage::Iso8859_7,
        CodePage::Iso8859_8,
        CodePage::Iso8859_8I,
        CodePage::Iso8859_10,
        CodePage::Iso8859_13,
        CodePage::Iso8859_14,
        CodePage::Iso8859_15,
        CodePage::Iso8859_16,
        CodePage::Koi8R,
        CodePage::Koi8U,
        CodePage::Macintosh,
        CodePage::Windows874,
        CodePage::Windows1250,
        CodePage::Windows1251,
        CodePage::Windows1252,
        CodePage::Windows1253,
        CodePage::Windows1254,
        CodePage::Windows1255,
        CodePage::Windows1256,
        CodePage::Windows1257,
        CodePage::Windows1258,
        CodePage::XMacCyrillic,
    ];

    /// The canonical (lowercase) encoding name.
    pub fn name(self) -> &'static str {
        match self {
            CodePage::Ibm866 => "ibm866",
            CodePage::Iso8859_2 => "iso-8859-2",
            CodePage::Iso8859_3 => "iso-8859-3",
            CodePage::Iso8859_4 => "iso-8859-4",
            CodePage::Iso8859_5 => "iso-8859-5",
            CodePage::Iso8859_6 => "iso-8859-6",
            CodePage::Iso8859_7 => "iso-8859-7",
            CodePage::Iso8859_8 => "iso-8859-8",
            CodePage::Iso8859_8I => "iso-8859-8-i",
            CodePage::Iso8859_10 => "iso-8859-10",
            CodePage::Iso8859_13 => "iso-8859-13",
            CodePage::Iso8859_14 => "iso-8859-14",
            CodePage::Iso8859_15 => "iso-8859-15",
            CodePage::Iso8859_16 => "iso-8859-16",
            CodePage::Koi8R => "koi8-r",
            CodePage::Koi8U => "koi8-u",
            CodePage::Macintosh => "macintosh",
            CodePage::Windows874 => "windows-874",
            CodePage::Windows1250 => "windows-1250",
            CodePage::Windows1251 => "windows-1251",
            CodePage::Windows1252 => "windows-1252",
            CodePage::Windows1253 => "windows-1253",
            CodePage::Windows1254 => "windows-1254",
            CodePage::Windows1255 => "windows-1255",
            CodePage::Windows1256 => "windows-1256",
            CodePage::Windows1257 => "windows-1257",
            CodePage::Windows1258 => "windows-1258",
            CodePage::XMacCyrillic => "x-mac-cyrillic",
        }
    }

    /// Look up a code page by canonical name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|page| page.name() == name)
    }

    /// The upper-half table, indexed by `byte - 0x80`.
    pub fn table(self) -> &'static [Option<char>; 128] {
        match self {
            CodePage::Ibm866 => &tables::IBM866,
            CodePage::Iso8859_2 => &tables::ISO_8859_2,
            CodePage::Iso8859_3 => &tables::ISO_8859_3,
            CodePage::Iso8859_4 => &tables::ISO_8859_4,
            CodePage::Iso8859_5 => &tables::ISO_8859_5,
            CodePage::Iso8859_6 => &tables::ISO_8859_6,
            CodePage::Iso8859_7 => &tables::ISO_8859_7,
            // Visual and logical Hebrew differ only in how text is laid out
            CodePage::Iso8859_8 | CodePage::Iso8859_8I => &tables::ISO_8859_8,
            CodePage::Iso8859_10 => &tables::ISO_8859_10,
            CodePage::Iso8859_13 => &tables::ISO_8859_13,
            CodePage::Iso8859_14 => &tables::ISO_8859_14,
            CodePage::Iso8859_15 => &tables::ISO_8859_15,
            CodePage::Iso8859_16 => &tables::ISO_8859_16,
            CodePage::Koi8R => &tables::KOI8_R,
            CodePage::Koi8U => &tables::KOI8_U,
            CodePage::Macintosh => &tables::MACINTOSH,
            CodePage::Windows874 => &tables::WINDOWS_874,
            CodePage::Windows1250 => &tables::WINDOWS_1250,
            CodePage::Windows1251 => &tables::WINDOWS_1251,
            CodePage::Windows1252 => &tables::WINDOWS_1252,
            CodePage::Windows1253 => &tables::WINDOWS_1253,
            CodePage::Windows1254 => &tables::WINDOWS_1254,
            CodePage::Windows1255 => &tables::WINDOWS_1255,
            CodePage::Windows1256 => &tables::WINDOWS_1256,
            CodePage::Windows1257 => &tables::WINDOWS_1257,
            CodePage::Windows1258 => &tables::WINDOWS_1258,
            CodePage::XMacCyrillic => &tables::X_MAC_CYRILLIC,
        }
    }

    /// Decode a single byte.
    pub fn decode_byte(self, b: u8) -> Option<char> {
        if b.is_ascii() {
            return Some(char::from(b));
        }
        self.table()[usize::from(b - 0x80)]
    }

    /// Encode a single character.
    pub fn encode_char(self, c: char) -> Option<u8> {
        if c.is_ascii() {
            return Some(c as u8);
        }
        self.table()
            .iter()
            .position(|&entry| entry == Some(c))
            .map(|i| 0x80 + i as u8)
    }
}

/// Decoder for a [`CodePage`].
///
/// Holds no per-stream state; one instance may serve any number of streams.
#[derive(Debug, Clone, Copy)]
pub struct SingleByteDecoder {
    page: CodePage,
}

impl SingleByteDecoder {
    /// Create a decoder for `page`.
    pub fn new(page: CodePage) -> Self {
        Self { page }
    }
}

impl Decoder for SingleByteDecoder {
    fn read_char(&mut self, input: &mut dyn ByteSource) -> Decoded {
        match input.read_byte() {
            None => Decoded::End,
            Some(b) => self.page.decode_byte(b).map_or(Decoded::Error, Decoded::Char),
        }
    }
}

/// Encoder for a [`CodePage`].
///
/// Holds no per-stream state; one instance may serve any number of streams.
#[derive(Debug, Clone, Copy)]
pub struct SingleByteEncoder {
    page: CodePage,
}

impl SingleByteEncoder {
    /// Create an encoder for `page`.
    pub fn new(page: CodePage) -> Self {
        Self { page }
    }
}

impl Encoder for SingleByteEncoder {
    fn encode(&mut self, c: Option<char>, output: &mut dyn ByteSink) -> Encoded {
        let Some(c) = c else {
            return Encoded::Finished;
        };
        match self.page.encode_char(c) {
            Some(b) => {
                output.write_byte(b);
                Encoded::Written(1)
            }
            None => Encoded::Unmappable,
        }
    }
}
