//! The encoding registry.
//!
//! An [`Encoding`] is a small `Copy` handle naming one supported encoding.
//! It hands out fresh decoders and encoders; the handle itself carries no
//! stream state and may be shared freely.

use crate::alias::{normalize, resolve_alias, resolve_alias_for_email};
use crate::replacement::ReplacementDecoder;
use oxitext_cjk::{
    Big5Decoder, Big5Encoder, EucJpDecoder, EucJpEncoder, EucKrDecoder, EucKrEncoder,
    Gb18030Decoder, Gb18030Encoder, Iso2022JpDecoder, Iso2022JpEncoder, ShiftJisDecoder,
    ShiftJisEncoder,
};
use oxitext_core::{Decoder, Encoder};
use oxitext_sbcs::{
    AsciiDecoder, AsciiEncoder, CodePage, Latin1Decoder, Latin1Encoder, SingleByteDecoder,
    SingleByteEncoder, XUserDefinedDecoder, XUserDefinedEncoder,
};
use oxitext_unicode::{Utf7Decoder, Utf7Encoder, Utf8Decoder, Utf8Encoder, Utf16Decoder, Utf16Encoder};
use std::fmt;
use tracing::debug;

/// Which label table a lookup goes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Profile {
    /// The Encoding Standard's labels, as browsers use them.
    #[default]
    Web,
    /// MIME-oriented labels: distinct US-ASCII and ISO-8859-1, plus UTF-7.
    Email,
}

/// Options for [`Encoding::lookup`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LookupOptions {
    /// Label table to resolve through.
    pub profile: Profile,
    /// Whether the bare label `replacement` names the replacement encoding.
    pub allow_replacement: bool,
}

impl LookupOptions {
    /// Web profile, `replacement` not accepted as a label.
    pub const WEB: Self = Self {
        profile: Profile::Web,
        allow_replacement: false,
    };

    /// Email profile, `replacement` not accepted as a label.
    pub const EMAIL: Self = Self {
        profile: Profile::Email,
        allow_replacement: false,
    };

    /// Accept the bare label `replacement`.
    pub const fn with_replacement(mut self) -> Self {
        self.allow_replacement = true;
        self
    }
}

/// A supported encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Encoding {
    /// UTF-8.
    Utf8,
    /// UTF-16, little-endian.
    Utf16Le,
    /// UTF-16, big-endian.
    Utf16Be,
    /// UTF-7 (email profile only).
    Utf7,
    /// US-ASCII (email profile only).
    UsAscii,
    /// ISO-8859-1 as the identity mapping (email profile only).
    Latin1,
    /// A table-driven single-byte code page.
    SingleByte(CodePage),
    /// x-user-defined.
    XUserDefined,
    /// Shift_JIS.
    ShiftJis,
    /// EUC-JP.
    EucJp,
    /// ISO-2022-JP.
    Iso2022Jp,
    /// EUC-KR.
    EucKr,
    /// Big5.
    Big5,
    /// GBK.
    Gbk,
    /// GB18030.
    Gb18030,
    /// The replacement encoding: any input decodes to a single error.
    Replacement,
}

const FIXED: [Encoding; 15] = [
    Encoding::Utf8,
    Encoding::Utf16Le,
    Encoding::Utf16Be,
    Encoding::Utf7,
    Encoding::UsAscii,
    Encoding::Latin1,
    Encoding::XUserDefined,
    Encoding::ShiftJis,
    Encoding::EucJp,
    Encoding::Iso2022Jp,
    Encoding::EucKr,
    Encoding::Big5,
    Encoding::Gbk,
    Encoding::Gb18030,
    Encoding::Replacement,
];

impl Encoding {
    /// The canonical (lowercase) name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Utf8 => "utf-8",
            Self::Utf16Le => "utf-16le",
            Self::Utf16Be => "utf-16be",
            Self::Utf7 => "utf-7",
            Self::UsAscii => "us-ascii",
            Self::Latin1 => "iso-8859-1",
            Self::SingleByte(page) => page.name(),
            Self::XUserDefined => "x-user-defined",
            Self::ShiftJis => "shift_jis",
            Self::EucJp => "euc-jp",
            Self::Iso2022Jp => "iso-2022-jp",
            Self::EucKr => "euc-kr",
            Self::Big5 => "big5",
            Self::Gbk => "gbk",
            Self::Gb18030 => "gb18030",
            Self::Replacement => "replacement",
        }
    }

    /// Look up an encoding by canonical name (no alias resolution).
    pub fn from_canonical(name: &str) -> Option<Self> {
        FIXED
            .into_iter()
            .find(|enc| enc.name() == name)
            .or_else(|| CodePage::from_name(name).map(Self::SingleByte))
    }

    /// Every supported encoding, each once.
    pub fn all() -> impl Iterator<Item = Encoding> {
        FIXED
            .into_iter()
            .chain(CodePage::ALL.into_iter().map(Self::SingleByte))
    }

    /// Look up a label under the web profile.
    pub fn for_label(label: &str) -> Option<Self> {
        Self::lookup(label, LookupOptions::WEB)
    }

    /// Look up a label.
    ///
    /// Labels that resolve to `replacement` (such as `iso-2022-kr`) always
    /// yield [`Encoding::Replacement`]; the bare label `replacement` does so
    /// only when [`LookupOptions::allow_replacement`] is set.
    pub fn lookup(label: &str, options: LookupOptions) -> Option<Self> {
        if options.allow_replacement && normalize(label) == "replacement" {
            return Some(Self::Replacement);
        }
        let canonical = match options.profile {
            Profile::Web => resolve_alias(label).to_string(),
            Profile::Email => resolve_alias_for_email(label),
        };
        let found = Self::from_canonical(&canonical);
        if found.is_none() {
            debug!(label, profile = ?options.profile, "unknown encoding label");
        }
        found
    }

    /// Whether every character is encoded as exactly one byte.
    pub fn is_single_byte(self) -> bool {
        matches!(
            self,
            Self::UsAscii | Self::Latin1 | Self::SingleByte(_) | Self::XUserDefined
        )
    }

    /// Create a decoder for one stream.
    pub fn new_decoder(self) -> Box<dyn Decoder + Send> {
        match self {
            Self::Utf8 => Box::new(Utf8Decoder::new()),
            Self::Utf16Le => Box::new(Utf16Decoder::le()),
            Self::Utf16Be => Box::new(Utf16Decoder::be()),
            Self::Utf7 => Box::new(Utf7Decoder::new()),
            Self::UsAscii => Box::new(AsciiDecoder),
            Self::Latin1 => Box::new(Latin1Decoder),
            Self::SingleByte(page) => Box::new(SingleByteDecoder::new(page)),
            Self::XUserDefined => Box::new(XUserDefinedDecoder),
            Self::ShiftJis => Box::new(ShiftJisDecoder::new()),
            Self::EucJp => Box::new(EucJpDecoder::new()),
            Self::Iso2022Jp => Box::new(Iso2022JpDecoder::new()),
            Self::EucKr => Box::new(EucKrDecoder::new()),
            Self::Big5 => Box::new(Big5Decoder::new()),
            Self::Gbk | Self::Gb18030 => Box::new(Gb18030Decoder::new()),
            Self::Replacement => Box::new(ReplacementDecoder::new()),
        }
    }

    /// Create an encoder for one stream. The replacement encoding encodes
    /// as UTF-8.
    pub fn new_encoder(self) -> Box<dyn Encoder + Send> {
        match self {
            Self::Utf8 | Self::Replacement => Box::new(Utf8Encoder::new()),
            Self::Utf16Le => Box::new(Utf16Encoder::le()),
            Self::Utf16Be => Box::new(Utf16Encoder::be()),
            Self::Utf7 => Box::new(Utf7Encoder::new()),
            Self::UsAscii => Box::new(AsciiEncoder),
            Self::Latin1 => Box::new(Latin1Encoder),
            Self::SingleByte(page) => Box::new(SingleByteEncoder::new(page)),
            Self::XUserDefined => Box::new(XUserDefinedEncoder),
            Self::ShiftJis => Box::new(ShiftJisEncoder::new()),
            Self::EucJp => Box::new(EucJpEncoder::new()),
            Self::Iso2022Jp => Box::new(Iso2022JpEncoder::new()),
            Self::EucKr => Box::new(EucKrEncoder::new()),
            Self::Big5 => Box::new(Big5Encoder::new()),
            Self::Gbk => Box::new(Gb18030Encoder::gbk()),
            Self::Gb18030 => Box::new(Gb18030Encoder::new()),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Look up an encoding by label.
///
/// Returns `None` for empty or unknown labels.
///
/// ```rust
/// use oxitext::{Encoding, get_encoding};
///
/// assert_eq!(get_encoding("latin1", false, false), Some(Encoding::SingleByte(oxitext::CodePage::Windows1252)));
/// assert_eq!(get_encoding("latin1", true, false).map(|e| e.name()), Some("windows-1252"));
/// assert_eq!(get_encoding("iso-8859-1", true, false), Some(Encoding::Latin1));
/// assert_eq!(get_encoding("replacement", false, false), None);
/// assert_eq!(get_encoding("replacement", false, true), Some(Encoding::Replacement));
/// ```
pub fn get_encoding(name: &str, for_email: bool, allow_replacement: bool) -> Option<Encoding> {
    let options = LookupOptions {
        profile: if for_email {
            Profile::Email
        } else {
            Profile::Web
        },
        allow_replacement,
    };
    Encoding::lookup(name, options)
}
