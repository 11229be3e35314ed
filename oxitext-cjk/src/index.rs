//! Pointer indexes for the multi-byte codecs.
//!
//! A pointer is the position of a byte sequence in an encoding's lead/trail
//! grid. Every index maps pointers to code points and, for the encoders,
//! code points back to the first suitable pointer.
//!
//! The tables are not compiled in. Each one is built on first use by running
//! every pointer's byte sequence through `encoding_rs`, which carries the
//! same WHATWG index data, and is then kept for the life of the process.

use std::collections::HashMap;
use std::ops::RangeInclusive;
use std::sync::LazyLock;

/// Lead bytes per row: 0x81..=0x9F and 0xE0..=0xFC.
const SHIFT_JIS_LEN: usize = 60 * 188;

/// One 94 x 94 plane, as addressed by EUC-JP and ISO-2022-JP.
pub(crate) const JIS_PLANE: usize = 94 * 94;

const BIG5_LEN: usize = 126 * 157;
const GB18030_LEN: usize = 126 * 190;
const EUC_KR_LEN: usize = 126 * 190;

/// Shift_JIS pointers that decode to the Private Use Area.
pub(crate) const SHIFT_JIS_PUA: RangeInclusive<usize> = 8836..=10715;

/// JIS X 0208 rows the Shift_JIS encoder never emits (NEC-selected IBM
/// extensions, duplicated later in the table).
const SHIFT_JIS_SKIPPED: RangeInclusive<usize> = 8272..=8835;

/// Big5 pointers below this are HKSCS extensions that are decoded but never
/// produced by the encoder.
const BIG5_ENCODE_START: usize = (0xA1 - 0x81) * 157;

/// Big5 code points whose encoder pointer is the last one in the index
/// rather than the first.
const BIG5_PREFER_LAST: [char; 6] = [
    '\u{2550}', '\u{255E}', '\u{2561}', '\u{256A}', '\u{5341}', '\u{5345}',
];

/// A pointer index with its reverse mapping.
#[derive(Debug)]
pub(crate) struct Index {
    forward: Box<[Option<char>]>,
    reverse: HashMap<char, u16>,
}

impl Index {
    fn from_fn(len: usize, f: impl Fn(usize) -> Option<char>) -> Self {
        Self {
            forward: (0..len).map(f).collect(),
            reverse: HashMap::new(),
        }
    }

    /// Fill the reverse map from the pointers `encodable` accepts. The first
    /// pointer for a code point wins.
    fn with_reverse(mut self, encodable: impl Fn(usize) -> bool) -> Self {
        let mut reverse = HashMap::with_capacity(self.forward.len());
        for (pointer, entry) in self.forward.iter().enumerate() {
            if !encodable(pointer) {
                continue;
            }
            if let Some(c) = *entry {
                reverse.entry(c).or_insert(pointer as u16);
            }
        }
        self.reverse = reverse;
        self
    }

    /// Point the given code points at their last pointer instead.
    fn prefer_last(mut self, chars: &[char]) -> Self {
        for &c in chars {
            if let Some(pointer) = self.forward.iter().rposition(|&entry| entry == Some(c)) {
                self.reverse.insert(c, pointer as u16);
            }
        }
        self
    }

    /// Code point for `pointer`, if the pointer is mapped.
    pub(crate) fn code_point(&self, pointer: usize) -> Option<char> {
        self.forward.get(pointer).copied().flatten()
    }

    /// Encoder pointer for `c`, if it has one.
    pub(crate) fn pointer(&self, c: char) -> Option<usize> {
        self.reverse.get(&c).map(|&pointer| usize::from(pointer))
    }

    /// Number of mapped pointers.
    #[cfg(test)]
    pub(crate) fn mapped(&self) -> usize {
        self.forward.iter().filter(|entry| entry.is_some()).count()
    }
}

/// Decode `bytes` as exactly one scalar value, or nothing.
fn decode_single(encoding: &'static encoding_rs::Encoding, bytes: &[u8]) -> Option<char> {
    let text = encoding.decode_without_bom_handling_and_without_replacement(bytes)?;
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

fn jis0208() -> Index {
    Index::from_fn(SHIFT_JIS_LEN, |pointer| {
        if SHIFT_JIS_PUA.contains(&pointer) {
            return None;
        }
        let (lead, trail) = (pointer / 188, pointer % 188);
        let lead = lead + if lead < 0x1F { 0x81 } else { 0xC1 };
        let trail = trail + if trail < 0x3F { 0x40 } else { 0x41 };
        decode_single(encoding_rs::SHIFT_JIS, &[lead as u8, trail as u8])
    })
}

/// JIS X 0208, as used by EUC-JP and ISO-2022-JP.
pub(crate) static JIS0208: LazyLock<Index> =
    LazyLock::new(|| jis0208().with_reverse(|pointer| pointer < JIS_PLANE));

/// JIS X 0208 with the Shift_JIS encoder's pointer choice.
pub(crate) static JIS0208_SHIFT_JIS: LazyLock<Index> =
    LazyLock::new(|| jis0208().with_reverse(|pointer| !SHIFT_JIS_SKIPPED.contains(&pointer)));

/// JIS X 0212. Decode only.
pub(crate) static JIS0212: LazyLock<Index> = LazyLock::new(|| {
    Index::from_fn(JIS_PLANE, |pointer| {
        let lead = (pointer / 94 + 0xA1) as u8;
        let trail = (pointer % 94 + 0xA1) as u8;
        decode_single(encoding_rs::EUC_JP, &[0x8F, lead, trail])
    })
});

/// Big5, including the HKSCS extensions.
pub(crate) static BIG5: LazyLock<Index> = LazyLock::new(|| {
    Index::from_fn(BIG5_LEN, |pointer| {
        let lead = (pointer / 157 + 0x81) as u8;
        let trail = pointer % 157;
        let trail = (trail + if trail < 0x3F { 0x40 } else { 0x62 }) as u8;
        decode_single(encoding_rs::BIG5, &[lead, trail])
    })
    .with_reverse(|pointer| pointer >= BIG5_ENCODE_START)
    .prefer_last(&BIG5_PREFER_LAST)
});

/// The GB18030 two-byte index.
pub(crate) static GB18030: LazyLock<Index> = LazyLock::new(|| {
    Index::from_fn(GB18030_LEN, |pointer| {
        let lead = (pointer / 190 + 0x81) as u8;
        let trail = pointer % 190;
        let trail = (trail + if trail < 0x3F { 0x40 } else { 0x41 }) as u8;
        decode_single(encoding_rs::GB18030, &[lead, trail])
    })
    .with_reverse(|_| true)
});

/// KS X 1001 with the Unified Hangul Code extensions.
pub(crate) static EUC_KR: LazyLock<Index> = LazyLock::new(|| {
    Index::from_fn(EUC_KR_LEN, |pointer| {
        let lead = (pointer / 190 + 0x81) as u8;
        let trail = (pointer % 190 + 0x41) as u8;
        decode_single(encoding_rs::EUC_KR, &[lead, trail])
    })
    .with_reverse(|_| true)
});

/// Full-width counterparts of U+FF61..=U+FF9F, for ISO-2022-JP encoding.
static KATAKANA: [u16; 63] = [
    0x3002, 0x300C, 0x300D, 0x3001, 0x30FB, 0x30F2, 0x30A1, 0x30A3,
    0x30A5, 0x30A7, 0x30A9, 0x30E3, 0x30E5, 0x30E7, 0x30C3, 0x30FC,
    0x30A2, 0x30A4, 0x30A6, 0x30A8, 0x30AA, 0x30AB, 0x30AD, 0x30AF,
    0x30B1, 0x30B3, 0x30B5, 0x30B7, 0x30B9, 0x30BB, 0x30BD, 0x30BF,
    0x30C1, 0x30C4, 0x30C6, 0x30C8, 0x30CA, 0x30CB, 0x30CC, 0x30CD,
    0x30CE, 0x30CF, 0x30D2, 0x30D5, 0x30D8, 0x30DB, 0x30DE, 0x30DF,
    0x30E0, 0x30E1, 0x30E2, 0x30E4, 0x30E6, 0x30E8, 0x30E9, 0x30EA,
    0x30EB, 0x30EC, 0x30ED, 0x30EF, 0x30F3, 0x309B, 0x309C,
];

/// Widen half-width katakana; any other character is returned unchanged.
pub(crate) fn full_width_katakana(c: char) -> char {
    let offset = u32::from(c).wrapping_sub(0xFF61) as usize;
    KATAKANA
        .get(offset)
        .and_then(|&wide| char::from_u32(u32::from(wide)))
        .unwrap_or(c)
}

/// The Japanese encoders write U+2212 MINUS SIGN as the full-width hyphen-minus.
pub(crate) fn fold_minus(c: char) -> char {
    if c == '\u{2212}' { '\u{FF0D}' } else { c }
}

/// Private Use Area code points that GB18030-2022 moved to standard code
/// points. The encoders still write them at their old two-byte pointers.
static GB18030_PUA: [(char, u16); 18] = [
    ('\u{E78D}', 7182),
    ('\u{E78E}', 7183),
    ('\u{E78F}', 7184),
    ('\u{E790}', 7185),
    ('\u{E791}', 7186),
    ('\u{E792}', 7187),
    ('\u{E793}', 7188),
    ('\u{E794}', 7201),
    ('\u{E795}', 7202),
    ('\u{E796}', 7208),
    ('\u{E81E}', 23775),
    ('\u{E826}', 23783),
    ('\u{E82B}', 23788),
    ('\u{E82C}', 23789),
    ('\u{E832}', 23795),
    ('\u{E843}', 23812),
    ('\u{E854}', 23829),
    ('\u{E864}', 23845),
];

/// Encode-only two-byte pointer for one of the relocated PUA code points.
pub(crate) fn gb18030_pua_pointer(c: char) -> Option<usize> {
    GB18030_PUA
        .iter()
        .find(|&&(pua, _)| pua == c)
        .map(|&(_, pointer)| usize::from(pointer))
}

/// Every code point the GB18030 encoders write without a matching decode.
pub fn gb18030_encode_only() -> impl Iterator<Item = char> {
    GB18030_PUA.iter().map(|&(c, _)| c)
}
