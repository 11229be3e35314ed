//! Round-trip and cross-check tests for the multi-byte codecs.

use oxitext_cjk::{
    Big5Decoder, Big5Encoder, EucJpDecoder, EucJpEncoder, EucKrDecoder, EucKrEncoder,
    Gb18030Decoder, Gb18030Encoder, Iso2022JpDecoder, Iso2022JpEncoder, ShiftJisDecoder,
    ShiftJisEncoder, gb18030_encode_only,
};
use oxitext_core::{Decoder, Encoded, Encoder, SliceSource, StrSource};

/// Code points the Japanese encoders write as a different character.
const JAPANESE_FOLDED: [char; 3] = ['\u{A5}', '\u{203E}', '\u{2212}'];

/// Random data - varied byte values
fn random(size: usize, mut seed: u64) -> Vec<u8> {
    let mut data = Vec::with_capacity(size);
    for _ in 0..size {
        // Linear congruential generator
        seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
        data.push((seed >> 32) as u8);
    }
    data
}

fn scalars() -> impl Iterator<Item = char> {
    (0..=0x10FFFF).filter_map(char::from_u32)
}

/// Encode every scalar value on its own; whatever is encodable must decode
/// back to itself. Returns the number of encodable scalar values.
fn round_trip<E, D>(
    name: &str,
    new_encoder: impl Fn() -> E,
    new_decoder: impl Fn() -> D,
    skip: impl Fn(char) -> bool,
) -> usize
where
    E: Encoder,
    D: Decoder,
{
    let mut encodable = 0;
    for c in scalars().filter(|&c| !skip(c)) {
        let mut enc = new_encoder();
        let mut bytes = Vec::new();
        match enc.encode(Some(c), &mut bytes) {
            Encoded::Written(n) => assert!(n > 0, "{name}: empty output for {c:?}"),
            Encoded::Unmappable => continue,
            Encoded::Finished => panic!("{name}: finished on input"),
        }
        while enc.encode(None, &mut bytes) != Encoded::Finished {}
        let text = new_decoder().decode_all(&mut SliceSource::new(&bytes));
        assert_eq!(text, c.to_string(), "{name}: U+{:04X} as {bytes:02X?}", u32::from(c));
        encodable += 1;
    }
    encodable
}

#[test]
fn test_shift_jis_round_trip() {
    let n = round_trip(
        "shift_jis",
        ShiftJisEncoder::new,
        ShiftJisDecoder::new,
        |c| JAPANESE_FOLDED.contains(&c),
    );
    assert!(n > 7000, "{n}");
}

#[test]
fn test_euc_jp_round_trip() {
    let n = round_trip("euc-jp", EucJpEncoder::new, EucJpDecoder::new, |c| {
        JAPANESE_FOLDED.contains(&c)
    });
    assert!(n > 7000, "{n}");
}

#[test]
fn test_iso_2022_jp_round_trip() {
    let n = round_trip(
        "iso-2022-jp",
        Iso2022JpEncoder::new,
        Iso2022JpDecoder::new,
        |c| JAPANESE_FOLDED.contains(&c) || ('\u{FF61}'..='\u{FF9F}').contains(&c),
    );
    assert!(n > 6000, "{n}");
}

#[test]
fn test_euc_kr_round_trip() {
    let n = round_trip("euc-kr", EucKrEncoder::new, EucKrDecoder::new, |_| false);
    assert!(n > 17000, "{n}");
}

#[test]
fn test_big5_round_trip() {
    let n = round_trip("big5", Big5Encoder::new, Big5Decoder::new, |_| false);
    assert!(n > 13000, "{n}");
}

#[test]
fn test_gbk_round_trip() {
    let pua: Vec<char> = gb18030_encode_only().collect();
    let n = round_trip("gbk", Gb18030Encoder::gbk, Gb18030Decoder::new, |c| {
        pua.contains(&c)
    });
    assert!(n > 21000, "{n}");
}

#[test]
fn test_gb18030_round_trip() {
    let pua: Vec<char> = gb18030_encode_only().collect();
    let n = round_trip("gb18030", Gb18030Encoder::new, Gb18030Decoder::new, |c| {
        pua.contains(&c)
    });
    // Everything except U+E5E5 and the surrogates
    assert_eq!(n, 0x110000 - 0x800 - 1 - pua.len());
}

#[test]
fn test_decoders_match_encoding_rs_on_noise() {
    let cases: [(&encoding_rs::Encoding, fn() -> Box<dyn Decoder>); 5] = [
        (encoding_rs::SHIFT_JIS, || Box::new(ShiftJisDecoder::new())),
        (encoding_rs::EUC_JP, || Box::new(EucJpDecoder::new())),
        (encoding_rs::EUC_KR, || Box::new(EucKrDecoder::new())),
        (encoding_rs::BIG5, || Box::new(Big5Decoder::new())),
        (encoding_rs::GB18030, || Box::new(Gb18030Decoder::new())),
    ];
    for (seed, (oracle, new_decoder)) in cases.into_iter().enumerate() {
        let data = random(32 * 1024, 0x5EED_0000 + seed as u64);
        let (expected, _) = oracle.decode_without_bom_handling(&data);
        let ours = new_decoder().decode_all(&mut SliceSource::new(&data));
        assert_eq!(ours, expected, "{}", oracle.name());
    }
}

#[test]
fn test_decoders_match_encoding_rs_on_text() {
    // Valid text with ASCII interleaved, written by encoding_rs itself
    let text: String = "日本語のテキスト，한국어 텍스트，中文文本，繁體中文。ABC 123\n".repeat(16);
    let cases: [(&encoding_rs::Encoding, fn() -> Box<dyn Decoder>); 4] = [
        (encoding_rs::SHIFT_JIS, || Box::new(ShiftJisDecoder::new())),
        (encoding_rs::EUC_JP, || Box::new(EucJpDecoder::new())),
        (encoding_rs::ISO_2022_JP, || Box::new(Iso2022JpDecoder::new())),
        (encoding_rs::GB18030, || Box::new(Gb18030Decoder::new())),
    ];
    for (oracle, new_decoder) in cases {
        let (bytes, _, _) = oracle.encode(&text);
        let (expected, _) = oracle.decode_without_bom_handling(&bytes);
        let ours = new_decoder().decode_all(&mut SliceSource::new(&bytes));
        assert_eq!(ours, expected, "{}", oracle.name());
    }
}

#[test]
fn test_encoders_match_encoding_rs() {
    let text = "漢字かなカナ 한글 简体 繁體 €½§ ABC";
    let cases: [(&encoding_rs::Encoding, fn() -> Box<dyn Encoder>); 6] = [
        (encoding_rs::SHIFT_JIS, || Box::new(ShiftJisEncoder::new())),
        (encoding_rs::EUC_JP, || Box::new(EucJpEncoder::new())),
        (encoding_rs::ISO_2022_JP, || Box::new(Iso2022JpEncoder::new())),
        (encoding_rs::EUC_KR, || Box::new(EucKrEncoder::new())),
        (encoding_rs::BIG5, || Box::new(Big5Encoder::new())),
        (encoding_rs::GB18030, || Box::new(Gb18030Encoder::new())),
    ];
    for (oracle, new_encoder) in cases {
        for c in text.chars() {
            let s = c.to_string();
            let (expected, _, unmappable) = oracle.encode(&s);
            let mut ours = Vec::new();
            let mut enc = new_encoder();
            let result = enc.encode(Some(c), &mut ours);
            while enc.encode(None, &mut ours) != Encoded::Finished {}
            if unmappable {
                assert_eq!(result, Encoded::Unmappable, "{} {c:?}", oracle.name());
            } else {
                assert_eq!(ours, expected.as_ref(), "{} {c:?}", oracle.name());
            }
        }
    }
}

#[test]
fn test_shift_jis_gonk_vector() {
    let bytes: &[u8] = &[
        0x82, 0x58, 0x33, 0x41, 0x61, 0x33, 0x82, 0x60, 0x82, 0x81, 0x33, 0xB1, 0xAF, 0x33, 0x83,
        0x41, 0x83, 0x96, 0x33, 0x82, 0xA0, 0x33, 0x93, 0xFA, 0x33, 0x3A, 0x3C, 0x33, 0x81, 0x80,
        0x81, 0x8E, 0x33, 0x31, 0x82, 0x51, 0x41, 0x61, 0x82, 0x51, 0x82, 0x60, 0x82, 0x81, 0x82,
        0x51, 0xB1, 0xAF, 0x82, 0x51, 0x83, 0x41, 0x83, 0x96, 0x82, 0x51, 0x82, 0xA0, 0x82, 0x51,
        0x93, 0xFA, 0x82, 0x51, 0x3A, 0x3C, 0x82, 0x51, 0x81, 0x80, 0x81, 0x8E, 0x82, 0x51,
    ];
    let expected = "\u{FF19}3Aa3\u{FF21}\u{FF41}3\u{FF71}\u{FF6F}3\u{30A2}\u{30F6}3\u{3042}3\
                    \u{65E5}3:<3\u{F7}\u{2103}31\u{FF12}Aa\u{FF12}\u{FF21}\u{FF41}\u{FF12}\
                    \u{FF71}\u{FF6F}\u{FF12}\u{30A2}\u{30F6}\u{FF12}\u{3042}\u{FF12}\u{65E5}\
                    \u{FF12}:<\u{FF12}\u{F7}\u{2103}\u{FF12}";
    let text = ShiftJisDecoder::new().decode_all(&mut SliceSource::new(bytes));
    assert_eq!(text, expected);
}

#[test]
fn test_iso_2022_jp_text_round_trip() {
    let text = "ASCII then 日本語 then ¥‾ then ｶﾀｶﾅ and back";
    let mut bytes = Vec::new();
    Iso2022JpEncoder::new().encode_all(&mut StrSource::new(text), &mut bytes, b'?');
    assert!(bytes.ends_with(b"back"));
    assert!(bytes.iter().all(u8::is_ascii));
    let decoded = Iso2022JpDecoder::new().decode_all(&mut SliceSource::new(&bytes));
    assert_eq!(decoded, "ASCII then 日本語 then ¥‾ then カタカナ and back");
}
