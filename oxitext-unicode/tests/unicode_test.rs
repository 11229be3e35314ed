//! Round-trip and malformed-input tests for the Unicode codecs.

use oxitext_core::{Decoded, Decoder, Encoded, Encoder, SliceSource};
use oxitext_unicode::{
    Utf7Decoder, Utf7Encoder, Utf8Decoder, Utf8Encoder, Utf16Decoder, Utf16Encoder,
};

fn all_scalars() -> impl Iterator<Item = char> {
    (0..=0x10FFFFu32).filter_map(char::from_u32)
}

fn encode_all(enc: &mut dyn Encoder, chars: impl Iterator<Item = char>) -> Vec<u8> {
    let mut out = Vec::new();
    for c in chars {
        match enc.encode(Some(c), &mut out) {
            Encoded::Written(_) => {}
            other => panic!("cannot encode U+{:04X}: {other:?}", u32::from(c)),
        }
    }
    while enc.encode(None, &mut out) != Encoded::Finished {}
    out
}

fn decode_all(dec: &mut dyn Decoder, bytes: &[u8]) -> Vec<Decoded> {
    let mut src = SliceSource::new(bytes);
    let mut out = Vec::new();
    loop {
        match dec.read_char(&mut src) {
            Decoded::End => return out,
            d => out.push(d),
        }
    }
}

fn assert_round_trip(enc: &mut dyn Encoder, dec: &mut dyn Decoder) {
    let bytes = encode_all(enc, all_scalars());
    let decoded = decode_all(dec, &bytes);
    let expected: Vec<Decoded> = all_scalars().map(Decoded::Char).collect();
    assert_eq!(decoded.len(), expected.len());
    for (got, want) in decoded.iter().zip(expected.iter()) {
        assert_eq!(got, want);
    }
}

#[test]
fn test_utf8_round_trip() {
    assert_round_trip(&mut Utf8Encoder::new(), &mut Utf8Decoder::new());
}

#[test]
fn test_utf16le_round_trip() {
    assert_round_trip(&mut Utf16Encoder::le(), &mut Utf16Decoder::le());
}

#[test]
fn test_utf16be_round_trip() {
    assert_round_trip(&mut Utf16Encoder::be(), &mut Utf16Decoder::be());
}

#[test]
fn test_utf7_round_trip() {
    assert_round_trip(&mut Utf7Encoder::new(), &mut Utf7Decoder::new());
}

/// Byte sequences that are never valid UTF-8 at their first byte.
fn illegal_utf8_sequences() -> Vec<Vec<u8>> {
    let mut list = Vec::new();
    for i in 0x80..=0xFFu8 {
        if !(0xC2..=0xF4).contains(&i) {
            list.push(vec![i, 0x80]);
        }
        list.push(vec![i]);
    }
    for seq in [
        &[0xE0, 0xA0][..],
        &[0xE1, 0x80],
        &[0xEF, 0x80],
        &[0xF0, 0x90],
        &[0xF1, 0x80],
        &[0xF3, 0x80],
        &[0xF4, 0x80],
        &[0xF0, 0x90, 0x80],
        &[0xF1, 0x80, 0x80],
        &[0xF3, 0x80, 0x80],
        &[0xF4, 0x80, 0x80],
    ] {
        list.push(seq.to_vec());
    }
    for i in 0x00..=0xFFu8 {
        if !(0x80..=0xBF).contains(&i) {
            list.push(vec![0xC2, i]);
            list.push(vec![0xDF, i]);
            list.push(vec![0xE1, i, 0x80]);
            list.push(vec![0xEF, i, 0x80]);
            list.push(vec![0xF1, i, 0x80, 0x80]);
            list.push(vec![0xF3, i, 0x80, 0x80]);
            list.push(vec![0xE0, 0xA0, i]);
            list.push(vec![0xE1, 0x80, i]);
            list.push(vec![0xEF, 0x80, i]);
            list.push(vec![0xF0, 0x90, i, 0x80]);
            list.push(vec![0xF1, 0x80, i, 0x80]);
            list.push(vec![0xF3, 0x80, i, 0x80]);
            list.push(vec![0xF4, 0x80, i, 0x80]);
            list.push(vec![0xF0, 0x90, 0x80, i]);
            list.push(vec![0xF1, 0x80, 0x80, i]);
            list.push(vec![0xF3, 0x80, 0x80, i]);
            list.push(vec![0xF4, 0x80, 0x80, i]);
        }
        if !(0xA0..=0xBF).contains(&i) {
            list.push(vec![0xE0, i, 0x80]);
        }
        if !(0x90..=0xBF).contains(&i) {
            list.push(vec![0xF0, i, 0x80, 0x80]);
        }
        if !(0x80..=0x8F).contains(&i) {
            list.push(vec![0xF4, i, 0x80, 0x80]);
        }
    }
    list
}

#[test]
fn test_illegal_utf8_starts_with_replacement() {
    for seq in illegal_utf8_sequences() {
        let mut src = SliceSource::new(&seq);
        let text = Utf8Decoder::new().decode_all(&mut src);
        assert!(
            text.starts_with('\u{FFFD}'),
            "{seq:02X?} decoded to {text:?}"
        );
    }
}

/// Deterministic pseudo-random bytes biased towards UTF-8 and UTF-16 structure.
fn noisy_bytes(seed: u64, len: usize) -> Vec<u8> {
    const INTERESTING: [u8; 16] = [
        0x00, 0x41, 0x7F, 0x80, 0xBF, 0xC2, 0xDF, 0xE0, 0xED, 0xEF, 0xF0, 0xF4, 0xD8, 0xDC, 0xFE,
        0xFF,
    ];
    let mut state = seed;
    (0..len)
        .map(|_| {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
            let r = (state >> 33) as usize;
            if r % 3 == 0 {
                INTERESTING[(r >> 2) % INTERESTING.len()]
            } else {
                (r >> 8) as u8
            }
        })
        .collect()
}

#[test]
fn test_utf8_matches_encoding_rs() {
    for seed in 0..200 {
        let bytes = noisy_bytes(seed, 257);
        let ours = Utf8Decoder::new().decode_all(&mut SliceSource::new(&bytes));
        let (theirs, _) = encoding_rs::UTF_8.decode_without_bom_handling(&bytes);
        assert_eq!(ours, theirs, "seed {seed}");
    }
}

#[test]
fn test_utf16_matches_encoding_rs() {
    for seed in 0..200 {
        let bytes = noisy_bytes(seed, 257);
        let ours = Utf16Decoder::le().decode_all(&mut SliceSource::new(&bytes));
        let (theirs, _) = encoding_rs::UTF_16LE.decode_without_bom_handling(&bytes);
        assert_eq!(ours, theirs, "LE seed {seed}");

        let ours = Utf16Decoder::be().decode_all(&mut SliceSource::new(&bytes));
        let (theirs, _) = encoding_rs::UTF_16BE.decode_without_bom_handling(&bytes);
        assert_eq!(ours, theirs, "BE seed {seed}");
    }
}

#[test]
fn test_utf7_scenarios() {
    let cases: &[(&str, &str)] = &[
        ("\\", "\u{FFFD}"),
        ("~", "\u{FFFD}"),
        ("\u{1}", "\u{FFFD}"),
        ("\u{7F}", "\u{FFFD}"),
        (
            "\r\n\t '!\"#'(),$-%@[]^&=<>;*_`{}./:|?",
            "\r\n\t '!\"#'(),$-%@[]^&=<>;*_`{}./:|?",
        ),
        ("x+--", "x+-"),
        ("x+-y", "x+y"),
        // Illegal byte after plus
        ("+!", "\u{FFFD}!"),
        ("+\n", "\u{FFFD}\n"),
        ("+\u{7F}", "\u{FFFD}\u{FFFD}"),
        ("+", "\u{FFFD}"),
        // Incomplete byte
        ("+D?", "\u{FFFD}?"),
        ("+D\u{7F}", "\u{FFFD}\u{FFFD}"),
        ("+D", "\u{FFFD}"),
        // Only one UTF-16 byte
        ("+DE?", "\u{FFFD}?"),
        ("+DE", "\u{FFFD}"),
        ("+DE\u{7F}", "\u{FFFD}\u{FFFD}"),
        // UTF-16 code unit
        ("+DEE?", "\u{0C41}?"),
        ("+DEE", "\u{0C41}"),
        ("+DEE\u{7F}", "\u{0C41}\u{FFFD}"),
        // Redundant pad bit
        ("+DEF?", "\u{0C41}\u{FFFD}?"),
        ("+DEF", "\u{0C41}\u{FFFD}"),
        ("+DEF\u{7F}", "\u{0C41}\u{FFFD}\u{FFFD}"),
        // High surrogate code unit
        ("+2AA?", "\u{FFFD}?"),
        ("+2AA", "\u{FFFD}"),
        ("+2AA\u{7F}", "\u{FFFD}\u{FFFD}"),
        // Low surrogate code unit
        ("+3AA?", "\u{FFFD}?"),
        ("+3AA", "\u{FFFD}"),
        ("+3AA\u{7F}", "\u{FFFD}\u{FFFD}"),
        // Surrogate pair
        ("+2ADcAA-", "\u{10000}"),
        ("+2ADcAA?", "\u{10000}?"),
        ("+2ADcAA", "\u{10000}"),
        ("+2ADcAA\u{7F}", "\u{10000}\u{FFFD}"),
        // High surrogate followed by surrogate pair
        ("+2ADYANwA?", "\u{FFFD}\u{10000}?"),
        ("+2ADYANwA", "\u{FFFD}\u{10000}"),
        ("+2ADYANwA\u{7F}", "\u{FFFD}\u{10000}\u{FFFD}"),
        // High surrogate followed by non-surrogate
        ("+2AAAwA?", "\u{FFFD}\u{C0}?"),
        ("+2AAAwA", "\u{FFFD}\u{C0}"),
        ("+2AAAwA\u{7F}", "\u{FFFD}\u{C0}\u{FFFD}"),
        // Two UTF-16 code units
        ("+AMAA4A?", "\u{C0}\u{E0}?"),
        ("+AMAA4A", "\u{C0}\u{E0}"),
        ("+AMAA4A-Next", "\u{C0}\u{E0}Next"),
        ("+AMAA4A!Next", "\u{C0}\u{E0}!Next"),
        ("+AMAA4A\u{7F}", "\u{C0}\u{E0}\u{FFFD}"),
        // Two UTF-16 code units, redundant pad bit
        ("+AMAA4B?", "\u{C0}\u{E0}\u{FFFD}?"),
        ("+AMAA4B", "\u{C0}\u{E0}\u{FFFD}"),
        ("+AMAA4B-Next", "\u{C0}\u{E0}\u{FFFD}Next"),
        ("+AMAA4B!Next", "\u{C0}\u{E0}\u{FFFD}!Next"),
        ("+AMAA4B\u{7F}", "\u{C0}\u{E0}\u{FFFD}\u{FFFD}"),
    ];
    for (input, expected) in cases {
        let got = Utf7Decoder::new().decode_all(&mut SliceSource::new(input.as_bytes()));
        assert_eq!(&got, expected, "input {input:?}");
    }
}
