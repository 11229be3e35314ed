//! Round-trip and cross-check tests for the single-byte code pages.

use oxitext_core::{Decoded, Decoder, Encoded, Encoder, SliceSource};
use oxitext_sbcs::{CodePage, SingleByteDecoder, SingleByteEncoder};

#[test]
fn test_every_page_round_trips_its_bytes() {
    let bytes: Vec<u8> = (0..=255).collect();
    for page in CodePage::ALL {
        let mut dec = SingleByteDecoder::new(page);
        let mut enc = SingleByteEncoder::new(page);
        let mut src = SliceSource::new(&bytes);
        for expected in 0..=255u8 {
            match dec.read_char(&mut src) {
                Decoded::Char(c) => {
                    let mut out = Vec::new();
                    assert_eq!(enc.encode(Some(c), &mut out), Encoded::Written(1));
                    assert_eq!(out, vec![expected], "{} byte {expected:#04x}", page.name());
                }
                Decoded::Error => {
                    assert!(expected >= 0x80, "{} rejects ASCII", page.name());
                }
                Decoded::End => panic!("{} ended early", page.name()),
            }
        }
        assert_eq!(dec.read_char(&mut src), Decoded::End);
    }
}

#[test]
fn test_pages_match_encoding_rs() {
    let bytes: Vec<u8> = (0..=255).collect();
    for page in CodePage::ALL {
        let oracle = encoding_rs::Encoding::for_label(page.name().as_bytes())
            .unwrap_or_else(|| panic!("encoding_rs lacks {}", page.name()));
        let (expected, _) = oracle.decode_without_bom_handling(&bytes);
        let ours = SingleByteDecoder::new(page).decode_all(&mut SliceSource::new(&bytes));
        assert_eq!(ours, expected, "{}", page.name());
    }
}

#[test]
fn test_unmapped_counts() {
    let unmapped = |page: CodePage| page.table().iter().filter(|e| e.is_none()).count();
    assert_eq!(unmapped(CodePage::Windows1252), 0);
    assert_eq!(unmapped(CodePage::Iso8859_3), 7);
    assert_eq!(unmapped(CodePage::Iso8859_6), 45);
    assert_eq!(unmapped(CodePage::Iso8859_7), 3);
    assert_eq!(unmapped(CodePage::Iso8859_8), 36);
    assert_eq!(unmapped(CodePage::Windows874), 8);
}
