//! The replacement encoding.
//!
//! Labels for encodings that are unsafe to decode (ISO-2022-KR, HZ-GB-2312
//! and the like) resolve here. Every stream, even an empty one, decodes to
//! exactly one error; encoding uses UTF-8.

use oxitext_core::{ByteSource, Decoded, Decoder};

/// Decoder for the replacement encoding.
#[derive(Debug, Clone, Default)]
pub struct ReplacementDecoder {
    reported: bool,
}

impl ReplacementDecoder {
    /// Create a decoder at the start of a stream.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Decoder for ReplacementDecoder {
    fn read_char(&mut self, _input: &mut dyn ByteSource) -> Decoded {
        if self.reported {
            return Decoded::End;
        }
        self.reported = true;
        Decoded::Error
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxitext_core::SliceSource;

    #[test]
    fn test_one_error_then_end() {
        let mut dec = ReplacementDecoder::new();
        let mut src = SliceSource::new(&[0, 0, 0, 0]);
        assert_eq!(dec.read_char(&mut src).to_raw(), -2);
        assert_eq!(dec.read_char(&mut src).to_raw(), -1);
        assert_eq!(dec.read_char(&mut src), Decoded::End);
    }

    #[test]
    fn test_empty_input_still_errors() {
        let mut dec = ReplacementDecoder::new();
        let mut src = SliceSource::new(&[]);
        assert_eq!(dec.read_char(&mut src), Decoded::Error);
        assert_eq!(dec.read_char(&mut src), Decoded::End);
    }
}
