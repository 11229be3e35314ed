//! Error types for OxiText operations.
//!
//! Codecs themselves never fail: malformed input and unmappable characters
//! are reported in-band through [`Decoded::Error`](crate::Decoded::Error)
//! and [`Encoded::Unmappable`](crate::Encoded::Unmappable). This error type
//! covers the boundary around them: unknown encoding labels, I/O on the
//! underlying byte streams, and the strict conversion helpers that turn an
//! in-band error into a hard failure.

use std::io;
use thiserror::Error;

/// The main error type for OxiText operations.
#[derive(Debug, Error)]
pub enum TextError {
    /// I/O error from an underlying reader/writer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The label does not name a supported encoding.
    #[error("Unknown encoding label: {label:?}")]
    UnknownEncoding {
        /// The label as given by the caller.
        label: String,
    },

    /// Strict decoding met a malformed byte sequence.
    #[error("Malformed input at code point offset {offset}")]
    Malformed {
        /// Number of code points successfully decoded before the error.
        offset: usize,
    },

    /// Strict encoding met a character the target encoding cannot represent.
    #[error("Cannot encode {ch:?} at position {position}")]
    Unmappable {
        /// The offending character.
        ch: char,
        /// Index of the character in the input, counted in code points.
        position: usize,
    },
}

/// Result type alias for OxiText operations.
pub type Result<T> = std::result::Result<T, TextError>;

impl TextError {
    /// Create an unknown encoding error.
    pub fn unknown_encoding(label: impl Into<String>) -> Self {
        Self::UnknownEncoding {
            label: label.into(),
        }
    }

    /// Create a malformed input error.
    pub fn malformed(offset: usize) -> Self {
        Self::Malformed { offset }
    }

    /// Create an unmappable character error.
    pub fn unmappable(ch: char, position: usize) -> Self {
        Self::Unmappable { ch, position }
    }
}
