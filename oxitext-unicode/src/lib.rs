//! # OxiText Unicode
//!
//! Decoders and encoders for the Unicode transformation formats:
//!
//! - [`Utf8Decoder`] / [`Utf8Encoder`]
//! - [`Utf16Decoder`] / [`Utf16Encoder`], little- or big-endian
//! - [`Utf7Decoder`] / [`Utf7Encoder`] (RFC 2152)
//!
//! None of the decoders skip a byte-order mark; that is the job of the
//! BOM-sniffing layer in the `oxitext` crate. U+FEFF at the start of the
//! input decodes like any other character.
//!
//! ## Example
//!
//! ```rust
//! use oxitext_core::{Decoder, SliceSource};
//! use oxitext_unicode::Utf16Decoder;
//!
//! let mut src = SliceSource::new(&[0x3D, 0xD8, 0x00, 0xDE]);
//! let text = Utf16Decoder::le().decode_all(&mut src);
//! assert_eq!(text, "\u{1F600}");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

mod utf16;
mod utf7;
mod utf8;

pub use utf7::{Utf7Decoder, Utf7Encoder};
pub use utf8::{Utf8Decoder, Utf8Encoder};
pub use utf16::{Utf16Decoder, Utf16Encoder};
