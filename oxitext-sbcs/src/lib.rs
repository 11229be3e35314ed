//! # OxiText SBCS
//!
//! Single-byte character sets for the OxiText transcoding engine:
//!
//! - [`AsciiDecoder`] / [`AsciiEncoder`]: US-ASCII
//! - [`Latin1Decoder`] / [`Latin1Encoder`]: ISO-8859-1 as the identity mapping
//! - [`SingleByteDecoder`] / [`SingleByteEncoder`]: the 28 legacy
//!   [`CodePage`]s (windows-125x, iso-8859-x, koi8, ibm866, Mac pages)
//! - [`XUserDefinedDecoder`] / [`XUserDefinedEncoder`]: x-user-defined
//!
//! Every codec here is stateless and `Copy`: a single instance may be used
//! for any number of streams, from any number of threads.
//!
//! ## Example
//!
//! ```rust
//! use oxitext_core::{Decoder, SliceSource};
//! use oxitext_sbcs::{CodePage, SingleByteDecoder};
//!
//! let mut src = SliceSource::new(b"caf\xE9 \x80");
//! let text = SingleByteDecoder::new(CodePage::Windows1252).decode_all(&mut src);
//! assert_eq!(text, "caf\u{E9} \u{20AC}");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

mod ascii;
mod latin1;
mod single_byte;
mod tables;
mod x_user_defined;

pub use ascii::{AsciiDecoder, AsciiEncoder};
pub use latin1::{Latin1Decoder, Latin1Encoder};
pub use single_byte::{CodePage, SingleByteDecoder, SingleByteEncoder};
pub use x_user_defined::{XUserDefinedDecoder, XUserDefinedEncoder};
