//! # OxiText
//!
//! A Pure Rust text transcoding engine following the WHATWG Encoding
//! Standard.
//!
//! This crate is the facade over the codec crates:
//!
//! - [`Encoding`]: registry handles, looked up by label with
//!   [`Encoding::lookup`] or [`get_encoding`]
//! - [`resolve_alias`] / [`resolve_alias_for_email`]: label resolution under
//!   the web and email profiles
//! - [`decode_input_skip_bom`] and [`encode_with_fallback`]: the standard's
//!   "decode" and "encode" algorithms
//! - [`decode_to_string`], [`encode_to_bytes`] and friends: whole-buffer
//!   conversions, lenient or strict
//! - [`transcode`]: streaming conversion between `Read` and `Write`
//!
//! ## Example
//!
//! ```rust
//! use oxitext::{EncodeFallback, Encoding, decode_to_string, encode_to_bytes_with};
//!
//! let sjis = Encoding::for_label("Shift_JIS").unwrap();
//! assert_eq!(decode_to_string(sjis, b"\x82\xA0"), "\u{3042}");
//!
//! let ascii = Encoding::lookup("us-ascii", oxitext::LookupOptions::EMAIL).unwrap();
//! let bytes = encode_to_bytes_with("\u{3042}!", ascii, EncodeFallback::NumericReference);
//! assert_eq!(bytes, b"&#12354;!");
//! ```
//!
//! ## Logging
//!
//! Lookups that fail and byte order marks that override the caller's
//! encoding are reported as `tracing` debug events; numeric character
//! reference fallbacks as trace events. Nothing is logged per character
//! otherwise.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

mod algorithms;
mod alias;
mod convert;
mod input;
mod labels;
mod registry;
mod replacement;

pub use algorithms::{
    BomSniffingDecoder, NcrFallbackEncoder, encode_with_fallback, utf8_decode,
    utf8_decode_without_bom, utf8_encode,
};
pub use alias::{labels, normalize, resolve_alias, resolve_alias_for_email};
pub use convert::{
    ConvertStats, EncodeFallback, TranscodeOptions, decode_strict, decode_to_string,
    encode_strict, encode_to_bytes, encode_to_bytes_with, encode_to_writer, transcode,
};
pub use input::{DecoderInput, decode_input, decode_input_skip_bom, input_to_string};
pub use registry::{Encoding, LookupOptions, Profile, get_encoding};
pub use replacement::ReplacementDecoder;

pub use oxitext_cjk::gb18030_encode_only;
pub use oxitext_core::{
    ByteSink, ByteSource, CodePointSource, Decoded, Decoder, Encoded, Encoder, ReaderSource,
    Result, SliceSource, StrSource, TextError, WriterSink,
};
pub use oxitext_sbcs::CodePage;
