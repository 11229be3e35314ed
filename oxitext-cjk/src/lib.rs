//! # OxiText CJK
//!
//! Multi-byte Chinese, Japanese and Korean encodings for the OxiText
//! transcoding engine:
//!
//! | Encoding     | Decoder                 | Encoder                              |
//! |--------------|-------------------------|--------------------------------------|
//! | Shift_JIS    | [`ShiftJisDecoder`]     | [`ShiftJisEncoder`]                  |
//! | EUC-JP       | [`EucJpDecoder`]        | [`EucJpEncoder`]                     |
//! | ISO-2022-JP  | [`Iso2022JpDecoder`]    | [`Iso2022JpEncoder`]                 |
//! | EUC-KR       | [`EucKrDecoder`]        | [`EucKrEncoder`]                     |
//! | Big5         | [`Big5Decoder`]         | [`Big5Encoder`]                      |
//! | GBK          | [`Gb18030Decoder`]      | [`Gb18030Encoder::gbk`]              |
//! | GB18030      | [`Gb18030Decoder`]      | [`Gb18030Encoder::new`]              |
//!
//! Decoders carry per-stream state (lead bytes, escape modes) and must not
//! be shared between streams. All encoders except ISO-2022-JP are stateless.
//!
//! The pointer indexes are built lazily the first time a codec touches
//! them.
//!
//! ## Example
//!
//! ```rust
//! use oxitext_cjk::{ShiftJisDecoder, ShiftJisEncoder};
//! use oxitext_core::{Decoder, Encoder, SliceSource, StrSource};
//!
//! let text = ShiftJisDecoder::new().decode_all(&mut SliceSource::new(b"\x93\xFA\x96\x7B"));
//! assert_eq!(text, "日本");
//!
//! let mut bytes = Vec::new();
//! ShiftJisEncoder::new().encode_all(&mut StrSource::new(&text), &mut bytes, b'?');
//! assert_eq!(bytes, b"\x93\xFA\x96\x7B");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

mod big5;
mod euc_jp;
mod euc_kr;
mod gb18030;
mod index;
mod iso_2022_jp;
mod ranges;
mod shift_jis;

pub use big5::{Big5Decoder, Big5Encoder};
pub use euc_jp::{EucJpDecoder, EucJpEncoder};
pub use euc_kr::{EucKrDecoder, EucKrEncoder};
pub use gb18030::{Gb18030Decoder, Gb18030Encoder};
pub use index::gb18030_encode_only;
pub use iso_2022_jp::{Iso2022JpDecoder, Iso2022JpEncoder};
pub use shift_jis::{ShiftJisDecoder, ShiftJisEncoder};
