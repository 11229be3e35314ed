//! # OxiText Core
//!
//! Core components for the OxiText transcoding engine.
//!
//! This crate provides the building blocks every codec shares:
//!
//! - [`stream`]: Pull-based byte and code-point sources, byte sinks
//! - [`state`]: Push-back stack and pending-output queue for decoders
//! - [`traits`]: The [`Decoder`] and [`Encoder`] contracts
//! - [`error`]: Error types for the boundary layers
//!
//! ## Architecture
//!
//! OxiText is designed as a layered stack:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ L4: CLI                                                 │
//! │     oxitext convert / resolve / labels                  │
//! ├─────────────────────────────────────────────────────────┤
//! │ L3: Facade                                              │
//! │     Registry, aliases, BOM sniffing, fallback encode    │
//! ├─────────────────────────────────────────────────────────┤
//! │ L2: Codecs                                              │
//! │     UTF-8/16/7, single-byte pages, CJK multi-byte       │
//! ├─────────────────────────────────────────────────────────┤
//! │ L1: Streams (this crate)                                │
//! │     ByteSource/ByteSink, DecoderState, codec traits     │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use oxitext_core::{ByteSource, Decoded, DecoderState, SliceSource};
//!
//! let mut input = SliceSource::new(b"ab");
//! let mut state = DecoderState::new();
//!
//! // Read a byte, then give it back
//! let b = state.read_input_byte(&mut input).unwrap();
//! state.prepend_one(b);
//! assert_eq!(state.read_input_byte(&mut input), Some(b'a'));
//!
//! // Results travel on the same channel as the sentinels
//! assert_eq!(Decoded::Error.to_raw(), -2);
//! assert_eq!(Decoded::End.to_raw(), -1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod error;
pub mod state;
pub mod stream;
pub mod traits;

// Re-exports for convenience
pub use error::{Result, TextError};
pub use state::{DecoderState, StateSource};
pub use stream::{
    ByteSink, ByteSource, CodePointSource, ReaderSource, SliceSource, StrSource, WriterSink,
};
pub use traits::{Decoded, Decoder, END, ERROR, Encoded, Encoder};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{Result, TextError};
    pub use crate::state::DecoderState;
    pub use crate::stream::{ByteSink, ByteSource, CodePointSource, SliceSource, StrSource};
    pub use crate::traits::{Decoded, Decoder, Encoded, Encoder};
}
