//! Command implementations for OxiText CLI.

pub mod convert;
pub mod labels;
pub mod resolve;

pub use convert::{ConvertOptions, cmd_convert};
pub use labels::cmd_labels;
pub use resolve::cmd_resolve;
