#![doc = include_str!("../README.md")]

#[cfg(feature = "derive")]
pub use anycodec_derive::Bytes;

mod buffer;
mod codec;
mod error;
mod format;
pub mod probe;
mod variants;

pub use buffer::*;
pub use codec::*;
pub use error::*;
pub use format::*;
pub use probe::{ProbeFailure, TEXT_PLACEHOLDER};
pub use variants::*;
