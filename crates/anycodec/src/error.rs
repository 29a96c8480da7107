use std::{io, result};

use thiserror::Error;

pub type Result<T, E = Error> = result::Result<T, E>;

/// Any failure surfaced by a codec.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Encoding(#[from] EncodingError),
    #[error(transparent)]
    Decoding(#[from] DecodingError),
}

/// A value could not be turned into bytes.
#[derive(Debug, Error)]
pub enum EncodingError {
    #[error(transparent)]
    IO(#[from] io::Error),

    #[error("Length {len} exceeds limit of {max}")]
    LengthLimitExceeded { len: usize, max: usize },

    #[error("Cannot encode {type_name}: {reason}")]
    Unsupported {
        type_name: &'static str,
        reason: String,
    },

    #[cfg(feature = "bincode")]
    #[error(transparent)]
    Bincode(#[from] bincode::Error),
    #[cfg(feature = "serde_json")]
    #[error(transparent)]
    SerdeJSON(#[from] serde_json::Error),
}

impl EncodingError {
    pub fn unsupported<T: ?Sized>(reason: impl Into<String>) -> Self {
        Self::Unsupported {
            type_name: std::any::type_name::<T>(),
            reason: reason.into(),
        }
    }
}

/// Bytes could not be turned back into a value.
#[derive(Debug, Error)]
pub enum DecodingError {
    #[error(transparent)]
    IO(#[from] io::Error),

    // Framing errors
    #[error("Truncated input: needed {needed} byte(s), {remaining} remaining")]
    Truncated { needed: usize, remaining: usize },

    #[error("{count} trailing byte(s) after decoded value")]
    TrailingBytes { count: usize },

    #[error("Wrong length: expected {expected} bytes, got {actual}")]
    WrongLength { expected: usize, actual: usize },

    #[error("Varint does not fit in 64 bits")]
    VarintOverflow,

    #[error("Length prefix {len} exceeds limit of {max}")]
    LengthLimitExceeded { len: u64, max: usize },

    #[error("Value nested deeper than {max} levels")]
    DepthLimitExceeded { max: usize },

    // Value errors
    #[error("Invalid bool byte: {0}")]
    InvalidBool(u8),

    #[error("Invalid char scalar: {0:#x}")]
    InvalidChar(u32),

    #[error("Invalid option tag: {0}")]
    InvalidOptionTag(u8),

    // Only reachable on 32-bit hosts.
    #[error("Value {value} out of range for {type_name}")]
    OutOfRange {
        type_name: &'static str,
        value: i128,
    },

    #[error("Invalid UTF-8 in string")]
    InvalidUtf8,

    #[error("Unknown variant index {index} for {type_name}")]
    UnknownVariant {
        type_name: &'static str,
        index: u64,
    },

    #[error("Invalid format byte: {0}")]
    InvalidFormat(u8),

    #[cfg(feature = "bincode")]
    #[error(transparent)]
    Bincode(#[from] bincode::Error),
    #[cfg(feature = "serde_json")]
    #[error(transparent)]
    SerdeJSON(#[from] serde_json::Error),
}
