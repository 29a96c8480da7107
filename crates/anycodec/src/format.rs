use std::{fmt, io::Write};

use crate::{ByteReader, ByteWriter, Bytes, DecodingError, EncodingError};

/// Identifies the strategy behind a codec.
///
/// Only used for diagnostics. Encodings never carry it, so bytes from one
/// format cannot be routed to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Format {
    /// Explicit contract via the `Bytes` trait, little-endian and
    /// varint-prefixed. **PORTABLE** across architectures.
    Bytes,
    /// In-memory representation via zerocopy.
    /// **NOT PORTABLE** - native byte order and layout.
    ZeroCopy,
    /// Serde driven compact binary via bincode.
    Bincode = 64,
    /// Serde driven JSON text.
    Json = 65,
}

impl Format {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Bytes => "bytes",
            Self::ZeroCopy => "zerocopy",
            Self::Bincode => "bincode",
            Self::Json => "json",
        }
    }

    #[inline]
    pub fn is_serde(&self) -> bool {
        matches!(self, Self::Bincode | Self::Json)
    }

    #[inline]
    pub fn is_portable(&self) -> bool {
        *self != Self::ZeroCopy
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<u8> for Format {
    type Error = DecodingError;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        match byte {
            0 => Ok(Self::Bytes),
            1 => Ok(Self::ZeroCopy),
            64 => Ok(Self::Bincode),
            65 => Ok(Self::Json),
            b => Err(DecodingError::InvalidFormat(b)),
        }
    }
}

impl Bytes for Format {
    #[inline]
    fn write_bytes<W: Write>(&self, writer: &mut ByteWriter<W>) -> Result<(), EncodingError> {
        writer.write_all(&[*self as u8])?;
        Ok(())
    }

    #[inline]
    fn read_bytes(reader: &mut ByteReader<'_>) -> Result<Self, DecodingError> {
        Self::try_from(reader.read_u8()?)
    }
}
