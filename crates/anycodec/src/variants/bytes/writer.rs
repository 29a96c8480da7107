use std::io::{self, Write};

use crate::{DEFAULT_MAX_LEN, EncodingError};

const VARINT_MAX_BYTES: usize = 10;

/// Writes `value` as an unsigned LEB128 varint.
pub fn write_varint<W: Write + ?Sized>(
    writer: &mut W,
    mut value: u64,
) -> Result<(), EncodingError> {
    let mut buf = [0u8; VARINT_MAX_BYTES];
    let mut len = 0;
    loop {
        let byte = (value & 0x7f) as u8;
        value >>= 7;
        if value == 0 {
            buf[len] = byte;
            len += 1;
            break;
        }
        buf[len] = byte | 0x80;
        len += 1;
    }
    writer.write_all(&buf[..len])?;
    Ok(())
}

/// Output side of the [`Bytes`](crate::Bytes) contract.
///
/// Mirrors [`ByteReader`](crate::ByteReader): length prefixes go through
/// [`ByteWriter::write_len`] so nothing longer than the reader would accept
/// is ever written.
#[derive(Debug)]
pub struct ByteWriter<W> {
    inner: W,
    max_len: usize,
}

impl<W: Write> ByteWriter<W> {
    pub fn new(inner: W) -> Self {
        Self::with_max_len(inner, DEFAULT_MAX_LEN)
    }

    pub fn with_max_len(inner: W, max_len: usize) -> Self {
        Self { inner, max_len }
    }

    #[inline]
    pub fn max_len(&self) -> usize {
        self.max_len
    }

    #[inline]
    pub fn write_varint(&mut self, value: u64) -> Result<(), EncodingError> {
        write_varint(&mut self.inner, value)
    }

    /// Writes a varint length prefix, refusing anything above the configured
    /// maximum.
    pub fn write_len(&mut self, len: usize) -> Result<(), EncodingError> {
        if len > self.max_len {
            return Err(EncodingError::LengthLimitExceeded {
                len,
                max: self.max_len,
            });
        }
        self.write_varint(len as u64)
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Write for ByteWriter<W> {
    #[inline]
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.write(buf)
    }

    #[inline]
    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        self.inner.write_all(buf)
    }

    #[inline]
    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
