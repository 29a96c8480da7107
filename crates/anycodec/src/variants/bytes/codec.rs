use std::marker::PhantomData;

use crate::{
    ByteReader, ByteWriter, Bytes, Codec, DEFAULT_MAX_DEPTH, DEFAULT_MAX_LEN, DecodingError,
    EncodeBuffer, EncodingError, Format,
};

/// Compact schema strategy driven by the [`Bytes`] contract.
///
/// Only types that implement `Bytes` (by hand or via `#[derive(Bytes)]`) are
/// accepted, so unsupported shapes are rejected at compile time. Decoding is
/// strict: every byte must be consumed, and nesting is bounded so hostile
/// input can't exhaust the stack.
#[derive(Debug)]
pub struct BytesCodec<T> {
    buffer: EncodeBuffer,
    max_len: usize,
    max_depth: usize,
    _value: PhantomData<fn() -> T>,
}

impl<T> Default for BytesCodec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> BytesCodec<T> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: EncodeBuffer::with_capacity(capacity),
            max_len: DEFAULT_MAX_LEN,
            max_depth: DEFAULT_MAX_DEPTH,
            _value: PhantomData,
        }
    }

    /// Caps every length prefix, both written and accepted.
    pub fn with_max_len(mut self, max_len: usize) -> Self {
        self.max_len = max_len;
        self
    }

    /// Caps how deeply nested a decoded value may be.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    #[inline]
    pub fn max_len(&self) -> usize {
        self.max_len
    }

    #[inline]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}

impl<T: Bytes> Codec<T> for BytesCodec<T> {
    const FORMAT: Format = Format::Bytes;

    fn encode(&mut self, value: &T) -> Result<Vec<u8>, EncodingError> {
        let mut writer = ByteWriter::with_max_len(self.buffer.writer(), self.max_len);
        value.write_bytes(&mut writer)?;
        self.buffer.drain()
    }

    fn decode(&self, bytes: &[u8]) -> Result<T, DecodingError> {
        let mut reader = ByteReader::with_limits(bytes, self.max_len, self.max_depth);
        let value = T::read_bytes(&mut reader)?;
        reader.finish()?;
        Ok(value)
    }
}
