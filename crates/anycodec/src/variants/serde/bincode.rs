use std::marker::PhantomData;

use bincode::Options;
use serde::{Serialize, de::DeserializeOwned};

use crate::{Codec, DecodingError, EncodeBuffer, EncodingError, Format};

/// Reflective binary strategy: anything serde can describe, laid out by
/// bincode with varint integers.
///
/// Serde bounds are necessary but not sufficient. Types that need a
/// self-describing format (`serde_json::Value`, untagged enums, flattened
/// maps) satisfy the bounds yet fail to decode, which the probe catches.
#[derive(Debug)]
pub struct BincodeCodec<T> {
    buffer: EncodeBuffer,
    limit: u64,
    _value: PhantomData<fn() -> T>,
}

impl<T> Default for BincodeCodec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> BincodeCodec<T> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: EncodeBuffer::with_capacity(capacity),
            limit: u64::MAX,
            _value: PhantomData,
        }
    }

    /// Upper bound in bytes for a single encoded value, in both directions.
    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = limit;
        self
    }

    #[inline]
    pub fn limit(&self) -> u64 {
        self.limit
    }
}

/// Varint integers, trailing bytes rejected, bounded by `limit`.
#[inline]
fn options(limit: u64) -> impl Options {
    bincode::DefaultOptions::new().with_limit(limit)
}

impl<T> Codec<T> for BincodeCodec<T>
where
    T: Serialize + DeserializeOwned,
{
    const FORMAT: Format = Format::Bincode;

    fn encode(&mut self, value: &T) -> Result<Vec<u8>, EncodingError> {
        options(self.limit).serialize_into(self.buffer.writer(), value)?;
        self.buffer.drain()
    }

    fn decode(&self, bytes: &[u8]) -> Result<T, DecodingError> {
        // bincode only counts against the limit when reading from a stream,
        // so a slice has to be measured up front.
        if bytes.len() as u64 > self.limit {
            return Err(DecodingError::Bincode(Box::new(bincode::ErrorKind::SizeLimit)));
        }
        Ok(options(self.limit).deserialize(bytes)?)
    }
}
