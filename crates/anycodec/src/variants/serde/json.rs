use std::marker::PhantomData;

use serde::{Serialize, de::DeserializeOwned};

use super::finite::find_non_finite;
use crate::{Codec, DecodingError, EncodeBuffer, EncodingError, Format};

/// Compact JSON text as bytes. Largest and slowest of the strategies, but
/// readable and self-describing.
///
/// JSON has no literal for `NaN` or the infinities, so values holding one are
/// refused with [`EncodingError::Unsupported`] instead of being written as
/// `null`.
#[derive(Debug)]
pub struct JsonCodec<T> {
    buffer: EncodeBuffer,
    _value: PhantomData<fn() -> T>,
}

impl<T> Default for JsonCodec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> JsonCodec<T> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: EncodeBuffer::with_capacity(capacity),
            _value: PhantomData,
        }
    }
}

impl<T> Codec<T> for JsonCodec<T>
where
    T: Serialize + DeserializeOwned,
{
    const FORMAT: Format = Format::Json;

    fn encode(&mut self, value: &T) -> Result<Vec<u8>, EncodingError> {
        if let Some(float) = find_non_finite(value) {
            return Err(EncodingError::unsupported::<T>(format!(
                "JSON cannot represent the float {float}"
            )));
        }
        serde_json::to_writer(self.buffer.writer(), value)?;
        self.buffer.drain()
    }

    fn decode(&self, bytes: &[u8]) -> Result<T, DecodingError> {
        Ok(serde_json::from_slice(bytes)?)
    }
}
