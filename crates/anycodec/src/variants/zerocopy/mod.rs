use std::{io::Write, marker::PhantomData};

use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::{Codec, DecodingError, EncodeBuffer, EncodingError, Format};

/// Value bounds for [`ZeroCopyCodec`]: the zerocopy derive markers.
pub trait ZeroCopyValue
where
    Self: FromBytes + IntoBytes + Immutable + KnownLayout,
{
}

impl<T> ZeroCopyValue for T where T: FromBytes + IntoBytes + Immutable + KnownLayout {}

/// Native layout strategy: the encoding is the value's memory.
///
/// Fastest option, but uses native byte order and layout so encodings are
/// **NOT PORTABLE** across architectures. Decoding requires exactly
/// `size_of::<T>()` bytes.
#[derive(Debug)]
pub struct ZeroCopyCodec<T> {
    buffer: EncodeBuffer,
    _value: PhantomData<fn() -> T>,
}

impl<T> Default for ZeroCopyCodec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ZeroCopyCodec<T> {
    pub fn new() -> Self {
        Self {
            buffer: EncodeBuffer::with_capacity(size_of::<T>()),
            _value: PhantomData,
        }
    }
}

impl<T: ZeroCopyValue> Codec<T> for ZeroCopyCodec<T> {
    const FORMAT: Format = Format::ZeroCopy;

    fn encode(&mut self, value: &T) -> Result<Vec<u8>, EncodingError> {
        self.buffer.writer().write_all(value.as_bytes())?;
        self.buffer.drain()
    }

    fn decode(&self, bytes: &[u8]) -> Result<T, DecodingError> {
        T::read_from_bytes(bytes).map_err(|_| DecodingError::WrongLength {
            expected: size_of::<T>(),
            actual: bytes.len(),
        })
    }
}
