use std::io::Write;

use crate::{ByteReader, ByteWriter, DecodingError, EncodingError};

/// Explicit encoding contract for [`BytesCodec`](crate::BytesCodec).
///
/// Types opt in by implementing this by hand or with `#[derive(Bytes)]`.
/// Numbers are little-endian so encodings are portable across architectures;
/// variable-size values carry a varint length prefix written with
/// [`ByteWriter::write_len`].
pub trait Bytes: Sized {
    /// Appends the encoding of `self` to `writer`.
    fn write_bytes<W: Write>(&self, writer: &mut ByteWriter<W>) -> Result<(), EncodingError>;

    /// Consumes exactly one encoded value from `reader`.
    fn read_bytes(reader: &mut ByteReader<'_>) -> Result<Self, DecodingError>;
}

macro_rules! impl_bytes_for_numeric {
    ($($t:ty),*) => {
        $(
            impl Bytes for $t {
                #[inline]
                fn write_bytes<W: Write>(&self, writer: &mut ByteWriter<W>) -> Result<(), EncodingError> {
                    writer.write_all(&self.to_le_bytes())?;
                    Ok(())
                }

                #[inline]
                fn read_bytes(reader: &mut ByteReader<'_>) -> Result<Self, DecodingError> {
                    Ok(<$t>::from_le_bytes(reader.take_array()?))
                }
            }
        )*
    };
}

impl_bytes_for_numeric!(u8, u16, u32, u64, u128, i8, i16, i32, i64, i128, f32, f64);

// Pointer-sized integers are pinned to 64 bits so 32 and 64-bit hosts agree.
impl Bytes for usize {
    #[inline]
    fn write_bytes<W: Write>(&self, writer: &mut ByteWriter<W>) -> Result<(), EncodingError> {
        (*self as u64).write_bytes(writer)
    }

    #[inline]
    fn read_bytes(reader: &mut ByteReader<'_>) -> Result<Self, DecodingError> {
        let value = u64::read_bytes(reader)?;
        usize::try_from(value).map_err(|_| DecodingError::OutOfRange {
            type_name: "usize",
            value: value.into(),
        })
    }
}

impl Bytes for isize {
    #[inline]
    fn write_bytes<W: Write>(&self, writer: &mut ByteWriter<W>) -> Result<(), EncodingError> {
        (*self as i64).write_bytes(writer)
    }

    #[inline]
    fn read_bytes(reader: &mut ByteReader<'_>) -> Result<Self, DecodingError> {
        let value = i64::read_bytes(reader)?;
        isize::try_from(value).map_err(|_| DecodingError::OutOfRange {
            type_name: "isize",
            value: value.into(),
        })
    }
}

impl Bytes for bool {
    #[inline]
    fn write_bytes<W: Write>(&self, writer: &mut ByteWriter<W>) -> Result<(), EncodingError> {
        writer.write_all(&[u8::from(*self)])?;
        Ok(())
    }

    #[inline]
    fn read_bytes(reader: &mut ByteReader<'_>) -> Result<Self, DecodingError> {
        match reader.read_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            b => Err(DecodingError::InvalidBool(b)),
        }
    }
}

impl Bytes for char {
    #[inline]
    fn write_bytes<W: Write>(&self, writer: &mut ByteWriter<W>) -> Result<(), EncodingError> {
        u32::from(*self).write_bytes(writer)
    }

    #[inline]
    fn read_bytes(reader: &mut ByteReader<'_>) -> Result<Self, DecodingError> {
        let scalar = u32::read_bytes(reader)?;
        char::from_u32(scalar).ok_or(DecodingError::InvalidChar(scalar))
    }
}

impl Bytes for () {
    #[inline]
    fn write_bytes<W: Write>(&self, _: &mut ByteWriter<W>) -> Result<(), EncodingError> {
        Ok(())
    }

    #[inline]
    fn read_bytes(_: &mut ByteReader<'_>) -> Result<Self, DecodingError> {
        Ok(())
    }
}

impl Bytes for String {
    fn write_bytes<W: Write>(&self, writer: &mut ByteWriter<W>) -> Result<(), EncodingError> {
        writer.write_len(self.len())?;
        writer.write_all(self.as_bytes())?;
        Ok(())
    }

    fn read_bytes(reader: &mut ByteReader<'_>) -> Result<Self, DecodingError> {
        let len = reader.read_len()?;
        let bytes = reader.take(len)?;
        String::from_utf8(bytes.to_vec()).map_err(|_| DecodingError::InvalidUtf8)
    }
}

impl<T: Bytes> Bytes for Vec<T> {
    fn write_bytes<W: Write>(&self, writer: &mut ByteWriter<W>) -> Result<(), EncodingError> {
        writer.write_len(self.len())?;
        for item in self {
            item.write_bytes(writer)?;
        }
        Ok(())
    }

    fn read_bytes(reader: &mut ByteReader<'_>) -> Result<Self, DecodingError> {
        let len = reader.read_len()?;
        reader.nested(|reader| {
            // A hostile prefix can't make us allocate more than what's left.
            let mut items = Vec::with_capacity(len.min(reader.remaining()));
            for _ in 0..len {
                items.push(T::read_bytes(reader)?);
            }
            Ok(items)
        })
    }
}

impl<T: Bytes> Bytes for Option<T> {
    fn write_bytes<W: Write>(&self, writer: &mut ByteWriter<W>) -> Result<(), EncodingError> {
        match self {
            None => {
                writer.write_all(&[0])?;
                Ok(())
            }
            Some(value) => {
                writer.write_all(&[1])?;
                value.write_bytes(writer)
            }
        }
    }

    fn read_bytes(reader: &mut ByteReader<'_>) -> Result<Self, DecodingError> {
        match reader.read_u8()? {
            0 => Ok(None),
            1 => reader.nested(T::read_bytes).map(Some),
            tag => Err(DecodingError::InvalidOptionTag(tag)),
        }
    }
}

impl<T: Bytes> Bytes for Box<T> {
    #[inline]
    fn write_bytes<W: Write>(&self, writer: &mut ByteWriter<W>) -> Result<(), EncodingError> {
        (**self).write_bytes(writer)
    }

    #[inline]
    fn read_bytes(reader: &mut ByteReader<'_>) -> Result<Self, DecodingError> {
        reader.nested(T::read_bytes).map(Box::new)
    }
}

macro_rules! impl_bytes_for_tuple {
    ($($name:ident $field:ident),+) => {
        impl<$($name: Bytes),+> Bytes for ($($name,)+) {
            fn write_bytes<W: Write>(&self, writer: &mut ByteWriter<W>) -> Result<(), EncodingError> {
                let ($($field,)+) = self;
                $($field.write_bytes(writer)?;)+
                Ok(())
            }

            fn read_bytes(reader: &mut ByteReader<'_>) -> Result<Self, DecodingError> {
                Ok(($($name::read_bytes(reader)?,)+))
            }
        }
    };
}

impl_bytes_for_tuple!(A a);
impl_bytes_for_tuple!(A a, B b);
impl_bytes_for_tuple!(A a, B b, C c);
impl_bytes_for_tuple!(A a, B b, C c, D d);
