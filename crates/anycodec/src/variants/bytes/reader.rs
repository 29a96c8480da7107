use crate::DecodingError;

/// Default upper bound for a single length prefix (64 MiB).
pub const DEFAULT_MAX_LEN: usize = 64 * 1024 * 1024;

/// Default nesting bound while decoding. Every derived type and every `Box`,
/// `Vec` or `Option` counts as one level.
pub const DEFAULT_MAX_DEPTH: usize = 256;

const VARINT_MAX_BYTES: usize = 10;

/// Forward-only cursor over encoded bytes.
///
/// Every read is bounds checked; running off the end is a
/// [`DecodingError::Truncated`], never a panic.
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    bytes: &'a [u8],
    pos: usize,
    max_len: usize,
    depth: usize,
    max_depth: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self::with_max_len(bytes, DEFAULT_MAX_LEN)
    }

    pub fn with_max_len(bytes: &'a [u8], max_len: usize) -> Self {
        Self::with_limits(bytes, max_len, DEFAULT_MAX_DEPTH)
    }

    pub fn with_limits(bytes: &'a [u8], max_len: usize, max_depth: usize) -> Self {
        Self {
            bytes,
            pos: 0,
            max_len,
            depth: 0,
            max_depth,
        }
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    /// Borrows the next `n` bytes.
    #[inline]
    pub fn take(&mut self, n: usize) -> Result<&'a [u8], DecodingError> {
        let remaining = self.remaining();
        if n > remaining {
            return Err(DecodingError::Truncated {
                needed: n,
                remaining,
            });
        }
        let slice = &self.bytes[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    /// Reads exactly `N` bytes into an array.
    #[inline]
    pub fn take_array<const N: usize>(&mut self) -> Result<[u8; N], DecodingError> {
        let mut arr = [0u8; N];
        arr.copy_from_slice(self.take(N)?);
        Ok(arr)
    }

    #[inline]
    pub fn read_u8(&mut self) -> Result<u8, DecodingError> {
        Ok(self.take_array::<1>()?[0])
    }

    pub fn read_varint(&mut self) -> Result<u64, DecodingError> {
        let mut value = 0u64;
        for i in 0..VARINT_MAX_BYTES {
            let byte = self.read_u8()?;
            let bits = u64::from(byte & 0x7f);
            // Tenth byte may only carry the top bit of a u64.
            if i == VARINT_MAX_BYTES - 1 && bits > 1 {
                return Err(DecodingError::VarintOverflow);
            }
            value |= bits << (7 * i);
            if byte & 0x80 == 0 {
                return Ok(value);
            }
        }
        Err(DecodingError::VarintOverflow)
    }

    /// Reads a varint length prefix and checks it against the configured
    /// maximum.
    pub fn read_len(&mut self) -> Result<usize, DecodingError> {
        let len = self.read_varint()?;
        if len > self.max_len as u64 {
            return Err(DecodingError::LengthLimitExceeded {
                len,
                max: self.max_len,
            });
        }
        Ok(len as usize)
    }

    /// Runs `read` one nesting level deeper.
    ///
    /// Hand-written impls for recursive types should read through this so
    /// hostile input fails with [`DecodingError::DepthLimitExceeded`] instead
    /// of exhausting the stack.
    pub fn nested<T>(
        &mut self,
        read: impl FnOnce(&mut Self) -> Result<T, DecodingError>,
    ) -> Result<T, DecodingError> {
        if self.depth >= self.max_depth {
            return Err(DecodingError::DepthLimitExceeded {
                max: self.max_depth,
            });
        }
        self.depth += 1;
        let value = read(self);
        self.depth -= 1;
        value
    }

    /// Fails if anything is left unread.
    pub fn finish(self) -> Result<(), DecodingError> {
        match self.remaining() {
            0 => Ok(()),
            count => Err(DecodingError::TrailingBytes { count }),
        }
    }
}
