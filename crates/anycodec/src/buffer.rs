use std::io::{Cursor, Read};

use log::debug;

use crate::EncodingError;

/// Capacity kept between encodes. Anything above is released after a drain so
/// one oversized value doesn't pin memory for the codec's lifetime.
pub const MAX_RETAINED_CAPACITY: usize = 1024 * 1024;

/// Reusable in-memory formatter target owned by a single codec.
///
/// Not shareable across threads without external locking; codecs take
/// `&mut self` to encode for that reason.
#[derive(Debug, Default)]
pub struct EncodeBuffer {
    cursor: Cursor<Vec<u8>>,
}

impl EncodeBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            cursor: Cursor::new(Vec::with_capacity(capacity)),
        }
    }

    /// Clears leftovers from any previous (possibly failed) encode and hands
    /// out the cursor positioned at 0.
    #[inline]
    pub fn writer(&mut self) -> &mut Cursor<Vec<u8>> {
        self.cursor.get_mut().clear();
        self.cursor.set_position(0);
        &mut self.cursor
    }

    /// Rewinds to the start and reads everything written so far into a fresh
    /// vector, leaving the buffer empty.
    pub fn drain(&mut self) -> Result<Vec<u8>, EncodingError> {
        self.cursor.set_position(0);

        let mut bytes = Vec::with_capacity(self.cursor.get_ref().len());
        self.cursor.read_to_end(&mut bytes)?;

        let inner = self.cursor.get_mut();
        inner.clear();
        if inner.capacity() > MAX_RETAINED_CAPACITY {
            debug!(
                "encode buffer: shrinking from {} to {} bytes",
                inner.capacity(),
                MAX_RETAINED_CAPACITY
            );
            inner.shrink_to(MAX_RETAINED_CAPACITY);
        }
        self.cursor.set_position(0);

        Ok(bytes)
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.cursor.get_ref().capacity()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cursor.get_ref().is_empty()
    }
}
