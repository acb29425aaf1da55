use crate::error::DigestError;

/// A validated, borrowed view over caller-supplied bytes. Both public
/// calling conventions normalize to one of these before the state
/// machine buffers anything, so the update logic is written once.
#[derive(Debug, Clone, Copy)]
pub struct SourceSpan<'a> {
    bytes: &'a [u8],
}

impl<'a> SourceSpan<'a> {
    pub fn whole(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    /// Convention A: a contiguous region with an explicit offset and
    /// length. Rejects the pair before any bytes are read.
    pub fn from_region(
        region: &'a [u8],
        offset: usize,
        length: usize,
    ) -> Result<Self, DigestError> {
        let end = offset
            .checked_add(length)
            .filter(|&end| end <= region.len())
            .ok_or(DigestError::OutOfBounds {
                offset,
                length,
                available: region.len(),
            })?;
        Ok(Self {
            bytes: &region[offset..end],
        })
    }

    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Convention B: a bounded window with a read position and a limit.
/// Reads consume the window monotonically; a failed read leaves the
/// position where it was.
#[derive(Debug)]
pub struct ByteWindow<'a> {
    bytes: &'a [u8],
    position: usize,
    limit: usize,
}

impl<'a> ByteWindow<'a> {
    /// A window spanning the whole slice, position at the start.
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            position: 0,
            limit: bytes.len(),
        }
    }

    pub fn with_bounds(
        bytes: &'a [u8],
        position: usize,
        limit: usize,
    ) -> Result<Self, DigestError> {
        if limit > bytes.len() || position > limit {
            return Err(DigestError::OutOfBounds {
                offset: position,
                length: limit.saturating_sub(position),
                available: bytes.len(),
            });
        }
        Ok(Self {
            bytes,
            position,
            limit,
        })
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn remaining(&self) -> usize {
        self.limit - self.position
    }

    /// The next `length` bytes, without consuming them. Underflow is
    /// rejected here so the caller can advance only once its own work
    /// has succeeded.
    pub fn peek(&self, length: usize) -> Result<SourceSpan<'a>, DigestError> {
        if length > self.remaining() {
            return Err(DigestError::OutOfBounds {
                offset: self.position,
                length,
                available: self.remaining(),
            });
        }
        Ok(SourceSpan::whole(
            &self.bytes[self.position..self.position + length],
        ))
    }

    pub(crate) fn advance(&mut self, length: usize) {
        debug_assert!(length <= self.remaining());
        self.position += length;
    }
}
