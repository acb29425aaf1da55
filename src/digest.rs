use crate::engine::{BlockEngine, Sha1Engine, SHA1_DIGEST_SIZE};
use crate::error::DigestError;
use crate::span::{ByteWindow, SourceSpan};

/// Lifecycle phase of a [`StreamingDigest`]. Updates are only legal in
/// `Ready`; a finalized digest must be re-initialized before reuse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Uninitialized,
    Ready,
    Finalized,
}

pub type Sha1 = StreamingDigest<Sha1Engine>;

/// Incremental digest state machine over a fixed-block compression
/// engine. Callers feed bytes in chunks of any size; partial blocks are
/// buffered internally and the engine compresses exactly once per
/// complete block, so the final digest is independent of chunking.
///
/// A single instance is not synchronized; concurrent calls from
/// multiple threads require external mutual exclusion. Independent
/// instances share no state.
#[derive(Debug, Clone)]
pub struct StreamingDigest<E: BlockEngine> {
    engine: E,
    pending: Vec<u8>,
    message_bit_len: u64,
    phase: Phase,
}

impl<E: BlockEngine> StreamingDigest<E> {
    /// Acquires the engine's working memory without initializing the
    /// state. `init` must run before the first update.
    pub fn uninitialized() -> Result<Self, DigestError> {
        Ok(Self {
            engine: E::acquire()?,
            pending: Vec::with_capacity(E::BLOCK_SIZE),
            message_bit_len: 0,
            phase: Phase::Uninitialized,
        })
    }

    pub fn new() -> Result<Self, DigestError> {
        let mut digest = Self::uninitialized()?;
        digest.init();
        Ok(digest)
    }

    pub fn with_message(message: &[u8]) -> Result<Self, DigestError> {
        let mut digest = Self::new()?;
        digest.update(message)?;
        Ok(digest)
    }

    /// Resets to a fresh `Ready` state. Callable from any phase; a
    /// finalized or faulted instance becomes reusable again.
    pub fn init(&mut self) {
        self.engine.reset();
        self.pending.clear();
        self.message_bit_len = 0;
        self.phase = Phase::Ready;
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn digest_size(&self) -> usize {
        E::DIGEST_SIZE
    }

    pub fn block_size(&self) -> usize {
        E::BLOCK_SIZE
    }

    pub fn update(&mut self, data: &[u8]) -> Result<(), DigestError> {
        self.update_span(SourceSpan::whole(data))
    }

    /// Absorbs `length` bytes of `data` starting at `offset`. The pair
    /// is validated before anything is buffered.
    pub fn update_range(
        &mut self,
        data: &[u8],
        offset: usize,
        length: usize,
    ) -> Result<(), DigestError> {
        let span = SourceSpan::from_region(data, offset, length)?;
        self.update_span(span)
    }

    /// Absorbs the next `length` bytes of `window`. The read position
    /// advances only if the bytes were absorbed.
    pub fn update_window(
        &mut self,
        window: &mut ByteWindow<'_>,
        length: usize,
    ) -> Result<(), DigestError> {
        let span = window.peek(length)?;
        self.update_span(span)?;
        window.advance(length);
        Ok(())
    }

    pub fn update_span(&mut self, span: SourceSpan<'_>) -> Result<(), DigestError> {
        self.require_ready("update")?;
        self.message_bit_len += (span.len() as u64) * 8;
        if let Err(err) = self.consume(span.as_bytes()) {
            // Engine fault: the computation is lost and only init brings
            // the instance back.
            self.phase = Phase::Uninitialized;
            return Err(err);
        }
        Ok(())
    }

    /// Pads, runs the final compressions, and writes the digest into
    /// `out` starting at `offset`. Transitions to `Finalized`.
    pub fn finalize_into(&mut self, out: &mut [u8], offset: usize) -> Result<(), DigestError> {
        self.require_ready("final")?;
        let end = offset
            .checked_add(E::DIGEST_SIZE)
            .filter(|&end| end <= out.len())
            .ok_or(DigestError::OutOfBounds {
                offset,
                length: E::DIGEST_SIZE,
                available: out.len(),
            })?;

        let trailer = self.padding_trailer();
        if let Err(err) = self
            .consume(&trailer)
            .and_then(|_| self.engine.serialize_state(&mut out[offset..end]))
        {
            self.phase = Phase::Uninitialized;
            return Err(err);
        }
        debug_assert!(self.pending.is_empty());
        self.phase = Phase::Finalized;
        Ok(())
    }

    pub fn finalize(&mut self) -> Result<Vec<u8>, DigestError> {
        let mut out = vec![0u8; E::DIGEST_SIZE];
        self.finalize_into(&mut out, 0)?;
        Ok(out)
    }

    fn require_ready(&self, operation: &'static str) -> Result<(), DigestError> {
        if self.phase != Phase::Ready {
            return Err(DigestError::UnsupportedState {
                operation,
                phase: self.phase,
            });
        }
        Ok(())
    }

    /// Buffers bytes and compresses once per completed block. Leaves
    /// the absorbed-length counter alone so finalization can reuse this
    /// for the padding trailer.
    fn consume(&mut self, message: &[u8]) -> Result<(), DigestError> {
        let block = E::BLOCK_SIZE;
        let mut offset = 0;

        if !self.pending.is_empty() {
            let to_copy = (block - self.pending.len()).min(message.len());
            self.pending.extend_from_slice(&message[..to_copy]);
            offset += to_copy;

            if self.pending.len() == block {
                self.engine.absorb_block(&self.pending)?;
                self.pending.clear();
            }
        }

        while offset + block <= message.len() {
            self.engine.absorb_block(&message[offset..offset + block])?;
            offset += block;
        }

        if offset < message.len() {
            self.pending.extend_from_slice(&message[offset..]);
        }
        Ok(())
    }

    /// The suffix that brings the absorbed length to a block multiple:
    /// a 0x80 delimiter, zeros, then the 64-bit big-endian bit length.
    fn padding_trailer(&self) -> Vec<u8> {
        let block = E::BLOCK_SIZE;
        let occupied = (self.pending.len() + 1 + 8) % block;
        let zeros = (block - occupied) % block;

        let mut trailer = Vec::with_capacity(1 + zeros + 8);
        trailer.push(0x80);
        trailer.extend(std::iter::repeat(0u8).take(zeros));
        trailer.extend_from_slice(&self.message_bit_len.to_be_bytes());
        trailer
    }

    #[cfg(test)]
    pub(crate) fn engine_ref(&self) -> &E {
        &self.engine
    }

    #[cfg(test)]
    pub(crate) fn pending_len(&self) -> usize {
        self.pending.len()
    }

    #[cfg(test)]
    pub(crate) fn absorbed_bits(&self) -> u64 {
        self.message_bit_len
    }
}

impl Sha1 {
    pub fn digest_message(message: &[u8]) -> Result<[u8; SHA1_DIGEST_SIZE], DigestError> {
        let mut digest = Self::with_message(message)?;
        let mut out = [0u8; SHA1_DIGEST_SIZE];
        digest.finalize_into(&mut out, 0)?;
        Ok(out)
    }
}
