use crate::error::DigestError;

pub const SHA1_DIGEST_SIZE: usize = 20;
pub const SHA1_BLOCK_SIZE: usize = 64;

const INITIALISATION_CONSTANTS: [u32; 5] =
    [0x67452301, 0xEFCDAB89, 0x98BADCFE, 0x10325476, 0xC3D2E1F0];

/// Contract between the streaming state machine and the compression
/// engine behind it. The state machine only sequences these calls and
/// propagates failures; it never looks inside the working state.
///
/// An engine owns its working memory for as long as the value lives;
/// dropping it releases everything, on error paths included.
pub trait BlockEngine: Sized {
    const BLOCK_SIZE: usize;
    const DIGEST_SIZE: usize;

    /// Acquires working memory for one digest computation.
    fn acquire() -> Result<Self, DigestError>;

    /// Returns the working state to the algorithm's initial constants.
    fn reset(&mut self);

    /// Advances the working state by one complete `BLOCK_SIZE`-byte
    /// block.
    fn absorb_block(&mut self, block: &[u8]) -> Result<(), DigestError>;

    /// Serializes the working state into `out`, which must be exactly
    /// `DIGEST_SIZE` bytes.
    fn serialize_state(&self, out: &mut [u8]) -> Result<(), DigestError>;
}

#[derive(Debug, Clone)]
pub struct Sha1Engine {
    state: [u32; 5],
}

impl BlockEngine for Sha1Engine {
    const BLOCK_SIZE: usize = SHA1_BLOCK_SIZE;
    const DIGEST_SIZE: usize = SHA1_DIGEST_SIZE;

    fn acquire() -> Result<Self, DigestError> {
        Ok(Self {
            state: INITIALISATION_CONSTANTS,
        })
    }

    fn reset(&mut self) {
        self.state = INITIALISATION_CONSTANTS;
    }

    fn absorb_block(&mut self, block: &[u8]) -> Result<(), DigestError> {
        if block.len() != Self::BLOCK_SIZE {
            return Err(DigestError::Computation(format!(
                "absorb requires a {}-byte block, got {} bytes",
                Self::BLOCK_SIZE,
                block.len()
            )));
        }

        let mut w = [0u32; 80];
        for (i, word) in block.chunks_exact(4).enumerate() {
            w[i] = u32::from_be_bytes(word.try_into().unwrap());
        }
        for i in 16..80 {
            w[i] = (w[i - 3] ^ w[i - 8] ^ w[i - 14] ^ w[i - 16]).rotate_left(1);
        }

        let [mut a, mut b, mut c, mut d, mut e] = self.state;
        for (i, &word) in w.iter().enumerate() {
            let (f, k) = match i {
                0..=19 => ((b & c) | ((!b) & d), 0x5A827999),
                20..=39 => (b ^ c ^ d, 0x6ED9EBA1),
                40..=59 => ((b & c) | (b & d) | (c & d), 0x8F1BBCDC),
                _ => (b ^ c ^ d, 0xCA62C1D6),
            };

            let temp = a
                .rotate_left(5)
                .wrapping_add(f)
                .wrapping_add(e)
                .wrapping_add(k)
                .wrapping_add(word);
            e = d;
            d = c;
            c = b.rotate_left(30);
            b = a;
            a = temp;
        }

        self.state[0] = self.state[0].wrapping_add(a);
        self.state[1] = self.state[1].wrapping_add(b);
        self.state[2] = self.state[2].wrapping_add(c);
        self.state[3] = self.state[3].wrapping_add(d);
        self.state[4] = self.state[4].wrapping_add(e);
        Ok(())
    }

    fn serialize_state(&self, out: &mut [u8]) -> Result<(), DigestError> {
        if out.len() != Self::DIGEST_SIZE {
            return Err(DigestError::Computation(format!(
                "state serializes to {} bytes, output slice holds {}",
                Self::DIGEST_SIZE,
                out.len()
            )));
        }
        for (chunk, word) in out.chunks_exact_mut(4).zip(self.state) {
            chunk.copy_from_slice(&word.to_be_bytes());
        }
        Ok(())
    }
}
