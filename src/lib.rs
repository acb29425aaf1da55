mod digest;
mod engine;
mod error;
mod hex;
mod span;

pub use digest::{Phase, Sha1, StreamingDigest};
pub use engine::{BlockEngine, Sha1Engine, SHA1_BLOCK_SIZE, SHA1_DIGEST_SIZE};
pub use error::DigestError;
pub use hex::{bytes_to_hex, hex_to_bytes};
pub use span::{ByteWindow, SourceSpan};
