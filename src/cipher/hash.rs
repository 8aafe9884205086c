//! Content fingerprinting using SHA-256.
//!
//! This module computes the primary hash of a file. Input is consumed
//! incrementally so that an upload can be hashed while it streams in, and the
//! configured ceiling is enforced as bytes arrive rather than after the fact.
//!
//! # Architecture
//!
//! [`Hasher`] is the incremental engine; it is fed directly by the HTTP layer
//! with multipart chunks. [`Hasher::digest_reader`] drives it from any async
//! reader using a fixed heap buffer, which is how local files are hashed.

use sha2::{Digest as _, Sha256};
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::config::{CHUNK_SIZE, Policy};
use crate::error::{Error, Result};
use crate::types::Digest;
use crate::ui::progress::Bar;

/// Incremental SHA-256 with a size ceiling.
pub struct Hasher {
    /// The running SHA-256 state.
    inner: Sha256,

    /// Bytes consumed so far.
    consumed: u64,

    /// Limits applied to the input.
    policy: Policy,
}

impl Hasher {
    /// Creates an empty hasher enforcing `policy`.
    #[must_use]
    pub fn new(policy: Policy) -> Self {
        Self { inner: Sha256::new(), consumed: 0, policy }
    }

    /// Feeds the next chunk of input.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InputTooLarge`] as soon as the total input exceeds the
    /// policy ceiling. The hasher must be discarded afterwards.
    pub fn update(&mut self, chunk: &[u8]) -> Result<()> {
        let len = u64::try_from(chunk.len()).unwrap_or(u64::MAX);
        self.consumed = self.consumed.saturating_add(len);

        if self.consumed > self.policy.max_size {
            return Err(Error::InputTooLarge { limit: self.policy.max_size });
        }

        self.inner.update(chunk);
        Ok(())
    }

    /// Number of bytes hashed so far.
    #[inline]
    #[must_use]
    pub const fn consumed(&self) -> u64 {
        self.consumed
    }

    /// Completes the computation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyInput`] when no bytes were fed and the policy rejects
    /// empty inputs.
    pub fn finalize(self) -> Result<Digest> {
        if self.consumed == 0 && self.policy.reject_empty {
            return Err(Error::EmptyInput);
        }

        Ok(Digest::from_bytes(self.inner.finalize().into()))
    }

    /// Hashes a complete in-memory buffer.
    ///
    /// # Errors
    ///
    /// Same as [`Hasher::update`] and [`Hasher::finalize`].
    pub fn digest(bytes: &[u8], policy: Policy) -> Result<Digest> {
        let mut hasher = Self::new(policy);
        hasher.update(bytes)?;
        hasher.finalize()
    }

    /// Hashes a data stream until EOF.
    ///
    /// Reads through a single [`CHUNK_SIZE`] heap buffer, so memory use does not
    /// grow with the input. Returns the digest and the number of bytes read.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnreadableInput`] if the reader fails, and the errors of
    /// [`Hasher::update`] and [`Hasher::finalize`].
    pub async fn digest_reader<R: AsyncRead + Unpin>(mut reader: R, policy: Policy, progress: Option<&Bar>) -> Result<(Digest, u64)> {
        let mut hasher = Self::new(policy);
        let mut buffer = vec![0u8; CHUNK_SIZE].into_boxed_slice();

        loop {
            let bytes_read = reader.read(&mut buffer[..]).await?;
            if bytes_read == 0 {
                break;
            }

            hasher.update(&buffer[..bytes_read])?;

            if let Some(bar) = progress {
                bar.add(bytes_read as u64);
            }
        }

        if let Some(bar) = progress {
            bar.finish();
        }

        let consumed = hasher.consumed();
        Ok((hasher.finalize()?, consumed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EMPTY_SHA256: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

    #[test]
    fn test_empty_input_known_value() {
        let digest = Hasher::digest(b"", Policy::default()).unwrap();
        assert_eq!(digest.to_hex(), EMPTY_SHA256);
    }

    #[test]
    fn test_known_value() {
        let digest = Hasher::digest(b"hello world", Policy::default()).unwrap();
        assert_eq!(digest.to_hex(), "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9");
    }

    #[test]
    fn test_deterministic() {
        let a = Hasher::digest(b"same data", Policy::default()).unwrap();
        let b = Hasher::digest(b"same data", Policy::default()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_single_bit_flip_changes_digest() {
        let original = b"integrity matters".to_vec();
        let mut flipped = original.clone();
        flipped[0] ^= 0x01;

        let a = Hasher::digest(&original, Policy::default()).unwrap();
        let b = Hasher::digest(&flipped, Policy::default()).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_chunking_does_not_change_digest() {
        let data: Vec<u8> = (0..10_000u32).map(|i| (i % 251) as u8).collect();
        let whole = Hasher::digest(&data, Policy::default()).unwrap();

        let mut hasher = Hasher::new(Policy::default());
        data.chunks(7).for_each(|chunk| hasher.update(chunk).unwrap());
        assert_eq!(hasher.consumed(), 10_000);
        assert_eq!(hasher.finalize().unwrap(), whole);
    }

    #[test]
    fn test_ceiling_is_inclusive() {
        let policy = Policy::new(16, false);
        assert!(Hasher::digest(&[7u8; 16], policy).is_ok());
        assert!(matches!(Hasher::digest(&[7u8; 17], policy), Err(Error::InputTooLarge { limit: 16 })));
    }

    #[test]
    fn test_ceiling_trips_mid_stream() {
        let mut hasher = Hasher::new(Policy::new(10, false));
        hasher.update(&[0u8; 6]).unwrap();
        assert!(matches!(hasher.update(&[0u8; 6]), Err(Error::InputTooLarge { .. })));
    }

    #[test]
    fn test_reject_empty_policy() {
        let result = Hasher::digest(b"", Policy::new(16, true));
        assert!(matches!(result, Err(Error::EmptyInput)));
        assert!(Hasher::digest(b"x", Policy::new(16, true)).is_ok());
    }

    #[tokio::test]
    async fn test_digest_reader_matches_buffer() {
        let data = vec![0x5au8; CHUNK_SIZE * 2 + 123];
        let (digest, size) = Hasher::digest_reader(&data[..], Policy::default(), None).await.unwrap();
        assert_eq!(size, data.len() as u64);
        assert_eq!(digest, Hasher::digest(&data, Policy::default()).unwrap());
    }

    #[tokio::test]
    async fn test_digest_reader_empty() {
        let (digest, size) = Hasher::digest_reader(&b""[..], Policy::default(), None).await.unwrap();
        assert_eq!(size, 0);
        assert_eq!(digest.to_hex(), EMPTY_SHA256);
    }

    #[tokio::test]
    async fn test_digest_reader_boundary() {
        let policy = Policy::new(1024, false);
        let exact = vec![1u8; 1024];
        let over = vec![1u8; 1025];
        assert!(Hasher::digest_reader(&exact[..], policy, None).await.is_ok());
        assert!(matches!(Hasher::digest_reader(&over[..], policy, None).await, Err(Error::InputTooLarge { limit: 1024 })));
    }
}
