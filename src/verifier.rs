//! High-level verification flows.
//!
//! Each flow is a straight sequence of pure steps over one request:
//!
//! - **Generate**: digest → fresh salt → derive code
//! - **Verify**: digest → re-derive with the supplied salt → constant-time compare
//! - **Compare**: digest both files → compare digests, plus display codes
//!
//! Nothing is retained between calls; the only shared value is the key.

use tokio::io::AsyncRead;

use crate::cipher::{Hasher, Mac, codes_match, digests_match};
use crate::config::Policy;
use crate::error::Result;
use crate::secret::SecretKey;
use crate::types::{ComparisonRecord, Digest, FileFingerprint, Salt, VerificationOutcome, VerificationRecord};

/// A file whose content has been digested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashedFile {
    pub name: String,
    pub size: u64,
    pub digest: Digest,
}

impl HashedFile {
    /// Streams `reader` through the digest engine.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`Hasher::digest_reader`].
    pub async fn from_reader<R: AsyncRead + Unpin>(name: impl Into<String>, reader: R, policy: Policy) -> Result<Self> {
        let (digest, size) = Hasher::digest_reader(reader, policy, None).await?;
        Ok(Self { name: name.into(), size, digest })
    }
}

/// Issues and checks verification codes under one secret key.
pub struct Verifier {
    mac: Mac,
    policy: Policy,
}

impl Verifier {
    #[must_use]
    pub const fn new(key: SecretKey, policy: Policy) -> Self {
        Self { mac: Mac::new(key), policy }
    }

    #[inline]
    #[must_use]
    pub const fn policy(&self) -> Policy {
        self.policy
    }

    /// A fresh digest engine bound to this verifier's policy.
    #[must_use]
    pub fn hasher(&self) -> Hasher {
        Hasher::new(self.policy)
    }

    /// Sender side: derives a code for `file` under a new random salt.
    ///
    /// # Errors
    ///
    /// Fails if the random source or the HMAC computation fails.
    pub fn issue(&self, file: HashedFile) -> Result<VerificationRecord> {
        let salt = Salt::generate()?;
        let auth = self.mac.derive(&file.digest, &salt)?;

        tracing::info!(file = %file.name, size = file.size, "verification code generated");

        Ok(VerificationRecord {
            file_name: file.name,
            file_size: file.size,
            sha256: file.digest.to_hex(),
            hmac: auth.to_hex(),
            salt: salt.to_hex(),
            verification_code: auth.verification_code(),
        })
    }

    /// Receiver side: re-derives the code of `file` under `salt` and compares it
    /// with the code the sender shared.
    ///
    /// A mismatch is a successful result with `matched == false`. Surrounding
    /// whitespace in `code` is trimmed, since codes are usually pasted.
    ///
    /// # Errors
    ///
    /// Fails only if the HMAC computation fails.
    pub fn check(&self, file: HashedFile, code: &str, salt: &Salt) -> Result<VerificationOutcome> {
        let auth = self.mac.derive(&file.digest, salt)?;
        let computed = auth.verification_code();
        let matched = codes_match(code.trim(), &computed);

        if matched {
            tracing::info!(file = %file.name, size = file.size, "verification code matched");
        } else {
            tracing::warn!(file = %file.name, size = file.size, "verification code mismatch");
        }

        Ok(VerificationOutcome {
            file_name: file.name,
            file_size: file.size,
            matched,
            computed_code: computed,
            sha256: file.digest.to_hex(),
            hmac: auth.to_hex(),
        })
    }

    /// Compares two digested files.
    ///
    /// Each side also gets a display code under its own fresh salt; those codes
    /// play no part in the verdict.
    ///
    /// # Errors
    ///
    /// Fails if the random source or the HMAC computation fails.
    pub fn compare(&self, first: HashedFile, second: HashedFile) -> Result<ComparisonRecord> {
        let matched = digests_match(&first.digest, &second.digest);

        tracing::info!(first = %first.name, second = %second.name, matched, "files compared");

        Ok(ComparisonRecord { matched, file1: self.fingerprint(first)?, file2: self.fingerprint(second)? })
    }

    fn fingerprint(&self, file: HashedFile) -> Result<FileFingerprint> {
        let auth = self.mac.derive(&file.digest, &Salt::generate()?)?;
        Ok(FileFingerprint { name: file.name, sha256: file.digest.to_hex(), hmac: auth.to_hex() })
    }

    /// Digests `reader` and issues a code for it.
    ///
    /// # Errors
    ///
    /// Propagates digest and derivation errors.
    pub async fn generate<R: AsyncRead + Unpin>(&self, name: impl Into<String>, reader: R) -> Result<VerificationRecord> {
        let file = HashedFile::from_reader(name, reader, self.policy).await?;
        self.issue(file)
    }

    /// Parses `salt_hex`, digests `reader` and checks `code`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidSaltFormat`] before reading any input if the
    /// salt is malformed, and propagates digest errors.
    pub async fn verify<R: AsyncRead + Unpin>(&self, name: impl Into<String>, reader: R, code: &str, salt_hex: &str) -> Result<VerificationOutcome> {
        let salt = Salt::parse(salt_hex)?;
        let file = HashedFile::from_reader(name, reader, self.policy).await?;
        self.check(file, code, &salt)
    }

    /// Digests both readers concurrently and compares them.
    ///
    /// # Errors
    ///
    /// Propagates digest errors from either side.
    pub async fn compare_readers<A, B>(&self, first: (String, A), second: (String, B)) -> Result<ComparisonRecord>
    where
        A: AsyncRead + Unpin,
        B: AsyncRead + Unpin,
    {
        let (first, second) = tokio::try_join!(
            HashedFile::from_reader(first.0, first.1, self.policy),
            HashedFile::from_reader(second.0, second.1, self.policy)
        )?;
        self.compare(first, second)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn verifier() -> Verifier {
        Verifier::new(SecretKey::new(b"test-deployment-key").unwrap(), Policy::default())
    }

    #[tokio::test]
    async fn test_generate_record_shape() {
        let record = verifier().generate("hello.txt", &b"hello world"[..]).await.unwrap();
        assert_eq!(record.file_name, "hello.txt");
        assert_eq!(record.file_size, 11);
        assert_eq!(record.sha256, "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9");
        assert_eq!(record.hmac.len(), 64);
        assert_eq!(record.salt.len(), 32);
        assert_eq!(record.verification_code.len(), 16);
        assert!(record.hmac.starts_with(&record.verification_code));
    }

    #[tokio::test]
    async fn test_generate_uses_fresh_salts() {
        let verifier = verifier();
        let a = verifier.generate("a", &b"same"[..]).await.unwrap();
        let b = verifier.generate("a", &b"same"[..]).await.unwrap();
        assert_eq!(a.sha256, b.sha256);
        assert_ne!(a.salt, b.salt);
        assert_ne!(a.verification_code, b.verification_code);
    }

    #[tokio::test]
    async fn test_verify_roundtrip() {
        let verifier = verifier();
        let record = verifier.generate("doc.pdf", &b"contents"[..]).await.unwrap();
        let outcome = verifier.verify("doc.pdf", &b"contents"[..], &record.verification_code, &record.salt).await.unwrap();
        assert!(outcome.matched);
        assert_eq!(outcome.computed_code, record.verification_code);
        assert_eq!(outcome.hmac, record.hmac);
    }

    #[tokio::test]
    async fn test_verify_ignores_name() {
        let verifier = verifier();
        let record = verifier.generate("original.bin", &b"contents"[..]).await.unwrap();
        let outcome = verifier.verify("renamed.bin", &b"contents"[..], &record.verification_code, &record.salt).await.unwrap();
        assert!(outcome.matched);
    }

    #[tokio::test]
    async fn test_verify_trims_pasted_code() {
        let verifier = verifier();
        let record = verifier.generate("a", &b"contents"[..]).await.unwrap();
        let pasted = format!("  {}\n", record.verification_code);
        let outcome = verifier.verify("a", &b"contents"[..], &pasted, &record.salt).await.unwrap();
        assert!(outcome.matched);
    }

    #[tokio::test]
    async fn test_verify_detects_altered_byte() {
        let verifier = verifier();
        let record = verifier.generate("a", &b"contents"[..]).await.unwrap();
        let outcome = verifier.verify("a", &b"contentz"[..], &record.verification_code, &record.salt).await.unwrap();
        assert!(!outcome.matched);
        assert_ne!(outcome.sha256, record.sha256);
    }

    #[tokio::test]
    async fn test_verify_malformed_salt_is_error() {
        let result = verifier().verify("a", &b"contents"[..], "0123456789abcdef", "abc").await;
        assert!(matches!(result, Err(Error::InvalidSaltFormat(_))));
    }

    #[tokio::test]
    async fn test_verify_under_other_key_fails() {
        let record = verifier().generate("a", &b"contents"[..]).await.unwrap();
        let other = Verifier::new(SecretKey::new(b"rotated-key").unwrap(), Policy::default());
        let outcome = other.verify("a", &b"contents"[..], &record.verification_code, &record.salt).await.unwrap();
        assert!(!outcome.matched);
    }

    #[tokio::test]
    async fn test_compare_identical() {
        let record = verifier().compare_readers(("one".into(), &b"same bytes"[..]), ("two".into(), &b"same bytes"[..])).await.unwrap();
        assert!(record.matched);
        assert_eq!(record.file1.sha256, record.file2.sha256);
        assert_eq!(record.file1.name, "one");
        assert_eq!(record.file2.name, "two");
    }

    #[tokio::test]
    async fn test_compare_different() {
        let record = verifier().compare_readers(("one".into(), &b"same bytes"[..]), ("two".into(), &b"other bytes"[..])).await.unwrap();
        assert!(!record.matched);
        assert_ne!(record.file1.sha256, record.file2.sha256);
    }

    #[tokio::test]
    async fn test_compare_oversized_side() {
        let verifier = Verifier::new(SecretKey::new(b"k").unwrap(), Policy::new(4, false));
        let result = verifier.compare_readers(("one".into(), &b"1234"[..]), ("two".into(), &b"12345"[..])).await;
        assert!(matches!(result, Err(Error::InputTooLarge { limit: 4 })));
    }
}
