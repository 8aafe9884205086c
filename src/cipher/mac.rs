//! HMAC-SHA256 derivation of verification codes.
//!
//! The message authenticated is the lowercase hex text of the file digest
//! followed by the raw salt bytes. Sender and receiver must agree on this
//! exact layout; any other ordering silently breaks every verification.
//!
//! # Security Properties
//!
//! - **Keyed**: Only the service holding the secret key can issue or check codes
//! - **Salted**: The same file yields a different code for every salt
//! - **Content-only**: File name, size and time never enter the computation

use hmac::{Hmac, Mac as _};
use sha2::Sha256;

use crate::config::MAC_SIZE;
use crate::error::{Error, Result};
use crate::secret::SecretKey;
use crate::types::{AuthCode, Digest, Salt};

/// HMAC-SHA256 code deriver bound to the process-wide key.
pub struct Mac {
    /// The key for HMAC computation.
    key: SecretKey,
}

impl Mac {
    #[must_use]
    pub const fn new(key: SecretKey) -> Self {
        Self { key }
    }

    /// Computes the HMAC-SHA256 of the concatenation of `parts`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HMAC instance cannot be keyed.
    pub fn compute_parts(&self, parts: &[&[u8]]) -> Result<[u8; MAC_SIZE]> {
        let mut mac = Hmac::<Sha256>::new_from_slice(self.key.expose_secret()).map_err(|_| Error::InvalidKey("key rejected by hmac"))?;

        parts.iter().for_each(|part| mac.update(part));

        Ok(mac.finalize().into_bytes().into())
    }

    /// Derives the authentication code of `digest` under `salt`.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`Mac::compute_parts`].
    pub fn derive(&self, digest: &Digest, salt: &Salt) -> Result<AuthCode> {
        let digest_hex = digest.to_hex();
        let tag = self.compute_parts(&[digest_hex.as_bytes(), salt.as_bytes()])?;
        Ok(AuthCode::from_bytes(tag))
    }

    /// Derives the authentication code from the hex renderings used on the wire.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSaltFormat`] if `salt_hex` is malformed.
    pub fn derive_hex(&self, digest_hex: &str, salt_hex: &str) -> Result<AuthCode> {
        let salt = Salt::parse(salt_hex)?;
        let tag = self.compute_parts(&[digest_hex.as_bytes(), salt.as_bytes()])?;
        Ok(AuthCode::from_bytes(tag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Policy;
    use crate::cipher::Hasher;

    fn mac(key: &[u8]) -> Mac {
        Mac::new(SecretKey::new(key).unwrap())
    }

    fn digest(data: &[u8]) -> Digest {
        Hasher::digest(data, Policy::default()).unwrap()
    }

    #[test]
    fn test_rfc4231_case_2() {
        let mac = mac(b"Jefe");
        let tag = mac.compute_parts(&[b"what do ya want ", b"for nothing?"]).unwrap();
        assert_eq!(hex::encode(tag), "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843");
    }

    #[test]
    fn test_message_is_hex_digest_then_salt() {
        let mac = mac(b"deployment-key");
        let digest = digest(b"payload");
        let salt = Salt::from_bytes([9u8; 16]);

        let mut message = digest.to_hex().into_bytes();
        message.extend_from_slice(salt.as_bytes());
        let expected = mac.compute_parts(&[&message]).unwrap();

        assert_eq!(mac.derive(&digest, &salt).unwrap(), AuthCode::from_bytes(expected));
    }

    #[test]
    fn test_derive_deterministic() {
        let mac = mac(b"deployment-key");
        let digest = digest(b"payload");
        let salt = Salt::from_bytes([1u8; 16]);
        let a = mac.derive(&digest, &salt).unwrap();
        let b = mac.derive(&digest, &salt).unwrap();
        assert_eq!(a.verification_code(), b.verification_code());
        assert_eq!(a.to_hex(), b.to_hex());
    }

    #[test]
    fn test_salt_changes_code() {
        let mac = mac(b"deployment-key");
        let digest = digest(b"payload");
        let a = mac.derive(&digest, &Salt::from_bytes([1u8; 16])).unwrap();
        let b = mac.derive(&digest, &Salt::from_bytes([2u8; 16])).unwrap();
        assert_ne!(a.verification_code(), b.verification_code());
    }

    #[test]
    fn test_key_changes_code() {
        let digest = digest(b"payload");
        let salt = Salt::from_bytes([1u8; 16]);
        let a = mac(b"key-one").derive(&digest, &salt).unwrap();
        let b = mac(b"key-two").derive(&digest, &salt).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_derive_hex_matches_derive() {
        let mac = mac(b"deployment-key");
        let digest = digest(b"payload");
        let salt = Salt::generate().unwrap();
        let from_hex = mac.derive_hex(&digest.to_hex(), &salt.to_hex()).unwrap();
        assert_eq!(from_hex, mac.derive(&digest, &salt).unwrap());
    }

    #[test]
    fn test_derive_hex_rejects_bad_salt() {
        let mac = mac(b"deployment-key");
        let result = mac.derive_hex(&digest(b"payload").to_hex(), "12345");
        assert!(matches!(result, Err(Error::InvalidSaltFormat(_))));
    }

    #[test]
    fn test_code_and_tag_lengths() {
        let code = mac(b"k").derive(&digest(b""), &Salt::from_bytes([0u8; 16])).unwrap();
        assert_eq!(code.to_hex().len(), 64);
        assert_eq!(code.verification_code().len(), 16);
        assert!(code.to_hex().chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }
}
