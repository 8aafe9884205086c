use rand::TryRngCore;
use rand::rngs::OsRng;
use secrecy::{ExposeSecret, SecretBox};

use crate::error::{Error, Result};

/// Length of a key generated when no key is configured.
const GENERATED_KEY_LEN: usize = 32;

/// Process-wide HMAC key.
///
/// Never printed: the `Debug` form only reveals the key length.
pub struct SecretKey {
    inner: SecretBox<Vec<u8>>,
}

impl SecretKey {
    pub fn new(key: &[u8]) -> Result<Self> {
        Self::from_vec(key.to_vec())
    }

    pub fn from_vec(key: Vec<u8>) -> Result<Self> {
        if key.is_empty() {
            return Err(Error::InvalidKey("key cannot be empty"));
        }

        Ok(Self { inner: SecretBox::new(Box::new(key)) })
    }

    /// Uses the UTF-8 bytes of `key` as key material.
    pub fn from_string(key: String) -> Result<Self> {
        Self::from_vec(key.into_bytes())
    }

    /// Random key valid for the lifetime of the process.
    pub fn generate() -> Result<Self> {
        let mut key = vec![0u8; GENERATED_KEY_LEN];
        OsRng.try_fill_bytes(&mut key).map_err(|_| Error::Rng)?;
        Self::from_vec(key)
    }

    pub fn expose_secret(&self) -> &[u8] {
        self.inner.expose_secret()
    }
}

impl std::fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SecretKey([... {} bytes ...])", self.inner.expose_secret().len())
    }
}
