//! Common type definitions for Vericode.
//!
//! Provides the fixed-size cryptographic values exchanged between sender and
//! receiver, and the records returned by each operation.
//!
//! # Overview
//!
//! - [`Digest`]: SHA-256 fingerprint of a file's bytes
//! - [`Salt`]: Per-file random value mixed into the authentication code
//! - [`AuthCode`]: HMAC-SHA-256 tag whose prefix is the verification code
//! - [`Operation`]: The three request kinds
//! - [`VerificationRecord`], [`VerificationOutcome`], [`ComparisonRecord`]: Operation results

use std::fmt::{Display, Formatter, Result as FmtResult};

use rand::TryRngCore;
use rand::rngs::OsRng;
use serde::Serialize;
use strum::{AsRefStr, Display as StrumDisplay};

use crate::config::{CODE_LENGTH, HASH_SIZE, MAC_SIZE, SALT_SIZE};
use crate::error::{Error, Result};

/// The three stateless operations offered to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, StrumDisplay, AsRefStr)]
#[strum(serialize_all = "kebab-case")]
pub enum Operation {
    /// Sender side: derive a code and salt from a file.
    GenerateCode,

    /// Receiver side: recompute the code with the sender's salt and compare.
    VerifyCode,

    /// Direct comparison of two files.
    CompareFiles,
}

impl Operation {
    /// Returns a human-readable label for the operation.
    #[inline]
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::GenerateCode => "Generate Verification Code",
            Self::VerifyCode => "Verify File Integrity",
            Self::CompareFiles => "Compare Files",
        }
    }
}

/// A SHA-256 digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Digest([u8; HASH_SIZE]);

impl Digest {
    #[inline]
    #[must_use]
    pub const fn from_bytes(bytes: [u8; HASH_SIZE]) -> Self {
        Self(bytes)
    }

    #[inline]
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; HASH_SIZE] {
        &self.0
    }

    /// Lowercase hex rendering, 64 characters.
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl Display for Digest {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.to_hex())
    }
}

/// A 16-byte salt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Salt([u8; SALT_SIZE]);

impl Salt {
    /// Draws a fresh salt from the operating system CSPRNG.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Rng`] if the random source is unavailable.
    pub fn generate() -> Result<Self> {
        let mut bytes = [0u8; SALT_SIZE];
        OsRng.try_fill_bytes(&mut bytes).map_err(|_| Error::Rng)?;
        Ok(Self(bytes))
    }

    /// Parses a salt supplied by the receiver.
    ///
    /// Surrounding whitespace is ignored; hex digits may be either case.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSaltFormat`] unless the input is exactly
    /// 32 hexadecimal characters.
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        if input.len() % 2 != 0 {
            return Err(Error::InvalidSaltFormat("odd number of hex characters"));
        }
        if input.len() != SALT_SIZE * 2 {
            return Err(Error::InvalidSaltFormat("expected 32 hex characters"));
        }

        let mut bytes = [0u8; SALT_SIZE];
        hex::decode_to_slice(input, &mut bytes).map_err(|_| Error::InvalidSaltFormat("not hexadecimal"))?;

        Ok(Self(bytes))
    }

    #[inline]
    #[must_use]
    pub const fn from_bytes(bytes: [u8; SALT_SIZE]) -> Self {
        Self(bytes)
    }

    #[inline]
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; SALT_SIZE] {
        &self.0
    }

    /// Lowercase hex rendering, 32 characters.
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

/// An HMAC-SHA-256 tag over a digest and a salt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthCode([u8; MAC_SIZE]);

impl AuthCode {
    #[inline]
    #[must_use]
    pub const fn from_bytes(bytes: [u8; MAC_SIZE]) -> Self {
        Self(bytes)
    }

    /// Lowercase hex rendering, 64 characters.
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// The first [`CODE_LENGTH`] hex characters of the tag.
    #[must_use]
    pub fn verification_code(&self) -> String {
        hex::encode(&self.0[..CODE_LENGTH / 2])
    }
}

/// Sender-side result of the generate operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationRecord {
    pub file_name: String,
    pub file_size: u64,
    pub sha256: String,
    pub hmac: String,
    pub salt: String,
    pub verification_code: String,
}

/// Receiver-side result of the verify operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationOutcome {
    pub file_name: String,
    pub file_size: u64,
    #[serde(rename = "match")]
    pub matched: bool,
    pub computed_code: String,
    pub sha256: String,
    pub hmac: String,
}

/// One side of a comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileFingerprint {
    pub name: String,
    pub sha256: String,
    pub hmac: String,
}

/// Result of comparing two files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonRecord {
    #[serde(rename = "match")]
    pub matched: bool,
    pub file1: FileFingerprint,
    pub file2: FileFingerprint,
}
