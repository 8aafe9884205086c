//! Global Configuration Constants
//!
//! This module contains the parameters used throughout Vericode: sizes of the
//! cryptographic values exchanged between sender and receiver, the upload ceiling,
//! streaming buffer sizes and service defaults.
//!
//! ## Design Philosophy
//!
//! - **Fixed wire format**: Hash, salt and code lengths are part of the protocol
//!   shared by both parties and never change at runtime
//! - **Bounded resources**: Every upload is capped and hashed in fixed-size chunks
//! - **Runtime overrides**: Only deployment concerns (ceiling, key, bind address)
//!   are adjustable, through [`Policy`] and the command line
//!
//! ## Security Considerations
//!
//! - Salts are 128 bits, drawn from the operating system CSPRNG
//! - The verification code keeps 64 bits of the HMAC-SHA-256 tag

/// Application name used in reports and terminal output
pub const APP_NAME: &str = "Vericode";

// === Protocol Sizes ===
// These values are shared by sender and receiver. Changing any of them
// invalidates every code issued before the change.

/// Size of the primary hash digest in bytes
///
/// 32 bytes (256 bits) for SHA-256, rendered as 64 lowercase hex characters.
pub const HASH_SIZE: usize = 32;

/// Size of the HMAC-SHA-256 authentication tag in bytes
pub const MAC_SIZE: usize = 32;

/// Length of the per-file salt in bytes
///
/// 16 bytes provides 128 bits of randomness, rendered as 32 hex characters.
/// Salts are not secret and travel alongside the verification code.
pub const SALT_SIZE: usize = 16;

/// Number of hex characters of the authentication tag kept as the verification code
///
/// 16 characters (64 bits) is short enough to read over the phone while making
/// a blind guess impractical.
pub const CODE_LENGTH: usize = 16;

// === Resource Limits ===

/// Largest accepted input in bytes (50 MiB)
///
/// A file of exactly this size is accepted; one byte more is rejected with
/// [`crate::Error::InputTooLarge`].
pub const MAX_FILE_SIZE: u64 = 50 * 1024 * 1024;

/// Chunk size for streaming digest computation
///
/// 256KB chunks keep peak memory per upload small and constant while keeping
/// the number of read calls low for large files.
pub const CHUNK_SIZE: usize = 256 * 1024;

/// Largest accepted text field (`code`, `salt`) in a multipart request
pub const TEXT_FIELD_LIMIT: usize = 256;

/// Allowance for multipart boundaries, headers and text fields on top of file bytes
pub const MULTIPART_OVERHEAD: u64 = 1024 * 1024;

// === Service Defaults ===

/// Default listen address of the HTTP service
pub const DEFAULT_BIND: &str = "127.0.0.1:3001";

/// File name suggested to browsers when downloading the integrity report
pub const REPORT_FILE_NAME: &str = "Integrity_Report.txt";

/// Runtime digest policy.
///
/// Carries the deployment-adjustable parts of input validation into the
/// digest engine. The default accepts empty inputs up to [`MAX_FILE_SIZE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Policy {
    /// Largest accepted input in bytes.
    pub max_size: u64,

    /// Rejects zero-length inputs with [`crate::Error::EmptyInput`] when set.
    pub reject_empty: bool,
}

impl Policy {
    /// Creates a policy with the given ceiling.
    #[inline]
    #[must_use]
    pub const fn new(max_size: u64, reject_empty: bool) -> Self {
        Self { max_size, reject_empty }
    }

    /// Request body limit for a multipart upload carrying `files` files.
    #[must_use]
    pub fn body_limit(&self, files: u64) -> usize {
        let limit = self.max_size.saturating_mul(files).saturating_add(MULTIPART_OVERHEAD);
        usize::try_from(limit).unwrap_or(usize::MAX)
    }
}

impl Default for Policy {
    fn default() -> Self {
        Self::new(MAX_FILE_SIZE, false)
    }
}
