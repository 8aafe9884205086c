//! # Cryptographic Operations Module
//!
//! This module provides the three primitives of the verification-code protocol.
//!
//! ## Architecture
//!
//! - **Digest Engine** ([`Hasher`]): incremental SHA-256 of file content with a size ceiling
//! - **Code Deriver** ([`Mac`]): HMAC-SHA-256 over the hex digest and a salt, keyed with
//!   the process-wide secret
//! - **Comparator** ([`codes_match`], [`digests_match`]): constant-time code comparison
//!   and digest equality
//!
//! ## Security Guarantees
//!
//! - SHA-256: collision-resistant fingerprint of the full content
//! - HMAC-SHA-256: codes cannot be forged without the secret key
//! - Salts come from the operating system CSPRNG
//! - Code comparison does not leak the position of a mismatch through timing

mod compare;
mod hash;
mod mac;

pub use compare::{codes_match, digests_match};
pub use hash::Hasher;
pub use mac::Mac;
