//! Vericode - File integrity verification codes.
//!
//! Lets a sender and a receiver confirm that a file crossed an untrusted
//! channel unaltered, by exchanging a short code instead of the file itself:
//! - SHA-256 for the content fingerprint
//! - HMAC-SHA-256 over the fingerprint and a random salt for the code
//! - Constant-time comparison on the receiving side
//!
//! The same operations are served over HTTP for the browser client and from
//! the command line.

pub mod app;
pub mod cipher;
pub mod config;
pub mod error;
pub mod file;
pub mod http;
pub mod report;
pub mod secret;
pub mod types;
pub mod ui;
pub mod verifier;

pub use error::{Error, Result};
pub use verifier::{HashedFile, Verifier};
