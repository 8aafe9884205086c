//! Local File Input
//!
//! This module opens files named on the command line for hashing. The size
//! ceiling is checked against filesystem metadata before a single byte is read,
//! so an oversized file is rejected without streaming it.
//!
//! Only the final path component is ever reported as the file name, matching
//! what a browser upload would send.

use std::path::{Path, PathBuf};

use tokio::fs;

use crate::config::Policy;
use crate::error::{Error, Result};

/// A file selected for hashing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
    /// The path as given by the user.
    path: PathBuf,
}

impl File {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The final path component, or the whole path if it has none.
    pub fn name(&self) -> String {
        self.path.file_name().map_or_else(|| self.path.display().to_string(), |name| name.to_string_lossy().into_owned())
    }

    /// Opens the file for streaming after validating it against `policy`.
    ///
    /// Returns the open handle and its size in bytes.
    ///
    /// # Errors
    ///
    /// - [`Error::UnreadableInput`] if the path is missing, is a directory, or cannot be opened
    /// - [`Error::InputTooLarge`] if the file exceeds the ceiling
    /// - [`Error::EmptyInput`] if the file is empty and the policy rejects empty inputs
    pub async fn open(&self, policy: Policy) -> Result<(fs::File, u64)> {
        let meta = fs::metadata(&self.path).await?;

        if meta.is_dir() {
            return Err(Error::UnreadableInput(std::io::Error::other(format!("path is a directory: {}", self.path.display()))));
        }

        let size = meta.len();
        if size > policy.max_size {
            return Err(Error::InputTooLarge { limit: policy.max_size });
        }
        if size == 0 && policy.reject_empty {
            return Err(Error::EmptyInput);
        }

        let file = fs::File::open(&self.path).await?;
        Ok((file, size))
    }
}
