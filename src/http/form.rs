//! Streaming multipart intake.
//!
//! File fields are fed to the digest engine chunk by chunk as they arrive, so
//! an upload is never buffered whole and an oversized one is cut off at the
//! ceiling. Expected text fields are read under a small cap and anything else
//! is drained without being stored.

use std::collections::HashMap;
use std::io;

use axum::extract::Multipart;
use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;

use crate::cipher::Hasher;
use crate::config::{Policy, TEXT_FIELD_LIMIT};
use crate::error::{Error, Result};
use crate::verifier::HashedFile;

/// The digested files and text values of one multipart request.
#[derive(Debug, Default)]
pub struct Form {
    files: HashMap<String, HashedFile>,
    text: HashMap<String, String>,
}

impl Form {
    /// Consumes `multipart`, digesting the fields named in `file_fields` and
    /// reading the fields named in `text_fields`.
    ///
    /// A file's display name is its multipart filename, falling back to the
    /// field name. Unnamed and unexpected fields are drained and dropped.
    pub async fn collect(mut multipart: Multipart, policy: Policy, file_fields: &[&str], text_fields: &[&str]) -> Result<Self> {
        let mut form = Self::default();

        while let Some(mut field) = multipart.next_field().await.map_err(|e| read_error(&e, policy))? {
            let name = field.name().map(str::to_owned).unwrap_or_default();

            if file_fields.contains(&name.as_str()) {
                let display_name = field.file_name().map_or_else(|| name.clone(), str::to_owned);
                let mut hasher = Hasher::new(policy);

                while let Some(chunk) = field.chunk().await.map_err(|e| read_error(&e, policy))? {
                    hasher.update(&chunk)?;
                }

                let size = hasher.consumed();
                let file = HashedFile { name: display_name, size, digest: hasher.finalize()? };
                tracing::debug!(field = %name, file = %file.name, size, "upload digested");
                form.files.insert(name, file);
            } else if text_fields.contains(&name.as_str()) {
                let mut value = Vec::new();

                while let Some(chunk) = field.chunk().await.map_err(|e| read_error(&e, policy))? {
                    if value.len() + chunk.len() > TEXT_FIELD_LIMIT {
                        return Err(Error::InputTooLarge { limit: TEXT_FIELD_LIMIT as u64 });
                    }
                    value.extend_from_slice(&chunk);
                }

                let value = String::from_utf8(value).map_err(|e| Error::UnreadableInput(io::Error::new(io::ErrorKind::InvalidData, e)))?;
                form.text.insert(name, value);
            } else {
                let mut skipped = 0usize;
                while let Some(chunk) = field.chunk().await.map_err(|e| read_error(&e, policy))? {
                    skipped += chunk.len();
                }
                tracing::debug!(field = %name, skipped, "ignored multipart field");
            }
        }

        Ok(form)
    }

    /// Removes and returns the digested file of `field`.
    pub fn take_file(&mut self, field: &'static str) -> Result<HashedFile> {
        self.files.remove(field).ok_or(Error::MissingField(field))
    }

    /// The trimmed text value of `field`; blank values count as missing.
    pub fn text(&self, field: &'static str) -> Result<&str> {
        self.text.get(field).map(|value| value.trim()).filter(|value| !value.is_empty()).ok_or(Error::MissingField(field))
    }
}

fn read_error(error: &MultipartError, policy: Policy) -> Error {
    if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
        Error::InputTooLarge { limit: policy.max_size }
    } else {
        Error::UnreadableInput(io::Error::other(error.body_text()))
    }
}
