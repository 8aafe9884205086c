use std::io;

use bytesize::ByteSize;

/// Failures of the verification core.
///
/// Every variant is a rejected operation. A code or digest that simply does
/// not match is reported through `match: false`, never through this type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("input exceeds the {} limit", ByteSize::b(*limit))]
    InputTooLarge { limit: u64 },

    #[error("input is empty")]
    EmptyInput,

    #[error("invalid salt format: {0}")]
    InvalidSaltFormat(&'static str),

    #[error("unreadable input: {0}")]
    UnreadableInput(#[from] io::Error),

    #[error("missing field: {0}")]
    MissingField(&'static str),

    #[error("invalid secret key: {0}")]
    InvalidKey(&'static str),

    #[error("random source unavailable")]
    Rng,
}

impl Error {
    /// Stable identifier of the failure category.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::InputTooLarge { .. } => "input_too_large",
            Self::EmptyInput => "empty_input",
            Self::InvalidSaltFormat(_) => "invalid_salt_format",
            Self::UnreadableInput(_) => "unreadable_input",
            Self::MissingField(_) => "missing_field",
            Self::InvalidKey(_) => "invalid_key",
            Self::Rng => "rng_failure",
        }
    }

    /// True when the caller supplied something unacceptable, false for server faults.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        !matches!(self, Self::InvalidKey(_) | Self::Rng)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
