use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::error::Error;

/// JSON body of a rejected request.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

impl Error {
    /// HTTP status reported for this failure.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::InputTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            Self::InvalidKey(_) | Self::Rng => StatusCode::INTERNAL_SERVER_ERROR,
            Self::EmptyInput | Self::InvalidSaltFormat(_) | Self::UnreadableInput(_) | Self::MissingField(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let message = if self.is_client_error() {
            tracing::warn!(reason = self.reason(), "request rejected: {self}");
            self.to_string()
        } else {
            tracing::error!(reason = self.reason(), "request failed: {self}");
            "internal error".to_owned()
        };

        (self.status(), Json(ErrorBody { error: self.reason(), message })).into_response()
    }
}
