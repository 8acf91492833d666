//! Error taxonomy for the NoteSpace client.
//!
//! The request primitive in [`crate::api`] is the sole place that turns an
//! HTTP status into an error; everything above it only ever sees a typed
//! result or an [`ApiError`] carrying a human-readable message. No error
//! is retried anywhere in this crate.

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Fallback message when an error response carries no usable `detail`.
pub const GENERIC_FAILURE: &str = "Request failed";

/// Fallback message for the login path.
pub(crate) const LOGIN_FAILURE: &str = "Login failed";

/// A failed API operation.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Non-2xx response. `message` is the server's `detail` field when the
    /// body decodes, otherwise a fixed fallback.
    #[error("{message}")]
    Status { status: StatusCode, message: String },

    /// Connection-level failure: unreachable host, DNS, TLS, timeout.
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A 2xx response whose body did not match the expected shape.
    #[error("invalid response body: {0}")]
    Decode(#[source] reqwest::Error),
}

impl ApiError {
    /// HTTP status of the failure, when the server produced one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Conventional error body shape: `{"detail": "..."}`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

/// Extract a human-readable message from an error response.
///
/// Total by construction: a missing body, a non-JSON body, or a JSON body
/// without a string `detail` all collapse to `fallback`. A parse failure
/// never masks the original HTTP failure.
pub(crate) async fn error_message(resp: reqwest::Response, fallback: &str) -> String {
    match resp.json::<ErrorBody>().await {
        Ok(ErrorBody {
            detail: Some(detail),
        }) => detail,
        _ => fallback.to_string(),
    }
}
