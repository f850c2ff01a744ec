// ── Core error types ──
//
// What controllers store in state and hand back to callers. Consumers
// branch on `RequestFailed` vs `Validation`; raw transport detail is
// folded into the message. `Clone` so the same value can sit in the
// state snapshot and travel back through the action's `Result`.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// A required field was missing or malformed; nothing was sent.
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    /// The request was sent (or attempted) and did not yield a valid payload:
    /// network failure, non-2xx status, or malformed JSON.
    #[error("Request failed: {message}")]
    RequestFailed {
        /// HTTP status code, when the server answered.
        status: Option<u16>,
        message: String,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    /// HTTP status code of the failed request, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RequestFailed { status, .. } => *status,
            _ => None,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<seriph_api::Error> for CoreError {
    fn from(err: seriph_api::Error) -> Self {
        match err {
            seriph_api::Error::Validation { field, reason } => CoreError::Validation {
                field: field.to_owned(),
                reason,
            },
            seriph_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            seriph_api::Error::Transport(ref e) => CoreError::RequestFailed {
                status: e.status().map(|s| s.as_u16()),
                message: e.to_string(),
            },
            seriph_api::Error::Network(message) => CoreError::RequestFailed {
                status: None,
                message,
            },
            seriph_api::Error::Api { status, message } => CoreError::RequestFailed {
                status: Some(status),
                message,
            },
            seriph_api::Error::Deserialization { message, body: _ } => CoreError::RequestFailed {
                status: None,
                message: format!("malformed response: {message}"),
            },
        }
    }
}
