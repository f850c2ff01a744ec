use thiserror::Error;

/// Top-level error type for the `seriph-api` crate.
///
/// Every failure of a remote operation surfaces as one of these variants.
/// `seriph-core` folds them into a single "request failed" shape for
/// controller state.
#[derive(Debug, Error)]
pub enum Error {
    // ── Input ───────────────────────────────────────────────────────
    /// A required field was missing or malformed. Raised before any
    /// request is sent.
    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    /// URL parsing error (bad endpoint).
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error from reqwest (connection refused, DNS, timeout).
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Network failure reported by a non-reqwest transport.
    #[error("Network error: {0}")]
    Network(String),

    // ── Remote ──────────────────────────────────────────────────────
    /// Non-2xx response from the Seriph API.
    #[error("Seriph API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    pub(crate) fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }

    /// HTTP status code of the failed request, if the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns `true` if the server reported the resource as missing.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Returns `true` if the error was raised before any request was sent.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. } | Self::InvalidUrl(_))
    }
}
