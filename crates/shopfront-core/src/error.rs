// ── Core error types ──
//
// User-facing errors from shopfront-core. Consumers never see raw HTTP
// status codes or JSON decode failures; the `From<shopfront_api::Error>`
// impl translates transport-layer errors into domain variants.
//
// Partial save failures are NOT errors: they are reported through
// `SaveReport` and the per-group markers on the editor.

use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Session ──────────────────────────────────────────────────────
    /// The token was rejected. The session has been torn down; the only
    /// way forward is a new token.
    #[error("Session expired or token rejected -- sign in again")]
    Unauthorized,

    // ── Local validation (no request was sent) ───────────────────────
    #[error("{field}: {message}")]
    Validation { field: String, message: String },

    #[error("No changes to save")]
    NothingToSave,

    #[error("Draft has not been loaded")]
    NotLoaded,

    #[error("Cannot add more {what}: limit is {limit}")]
    LimitReached { what: &'static str, limit: usize },

    #[error("No {what} at position {position} (have {len})")]
    IndexOutOfRange {
        what: &'static str,
        position: usize,
        len: usize,
    },

    #[error("Cannot read {path}: {reason}")]
    FileRead { path: PathBuf, reason: String },

    #[error("Unsupported image type: {path} (expected jpeg, png, gif, webp or svg)")]
    UnsupportedImage { path: PathBuf },

    // ── Publish ──────────────────────────────────────────────────────
    #[error("Publish rejected: {message}")]
    PublishRejected { message: String },

    // ── Save follow-up ───────────────────────────────────────────────
    /// The save went through but the fresh draft could not be fetched.
    /// Editable state has been dropped; reload before editing again.
    #[error("Draft saved, but reloading it failed: {reason}")]
    ReloadFailed { reason: String },

    // ── Transport / server ───────────────────────────────────────────
    #[error("Cannot connect to {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Request timed out")]
    Timeout,

    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal ─────────────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    pub(crate) fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized => Some(401),
            Self::Api { status, .. } => *status,
            _ => None,
        }
    }

    /// Returns `true` when nothing was sent to the server.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Self::Validation { .. }
                | Self::NothingToSave
                | Self::NotLoaded
                | Self::LimitReached { .. }
                | Self::IndexOutOfRange { .. }
                | Self::FileRead { .. }
                | Self::UnsupportedImage { .. }
        )
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<shopfront_api::Error> for CoreError {
    fn from(err: shopfront_api::Error) -> Self {
        match err {
            shopfront_api::Error::Unauthorized => CoreError::Unauthorized,
            shopfront_api::Error::InvalidToken(reason) => CoreError::Config {
                message: format!("Token cannot be sent as a header: {reason}"),
            },
            shopfront_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            shopfront_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            shopfront_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            shopfront_api::Error::Api { status, message } => CoreError::Api {
                message,
                status: Some(status),
            },
            shopfront_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Unexpected response: {message}"))
            }
            shopfront_api::Error::InvalidPart { field, reason }
            | shopfront_api::Error::MalformedField { field, reason } => {
                CoreError::validation(field, reason)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_unauthorized_maps_to_core_unauthorized() {
        let err = CoreError::from(shopfront_api::Error::Unauthorized);
        assert!(matches!(err, CoreError::Unauthorized));
        assert_eq!(err.status(), Some(401));
    }

    #[test]
    fn api_rejection_keeps_status_and_message() {
        let err = CoreError::from(shopfront_api::Error::Api {
            status: 422,
            message: "bad input".into(),
        });
        assert_eq!(err.status(), Some(422));
        assert_eq!(err.to_string(), "API error: bad input");
        assert!(!err.is_local());
    }

    #[test]
    fn validation_is_local() {
        let err = CoreError::validation("banners[0].desktop", "required");
        assert!(err.is_local());
        assert_eq!(err.to_string(), "banners[0].desktop: required");
    }
}
