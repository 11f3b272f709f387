use thiserror::Error;

/// Top-level error type for the `shopfront-api` crate.
///
/// Covers every failure mode of the CMS REST surface: authentication,
/// transport, structured API rejections, and response decoding.
/// `shopfront-core` maps these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// The backend answered HTTP 401. The bearer token is missing,
    /// expired, or revoked; the only recovery is re-authentication.
    #[error("Unauthorized -- re-authentication required")]
    Unauthorized,

    /// The token could not be turned into an `Authorization` header.
    #[error("Invalid bearer token: {0}")]
    InvalidToken(String),

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS handshake or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── API ─────────────────────────────────────────────────────────
    /// Non-2xx response from the backend, with the server's message when
    /// the body carried one.
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    /// A multipart part could not be built (bad MIME type, etc.)
    #[error("Invalid multipart part '{field}': {reason}")]
    InvalidPart { field: String, reason: String },

    /// A form field that should hold a JSON operations list did not.
    #[error("Malformed form field '{field}': {reason}")]
    MalformedField { field: String, reason: String },
}

impl Error {
    /// Returns `true` if the session must be torn down.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_401_tears_down() {
        assert!(Error::Unauthorized.is_unauthorized());
        let err = Error::Api {
            status: 403,
            message: "forbidden".into(),
        };
        assert!(!err.is_unauthorized());
    }
}
