// ── Runtime editor configuration ──
//
// Describes *where* the CMS backend lives and how to reach it. Never
// touches disk; the CLI builds an `EditorConfig` from its profile and
// hands it in. The bearer token travels separately in `Session`.

use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use shopfront_api::{TlsMode, TransportConfig};

/// Default platform domain that bare storefront names resolve under.
pub const DEFAULT_STOREFRONT_SUFFIX: &str = "nerdplatform.com";

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification (staging backends with self-signed certs).
    DangerAcceptInvalid,
}

/// Configuration for talking to one CMS backend.
#[derive(Debug, Clone)]
pub struct EditorConfig {
    /// Backend URL (e.g. `https://cms.example.com`). The `/api/v1` prefix
    /// is added by the client when missing.
    pub url: Url,
    /// TLS verification strategy.
    pub tls: TlsVerification,
    /// Request timeout.
    pub timeout: Duration,
    /// Domain that bare storefront names and subdomains resolve under.
    pub storefront_suffix: String,
}

impl EditorConfig {
    pub fn new(url: Url) -> Self {
        Self {
            url,
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
            storefront_suffix: DEFAULT_STOREFRONT_SUFFIX.into(),
        }
    }

    pub(crate) fn transport(&self) -> TransportConfig {
        let tls = match &self.tls {
            TlsVerification::SystemDefaults => TlsMode::System,
            TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
        };
        TransportConfig::new(tls, self.timeout)
    }
}
