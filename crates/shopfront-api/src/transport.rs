// HTTP client construction shared by the authenticated and public clients.

use std::path::PathBuf;
use std::time::Duration;

use reqwest::ClientBuilder;

use crate::error::Error;

/// How the backend certificate is checked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsMode {
    #[default]
    System,
    /// Trust the PEM bundle at this path in addition to the system store.
    CustomCa(PathBuf),
    /// Skip verification. Staging backends with self-signed certs only.
    DangerAcceptInvalid,
}

impl TlsMode {
    fn apply(&self, builder: ClientBuilder) -> Result<ClientBuilder, Error> {
        match self {
            Self::System => Ok(builder),
            Self::CustomCa(path) => {
                let pem = std::fs::read(path).map_err(|e| {
                    Error::Tls(format!("cannot read CA bundle {}: {e}", path.display()))
                })?;
                let cert = reqwest::Certificate::from_pem(&pem)
                    .map_err(|e| Error::Tls(format!("invalid CA bundle {}: {e}", path.display())))?;
                Ok(builder.add_root_certificate(cert))
            }
            Self::DangerAcceptInvalid => Ok(builder.danger_accept_invalid_certs(true)),
        }
    }
}

/// TLS mode and request timeout for one CMS backend.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub tls: TlsMode,
    pub timeout: Duration,
}

impl TransportConfig {
    pub fn new(tls: TlsMode, timeout: Duration) -> Self {
        Self { tls, timeout }
    }

    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        let builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("shopfront/", env!("CARGO_PKG_VERSION")));

        self.tls
            .apply(builder)?
            .build()
            .map_err(|e| Error::Tls(format!("failed to build HTTP client: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_ca_bundle_is_a_tls_error() {
        let transport = TransportConfig::new(
            TlsMode::CustomCa(PathBuf::from("/nonexistent/shopfront-ca.pem")),
            Duration::from_secs(5),
        );
        match transport.build_client() {
            Err(Error::Tls(msg)) => assert!(msg.contains("shopfront-ca.pem"), "{msg}"),
            other => panic!("expected Tls error, got {other:?}"),
        }
    }

    #[test]
    fn system_mode_builds() {
        let transport = TransportConfig::new(TlsMode::System, Duration::from_secs(5));
        assert!(transport.build_client().is_ok());
    }
}
