// Async HTTP client for the storefront CMS REST API.
//
// Base path: /api/v1/
// Auth: `Authorization: Bearer <token>` on every business endpoint;
// branding options and the public storefront are unauthenticated.
//
// Endpoint groups (draft/publish, domains, storefront) are implemented
// as inherent methods in sibling modules to keep this one focused on
// transport mechanics.

use reqwest::header::{AUTHORIZATION, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::form::DraftForm;
use crate::transport::TransportConfig;

const API_PREFIX: &str = "/api/v1";

// ── Error response shape ─────────────────────────────────────────────

#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    detail: Option<String>,
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the storefront CMS backend.
///
/// Holds an opaque bearer token; the client never inspects it. A 401 from
/// any endpoint surfaces as [`Error::Unauthorized`].
pub struct CmsClient {
    http: reqwest::Client,
    base_url: Url,
    token: Option<SecretString>,
}

impl CmsClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from a base URL, optional bearer token, and transport config.
    ///
    /// `base_url` may be the host root (`https://cms.example.com`) or
    /// already include the `/api/v1` prefix.
    pub fn new(
        base_url: &str,
        token: Option<SecretString>,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::from_reqwest(base_url, http, token)
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn from_reqwest(
        base_url: &str,
        http: reqwest::Client,
        token: Option<SecretString>,
    ) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self {
            http,
            base_url,
            token,
        })
    }

    /// Build the base URL with the `/api/v1/` prefix and a trailing slash.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;

        // Strip trailing slash for uniform handling
        let path = url.path().trim_end_matches('/').to_owned();

        if path.ends_with(API_PREFIX) {
            url.set_path(&format!("{path}/"));
        } else {
            url.set_path(&format!("{path}{API_PREFIX}/"));
        }

        Ok(url)
    }

    /// The normalized API base URL (always ends with `/api/v1/`).
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Whether a bearer token is configured.
    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Join a relative path (e.g. `"business/cms/draft"`) onto the base URL.
    pub(crate) fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    // ── Auth ─────────────────────────────────────────────────────────

    /// Attach the bearer token. Without a token the call cannot succeed,
    /// so it fails the same way the server would.
    fn authorize(&self, builder: reqwest::RequestBuilder) -> Result<reqwest::RequestBuilder, Error> {
        let Some(token) = self.token.as_ref() else {
            return Err(Error::Unauthorized);
        };
        let mut value = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
            .map_err(|e| Error::InvalidToken(e.to_string()))?;
        value.set_sensitive(true);
        Ok(builder.header(AUTHORIZATION, value))
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("GET {url}");

        let resp = self.authorize(self.http.get(url))?.send().await?;
        self.handle_response(resp).await
    }

    /// Unauthenticated GET (branding presets, public storefront).
    pub(crate) async fn get_public<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("GET {url} params={params:?}");

        let resp = self.http.get(url).query(params).send().await?;
        self.handle_response(resp).await
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("POST {url}");

        let resp = self.authorize(self.http.post(url).json(body))?.send().await?;
        self.handle_response(resp).await
    }

    /// POST without a request body.
    pub(crate) async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("POST {url}");

        let resp = self.authorize(self.http.post(url))?.send().await?;
        self.handle_response(resp).await
    }

    pub(crate) async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("PUT {url}");

        let resp = self.authorize(self.http.put(url).json(body))?.send().await?;
        self.handle_response(resp).await
    }

    /// PUT a multipart body assembled as a [`DraftForm`].
    pub(crate) async fn put_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: DraftForm,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("PUT {url} (multipart, {} fields)", form.len());

        let multipart = form.into_multipart()?;
        let resp = self
            .authorize(self.http.put(url).multipart(multipart))?
            .send()
            .await?;
        self.handle_response(resp).await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<(), Error> {
        let url = self.url(path)?;
        debug!("DELETE {url}");

        let resp = self.authorize(self.http.delete(url))?.send().await?;
        self.handle_empty(resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            serde_json::from_str(&body).map_err(|e| {
                let preview: String = body.chars().take(200).collect();
                Error::Deserialization {
                    message: format!("{e} (body preview: {preview:?})"),
                    body,
                }
            })
        } else {
            Err(self.parse_error(status, resp).await)
        }
    }

    async fn handle_empty(&self, resp: reqwest::Response) -> Result<(), Error> {
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(self.parse_error(status, resp).await)
        }
    }

    async fn parse_error(&self, status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Error::Unauthorized;
        }

        let raw = resp.text().await.unwrap_or_default();

        let message = serde_json::from_str::<ErrorResponse>(&raw)
            .ok()
            .and_then(|err| err.message.or(err.error).or(err.detail))
            .unwrap_or_else(|| {
                if raw.is_empty() {
                    status.to_string()
                } else {
                    raw.chars().take(200).collect()
                }
            });

        Error::Api {
            status: status.as_u16(),
            message,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn base_url_gains_api_prefix() {
        let url = CmsClient::normalize_base_url("https://cms.example.com").unwrap();
        assert_eq!(url.as_str(), "https://cms.example.com/api/v1/");
    }

    #[test]
    fn base_url_keeps_existing_prefix() {
        let url = CmsClient::normalize_base_url("https://cms.example.com/api/v1/").unwrap();
        assert_eq!(url.as_str(), "https://cms.example.com/api/v1/");
    }

    #[test]
    fn paths_join_under_prefix() {
        let client = CmsClient::from_reqwest(
            "http://localhost:8080/backend",
            reqwest::Client::new(),
            None,
        )
        .unwrap();
        assert_eq!(
            client.url("/business/cms/draft").unwrap().as_str(),
            "http://localhost:8080/backend/api/v1/business/cms/draft"
        );
        assert!(!client.has_token());
    }
}
