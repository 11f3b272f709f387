// Wire types for the storefront CMS REST API.
//
// These mirror the JSON the backend produces. Every optional field is
// `#[serde(default)]` because the backend omits sections that have never
// been configured, and sends explicit `null` for cleared values.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Treat an explicit JSON `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ── Response envelopes ──────────────────────────────────────────────

/// Some endpoints wrap their payload as `{"data": ...}`, others return it
/// bare. Callers never care which.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Envelope<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> Envelope<T> {
    pub fn into_inner(self) -> T {
        match self {
            Self::Wrapped { data } | Self::Bare(data) => data,
        }
    }
}

/// List payloads come either paginated (`{"data": [...], "total": n}`)
/// or as a plain array.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ListPayload<T> {
    Paged {
        data: Vec<T>,
        #[serde(default)]
        total: Option<u64>,
    },
    Bare(Vec<T>),
}

impl<T> ListPayload<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::Paged { data, .. } | Self::Bare(data) => data,
        }
    }
}

// ── Draft aggregate ─────────────────────────────────────────────────

/// `GET /business/cms/draft`: every editable group in one document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DraftResponse {
    #[serde(default)]
    pub logo: Option<ImageResponse>,
    #[serde(default)]
    pub info: Option<BusinessInfoResponse>,
    #[serde(default)]
    pub branding: Option<BrandingResponse>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub banners: Vec<BannerResponse>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub banner_footers: Vec<BannerFooterResponse>,
    #[serde(default)]
    pub seo: Option<SeoResponse>,
    #[serde(default)]
    pub line_contact: Option<LineContactResponse>,
    #[serde(default)]
    pub facebook_page: Option<FacebookPageResponse>,
    #[serde(default)]
    pub subdomain: Option<SubdomainResponse>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub domains: Vec<DomainResponse>,
}

/// A stored image reference (logo, favicon).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImageResponse {
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BusinessInfoResponse {
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BrandingResponse {
    #[serde(default)]
    pub theme: Option<ThemeResponse>,
    #[serde(default)]
    pub favicon: Option<ImageResponse>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThemeResponse {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub primary_color: Option<String>,
    #[serde(default)]
    pub secondary_color: Option<String>,
    #[serde(default)]
    pub font_family: Option<String>,
}

/// One banner row. Banner footers share the same shape and additionally
/// carry `title` / `description`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BannerResponse {
    pub id: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub mobile_url: Option<String>,
    #[serde(default)]
    pub link_url: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub sequence: Option<i32>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub original_name: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

pub type BannerFooterResponse = BannerResponse;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeoResponse {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LineContactResponse {
    #[serde(default)]
    pub line_url: Option<String>,
    #[serde(default)]
    pub enabled: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FacebookPageResponse {
    #[serde(default)]
    pub page_url: Option<String>,
    #[serde(default)]
    pub enabled: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubdomainResponse {
    #[serde(default)]
    pub subdomain: Option<String>,
    /// Platform domain the subdomain lives under (e.g. `nerdplatform.com`).
    #[serde(default)]
    pub base_domain: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainResponse {
    pub id: String,
    pub domain_name: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub is_verified: Option<bool>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

// ── Save / publish ──────────────────────────────────────────────────

/// `PUT /business/cms/draft` result.
///
/// The backend reports failures two ways: a flat `errors` map
/// (`{"errors": {"banners": "..."}}`) and per-group result objects
/// (`{"banners": {"error": "..."}}`). Both are folded together by
/// [`group_errors`](Self::group_errors).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SaveDraftResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub errors: BTreeMap<String, String>,
    #[serde(flatten)]
    pub groups: BTreeMap<String, serde_json::Value>,
}

impl SaveDraftResponse {
    /// Every failed group with its error message, keyed by wire name.
    pub fn group_errors(&self) -> BTreeMap<String, String> {
        let mut out = self.errors.clone();
        for (group, result) in &self.groups {
            if let Some(message) = result.get("error").and_then(serde_json::Value::as_str) {
                out.entry(group.clone())
                    .or_insert_with(|| message.to_owned());
            }
        }
        out
    }
}

/// `POST /business/cms/publish` result.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PublishResponse {
    #[serde(default)]
    pub version: Option<u64>,
    #[serde(default)]
    pub message: Option<String>,
}

/// `GET /business/cms/status`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PublishStatus {
    #[serde(default)]
    pub has_unpublished_changes: bool,
    #[serde(default)]
    pub last_published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_published_version: Option<u64>,
}

// ── Branding presets ────────────────────────────────────────────────

/// `GET /business/branding/options` (unauthenticated).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BrandingOptions {
    #[serde(default)]
    pub primary_colors: Vec<String>,
    #[serde(default)]
    pub secondary_colors: Vec<String>,
    #[serde(default)]
    pub fonts: Vec<String>,
}

// ── Standalone domain endpoints ─────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct CreateDomainRequest {
    pub domain_name: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateDomainRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateSubdomainRequest {
    pub subdomain: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubdomainAvailability {
    #[serde(default)]
    pub available: bool,
}

// ── Public storefront ───────────────────────────────────────────────

/// `GET /public/storefront?domain=`: what a visitor of `domain` sees.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorefrontData {
    #[serde(default)]
    pub business_profile_id: Option<String>,
    #[serde(default)]
    pub logo: Option<StorefrontLogo>,
    #[serde(default)]
    pub favicon: Option<StorefrontImage>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub banners: Vec<StorefrontBanner>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sections: Vec<StorefrontSection>,
    #[serde(default)]
    pub footer: Option<StorefrontFooter>,
    #[serde(default)]
    pub theme: Option<ThemeResponse>,
    #[serde(default)]
    pub seo: Option<SeoResponse>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorefrontLogo {
    pub image_url: String,
    #[serde(default)]
    pub company_name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorefrontImage {
    pub image_url: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorefrontBanner {
    pub desktop_image_url: String,
    #[serde(default)]
    pub mobile_image_url: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub link_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorefrontSection {
    pub image_url: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub link_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorefrontFooter {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub facebook_url: Option<String>,
    #[serde(default)]
    pub line_url: Option<String>,
    #[serde(default)]
    pub instagram_url: Option<String>,
    #[serde(default)]
    pub website_url: Option<String>,
}
