// ── Server snapshot ──
//
// The server-confirmed state of every group at the last load. Built once
// from the aggregate draft response and never patched; a later load
// replaces it wholesale.

use shopfront_api::types::{BannerResponse, DomainResponse, DraftResponse};

use super::groups::{BusinessInfo, FacebookPage, LineContact, SeoText, Theme};

/// A stored banner or banner footer row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BannerRecord {
    pub id: String,
    pub desktop_url: Option<String>,
    pub mobile_url: Option<String>,
    pub link_url: String,
    pub is_active: bool,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainRecord {
    pub id: String,
    pub domain_name: String,
    pub is_active: bool,
    pub is_verified: Option<bool>,
}

/// Immutable view of the draft as the server last reported it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftSnapshot {
    pub logo_url: Option<String>,
    pub info: BusinessInfo,
    pub theme: Theme,
    pub favicon_url: Option<String>,
    pub banners: Vec<BannerRecord>,
    pub footer: Option<BannerRecord>,
    pub seo: SeoText,
    pub seo_image_url: Option<String>,
    pub line_contact: LineContact,
    pub facebook_page: FacebookPage,
    pub subdomain: String,
    pub base_domain: Option<String>,
    pub domains: Vec<DomainRecord>,
}

impl DraftSnapshot {
    pub fn domain(&self, id: &str) -> Option<&DomainRecord> {
        self.domains.iter().find(|d| d.id == id)
    }
}

/// Empty strings from the backend mean "not set".
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl From<BannerResponse> for BannerRecord {
    fn from(b: BannerResponse) -> Self {
        Self {
            id: b.id,
            desktop_url: non_empty(b.url),
            mobile_url: non_empty(b.mobile_url),
            link_url: b.link_url.unwrap_or_default(),
            is_active: b.is_active,
            title: b.title.unwrap_or_default(),
            description: b.description.unwrap_or_default(),
        }
    }
}

impl From<DomainResponse> for DomainRecord {
    fn from(d: DomainResponse) -> Self {
        Self {
            id: d.id,
            domain_name: d.domain_name,
            is_active: d.is_active,
            is_verified: d.is_verified,
        }
    }
}

impl From<DraftResponse> for DraftSnapshot {
    fn from(d: DraftResponse) -> Self {
        let info = d.info.unwrap_or_default();
        let branding = d.branding.unwrap_or_default();
        let theme = branding.theme.unwrap_or_default();
        let seo = d.seo.unwrap_or_default();
        let line = d.line_contact.unwrap_or_default();
        let facebook = d.facebook_page.unwrap_or_default();
        let subdomain = d.subdomain.unwrap_or_default();

        let mut banners = d.banners;
        // Rows without a sequence keep their relative order after the rest.
        banners.sort_by_key(|b| b.sequence.unwrap_or(i32::MAX));

        Self {
            logo_url: non_empty(d.logo.and_then(|l| l.url)),
            info: BusinessInfo {
                company_name: info.company_name.unwrap_or_default(),
                description: info.description.unwrap_or_default(),
                phone: info.phone.unwrap_or_default(),
                email: info.email.unwrap_or_default(),
                address: info.address.unwrap_or_default(),
            },
            theme: Theme {
                title: theme.title.unwrap_or_default(),
                primary_color: non_empty(theme.primary_color),
                secondary_color: non_empty(theme.secondary_color),
                font_family: non_empty(theme.font_family),
            },
            favicon_url: non_empty(branding.favicon.and_then(|f| f.url)),
            banners: banners.into_iter().map(BannerRecord::from).collect(),
            footer: d.banner_footers.into_iter().next().map(BannerRecord::from),
            seo: SeoText {
                title: seo.title.unwrap_or_default(),
                description: seo.description.unwrap_or_default(),
            },
            seo_image_url: non_empty(seo.image_url),
            line_contact: LineContact {
                line_url: line.line_url.unwrap_or_default(),
                enabled: line.enabled.unwrap_or(false),
            },
            facebook_page: FacebookPage {
                page_url: facebook.page_url.unwrap_or_default(),
                enabled: facebook.enabled.unwrap_or(false),
            },
            subdomain: subdomain.subdomain.unwrap_or_default(),
            base_domain: non_empty(subdomain.base_domain),
            domains: d.domains.into_iter().map(DomainRecord::from).collect(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn builds_from_sparse_response() {
        let response: DraftResponse = serde_json::from_value(json!({
            "branding": { "theme": { "title": "Acme", "primary_color": "" } },
            "banners": [
                { "id": "b2", "url": "https://cdn/2.png", "is_active": true, "sequence": 2 },
                { "id": "b1", "url": "https://cdn/1.png", "mobile_url": "", "is_active": false, "sequence": 1 }
            ],
            "banner_footers": [{ "id": "f1", "url": "https://cdn/f.png", "title": "Visit us", "is_active": true }],
            "subdomain": { "subdomain": "acme", "base_domain": "nerdplatform.com" }
        }))
        .unwrap();

        let snapshot = DraftSnapshot::from(response);

        assert_eq!(snapshot.logo_url, None);
        assert_eq!(snapshot.theme.title, "Acme");
        assert_eq!(snapshot.theme.primary_color, None);
        assert_eq!(
            snapshot.banners.iter().map(|b| b.id.as_str()).collect::<Vec<_>>(),
            vec!["b1", "b2"]
        );
        assert_eq!(snapshot.banners[0].mobile_url, None);
        assert_eq!(snapshot.footer.as_ref().unwrap().title, "Visit us");
        assert_eq!(snapshot.subdomain, "acme");
        assert_eq!(snapshot.base_domain.as_deref(), Some("nerdplatform.com"));
        assert!(!snapshot.line_contact.enabled);
    }
}
