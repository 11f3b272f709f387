// ── Scalar groups ──
//
// Plain-value groups compared structurally against the snapshot to decide
// dirtiness. `None` and `Some("")` are different values.

use serde::Serialize;

/// Company details. Serialized as the `info` JSON field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BusinessInfo {
    pub company_name: String,
    pub description: String,
    pub phone: String,
    pub email: String,
    pub address: String,
}

/// Storefront theme. Colors and font are `None` when never chosen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Theme {
    pub title: String,
    pub primary_color: Option<String>,
    pub secondary_color: Option<String>,
    pub font_family: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeoText {
    pub title: String,
    pub description: String,
}

/// LINE contact link. Serialized as the `line_contact` JSON field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LineContact {
    pub line_url: String,
    pub enabled: bool,
}

/// Facebook page link. Serialized as the `facebook_page` JSON field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FacebookPage {
    pub page_url: String,
    pub enabled: bool,
}

/// An editable custom domain. `id` is `None` for domains added locally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainEntry {
    pub id: Option<String>,
    pub domain_name: String,
    pub is_active: bool,
    pub is_verified: Option<bool>,
}

impl DomainEntry {
    pub fn new_local(domain_name: impl Into<String>) -> Self {
        Self {
            id: None,
            domain_name: domain_name.into(),
            is_active: true,
            is_verified: None,
        }
    }

    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }
}
