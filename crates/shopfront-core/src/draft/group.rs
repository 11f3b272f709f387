// ── Editable groups ──

use serde::Serialize;
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// An independently editable, independently saved part of the draft.
///
/// The string form is the group's key in the save request and in the
/// per-group result map. Variant order is the order groups are encoded.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Group {
    Logo,
    Branding,
    Info,
    Banners,
    BannerFooters,
    Seo,
    LineContact,
    FacebookPage,
    Subdomain,
    Domains,
}

impl Group {
    /// Key used on the wire (`banner_footers`, `line_contact`, ...).
    pub fn wire_key(self) -> &'static str {
        self.into()
    }

    pub fn from_wire_key(key: &str) -> Option<Self> {
        key.parse().ok()
    }

    /// List groups track dirtiness with an explicit flag instead of
    /// comparing against the snapshot.
    pub fn is_list(self) -> bool {
        matches!(self, Self::Banners | Self::BannerFooters | Self::Domains)
    }

    /// Human-readable name.
    pub fn label(self) -> &'static str {
        match self {
            Self::Logo => "logo",
            Self::Branding => "branding",
            Self::Info => "business info",
            Self::Banners => "banners",
            Self::BannerFooters => "banner footer",
            Self::Seo => "SEO",
            Self::LineContact => "LINE contact",
            Self::FacebookPage => "Facebook page",
            Self::Subdomain => "subdomain",
            Self::Domains => "custom domains",
        }
    }
}
