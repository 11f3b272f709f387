// ── Edit commands ──
//
// Every mutation of the draft expressed as data. Presentation layers build
// these directly or deserialize them from an edit script:
//
//   [{"op": "update_banner", "index": 0, "is_active": false},
//    {"op": "add_banner", "desktop": "hero.png"}]
//
// Indices are zero-based positions in the current display order. Patch
// fields left out are unchanged.

use std::path::PathBuf;

use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct InfoPatch {
    pub company_name: Option<String>,
    pub description: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

/// Theme changes. An empty color or font clears the choice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ThemePatch {
    pub title: Option<String>,
    pub primary_color: Option<String>,
    pub secondary_color: Option<String>,
    pub font_family: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BannerPatch {
    pub link_url: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FooterPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub link_url: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SeoPatch {
    pub title: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LineContactPatch {
    pub line_url: Option<String>,
    pub enabled: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FacebookPagePatch {
    pub page_url: Option<String>,
    pub enabled: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DomainPatch {
    pub domain_name: Option<String>,
    pub is_active: Option<bool>,
}

/// One draft mutation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Edit {
    // ── Logo ─────────────────────────────────────────────────────────
    SetLogo { path: PathBuf },
    ClearLogo,

    // ── Branding ─────────────────────────────────────────────────────
    UpdateTheme(ThemePatch),
    SetFavicon { path: PathBuf },
    ClearFavicon,

    // ── Business info ────────────────────────────────────────────────
    UpdateInfo(InfoPatch),

    // ── Banners ──────────────────────────────────────────────────────
    AddBanner {
        desktop: Option<PathBuf>,
        mobile: Option<PathBuf>,
        link_url: Option<String>,
        is_active: Option<bool>,
    },
    RemoveBanner { index: usize },
    MoveBanner { index: usize, direction: Direction },
    UpdateBanner {
        index: usize,
        #[serde(flatten)]
        patch: BannerPatch,
    },
    SetBannerDesktop { index: usize, path: PathBuf },
    SetBannerMobile { index: usize, path: PathBuf },
    ClearBannerMobile { index: usize },

    // ── Banner footer ────────────────────────────────────────────────
    CreateFooter {
        desktop: Option<PathBuf>,
        mobile: Option<PathBuf>,
        #[serde(flatten)]
        patch: FooterPatch,
    },
    RemoveFooter,
    UpdateFooter(FooterPatch),
    SetFooterDesktop { path: PathBuf },
    SetFooterMobile { path: PathBuf },
    ClearFooterMobile,

    // ── SEO ──────────────────────────────────────────────────────────
    UpdateSeo(SeoPatch),
    SetSeoImage { path: PathBuf },
    ClearSeoImage,

    // ── Contact ──────────────────────────────────────────────────────
    UpdateLineContact(LineContactPatch),
    UpdateFacebookPage(FacebookPagePatch),

    // ── Subdomain / domains ──────────────────────────────────────────
    SetSubdomain { subdomain: String },
    AddDomain { domain_name: String },
    RemoveDomain { index: usize },
    UpdateDomain {
        index: usize,
        #[serde(flatten)]
        patch: DomainPatch,
    },
}

/// Parse an edit script: a JSON array of edits.
pub fn parse_script(json: &str) -> Result<Vec<Edit>, serde_json::Error> {
    serde_json::from_str(json)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parses_mixed_script() {
        let edits = parse_script(
            r#"[
                {"op": "update_banner", "index": 0, "is_active": false},
                {"op": "add_banner", "desktop": "hero.png"},
                {"op": "update_seo", "title": "Acme"},
                {"op": "move_banner", "index": 1, "direction": "up"},
                {"op": "clear_logo"}
            ]"#,
        )
        .unwrap();

        assert_eq!(
            edits,
            vec![
                Edit::UpdateBanner {
                    index: 0,
                    patch: BannerPatch {
                        link_url: None,
                        is_active: Some(false),
                    },
                },
                Edit::AddBanner {
                    desktop: Some("hero.png".into()),
                    mobile: None,
                    link_url: None,
                    is_active: None,
                },
                Edit::UpdateSeo(SeoPatch {
                    title: Some("Acme".into()),
                    description: None,
                }),
                Edit::MoveBanner {
                    index: 1,
                    direction: Direction::Up,
                },
                Edit::ClearLogo,
            ]
        );
    }

    #[test]
    fn rejects_unknown_ops() {
        assert!(parse_script(r#"[{"op": "explode"}]"#).is_err());
    }
}
