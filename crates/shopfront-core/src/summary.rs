// ── Preview summary ──
//
// A presentation-free rendering of what the edited storefront would look
// like: heading, theme, the active banners in order, the footer banner
// and the domains the store is reachable under.

use std::fmt;

use serde::Serialize;

use crate::draft::Draft;

/// Navbar color used when no primary color has been chosen.
pub const DEFAULT_PRIMARY_COLOR: &str = "#4F46E5";
const DEFAULT_HEADING: &str = "My Store";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BannerPreview {
    /// 1-based position among all banners.
    pub position: usize,
    pub desktop: String,
    pub mobile: Option<String>,
    pub link_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FooterPreview {
    pub title: String,
    pub description: String,
    pub image: Option<String>,
    pub is_active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DomainKind {
    Subdomain,
    Custom,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DomainPreview {
    pub host: String,
    pub kind: DomainKind,
    pub is_active: bool,
    pub is_new: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewSummary {
    pub heading: String,
    pub logo: Option<String>,
    pub primary_color: String,
    pub secondary_color: Option<String>,
    pub font_family: Option<String>,
    pub banners: Vec<BannerPreview>,
    pub footer: Option<FooterPreview>,
    pub domains: Vec<DomainPreview>,
}

impl PreviewSummary {
    /// Summarize `draft`. A subdomain resolves under the backend's base
    /// domain when known, otherwise under `suffix`.
    pub fn from_draft(draft: &Draft, suffix: &str) -> Self {
        let theme = draft.theme();
        let heading = [theme.title.as_str(), draft.info().company_name.as_str()]
            .into_iter()
            .find(|s| !s.is_empty())
            .unwrap_or(DEFAULT_HEADING)
            .to_owned();

        let banners = draft
            .banners()
            .iter()
            .enumerate()
            .filter(|(_, b)| b.is_active)
            .filter_map(|(i, b)| {
                Some(BannerPreview {
                    position: i + 1,
                    desktop: b.desktop.display_url()?.to_owned(),
                    mobile: b.mobile.display_url().map(str::to_owned),
                    link_url: Some(b.link_url.clone()).filter(|l| !l.is_empty()),
                })
            })
            .collect();

        let footer = draft.footer().map(|f| FooterPreview {
            title: f.title.clone(),
            description: f.description.clone(),
            image: f.banner.desktop.display_url().map(str::to_owned),
            is_active: f.banner.is_active,
        });

        let mut domains = Vec::new();
        if !draft.subdomain().is_empty() {
            let base = draft.snapshot().base_domain.as_deref().unwrap_or(suffix);
            domains.push(DomainPreview {
                host: format!("{}.{base}", draft.subdomain()),
                kind: DomainKind::Subdomain,
                is_active: true,
                is_new: false,
            });
        }
        domains.extend(draft.domains().iter().map(|d| DomainPreview {
            host: d.domain_name.clone(),
            kind: DomainKind::Custom,
            is_active: d.is_active,
            is_new: d.is_new(),
        }));

        Self {
            heading,
            logo: draft.logo().display_url().map(str::to_owned),
            primary_color: theme
                .primary_color
                .clone()
                .unwrap_or_else(|| DEFAULT_PRIMARY_COLOR.into()),
            secondary_color: theme.secondary_color.clone(),
            font_family: theme.font_family.clone(),
            banners,
            footer,
            domains,
        }
    }
}

impl fmt::Display for PreviewSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.heading)?;
        if let Some(logo) = &self.logo {
            writeln!(f, "  logo:      {logo}")?;
        }
        write!(f, "  colors:    {}", self.primary_color)?;
        if let Some(secondary) = &self.secondary_color {
            write!(f, " / {secondary}")?;
        }
        writeln!(f)?;
        if let Some(font) = &self.font_family {
            writeln!(f, "  font:      {font}")?;
        }

        if self.banners.is_empty() {
            writeln!(f, "  banners:   (none active)")?;
        } else {
            writeln!(f, "  banners:")?;
            for b in &self.banners {
                write!(f, "    #{} {}", b.position, b.desktop)?;
                if let Some(link) = &b.link_url {
                    write!(f, " -> {link}")?;
                }
                writeln!(f)?;
            }
        }

        if let Some(footer) = &self.footer {
            let state = if footer.is_active { "" } else { " (inactive)" };
            writeln!(f, "  footer:    {}{state}", footer.title)?;
        }

        if !self.domains.is_empty() {
            writeln!(f, "  domains:")?;
            for d in &self.domains {
                let kind = match d.kind {
                    DomainKind::Subdomain => "subdomain",
                    DomainKind::Custom if d.is_new => "custom, new",
                    DomainKind::Custom if d.is_active => "custom",
                    DomainKind::Custom => "custom, inactive",
                };
                writeln!(f, "    {} ({kind})", d.host)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::draft::BannerPatch;
    use crate::model::{BannerRecord, BusinessInfo, DraftSnapshot, LocalFile};

    #[test]
    fn summarizes_edited_state() {
        let mut draft = Draft::fork(DraftSnapshot {
            info: BusinessInfo {
                company_name: "Acme Co".into(),
                ..BusinessInfo::default()
            },
            banners: vec![
                BannerRecord {
                    id: "b1".into(),
                    desktop_url: Some("https://cdn/b1.png".into()),
                    is_active: true,
                    ..BannerRecord::default()
                },
                BannerRecord {
                    id: "b2".into(),
                    desktop_url: Some("https://cdn/b2.png".into()),
                    is_active: true,
                    ..BannerRecord::default()
                },
            ],
            subdomain: "acme".into(),
            ..DraftSnapshot::default()
        });
        draft
            .update_banner(
                0,
                BannerPatch {
                    link_url: None,
                    is_active: Some(false),
                },
            )
            .unwrap();
        let index = draft.add_banner().unwrap();
        draft
            .set_banner_desktop(index, LocalFile::from_bytes("n.png", &b"x"[..]).unwrap())
            .unwrap();
        draft.add_domain("shop.acme.com").unwrap();

        let summary = PreviewSummary::from_draft(&draft, "nerdplatform.com");

        assert_eq!(summary.heading, "Acme Co");
        assert_eq!(summary.primary_color, DEFAULT_PRIMARY_COLOR);
        assert_eq!(
            summary.banners.iter().map(|b| b.position).collect::<Vec<_>>(),
            vec![2, 3]
        );
        assert!(summary.banners[1].desktop.starts_with("local:"));
        assert_eq!(summary.domains[0].host, "acme.nerdplatform.com");
        assert!(summary.domains[1].is_new);

        let text = summary.to_string();
        assert!(text.starts_with("Acme Co\n"));
        assert!(text.contains("shop.acme.com (custom, new)"));
    }

    #[test]
    fn empty_draft_uses_defaults() {
        let draft = Draft::fork(DraftSnapshot::default());
        let summary = PreviewSummary::from_draft(&draft, "nerdplatform.com");
        assert_eq!(summary.heading, "My Store");
        assert!(summary.domains.is_empty());
        assert!(summary.to_string().contains("(none active)"));
    }
}
