// ── Draft model & dirty tracking ──
//
// The editable state forked from a `DraftSnapshot`. Every mutation goes
// through a method here so it is recorded in the change log; the encoder
// only ever sees the draft through `dirty_set()` and the read accessors.

pub mod changes;
pub mod edit;
pub mod group;

use std::path::Path;

use tracing::debug;

use crate::error::CoreError;
use crate::model::{
    BusinessInfo, DomainEntry, DraftSnapshot, EditableBanner, EditableFooter, FacebookPage,
    ImageField, LineContact, LocalFile, SeoText, Theme,
};
use crate::preview::PreviewRegistry;

pub use changes::{Change, ChangeLog, DirtySet};
pub use edit::{
    BannerPatch, Direction, DomainPatch, Edit, FacebookPagePatch, FooterPatch, InfoPatch,
    LineContactPatch, SeoPatch, ThemePatch, parse_script,
};
pub use group::Group;

/// Soft cap on banners.
pub const MAX_BANNERS: usize = 10;
/// Cap on custom domains.
pub const MAX_DOMAINS: usize = 3;

/// Editable draft state.
#[derive(Debug)]
pub struct Draft {
    snapshot: DraftSnapshot,
    logo: ImageField,
    info: BusinessInfo,
    theme: Theme,
    favicon: ImageField,
    banners: Vec<EditableBanner>,
    deleted_banner_ids: Vec<String>,
    footer: Option<EditableFooter>,
    deleted_footer_id: Option<String>,
    seo: SeoText,
    seo_image: ImageField,
    line_contact: LineContact,
    facebook_page: FacebookPage,
    subdomain: String,
    domains: Vec<DomainEntry>,
    deleted_domain_ids: Vec<String>,
    changes: ChangeLog,
    previews: PreviewRegistry,
}

impl Draft {
    /// Fork fresh editable state from a snapshot.
    pub fn fork(snapshot: DraftSnapshot) -> Self {
        let domains = snapshot
            .domains
            .iter()
            .map(|d| DomainEntry {
                id: Some(d.id.clone()),
                domain_name: d.domain_name.clone(),
                is_active: d.is_active,
                is_verified: d.is_verified,
            })
            .collect();

        Self {
            logo: ImageField::from_remote(snapshot.logo_url.clone()),
            info: snapshot.info.clone(),
            theme: snapshot.theme.clone(),
            favicon: ImageField::from_remote(snapshot.favicon_url.clone()),
            banners: snapshot
                .banners
                .iter()
                .map(EditableBanner::from_record)
                .collect(),
            deleted_banner_ids: Vec::new(),
            footer: snapshot.footer.as_ref().map(EditableFooter::from_record),
            deleted_footer_id: None,
            seo: snapshot.seo.clone(),
            seo_image: ImageField::from_remote(snapshot.seo_image_url.clone()),
            line_contact: snapshot.line_contact.clone(),
            facebook_page: snapshot.facebook_page.clone(),
            subdomain: snapshot.subdomain.clone(),
            domains,
            deleted_domain_ids: Vec::new(),
            changes: ChangeLog::default(),
            previews: PreviewRegistry::new(),
            snapshot,
        }
    }

    /// Throw away every local edit and re-fork from the last snapshot.
    pub fn discard(&mut self) {
        let released = self.release_previews();
        debug!(released, "discarding local edits");
        let snapshot = std::mem::take(&mut self.snapshot);
        *self = Self::fork(snapshot);
    }

    /// Release every outstanding local preview. Returns how many were live.
    pub fn release_previews(&mut self) -> usize {
        self.previews.release_all()
    }

    // ── Dirty tracking ───────────────────────────────────────────────

    /// Whether `group` would be submitted by a save.
    pub fn is_dirty(&self, group: Group) -> bool {
        let s = &self.snapshot;
        match group {
            Group::Logo => self.logo.is_dirty(),
            Group::Branding => self.theme != s.theme || self.favicon.is_dirty(),
            Group::Info => self.info != s.info,
            Group::Seo => self.seo != s.seo || self.seo_image.is_dirty(),
            Group::LineContact => self.line_contact != s.line_contact,
            Group::FacebookPage => self.facebook_page != s.facebook_page,
            Group::Subdomain => self.subdomain != s.subdomain,
            Group::Banners | Group::BannerFooters | Group::Domains => self.changes.touched(group),
        }
    }

    pub fn is_any_dirty(&self) -> bool {
        !self.dirty_set().is_empty()
    }

    pub fn dirty_set(&self) -> DirtySet {
        use strum::IntoEnumIterator;
        Group::iter().filter(|g| self.is_dirty(*g)).collect()
    }

    // ── Read access ──────────────────────────────────────────────────

    pub fn snapshot(&self) -> &DraftSnapshot {
        &self.snapshot
    }

    pub fn logo(&self) -> &ImageField {
        &self.logo
    }

    pub fn info(&self) -> &BusinessInfo {
        &self.info
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn favicon(&self) -> &ImageField {
        &self.favicon
    }

    pub fn banners(&self) -> &[EditableBanner] {
        &self.banners
    }

    /// Ids of stored banners removed since the fork, in removal order.
    pub fn deleted_banner_ids(&self) -> &[String] {
        &self.deleted_banner_ids
    }

    pub fn footer(&self) -> Option<&EditableFooter> {
        self.footer.as_ref()
    }

    pub fn deleted_footer_id(&self) -> Option<&str> {
        self.deleted_footer_id.as_deref()
    }

    pub fn seo(&self) -> &SeoText {
        &self.seo
    }

    pub fn seo_image(&self) -> &ImageField {
        &self.seo_image
    }

    pub fn line_contact(&self) -> &LineContact {
        &self.line_contact
    }

    pub fn facebook_page(&self) -> &FacebookPage {
        &self.facebook_page
    }

    pub fn subdomain(&self) -> &str {
        &self.subdomain
    }

    pub fn domains(&self) -> &[DomainEntry] {
        &self.domains
    }

    pub fn deleted_domain_ids(&self) -> &[String] {
        &self.deleted_domain_ids
    }

    pub fn changes(&self) -> &ChangeLog {
        &self.changes
    }

    pub fn previews(&self) -> &PreviewRegistry {
        &self.previews
    }

    // ── Logo ─────────────────────────────────────────────────────────

    pub fn set_logo(&mut self, file: LocalFile) {
        self.changes
            .record(Group::Logo, format!("logo set to {}", file.name));
        self.logo.replace(file, &mut self.previews);
    }

    pub fn clear_logo(&mut self) {
        self.logo.clear(&mut self.previews);
        self.changes.record(Group::Logo, "logo cleared");
    }

    // ── Branding ─────────────────────────────────────────────────────

    pub fn update_theme(&mut self, patch: ThemePatch) {
        fn choice(value: String) -> Option<String> {
            if value.is_empty() { None } else { Some(value) }
        }

        if let Some(title) = patch.title {
            self.theme.title = title;
        }
        if let Some(color) = patch.primary_color {
            self.theme.primary_color = choice(color);
        }
        if let Some(color) = patch.secondary_color {
            self.theme.secondary_color = choice(color);
        }
        if let Some(font) = patch.font_family {
            self.theme.font_family = choice(font);
        }
        self.changes.record(Group::Branding, "theme updated");
    }

    pub fn set_favicon(&mut self, file: LocalFile) {
        self.changes
            .record(Group::Branding, format!("favicon set to {}", file.name));
        self.favicon.replace(file, &mut self.previews);
    }

    pub fn clear_favicon(&mut self) {
        self.favicon.clear(&mut self.previews);
        self.changes.record(Group::Branding, "favicon cleared");
    }

    // ── Business info ────────────────────────────────────────────────

    pub fn update_info(&mut self, patch: InfoPatch) {
        let info = &mut self.info;
        for (slot, value) in [
            (&mut info.company_name, patch.company_name),
            (&mut info.description, patch.description),
            (&mut info.phone, patch.phone),
            (&mut info.email, patch.email),
            (&mut info.address, patch.address),
        ] {
            if let Some(value) = value {
                *slot = value;
            }
        }
        self.changes.record(Group::Info, "business info updated");
    }

    // ── Banners ──────────────────────────────────────────────────────

    /// Append a new, active banner. Returns its index.
    pub fn add_banner(&mut self) -> Result<usize, CoreError> {
        if self.banners.len() >= MAX_BANNERS {
            return Err(CoreError::LimitReached {
                what: "banners",
                limit: MAX_BANNERS,
            });
        }
        self.banners.push(EditableBanner::new_local());
        let index = self.banners.len() - 1;
        self.changes
            .record(Group::Banners, format!("banner #{} added", index + 1));
        Ok(index)
    }

    /// Remove a banner, queueing a delete when it exists on the server.
    pub fn remove_banner(&mut self, index: usize) -> Result<(), CoreError> {
        self.check_banner(index)?;
        let mut banner = self.banners.remove(index);
        banner.release(&mut self.previews);
        if let Some(id) = banner.id {
            self.deleted_banner_ids.push(id);
        }
        self.changes
            .record(Group::Banners, format!("banner #{} removed", index + 1));
        Ok(())
    }

    /// Swap a banner with its neighbour. Moving past either end does
    /// nothing and returns `false`.
    pub fn move_banner(&mut self, index: usize, direction: Direction) -> Result<bool, CoreError> {
        self.check_banner(index)?;
        let target = match direction {
            Direction::Up => index.checked_sub(1),
            Direction::Down => Some(index + 1).filter(|t| *t < self.banners.len()),
        };
        let Some(target) = target else {
            return Ok(false);
        };
        self.banners.swap(index, target);
        self.changes.record(
            Group::Banners,
            format!("banner #{} moved to #{}", index + 1, target + 1),
        );
        Ok(true)
    }

    pub fn update_banner(&mut self, index: usize, patch: BannerPatch) -> Result<(), CoreError> {
        let banner = self.banner_mut(index)?;
        if let Some(link_url) = patch.link_url {
            banner.link_url = link_url;
        }
        if let Some(active) = patch.is_active {
            banner.is_active = active;
        }
        self.changes
            .record(Group::Banners, format!("banner #{} updated", index + 1));
        Ok(())
    }

    pub fn set_banner_desktop(&mut self, index: usize, file: LocalFile) -> Result<(), CoreError> {
        self.check_banner(index)?;
        let name = file.name.clone();
        if let Some(banner) = self.banners.get_mut(index) {
            banner.desktop.replace(file, &mut self.previews);
        }
        self.changes.record(
            Group::Banners,
            format!("banner #{} desktop image set to {name}", index + 1),
        );
        Ok(())
    }

    pub fn set_banner_mobile(&mut self, index: usize, file: LocalFile) -> Result<(), CoreError> {
        self.check_banner(index)?;
        let name = file.name.clone();
        if let Some(banner) = self.banners.get_mut(index) {
            banner.mobile.replace(file, &mut self.previews);
        }
        self.changes.record(
            Group::Banners,
            format!("banner #{} mobile image set to {name}", index + 1),
        );
        Ok(())
    }

    pub fn clear_banner_mobile(&mut self, index: usize) -> Result<(), CoreError> {
        self.check_banner(index)?;
        if let Some(banner) = self.banners.get_mut(index) {
            banner.mobile.clear(&mut self.previews);
        }
        self.changes.record(
            Group::Banners,
            format!("banner #{} mobile image cleared", index + 1),
        );
        Ok(())
    }

    fn check_banner(&self, index: usize) -> Result<(), CoreError> {
        if index < self.banners.len() {
            Ok(())
        } else {
            Err(CoreError::IndexOutOfRange {
                what: "banner",
                position: index + 1,
                len: self.banners.len(),
            })
        }
    }

    fn banner_mut(&mut self, index: usize) -> Result<&mut EditableBanner, CoreError> {
        let len = self.banners.len();
        self.banners
            .get_mut(index)
            .ok_or(CoreError::IndexOutOfRange {
                what: "banner",
                position: index + 1,
                len,
            })
    }

    // ── Banner footer ────────────────────────────────────────────────

    /// Create the banner footer. There can be only one.
    pub fn create_footer(&mut self) -> Result<(), CoreError> {
        if self.footer.is_some() {
            return Err(CoreError::LimitReached {
                what: "banner footers",
                limit: 1,
            });
        }
        self.footer = Some(EditableFooter::new_local());
        self.changes.record(Group::BannerFooters, "footer created");
        Ok(())
    }

    pub fn remove_footer(&mut self) -> Result<(), CoreError> {
        let Some(mut footer) = self.footer.take() else {
            return Err(Self::no_footer());
        };
        footer.banner.release(&mut self.previews);
        if let Some(id) = footer.banner.id {
            self.deleted_footer_id = Some(id);
        }
        self.changes.record(Group::BannerFooters, "footer removed");
        Ok(())
    }

    pub fn update_footer(&mut self, patch: FooterPatch) -> Result<(), CoreError> {
        let footer = self.footer.as_mut().ok_or_else(Self::no_footer)?;
        if let Some(title) = patch.title {
            footer.title = title;
        }
        if let Some(description) = patch.description {
            footer.description = description;
        }
        if let Some(link_url) = patch.link_url {
            footer.banner.link_url = link_url;
        }
        if let Some(active) = patch.is_active {
            footer.banner.is_active = active;
        }
        self.changes.record(Group::BannerFooters, "footer updated");
        Ok(())
    }

    pub fn set_footer_desktop(&mut self, file: LocalFile) -> Result<(), CoreError> {
        let footer = self.footer.as_mut().ok_or_else(Self::no_footer)?;
        let summary = format!("footer desktop image set to {}", file.name);
        footer.banner.desktop.replace(file, &mut self.previews);
        self.changes.record(Group::BannerFooters, summary);
        Ok(())
    }

    pub fn set_footer_mobile(&mut self, file: LocalFile) -> Result<(), CoreError> {
        let footer = self.footer.as_mut().ok_or_else(Self::no_footer)?;
        let summary = format!("footer mobile image set to {}", file.name);
        footer.banner.mobile.replace(file, &mut self.previews);
        self.changes.record(Group::BannerFooters, summary);
        Ok(())
    }

    pub fn clear_footer_mobile(&mut self) -> Result<(), CoreError> {
        let footer = self.footer.as_mut().ok_or_else(Self::no_footer)?;
        footer.banner.mobile.clear(&mut self.previews);
        self.changes
            .record(Group::BannerFooters, "footer mobile image cleared");
        Ok(())
    }

    fn no_footer() -> CoreError {
        CoreError::IndexOutOfRange {
            what: "banner footer",
            position: 1,
            len: 0,
        }
    }

    // ── SEO ──────────────────────────────────────────────────────────

    pub fn update_seo(&mut self, patch: SeoPatch) {
        if let Some(title) = patch.title {
            self.seo.title = title;
        }
        if let Some(description) = patch.description {
            self.seo.description = description;
        }
        self.changes.record(Group::Seo, "SEO text updated");
    }

    pub fn set_seo_image(&mut self, file: LocalFile) {
        self.changes
            .record(Group::Seo, format!("SEO image set to {}", file.name));
        self.seo_image.replace(file, &mut self.previews);
    }

    pub fn clear_seo_image(&mut self) {
        self.seo_image.clear(&mut self.previews);
        self.changes.record(Group::Seo, "SEO image cleared");
    }

    // ── Contact ──────────────────────────────────────────────────────

    pub fn update_line_contact(&mut self, patch: LineContactPatch) {
        if let Some(url) = patch.line_url {
            self.line_contact.line_url = url;
        }
        if let Some(enabled) = patch.enabled {
            self.line_contact.enabled = enabled;
        }
        self.changes.record(Group::LineContact, "LINE contact updated");
    }

    pub fn update_facebook_page(&mut self, patch: FacebookPagePatch) {
        if let Some(url) = patch.page_url {
            self.facebook_page.page_url = url;
        }
        if let Some(enabled) = patch.enabled {
            self.facebook_page.enabled = enabled;
        }
        self.changes
            .record(Group::FacebookPage, "Facebook page updated");
    }

    // ── Subdomain / domains ──────────────────────────────────────────

    /// Set the subdomain. Input is lowercased and stripped to `[a-z0-9-]`.
    pub fn set_subdomain(&mut self, value: &str) {
        self.subdomain = normalize_subdomain(value);
        self.changes.record(
            Group::Subdomain,
            format!("subdomain set to {:?}", self.subdomain),
        );
    }

    /// Append a new, active custom domain. Returns its index.
    pub fn add_domain(&mut self, domain_name: &str) -> Result<usize, CoreError> {
        if self.domains.len() >= MAX_DOMAINS {
            return Err(CoreError::LimitReached {
                what: "custom domains",
                limit: MAX_DOMAINS,
            });
        }
        self.domains
            .push(DomainEntry::new_local(domain_name.trim()));
        self.changes
            .record(Group::Domains, format!("domain {:?} added", domain_name.trim()));
        Ok(self.domains.len() - 1)
    }

    pub fn remove_domain(&mut self, index: usize) -> Result<(), CoreError> {
        let entry = self.domain_index(index)?;
        let removed = self.domains.remove(entry);
        if let Some(id) = removed.id {
            self.deleted_domain_ids.push(id);
        }
        self.changes.record(
            Group::Domains,
            format!("domain {:?} removed", removed.domain_name),
        );
        Ok(())
    }

    pub fn update_domain(&mut self, index: usize, patch: DomainPatch) -> Result<(), CoreError> {
        let entry = self.domain_index(index)?;
        if let Some(domain) = self.domains.get_mut(entry) {
            if let Some(name) = patch.domain_name {
                domain.domain_name = name.trim().to_owned();
            }
            if let Some(active) = patch.is_active {
                domain.is_active = active;
            }
        }
        self.changes
            .record(Group::Domains, format!("domain #{} updated", index + 1));
        Ok(())
    }

    fn domain_index(&self, index: usize) -> Result<usize, CoreError> {
        if index < self.domains.len() {
            Ok(index)
        } else {
            Err(CoreError::IndexOutOfRange {
                what: "custom domain",
                position: index + 1,
                len: self.domains.len(),
            })
        }
    }

    // ── Command dispatch ─────────────────────────────────────────────

    /// Apply one edit. Image paths are read from disk here.
    pub fn apply(&mut self, edit: Edit) -> Result<(), CoreError> {
        debug!(?edit, "applying edit");
        match edit {
            Edit::SetLogo { path } => self.set_logo(read(&path)?),
            Edit::ClearLogo => self.clear_logo(),
            Edit::UpdateTheme(patch) => self.update_theme(patch),
            Edit::SetFavicon { path } => self.set_favicon(read(&path)?),
            Edit::ClearFavicon => self.clear_favicon(),
            Edit::UpdateInfo(patch) => self.update_info(patch),
            Edit::AddBanner {
                desktop,
                mobile,
                link_url,
                is_active,
            } => {
                // Read files first so a bad path leaves no half-built row.
                let desktop = desktop.as_deref().map(read).transpose()?;
                let mobile = mobile.as_deref().map(read).transpose()?;
                let index = self.add_banner()?;
                if let Some(file) = desktop {
                    self.set_banner_desktop(index, file)?;
                }
                if let Some(file) = mobile {
                    self.set_banner_mobile(index, file)?;
                }
                if link_url.is_some() || is_active.is_some() {
                    self.update_banner(
                        index,
                        BannerPatch {
                            link_url,
                            is_active,
                        },
                    )?;
                }
            }
            Edit::RemoveBanner { index } => self.remove_banner(index)?,
            Edit::MoveBanner { index, direction } => {
                self.move_banner(index, direction)?;
            }
            Edit::UpdateBanner { index, patch } => self.update_banner(index, patch)?,
            Edit::SetBannerDesktop { index, path } => {
                self.set_banner_desktop(index, read(&path)?)?;
            }
            Edit::SetBannerMobile { index, path } => {
                self.set_banner_mobile(index, read(&path)?)?;
            }
            Edit::ClearBannerMobile { index } => self.clear_banner_mobile(index)?,
            Edit::CreateFooter {
                desktop,
                mobile,
                patch,
            } => {
                let desktop = desktop.as_deref().map(read).transpose()?;
                let mobile = mobile.as_deref().map(read).transpose()?;
                self.create_footer()?;
                if let Some(file) = desktop {
                    self.set_footer_desktop(file)?;
                }
                if let Some(file) = mobile {
                    self.set_footer_mobile(file)?;
                }
                if patch != FooterPatch::default() {
                    self.update_footer(patch)?;
                }
            }
            Edit::RemoveFooter => self.remove_footer()?,
            Edit::UpdateFooter(patch) => self.update_footer(patch)?,
            Edit::SetFooterDesktop { path } => self.set_footer_desktop(read(&path)?)?,
            Edit::SetFooterMobile { path } => self.set_footer_mobile(read(&path)?)?,
            Edit::ClearFooterMobile => self.clear_footer_mobile()?,
            Edit::UpdateSeo(patch) => self.update_seo(patch),
            Edit::SetSeoImage { path } => self.set_seo_image(read(&path)?),
            Edit::ClearSeoImage => self.clear_seo_image(),
            Edit::UpdateLineContact(patch) => self.update_line_contact(patch),
            Edit::UpdateFacebookPage(patch) => self.update_facebook_page(patch),
            Edit::SetSubdomain { subdomain } => self.set_subdomain(&subdomain),
            Edit::AddDomain { domain_name } => {
                self.add_domain(&domain_name)?;
            }
            Edit::RemoveDomain { index } => self.remove_domain(index)?,
            Edit::UpdateDomain { index, patch } => self.update_domain(index, patch)?,
        }
        Ok(())
    }

    /// Apply edits in order, stopping at the first failure.
    pub fn apply_all(&mut self, edits: impl IntoIterator<Item = Edit>) -> Result<(), CoreError> {
        edits.into_iter().try_for_each(|edit| self.apply(edit))
    }
}

fn read(path: &Path) -> Result<LocalFile, CoreError> {
    LocalFile::read(path)
}

/// Lowercase and keep only `[a-z0-9-]`.
pub fn normalize_subdomain(value: &str) -> String {
    value
        .trim()
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-')
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::{BannerRecord, DomainRecord};

    fn png(name: &str) -> LocalFile {
        LocalFile::from_bytes(name, &b"\x89PNG"[..]).unwrap()
    }

    fn snapshot() -> DraftSnapshot {
        DraftSnapshot {
            logo_url: Some("https://cdn/logo.png".into()),
            banners: vec![
                BannerRecord {
                    id: "b1".into(),
                    desktop_url: Some("https://cdn/b1.png".into()),
                    mobile_url: Some("https://cdn/b1m.png".into()),
                    link_url: "https://a.com".into(),
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
            domains: vec![DomainRecord {
                id: "d1".into(),
                domain_name: "shop.acme.com".into(),
                is_active: true,
                is_verified: Some(true),
            }],
            ..DraftSnapshot::default()
        }
    }

    #[test]
    fn fresh_fork_is_clean() {
        let draft = Draft::fork(snapshot());
        assert!(!draft.is_any_dirty());
        assert_eq!(draft.banners().len(), 2);
        assert!(draft.changes().is_empty());
    }

    #[test]
    fn scalar_groups_compare_against_snapshot() {
        let mut draft = Draft::fork(snapshot());
        draft.update_info(InfoPatch {
            phone: Some("0800".into()),
            ..InfoPatch::default()
        });
        assert!(draft.is_dirty(Group::Info));

        draft.update_info(InfoPatch {
            phone: Some(String::new()),
            ..InfoPatch::default()
        });
        assert!(!draft.is_dirty(Group::Info));
        assert!(!draft.is_any_dirty());
    }

    #[test]
    fn null_and_empty_are_distinct_for_theme() {
        let mut draft = Draft::fork(snapshot());
        draft.update_theme(ThemePatch {
            title: Some(String::new()),
            ..ThemePatch::default()
        });
        assert!(!draft.is_dirty(Group::Branding));

        draft.update_theme(ThemePatch {
            primary_color: Some("#ff0000".into()),
            ..ThemePatch::default()
        });
        assert!(draft.is_dirty(Group::Branding));
    }

    #[test]
    fn list_groups_stay_dirty_after_undo() {
        let mut draft = Draft::fork(snapshot());
        draft.move_banner(0, Direction::Down).unwrap();
        draft.move_banner(1, Direction::Up).unwrap();

        assert_eq!(draft.banners()[0].id.as_deref(), Some("b1"));
        assert!(draft.is_dirty(Group::Banners));
        assert_eq!(draft.dirty_set().to_string(), "banners");
    }

    #[test]
    fn moving_past_the_edge_is_a_no_op() {
        let mut draft = Draft::fork(snapshot());
        assert!(!draft.move_banner(0, Direction::Up).unwrap());
        assert!(!draft.move_banner(1, Direction::Down).unwrap());
        assert!(!draft.is_dirty(Group::Banners));
    }

    #[test]
    fn removing_stored_banner_queues_delete() {
        let mut draft = Draft::fork(snapshot());
        let added = draft.add_banner().unwrap();
        draft.remove_banner(added).unwrap();
        draft.remove_banner(0).unwrap();

        assert_eq!(draft.deleted_banner_ids(), ["b1".to_string()]);
        assert_eq!(draft.banners().len(), 1);
    }

    #[test]
    fn banner_cap_is_enforced() {
        let mut draft = Draft::fork(DraftSnapshot::default());
        for _ in 0..MAX_BANNERS {
            draft.add_banner().unwrap();
        }
        assert!(matches!(
            draft.add_banner(),
            Err(CoreError::LimitReached { limit: 10, .. })
        ));
    }

    #[test]
    fn domain_cap_is_enforced() {
        let mut draft = Draft::fork(snapshot());
        draft.add_domain("a.example").unwrap();
        draft.add_domain("b.example").unwrap();
        assert!(matches!(
            draft.add_domain("c.example"),
            Err(CoreError::LimitReached { limit: 3, .. })
        ));
    }

    #[test]
    fn out_of_range_reports_one_based_position() {
        let mut draft = Draft::fork(snapshot());
        let err = draft.remove_banner(5).unwrap_err();
        assert_eq!(err.to_string(), "No banner at position 6 (have 2)");
    }

    #[test]
    fn clearing_stored_mobile_sets_remove_flag() {
        let mut draft = Draft::fork(snapshot());
        draft.clear_banner_mobile(0).unwrap();
        draft.clear_banner_mobile(1).unwrap();

        assert!(draft.banners()[0].remove_mobile_image());
        assert!(!draft.banners()[1].remove_mobile_image());

        draft.set_banner_mobile(0, png("m.png")).unwrap();
        assert!(!draft.banners()[0].remove_mobile_image());
    }

    #[test]
    fn removing_items_releases_their_previews() {
        let mut draft = Draft::fork(snapshot());
        let index = draft.add_banner().unwrap();
        draft.set_banner_desktop(index, png("d.png")).unwrap();
        draft.set_banner_mobile(index, png("m.png")).unwrap();
        draft.set_logo(png("logo.png"));
        assert_eq!(draft.previews().outstanding(), 3);

        draft.remove_banner(index).unwrap();
        assert_eq!(draft.previews().outstanding(), 1);
    }

    #[test]
    fn discard_refork_releases_everything() {
        let mut draft = Draft::fork(snapshot());
        draft.set_logo(png("logo.png"));
        draft.set_seo_image(png("og.png"));
        draft.remove_banner(0).unwrap();

        draft.discard();

        assert!(!draft.is_any_dirty());
        assert_eq!(draft.previews().outstanding(), 0);
        assert_eq!(draft.banners().len(), 2);
        assert!(draft.deleted_banner_ids().is_empty());
        assert_eq!(draft.logo().display_url(), Some("https://cdn/logo.png"));
    }

    #[test]
    fn subdomain_is_normalized() {
        let mut draft = Draft::fork(snapshot());
        draft.set_subdomain("  My_Shop.2 ");
        assert_eq!(draft.subdomain(), "myshop2");
        assert!(draft.is_dirty(Group::Subdomain));

        draft.set_subdomain("ACME");
        assert!(!draft.is_dirty(Group::Subdomain));
    }

    #[test]
    fn footer_is_a_singleton() {
        let mut draft = Draft::fork(snapshot());
        draft.create_footer().unwrap();
        assert!(draft.create_footer().is_err());
        draft.remove_footer().unwrap();
        assert!(draft.deleted_footer_id().is_none());
        assert!(draft.remove_footer().is_err());
        assert!(draft.is_dirty(Group::BannerFooters));
    }

    #[test]
    fn failed_apply_leaves_no_half_built_banner() {
        let mut draft = Draft::fork(snapshot());
        let err = draft
            .apply(Edit::AddBanner {
                desktop: Some("/definitely/missing.png".into()),
                mobile: None,
                link_url: None,
                is_active: None,
            })
            .unwrap_err();

        assert!(matches!(err, CoreError::FileRead { .. }));
        assert_eq!(draft.banners().len(), 2);
        assert!(!draft.is_any_dirty());
    }
}
