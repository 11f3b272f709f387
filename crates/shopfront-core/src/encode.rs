// ── Save encoding ──
//
// Turns the dirty part of a draft into the one multipart body of a save.
// Groups outside the dirty set contribute nothing; omission means "leave
// unchanged". List groups become a JSON array of operations plus files
// named by each operation's index in that array.

use shopfront_api::form::indexed_field_name;
use shopfront_api::{DraftForm, PendingOperation};
use tracing::debug;

use crate::draft::{DirtySet, Draft, Group};
use crate::error::CoreError;
use crate::model::{EditableBanner, EditableFooter};

/// Minimum subdomain length accepted by the backend.
pub const MIN_SUBDOMAIN_LEN: usize = 3;

// ── Validation ──────────────────────────────────────────────────────

/// Reject drafts the server would refuse, before any request is made.
pub fn validate(draft: &Draft, dirty: &DirtySet) -> Result<(), CoreError> {
    if dirty.contains(Group::Banners) {
        for (i, banner) in draft.banners().iter().enumerate() {
            if banner.is_new() && banner.desktop.pending_file().is_none() {
                return Err(CoreError::validation(
                    format!("banner #{}", i + 1),
                    "a desktop image is required for new banners",
                ));
            }
        }
    }

    if dirty.contains(Group::BannerFooters) {
        if let Some(footer) = draft.footer() {
            if footer.banner.is_new() && footer.banner.desktop.pending_file().is_none() {
                return Err(CoreError::validation(
                    "banner footer",
                    "a desktop image is required for a new footer",
                ));
            }
        }
    }

    if dirty.contains(Group::Subdomain) {
        let sub = draft.subdomain();
        if !sub.is_empty() && sub.len() < MIN_SUBDOMAIN_LEN {
            return Err(CoreError::validation(
                "subdomain",
                format!("must be at least {MIN_SUBDOMAIN_LEN} characters"),
            ));
        }
    }

    if dirty.contains(Group::Domains) {
        for (i, domain) in draft.domains().iter().enumerate() {
            if domain.domain_name.is_empty() {
                return Err(CoreError::validation(
                    format!("domain #{}", i + 1),
                    "domain name cannot be empty",
                ));
            }
        }
    }

    Ok(())
}

// ── Encoding ────────────────────────────────────────────────────────

/// Build the multipart body for `dirty`. Call [`validate`] first.
pub fn encode(draft: &Draft, dirty: &DirtySet) -> Result<DraftForm, CoreError> {
    let mut form = DraftForm::new();

    for group in dirty.iter() {
        match group {
            Group::Logo => encode_logo(draft, &mut form),
            Group::Branding => encode_branding(draft, &mut form),
            Group::Info => form.json("info", draft.info())?,
            Group::Banners => encode_banners(draft, &mut form)?,
            Group::BannerFooters => encode_footer(draft, &mut form)?,
            Group::Seo => encode_seo(draft, &mut form),
            Group::LineContact => form.json("line_contact", draft.line_contact())?,
            Group::FacebookPage => form.json("facebook_page", draft.facebook_page())?,
            Group::Subdomain => form.json(
                "subdomain",
                &serde_json::json!({ "subdomain": draft.subdomain() }),
            )?,
            Group::Domains => encode_domains(draft, &mut form)?,
        }
    }

    debug!(groups = %dirty, fields = form.len(), "encoded draft");
    Ok(form)
}

fn encode_logo(draft: &Draft, form: &mut DraftForm) {
    if let Some(file) = draft.logo().pending_file() {
        form.file("logo", file.to_part());
    } else if draft.logo().remove_requested() {
        form.flag("remove_logo");
    }
}

fn encode_branding(draft: &Draft, form: &mut DraftForm) {
    let theme = draft.theme();
    if !theme.title.is_empty() {
        form.text("title", theme.title.as_str());
    }
    for (name, value) in [
        ("primary_color", &theme.primary_color),
        ("secondary_color", &theme.secondary_color),
        ("font_family", &theme.font_family),
    ] {
        if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
            form.text(name, value);
        }
    }

    if let Some(file) = draft.favicon().pending_file() {
        form.file("favicon", file.to_part());
    } else if draft.favicon().remove_requested() {
        form.flag("remove_favicon");
    }
}

fn encode_seo(draft: &Draft, form: &mut DraftForm) {
    form.text("seo_title", draft.seo().title.as_str());
    form.text("seo_description", draft.seo().description.as_str());

    if let Some(file) = draft.seo_image().pending_file() {
        form.file("seo_image", file.to_part());
    } else if draft.seo_image().remove_requested() {
        form.flag("seo_remove_image");
    }
}

/// Attach a banner's pending files under the operation's index.
fn attach_files(form: &mut DraftForm, banner: &EditableBanner, kind: &str, index: usize) {
    if let Some(file) = banner.desktop.pending_file() {
        form.file(
            indexed_field_name(&format!("desktop_{kind}"), index),
            file.to_part(),
        );
    }
    if let Some(file) = banner.mobile.pending_file() {
        form.file(
            indexed_field_name(&format!("mobile_{kind}"), index),
            file.to_part(),
        );
    }
}

fn banner_operation(banner: &EditableBanner) -> PendingOperation {
    match &banner.id {
        None => {
            let mut op = PendingOperation::create();
            if !banner.link_url.is_empty() {
                op = op.with_link_url(banner.link_url.as_str());
            }
            op.with_active(banner.is_active)
        }
        Some(id) => {
            let op = PendingOperation::update(id.as_str())
                .with_link_url(banner.link_url.as_str())
                .with_active(banner.is_active);
            if banner.remove_mobile_image() {
                op.removing_mobile_image()
            } else {
                op
            }
        }
    }
}

fn encode_banners(draft: &Draft, form: &mut DraftForm) -> Result<(), CoreError> {
    let mut ops = Vec::with_capacity(draft.banners().len() + draft.deleted_banner_ids().len());
    for banner in draft.banners() {
        attach_files(form, banner, "banner", ops.len());
        ops.push(banner_operation(banner));
    }
    ops.extend(
        draft
            .deleted_banner_ids()
            .iter()
            .map(|id| PendingOperation::delete(id.as_str())),
    );
    form.json("banners", &ops)?;
    Ok(())
}

fn footer_operation(footer: &EditableFooter) -> PendingOperation {
    let banner = &footer.banner;
    match &banner.id {
        None => {
            let mut op = PendingOperation::create();
            if !footer.title.is_empty() {
                op = op.with_title(footer.title.as_str());
            }
            if !footer.description.is_empty() {
                op = op.with_description(footer.description.as_str());
            }
            if !banner.link_url.is_empty() {
                op = op.with_link_url(banner.link_url.as_str());
            }
            op.with_active(banner.is_active)
        }
        Some(id) => {
            let op = PendingOperation::update(id.as_str())
                .with_title(footer.title.as_str())
                .with_description(footer.description.as_str())
                .with_link_url(banner.link_url.as_str())
                .with_active(banner.is_active);
            if banner.remove_mobile_image() {
                op.removing_mobile_image()
            } else {
                op
            }
        }
    }
}

fn encode_footer(draft: &Draft, form: &mut DraftForm) -> Result<(), CoreError> {
    let mut ops = Vec::with_capacity(2);
    if let Some(footer) = draft.footer() {
        attach_files(form, &footer.banner, "footer", ops.len());
        ops.push(footer_operation(footer));
    }
    if let Some(id) = draft.deleted_footer_id() {
        ops.push(PendingOperation::delete(id));
    }
    form.json("banner_footers", &ops)?;
    Ok(())
}

/// Creates and changed updates in display order, then deletes. Unchanged
/// stored domains are not sent; with nothing left the field is omitted.
fn encode_domains(draft: &Draft, form: &mut DraftForm) -> Result<(), CoreError> {
    let snapshot = draft.snapshot();
    let mut ops = Vec::new();

    for domain in draft.domains() {
        match &domain.id {
            None => ops.push(PendingOperation::create().with_domain_name(domain.domain_name.as_str())),
            Some(id) => {
                let changed = snapshot.domain(id).is_some_and(|orig| {
                    orig.domain_name != domain.domain_name || orig.is_active != domain.is_active
                });
                if changed {
                    ops.push(
                        PendingOperation::update(id.as_str())
                            .with_domain_name(domain.domain_name.as_str())
                            .with_active(domain.is_active),
                    );
                }
            }
        }
    }
    ops.extend(
        draft
            .deleted_domain_ids()
            .iter()
            .map(|id| PendingOperation::delete(id.as_str())),
    );

    if !ops.is_empty() {
        form.json("domains", &ops)?;
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::draft::{
        BannerPatch, Direction, DomainPatch, FooterPatch, InfoPatch, SeoPatch, ThemePatch,
    };
    use crate::model::{BannerRecord, DomainRecord, DraftSnapshot, LocalFile};

    fn png(name: &str) -> LocalFile {
        LocalFile::from_bytes(name, &b"\x89PNG"[..]).unwrap()
    }

    fn snapshot() -> DraftSnapshot {
        DraftSnapshot {
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
            footer: Some(BannerRecord {
                id: "f1".into(),
                desktop_url: Some("https://cdn/f1.png".into()),
                title: "Visit".into(),
                is_active: true,
                ..BannerRecord::default()
            }),
            seo_image_url: Some("https://cdn/og.png".into()),
            domains: vec![
                DomainRecord {
                    id: "d1".into(),
                    domain_name: "shop.acme.com".into(),
                    is_active: true,
                    is_verified: Some(true),
                },
                DomainRecord {
                    id: "d2".into(),
                    domain_name: "old.acme.com".into(),
                    is_active: true,
                    is_verified: None,
                },
            ],
            ..DraftSnapshot::default()
        }
    }

    fn encoded(draft: &Draft) -> DraftForm {
        let dirty = draft.dirty_set();
        validate(draft, &dirty).unwrap();
        encode(draft, &dirty).unwrap()
    }

    fn ops_json(form: &DraftForm, name: &str) -> serde_json::Value {
        serde_json::from_str(form.text_value(name).unwrap()).unwrap()
    }

    #[test]
    fn toggling_active_sends_single_update_without_files() {
        let mut draft = Draft::fork(snapshot());
        draft
            .update_banner(
                0,
                BannerPatch {
                    link_url: None,
                    is_active: Some(false),
                },
            )
            .unwrap();
        draft.remove_banner(1).unwrap();
        draft.discard();
        draft
            .update_banner(
                0,
                BannerPatch {
                    link_url: None,
                    is_active: Some(false),
                },
            )
            .unwrap();

        let form = encoded(&draft);
        assert_eq!(form.field_names(), vec!["banners"]);
        assert_eq!(
            ops_json(&form, "banners"),
            json!([
                {"action": "update", "id": "b1", "link_url": "https://a.com", "is_active": false},
                {"action": "update", "id": "b2", "link_url": "", "is_active": true}
            ])
        );
    }

    #[test]
    fn new_banner_without_mobile_sends_create_and_desktop_only() {
        let mut draft = Draft::fork(DraftSnapshot::default());
        let index = draft.add_banner().unwrap();
        draft.set_banner_desktop(index, png("hero.png")).unwrap();

        let form = encoded(&draft);
        assert_eq!(
            ops_json(&form, "banners"),
            json!([{"action": "create", "is_active": true}])
        );
        assert!(form.indexed_file("desktop_banner", 0).is_some());
        assert!(form.indexed_file("mobile_banner", 0).is_none());
        assert_eq!(form.field_names(), vec!["desktop_banner_0", "banners"]);
    }

    #[test]
    fn new_banner_without_desktop_fails_validation() {
        let mut draft = Draft::fork(snapshot());
        draft.add_banner().unwrap();
        let err = validate(&draft, &draft.dirty_set()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "banner #3: a desktop image is required for new banners"
        );
    }

    #[test]
    fn deletes_follow_creates_and_updates_in_display_order() {
        let mut draft = Draft::fork(snapshot());
        let new = draft.add_banner().unwrap();
        draft.set_banner_desktop(new, png("n.png")).unwrap();
        draft.set_banner_mobile(new, png("nm.png")).unwrap();
        draft.remove_banner(0).unwrap();
        // [b2, new] -> [new, b2]
        draft.move_banner(1, Direction::Up).unwrap();
        draft.set_banner_desktop(1, png("b2.png")).unwrap();

        let form = encoded(&draft);
        let ops = form.operations("banners").unwrap().unwrap();
        let shape: Vec<_> = ops
            .iter()
            .map(|op| (op.action, op.id.clone()))
            .collect();
        use shopfront_api::OperationAction::{Create, Delete, Update};
        assert_eq!(
            shape,
            vec![
                (Create, None),
                (Update, Some("b2".to_string())),
                (Delete, Some("b1".to_string())),
            ]
        );
        assert_eq!(form.indexed_file("desktop_banner", 0).unwrap().file_name, "n.png");
        assert_eq!(form.indexed_file("mobile_banner", 0).unwrap().file_name, "nm.png");
        assert_eq!(form.indexed_file("desktop_banner", 1).unwrap().file_name, "b2.png");
        assert!(form.indexed_file("desktop_banner", 2).is_none());
    }

    #[test]
    fn cleared_stored_mobile_sets_remove_flag_on_update() {
        let mut draft = Draft::fork(snapshot());
        draft.clear_banner_mobile(0).unwrap();

        let form = encoded(&draft);
        let ops = ops_json(&form, "banners");
        assert_eq!(ops[0]["remove_mobile_image"], json!(true));
        assert!(ops[1].get("remove_mobile_image").is_none());
    }

    #[test]
    fn only_dirty_scalar_group_is_sent() {
        let mut draft = Draft::fork(snapshot());
        draft.update_info(InfoPatch {
            company_name: Some("Acme".into()),
            ..InfoPatch::default()
        });

        let form = encoded(&draft);
        assert_eq!(form.field_names(), vec!["info"]);
        assert_eq!(
            serde_json::from_str::<serde_json::Value>(form.text_value("info").unwrap()).unwrap(),
            json!({"company_name": "Acme", "description": "", "phone": "", "email": "", "address": ""})
        );
    }

    #[test]
    fn branding_skips_empty_values_and_never_sends_file_with_remove() {
        let mut draft = Draft::fork(DraftSnapshot {
            favicon_url: Some("https://cdn/fav.ico.png".into()),
            ..DraftSnapshot::default()
        });
        draft.update_theme(ThemePatch {
            primary_color: Some("#112233".into()),
            ..ThemePatch::default()
        });
        draft.clear_favicon();

        let form = encoded(&draft);
        assert_eq!(form.field_names(), vec!["primary_color", "remove_favicon"]);

        draft.set_favicon(png("fav.png"));
        let form = encoded(&draft);
        assert_eq!(form.field_names(), vec!["primary_color", "favicon"]);
    }

    #[test]
    fn seo_always_sends_both_texts() {
        let mut draft = Draft::fork(snapshot());
        draft.update_seo(SeoPatch {
            title: Some("Acme".into()),
            description: None,
        });
        draft.clear_seo_image();

        let form = encoded(&draft);
        assert_eq!(
            form.field_names(),
            vec!["seo_title", "seo_description", "seo_remove_image"]
        );
        assert_eq!(form.text_value("seo_description"), Some(""));
    }

    #[test]
    fn contact_groups_are_independent() {
        let mut draft = Draft::fork(snapshot());
        draft.update_line_contact(crate::draft::LineContactPatch {
            line_url: Some("https://line.me/acme".into()),
            enabled: Some(true),
        });

        let form = encoded(&draft);
        assert_eq!(form.field_names(), vec!["line_contact"]);
        assert_eq!(
            form.text_value("line_contact"),
            Some(r#"{"line_url":"https://line.me/acme","enabled":true}"#)
        );
    }

    #[test]
    fn footer_update_sends_all_fields() {
        let mut draft = Draft::fork(snapshot());
        draft
            .update_footer(FooterPatch {
                description: Some("Open daily".into()),
                ..FooterPatch::default()
            })
            .unwrap();

        let form = encoded(&draft);
        assert_eq!(
            ops_json(&form, "banner_footers"),
            json!([{
                "action": "update", "id": "f1", "title": "Visit",
                "description": "Open daily", "link_url": "", "is_active": true
            }])
        );
    }

    #[test]
    fn replacing_footer_creates_then_deletes() {
        let mut draft = Draft::fork(snapshot());
        draft.remove_footer().unwrap();
        draft.create_footer().unwrap();
        draft.set_footer_desktop(png("f.png")).unwrap();
        draft
            .update_footer(FooterPatch {
                title: Some("New".into()),
                ..FooterPatch::default()
            })
            .unwrap();

        let form = encoded(&draft);
        assert_eq!(
            ops_json(&form, "banner_footers"),
            json!([
                {"action": "create", "title": "New", "is_active": true},
                {"action": "delete", "id": "f1"}
            ])
        );
        assert!(form.indexed_file("desktop_footer", 0).is_some());
    }

    #[test]
    fn new_footer_without_desktop_fails_validation() {
        let mut draft = Draft::fork(DraftSnapshot::default());
        draft.create_footer().unwrap();
        assert!(matches!(
            validate(&draft, &draft.dirty_set()),
            Err(CoreError::Validation { .. })
        ));
    }

    #[test]
    fn domains_send_only_changes() {
        let mut draft = Draft::fork(snapshot());
        draft
            .update_domain(
                0,
                DomainPatch {
                    domain_name: None,
                    is_active: Some(true),
                },
            )
            .unwrap();

        let form = encoded(&draft);
        assert!(form.is_empty());

        draft.remove_domain(1).unwrap();
        draft.add_domain("new.acme.com").unwrap();
        draft
            .update_domain(
                0,
                DomainPatch {
                    domain_name: None,
                    is_active: Some(false),
                },
            )
            .unwrap();

        let form = encoded(&draft);
        assert_eq!(
            ops_json(&form, "domains"),
            json!([
                {"action": "update", "id": "d1", "domain_name": "shop.acme.com", "is_active": false},
                {"action": "create", "domain_name": "new.acme.com"},
                {"action": "delete", "id": "d2"}
            ])
        );
    }

    #[test]
    fn short_subdomain_is_rejected() {
        let mut draft = Draft::fork(snapshot());
        draft.set_subdomain("ab");
        assert!(validate(&draft, &draft.dirty_set()).is_err());

        draft.set_subdomain("abc");
        let form = encoded(&draft);
        assert_eq!(form.text_value("subdomain"), Some(r#"{"subdomain":"abc"}"#));
    }
}
