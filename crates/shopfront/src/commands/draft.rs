//! Draft command handlers: show, preview, diff, apply.

use std::fmt::Write as _;

use serde::Serialize;
use tabled::Tabled;

use shopfront_core::encode;
use shopfront_core::model::ImageField;
use shopfront_core::{Draft, DraftEditor, FormValue, PreviewSummary};

use crate::cli::{DraftArgs, DraftCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Draft view ──────────────────────────────────────────────────────

#[derive(Serialize)]
struct DraftView {
    logo: Option<String>,
    favicon: Option<String>,
    theme: ThemeView,
    info: shopfront_core::model::BusinessInfo,
    banners: Vec<BannerView>,
    footer: Option<FooterView>,
    seo: SeoView,
    line_contact: shopfront_core::model::LineContact,
    facebook_page: shopfront_core::model::FacebookPage,
    subdomain: String,
    domains: Vec<DomainView>,
}

#[derive(Serialize)]
struct ThemeView {
    title: String,
    primary_color: Option<String>,
    secondary_color: Option<String>,
    font_family: Option<String>,
}

#[derive(Serialize)]
pub(super) struct BannerView {
    pub position: usize,
    pub id: Option<String>,
    pub desktop: Option<String>,
    pub mobile: Option<String>,
    pub link_url: Option<String>,
    pub is_active: bool,
}

#[derive(Serialize)]
pub(super) struct FooterView {
    pub id: Option<String>,
    pub title: String,
    pub description: String,
    pub desktop: Option<String>,
    pub mobile: Option<String>,
    pub link_url: Option<String>,
    pub is_active: bool,
}

#[derive(Serialize)]
struct SeoView {
    title: String,
    description: String,
    image: Option<String>,
}

#[derive(Serialize)]
struct DomainView {
    id: Option<String>,
    domain_name: String,
    is_active: bool,
    is_verified: Option<bool>,
}

fn image(field: &ImageField) -> Option<String> {
    field.display_url().map(str::to_owned)
}

pub(super) fn banner_views(draft: &Draft) -> Vec<BannerView> {
    draft
        .banners()
        .iter()
        .enumerate()
        .map(|(i, b)| BannerView {
            position: i + 1,
            id: b.id.clone(),
            desktop: image(&b.desktop),
            mobile: image(&b.mobile),
            link_url: util::non_empty(&b.link_url),
            is_active: b.is_active,
        })
        .collect()
}

pub(super) fn footer_view(draft: &Draft) -> Option<FooterView> {
    draft.footer().map(|f| FooterView {
        id: f.banner.id.clone(),
        title: f.title.clone(),
        description: f.description.clone(),
        desktop: image(&f.banner.desktop),
        mobile: image(&f.banner.mobile),
        link_url: util::non_empty(&f.banner.link_url),
        is_active: f.banner.is_active,
    })
}

impl DraftView {
    fn from_draft(draft: &Draft) -> Self {
        let theme = draft.theme();
        Self {
            logo: image(draft.logo()),
            favicon: image(draft.favicon()),
            theme: ThemeView {
                title: theme.title.clone(),
                primary_color: theme.primary_color.clone(),
                secondary_color: theme.secondary_color.clone(),
                font_family: theme.font_family.clone(),
            },
            info: draft.info().clone(),
            banners: banner_views(draft),
            footer: footer_view(draft),
            seo: SeoView {
                title: draft.seo().title.clone(),
                description: draft.seo().description.clone(),
                image: image(draft.seo_image()),
            },
            line_contact: draft.line_contact().clone(),
            facebook_page: draft.facebook_page().clone(),
            subdomain: draft.subdomain().to_owned(),
            domains: draft
                .domains()
                .iter()
                .map(|d| DomainView {
                    id: d.id.clone(),
                    domain_name: d.domain_name.clone(),
                    is_active: d.is_active,
                    is_verified: d.is_verified,
                })
                .collect(),
        }
    }
}

pub(super) fn or_dash(value: Option<&str>) -> String {
    value.filter(|v| !v.is_empty()).unwrap_or("-").to_owned()
}

fn draft_detail(v: &DraftView) -> String {
    let mut out = output::detail_lines(&[
        ("Title", or_dash(Some(&v.theme.title))),
        ("Logo", or_dash(v.logo.as_deref())),
        ("Favicon", or_dash(v.favicon.as_deref())),
        ("Primary color", or_dash(v.theme.primary_color.as_deref())),
        ("Secondary color", or_dash(v.theme.secondary_color.as_deref())),
        ("Font", or_dash(v.theme.font_family.as_deref())),
        ("Company", or_dash(Some(&v.info.company_name))),
        ("SEO title", or_dash(Some(&v.seo.title))),
        ("SEO image", or_dash(v.seo.image.as_deref())),
        (
            "LINE",
            format!(
                "{} (enabled: {})",
                or_dash(Some(&v.line_contact.line_url)),
                output::yes_no(v.line_contact.enabled)
            ),
        ),
        (
            "Facebook",
            format!(
                "{} (enabled: {})",
                or_dash(Some(&v.facebook_page.page_url)),
                output::yes_no(v.facebook_page.enabled)
            ),
        ),
        ("Subdomain", or_dash(Some(&v.subdomain))),
    ]);

    let _ = write!(out, "\n\nBanners ({})", v.banners.len());
    for b in &v.banners {
        let _ = write!(
            out,
            "\n  {}. {}{}",
            b.position,
            or_dash(b.desktop.as_deref()),
            if b.is_active { "" } else { " (hidden)" }
        );
    }
    if let Some(ref f) = v.footer {
        let _ = write!(
            out,
            "\n\nFooter banner\n  {} {}",
            or_dash(Some(&f.title)),
            or_dash(f.desktop.as_deref())
        );
    }
    let _ = write!(out, "\n\nCustom domains ({})", v.domains.len());
    for d in &v.domains {
        let _ = write!(
            out,
            "\n  {}{}",
            d.domain_name,
            if d.is_active { "" } else { " (inactive)" }
        );
    }
    out
}

// ── Change rows ─────────────────────────────────────────────────────

#[derive(Serialize, Tabled)]
struct ChangeRow {
    #[tabled(rename = "Group")]
    group: String,
    #[tabled(rename = "Change")]
    summary: String,
}

#[derive(Serialize, Tabled)]
struct FieldRow {
    #[tabled(rename = "Field")]
    name: String,
    #[tabled(rename = "Value")]
    value: String,
}

fn describe(value: &FormValue) -> String {
    match value {
        FormValue::Text(text) => text.clone(),
        FormValue::File(part) => format!(
            "<{} ({}, {} bytes)>",
            part.file_name,
            part.content_type,
            part.bytes.len()
        ),
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    editor: &mut DraftEditor,
    args: DraftArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        DraftCommand::Show => {
            util::load(editor, global).await?;
            let view = DraftView::from_draft(util::loaded(editor)?);
            let out = output::render_single(&global.output, &view, draft_detail, |v| {
                v.subdomain.clone()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        DraftCommand::Preview => {
            util::load(editor, global).await?;
            let summary =
                PreviewSummary::from_draft(util::loaded(editor)?, &editor.config().storefront_suffix);
            let out = output::render_single(
                &global.output,
                &summary,
                ToString::to_string,
                |s| s.heading.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        DraftCommand::Diff { script } => {
            let edits = util::read_script(&script)?;
            util::load(editor, global).await?;
            let draft = editor.draft_mut()?;
            draft.apply_all(edits)?;

            let dirty = draft.dirty_set();
            if dirty.is_empty() {
                output::print_status("No changes", global.quiet);
                return Ok(());
            }
            let rows: Vec<ChangeRow> = draft
                .changes()
                .entries()
                .iter()
                .filter(|c| dirty.contains(c.group))
                .map(|c| ChangeRow {
                    group: c.group.to_string(),
                    summary: c.summary.clone(),
                })
                .collect();
            let out = output::render_list(
                &global.output,
                &rows,
                |r| ChangeRow {
                    group: r.group.clone(),
                    summary: r.summary.clone(),
                },
                |r| r.group.clone(),
            );
            output::print_output(&out, global.quiet);
            output::print_status(&format!("Would save: {dirty}"), global.quiet);
            Ok(())
        }

        DraftCommand::Apply { script, dry_run } => {
            let edits = util::read_script(&script)?;
            if !dry_run {
                return util::edit_and_save(editor, global, edits).await;
            }

            util::load(editor, global).await?;
            let draft = editor.draft_mut()?;
            draft.apply_all(edits)?;
            let dirty = draft.dirty_set();
            encode::validate(draft, &dirty)?;
            let form = encode::encode(draft, &dirty)?;

            let rows: Vec<FieldRow> = form
                .fields()
                .iter()
                .map(|(name, value)| FieldRow {
                    name: name.clone(),
                    value: describe(value),
                })
                .collect();
            let out = output::render_list(
                &global.output,
                &rows,
                |r| FieldRow {
                    name: r.name.clone(),
                    value: r.value.clone(),
                },
                |r| r.name.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
