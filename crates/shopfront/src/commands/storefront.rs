//! Public storefront command handler. Runs without a token.

use std::fmt::Write as _;

use serde::Serialize;

use shopfront_core::{StorefrontData, fetch_storefront};

use crate::cli::{GlobalOpts, StorefrontArgs};
use crate::config;
use crate::error::CliError;
use crate::output;

use super::draft::or_dash;
use super::util;

#[derive(Serialize)]
struct StorefrontView {
    domain: String,
    #[serde(flatten)]
    data: StorefrontData,
}

fn detail(v: &StorefrontView) -> String {
    let data = &v.data;
    let theme = data.theme.clone().unwrap_or_default();
    let seo = data.seo.clone().unwrap_or_default();
    let mut out = output::detail_lines(&[
        ("Domain", v.domain.clone()),
        (
            "Company",
            or_dash(data.logo.as_ref().and_then(|l| l.company_name.as_deref())),
        ),
        ("Logo", or_dash(data.logo.as_ref().map(|l| l.image_url.as_str()))),
        ("Title", or_dash(theme.title.as_deref())),
        ("Primary color", or_dash(theme.primary_color.as_deref())),
        ("Font", or_dash(theme.font_family.as_deref())),
        ("SEO title", or_dash(seo.title.as_deref())),
    ]);

    let _ = write!(out, "\n\nBanners ({})", data.banners.len());
    for (i, b) in data.banners.iter().enumerate() {
        let _ = write!(out, "\n  {}. {}", i + 1, b.desktop_image_url);
        if let Some(ref link) = b.link_url {
            let _ = write!(out, " -> {link}");
        }
    }
    if !data.sections.is_empty() {
        let _ = write!(out, "\n\nSections ({})", data.sections.len());
        for s in &data.sections {
            let _ = write!(out, "\n  {} {}", or_dash(s.title.as_deref()), s.image_url);
        }
    }
    if let Some(ref footer) = data.footer {
        let _ = write!(
            out,
            "\n\nFooter\n{}",
            output::detail_lines(&[
                ("  Phone", or_dash(footer.phone.as_deref())),
                ("  Email", or_dash(footer.email.as_deref())),
                ("  Address", or_dash(footer.address.as_deref())),
                ("  LINE", or_dash(footer.line_url.as_deref())),
                ("  Facebook", or_dash(footer.facebook_url.as_deref())),
            ])
        );
    }
    out
}

pub async fn handle(args: StorefrontArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let mut cfg = config::load_config_or_default();
    let resolved = config::resolve_editor(global, &cfg)?;

    let input = match args.domain {
        Some(domain) => domain,
        None => resolved
            .profile
            .as_ref()
            .and_then(|p| p.preview_domain.clone())
            .ok_or_else(|| CliError::Validation {
                field: "domain".into(),
                reason: "no domain given and none remembered for this profile".into(),
            })?,
    };

    let bar = util::spinner("Fetching storefront", global);
    let result = fetch_storefront(&resolved.editor, &input).await;
    bar.finish_and_clear();
    let (domain, data) = result?;

    let remembered = resolved.profile.as_ref().and_then(|p| p.preview_domain.as_deref());
    if remembered != Some(domain.as_str())
        && cfg.remember_preview_domain(&resolved.profile_name, &domain)
    {
        if let Err(e) = config::save_config(&cfg) {
            tracing::warn!(error = %e, "could not remember storefront domain");
        }
    }

    let view = StorefrontView { domain, data };
    let out = output::render_single(&global.output, &view, detail, |v| v.domain.clone());
    output::print_output(&out, global.quiet);
    Ok(())
}
