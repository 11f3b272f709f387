//! Branding command handlers: theme, presets and favicon.

use serde::Serialize;

use shopfront_core::{BrandingOptions, DraftEditor, Edit, ThemePatch};

use crate::cli::{BrandingArgs, BrandingCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::draft::or_dash;
use super::util;

#[derive(Serialize)]
struct BrandingView {
    title: String,
    primary_color: Option<String>,
    secondary_color: Option<String>,
    font_family: Option<String>,
    favicon: Option<String>,
    /// Presets offered by the server; absent when they could not be fetched.
    options: Option<BrandingOptions>,
}

fn detail(v: &BrandingView) -> String {
    let mut pairs = vec![
        ("Title", or_dash(Some(&v.title))),
        ("Primary color", or_dash(v.primary_color.as_deref())),
        ("Secondary color", or_dash(v.secondary_color.as_deref())),
        ("Font", or_dash(v.font_family.as_deref())),
        ("Favicon", or_dash(v.favicon.as_deref())),
    ];
    if let Some(ref opts) = v.options {
        pairs.push(("Preset primaries", opts.primary_colors.join(", ")));
        pairs.push(("Preset secondaries", opts.secondary_colors.join(", ")));
        pairs.push(("Preset fonts", opts.fonts.join(", ")));
    }
    output::detail_lines(&pairs)
}

pub async fn handle(
    editor: &mut DraftEditor,
    args: BrandingArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        BrandingCommand::Show => {
            util::load(editor, global).await?;
            let draft = util::loaded(editor)?;
            let theme = draft.theme();
            let view = BrandingView {
                title: theme.title.clone(),
                primary_color: theme.primary_color.clone(),
                secondary_color: theme.secondary_color.clone(),
                font_family: theme.font_family.clone(),
                favicon: draft.favicon().display_url().map(str::to_owned),
                options: editor.branding_options().cloned(),
            };
            let out = output::render_single(&global.output, &view, detail, |v| v.title.clone());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        BrandingCommand::Set {
            title,
            primary_color,
            secondary_color,
            font,
        } => {
            let patch = ThemePatch {
                title,
                primary_color,
                secondary_color,
                font_family: font,
            };
            util::edit_and_save(editor, global, vec![Edit::UpdateTheme(patch)]).await
        }

        BrandingCommand::Favicon { path, clear } => {
            let edit = match path {
                Some(path) if !clear => Edit::SetFavicon { path },
                _ => Edit::ClearFavicon,
            };
            util::edit_and_save(editor, global, vec![edit]).await
        }
    }
}
