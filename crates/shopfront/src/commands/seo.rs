//! SEO command handlers.

use serde::Serialize;

use shopfront_core::{DraftEditor, Edit, SeoPatch};

use crate::cli::{GlobalOpts, SeoArgs, SeoCommand};
use crate::error::CliError;
use crate::output;

use super::draft::or_dash;
use super::util;

#[derive(Serialize)]
struct SeoView {
    title: String,
    description: String,
    image: Option<String>,
}

fn detail(v: &SeoView) -> String {
    output::detail_lines(&[
        ("Title", or_dash(Some(&v.title))),
        ("Description", or_dash(Some(&v.description))),
        ("Share image", or_dash(v.image.as_deref())),
    ])
}

pub async fn handle(
    editor: &mut DraftEditor,
    args: SeoArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        SeoCommand::Show => {
            util::load(editor, global).await?;
            let draft = util::loaded(editor)?;
            let view = SeoView {
                title: draft.seo().title.clone(),
                description: draft.seo().description.clone(),
                image: draft.seo_image().display_url().map(str::to_owned),
            };
            let out = output::render_single(&global.output, &view, detail, |v| v.title.clone());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        SeoCommand::Set { title, description } => {
            let patch = SeoPatch { title, description };
            util::edit_and_save(editor, global, vec![Edit::UpdateSeo(patch)]).await
        }

        SeoCommand::Image { path, clear } => {
            let edit = match path {
                Some(path) if !clear => Edit::SetSeoImage { path },
                _ => Edit::ClearSeoImage,
            };
            util::edit_and_save(editor, global, vec![edit]).await
        }
    }
}
