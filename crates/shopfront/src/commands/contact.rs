//! Contact link command handlers (LINE, Facebook).

use serde::Serialize;

use shopfront_core::model::{FacebookPage, LineContact};
use shopfront_core::{DraftEditor, Edit, FacebookPagePatch, LineContactPatch};

use crate::cli::{ContactArgs, ContactCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::draft::or_dash;
use super::util;

#[derive(Serialize)]
struct ContactView {
    line_contact: LineContact,
    facebook_page: FacebookPage,
}

fn detail(v: &ContactView) -> String {
    output::detail_lines(&[
        ("LINE", or_dash(Some(&v.line_contact.line_url))),
        ("LINE enabled", output::yes_no(v.line_contact.enabled)),
        ("Facebook", or_dash(Some(&v.facebook_page.page_url))),
        ("Facebook enabled", output::yes_no(v.facebook_page.enabled)),
    ])
}

pub async fn handle(
    editor: &mut DraftEditor,
    args: ContactArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        ContactCommand::Show => {
            util::load(editor, global).await?;
            let draft = util::loaded(editor)?;
            let view = ContactView {
                line_contact: draft.line_contact().clone(),
                facebook_page: draft.facebook_page().clone(),
            };
            let out = output::render_single(&global.output, &view, detail, |v| {
                v.line_contact.line_url.clone()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ContactCommand::Line { url, enabled } => {
            let patch = LineContactPatch {
                line_url: url,
                enabled,
            };
            util::edit_and_save(editor, global, vec![Edit::UpdateLineContact(patch)]).await
        }

        ContactCommand::Facebook { url, enabled } => {
            let patch = FacebookPagePatch {
                page_url: url,
                enabled,
            };
            util::edit_and_save(editor, global, vec![Edit::UpdateFacebookPage(patch)]).await
        }
    }
}
