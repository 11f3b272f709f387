//! Footer banner command handlers.

use shopfront_core::{DraftEditor, Edit, FooterPatch};

use crate::cli::{FooterArgs, FooterCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::draft::{FooterView, footer_view, or_dash};
use super::util;

fn detail(f: &FooterView) -> String {
    output::detail_lines(&[
        ("ID", or_dash(f.id.as_deref())),
        ("Title", or_dash(Some(&f.title))),
        ("Description", or_dash(Some(&f.description))),
        ("Desktop", or_dash(f.desktop.as_deref())),
        ("Mobile", or_dash(f.mobile.as_deref())),
        ("Link", or_dash(f.link_url.as_deref())),
        ("Active", output::yes_no(f.is_active)),
    ])
}

pub async fn handle(
    editor: &mut DraftEditor,
    args: FooterArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        FooterCommand::Show => {
            util::load(editor, global).await?;
            match footer_view(util::loaded(editor)?) {
                Some(view) => {
                    let out = output::render_single(&global.output, &view, detail, |f| {
                        f.id.clone().unwrap_or_default()
                    });
                    output::print_output(&out, global.quiet);
                }
                None => output::print_status("No footer banner", global.quiet),
            }
            Ok(())
        }

        FooterCommand::Create {
            desktop,
            mobile,
            title,
            description,
            link,
        } => {
            let edit = Edit::CreateFooter {
                desktop: Some(desktop),
                mobile,
                patch: FooterPatch {
                    title,
                    description,
                    link_url: link,
                    is_active: None,
                },
            };
            util::edit_and_save(editor, global, vec![edit]).await
        }

        FooterCommand::Remove => {
            if !util::confirm("Remove the footer banner?", global)? {
                return Ok(());
            }
            util::edit_and_save(editor, global, vec![Edit::RemoveFooter]).await
        }

        FooterCommand::Update {
            title,
            description,
            link,
            active,
        } => {
            let patch = FooterPatch {
                title,
                description,
                link_url: link,
                is_active: active,
            };
            util::edit_and_save(editor, global, vec![Edit::UpdateFooter(patch)]).await
        }

        FooterCommand::SetImage { desktop, mobile } => {
            let mut edits = Vec::new();
            if let Some(path) = desktop {
                edits.push(Edit::SetFooterDesktop { path });
            }
            if let Some(path) = mobile {
                edits.push(Edit::SetFooterMobile { path });
            }
            util::edit_and_save(editor, global, edits).await
        }

        FooterCommand::ClearMobile => {
            util::edit_and_save(editor, global, vec![Edit::ClearFooterMobile]).await
        }
    }
}
