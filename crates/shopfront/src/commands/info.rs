//! Business information command handlers.

use shopfront_core::model::BusinessInfo;
use shopfront_core::{DraftEditor, Edit, InfoPatch};

use crate::cli::{GlobalOpts, InfoArgs, InfoCommand};
use crate::error::CliError;
use crate::output;

use super::draft::or_dash;
use super::util;

fn detail(info: &BusinessInfo) -> String {
    output::detail_lines(&[
        ("Company", or_dash(Some(&info.company_name))),
        ("Description", or_dash(Some(&info.description))),
        ("Phone", or_dash(Some(&info.phone))),
        ("Email", or_dash(Some(&info.email))),
        ("Address", or_dash(Some(&info.address))),
    ])
}

pub async fn handle(
    editor: &mut DraftEditor,
    args: InfoArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        InfoCommand::Show => {
            util::load(editor, global).await?;
            let info = util::loaded(editor)?.info();
            let out = output::render_single(&global.output, info, detail, |i| {
                i.company_name.clone()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        InfoCommand::Set {
            company_name,
            description,
            phone,
            email,
            address,
        } => {
            let patch = InfoPatch {
                company_name,
                description,
                phone,
                email,
                address,
            };
            util::edit_and_save(editor, global, vec![Edit::UpdateInfo(patch)]).await
        }
    }
}
