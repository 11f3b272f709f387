//! Logo command handlers.

use shopfront_core::{DraftEditor, Edit};

use crate::cli::{GlobalOpts, LogoArgs, LogoCommand};
use crate::error::CliError;

use super::util;

pub async fn handle(
    editor: &mut DraftEditor,
    args: LogoArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let edit = match args.command {
        LogoCommand::Set { path } => Edit::SetLogo { path },
        LogoCommand::Clear => Edit::ClearLogo,
    };
    util::edit_and_save(editor, global, vec![edit]).await
}
