//! Command dispatch: bridges CLI args -> draft edits -> output formatting.

pub mod banners;
pub mod branding;
pub mod config_cmd;
pub mod contact;
pub mod domains;
pub mod draft;
pub mod footer;
pub mod info;
pub mod logo;
pub mod publish;
pub mod seo;
pub mod storefront;
pub mod subdomain;
pub mod util;

use shopfront_core::DraftEditor;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a session-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    editor: &mut DraftEditor,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Draft(args) => draft::handle(editor, args, global).await,
        Command::Banners(args) => banners::handle(editor, args, global).await,
        Command::Footer(args) => footer::handle(editor, args, global).await,
        Command::Branding(args) => branding::handle(editor, args, global).await,
        Command::Logo(args) => logo::handle(editor, args, global).await,
        Command::Info(args) => info::handle(editor, args, global).await,
        Command::Seo(args) => seo::handle(editor, args, global).await,
        Command::Contact(args) => contact::handle(editor, args, global).await,
        Command::Publish(args) => publish::handle(editor, args, global).await,
        Command::Status => publish::status(editor, global).await,
        Command::Domains(args) => domains::handle(editor, args, global).await,
        Command::Subdomain(args) => subdomain::handle(editor, args, global).await,
        // Handled before a session is opened
        Command::Storefront(_) | Command::Config(_) | Command::Completions(_) => Err(
            CliError::Internal("command does not run inside a session".into()),
        ),
    }
}
