//! Banner command handlers.

use tabled::Tabled;

use shopfront_core::{BannerPatch, Direction, DraftEditor, Edit};

use crate::cli::{BannersArgs, BannersCommand, GlobalOpts, MoveDirection};
use crate::error::CliError;
use crate::output;

use super::draft::{BannerView, banner_views};
use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct BannerRow {
    #[tabled(rename = "#")]
    position: usize,
    #[tabled(rename = "Desktop")]
    desktop: String,
    #[tabled(rename = "Mobile")]
    mobile: String,
    #[tabled(rename = "Link")]
    link: String,
    #[tabled(rename = "Active")]
    active: String,
}

impl From<&BannerView> for BannerRow {
    fn from(b: &BannerView) -> Self {
        Self {
            position: b.position,
            desktop: b.desktop.clone().unwrap_or_else(|| "-".into()),
            mobile: b.mobile.clone().unwrap_or_else(|| "-".into()),
            link: b.link_url.clone().unwrap_or_else(|| "-".into()),
            active: output::yes_no(b.is_active),
        }
    }
}

impl From<MoveDirection> for Direction {
    fn from(d: MoveDirection) -> Self {
        match d {
            MoveDirection::Up => Self::Up,
            MoveDirection::Down => Self::Down,
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    editor: &mut DraftEditor,
    args: BannersArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        BannersCommand::List => {
            util::load(editor, global).await?;
            let views = banner_views(util::loaded(editor)?);
            let out = output::render_list(
                &global.output,
                &views,
                |b| BannerRow::from(b),
                |b| b.position.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        BannersCommand::Add {
            desktop,
            mobile,
            link,
            inactive,
        } => {
            let edit = Edit::AddBanner {
                desktop: Some(desktop),
                mobile,
                link_url: link,
                is_active: Some(!inactive),
            };
            util::edit_and_save(editor, global, vec![edit]).await
        }

        BannersCommand::Remove { position } => {
            let index = util::index_of(position)?;
            if !util::confirm(&format!("Remove banner #{position}?"), global)? {
                return Ok(());
            }
            util::edit_and_save(editor, global, vec![Edit::RemoveBanner { index }]).await
        }

        BannersCommand::Move {
            position,
            direction,
        } => {
            let edit = Edit::MoveBanner {
                index: util::index_of(position)?,
                direction: direction.into(),
            };
            util::edit_and_save(editor, global, vec![edit]).await
        }

        BannersCommand::Update {
            position,
            link,
            active,
        } => {
            let edit = Edit::UpdateBanner {
                index: util::index_of(position)?,
                patch: BannerPatch {
                    link_url: link,
                    is_active: active,
                },
            };
            util::edit_and_save(editor, global, vec![edit]).await
        }

        BannersCommand::SetImage {
            position,
            desktop,
            mobile,
        } => {
            let index = util::index_of(position)?;
            let mut edits = Vec::new();
            if let Some(path) = desktop {
                edits.push(Edit::SetBannerDesktop { index, path });
            }
            if let Some(path) = mobile {
                edits.push(Edit::SetBannerMobile { index, path });
            }
            util::edit_and_save(editor, global, edits).await
        }

        BannersCommand::ClearMobile { position } => {
            let index = util::index_of(position)?;
            util::edit_and_save(editor, global, vec![Edit::ClearBannerMobile { index }]).await
        }
    }
}
