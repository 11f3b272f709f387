//! Publish and status command handlers.

use shopfront_core::{DraftEditor, PublishOutcome, PublishStatus};

use crate::cli::{GlobalOpts, PublishArgs};
use crate::error::CliError;
use crate::output;

use super::util;

fn status_detail(s: &PublishStatus, color: bool) -> String {
    output::detail_lines(&[
        (
            "Unpublished changes",
            output::flag(
                &output::yes_no(s.has_unpublished_changes),
                !s.has_unpublished_changes,
                color,
            ),
        ),
        (
            "Last version",
            s.last_published_version
                .map_or_else(|| "-".into(), |v| v.to_string()),
        ),
        (
            "Last published",
            s.last_published_at.map_or_else(
                || "never".into(),
                |t| t.format("%Y-%m-%d %H:%M UTC").to_string(),
            ),
        ),
    ])
}

pub async fn handle(
    editor: &mut DraftEditor,
    args: PublishArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    if let Some(ref script) = args.script {
        let edits = util::read_script(script)?;
        util::load(editor, global).await?;
        editor.draft_mut()?.apply_all(edits)?;
    }

    if !util::confirm("Publish the draft to the live storefront?", global)? {
        return Ok(());
    }

    let bar = util::spinner("Publishing", global);
    let result = editor.publish().await;
    bar.finish_and_clear();

    match result? {
        PublishOutcome::Published { version, saved } => {
            if !saved.is_empty() {
                let groups: Vec<&str> = saved.iter().map(|g| g.label()).collect();
                output::print_status(&format!("Saved {}", groups.join(", ")), global.quiet);
            }
            let message = match version {
                Some(v) => format!("Published version {v}"),
                None => "Published".to_owned(),
            };
            output::print_status(&message, global.quiet);
            Ok(())
        }
        PublishOutcome::Aborted { report } => Err(CliError::PublishAborted {
            summary: report.to_string(),
        }),
    }
}

pub async fn status(editor: &mut DraftEditor, global: &GlobalOpts) -> Result<(), CliError> {
    let status = editor.status().await?;
    let color = output::should_color(&global.color);
    let out = output::render_single(
        &global.output,
        &status,
        |s| status_detail(s, color),
        |s| output::yes_no(s.has_unpublished_changes),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}
