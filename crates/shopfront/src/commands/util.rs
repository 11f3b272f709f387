//! Shared helpers for command handlers.

use std::io::{IsTerminal, Read};
use std::path::Path;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use shopfront_core::{CoreError, Draft, DraftEditor, Edit, SaveReport, parse_script};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

// ── Progress ────────────────────────────────────────────────────────

/// A stderr spinner, hidden when quiet or not attached to a terminal.
pub fn spinner(message: &'static str, global: &GlobalOpts) -> ProgressBar {
    if global.quiet || !std::io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new_spinner();
    bar.set_style(ProgressStyle::default_spinner());
    bar.set_message(message);
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}

// ── Draft lifecycle ─────────────────────────────────────────────────

/// Fetch the draft into the editor.
pub async fn load(editor: &mut DraftEditor, global: &GlobalOpts) -> Result<(), CliError> {
    let bar = spinner("Loading draft", global);
    let result = editor.load().await.map(|_| ());
    bar.finish_and_clear();
    Ok(result?)
}

/// The loaded draft.
pub fn loaded(editor: &DraftEditor) -> Result<&Draft, CliError> {
    editor.draft().ok_or_else(|| CoreError::NotLoaded.into())
}

/// Load, apply `edits` in order, and save the groups that changed.
pub async fn edit_and_save(
    editor: &mut DraftEditor,
    global: &GlobalOpts,
    edits: Vec<Edit>,
) -> Result<(), CliError> {
    load(editor, global).await?;
    editor.draft_mut()?.apply_all(edits)?;
    save(editor, global).await
}

/// Save the loaded draft and report per-group results.
///
/// An empty change set is not an error here: the command simply had no
/// effect. Failed groups turn into a non-zero exit.
pub async fn save(editor: &mut DraftEditor, global: &GlobalOpts) -> Result<(), CliError> {
    let bar = spinner("Saving draft", global);
    let result = editor.save().await;
    bar.finish_and_clear();

    match result {
        Ok(report) => report_save(&report, global),
        Err(CoreError::NothingToSave) => {
            output::print_status("No changes to save", global.quiet);
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

fn report_save(report: &SaveReport, global: &GlobalOpts) -> Result<(), CliError> {
    if let Some(summary) = report.summary() {
        return Err(CliError::PartialSave { summary });
    }
    let groups: Vec<&str> = report.saved.iter().map(|g| g.label()).collect();
    output::print_status(&format!("Saved {}", groups.join(", ")), global.quiet);
    Ok(())
}

// ── Arguments ───────────────────────────────────────────────────────

/// Convert a 1-based position from the command line to an index.
pub fn index_of(position: usize) -> Result<usize, CliError> {
    position.checked_sub(1).ok_or_else(|| CliError::Validation {
        field: "position".into(),
        reason: "positions start at 1".into(),
    })
}

/// Read and parse an edit script. `-` reads stdin.
pub fn read_script(path: &Path) -> Result<Vec<Edit>, CliError> {
    let contents = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(path)?
    };
    Ok(parse_script(&contents)?)
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, global: &GlobalOpts) -> Result<bool, CliError> {
    if global.yes {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: message.to_owned(),
        });
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// `Some(s)` for non-empty strings, used for optional text columns.
pub fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_are_one_based() {
        assert_eq!(index_of(1).ok(), Some(0));
        assert_eq!(index_of(3).ok(), Some(2));
        assert!(matches!(index_of(0), Err(CliError::Validation { .. })));
    }
}
