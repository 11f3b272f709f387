//! Custom domain command handlers.
//!
//! These hit the standalone domain endpoints directly instead of going
//! through a draft save.

use tabled::Tabled;

use shopfront_core::{DomainResponse, DraftEditor};

use crate::cli::{DomainsArgs, DomainsCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct DomainRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Domain")]
    name: String,
    #[tabled(rename = "Active")]
    active: String,
    #[tabled(rename = "Verified")]
    verified: String,
}

impl DomainRow {
    fn new(d: &DomainResponse, color: bool) -> Self {
        let verified = match d.is_verified {
            Some(true) => output::flag("yes", true, color),
            Some(false) => output::flag("pending", false, color),
            None => "-".into(),
        };
        Self {
            id: output::dim(&d.id, color),
            name: d.domain_name.clone(),
            active: output::yes_no(d.is_active),
            verified,
        }
    }
}

fn detail(d: &DomainResponse) -> String {
    output::detail_lines(&[
        ("ID", d.id.clone()),
        ("Domain", d.domain_name.clone()),
        ("Active", output::yes_no(d.is_active)),
        (
            "Verified",
            d.is_verified.map_or_else(|| "-".into(), output::yes_no),
        ),
    ])
}

fn print_domain(d: &DomainResponse, global: &GlobalOpts) {
    let out = output::render_single(&global.output, d, detail, |d| d.id.clone());
    output::print_output(&out, global.quiet);
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    editor: &mut DraftEditor,
    args: DomainsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        DomainsCommand::List => {
            let domains = editor.list_domains().await?;
            let color = output::should_color(&global.color);
            let out = output::render_list(
                &global.output,
                &domains,
                |d| DomainRow::new(d, color),
                |d| d.domain_name.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        DomainsCommand::Add { domain_name } => {
            let created = editor.create_domain(&domain_name).await?;
            print_domain(&created, global);
            Ok(())
        }

        DomainsCommand::Update { id, name, active } => {
            if name.is_none() && active.is_none() {
                return Err(CliError::Validation {
                    field: "domain".into(),
                    reason: "pass --name and/or --active".into(),
                });
            }
            let updated = editor.update_domain(&id, name.as_deref(), active).await?;
            print_domain(&updated, global);
            Ok(())
        }

        DomainsCommand::Remove { id } => {
            if !util::confirm(&format!("Delete domain {id}?"), global)? {
                return Ok(());
            }
            editor.delete_domain(&id).await?;
            output::print_status(&format!("Deleted domain {id}"), global.quiet);
            Ok(())
        }
    }
}
