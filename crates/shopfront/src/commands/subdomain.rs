//! Subdomain command handlers.

use serde::Serialize;

use shopfront_core::{DraftEditor, SubdomainResponse};

use crate::cli::{GlobalOpts, SubdomainArgs, SubdomainCommand};
use crate::error::CliError;
use crate::output;

use super::draft::or_dash;

#[derive(Serialize)]
struct CheckView {
    subdomain: String,
    available: bool,
    current: bool,
}

fn full_name(s: &SubdomainResponse) -> String {
    match (s.subdomain.as_deref(), s.base_domain.as_deref()) {
        (Some(sub), Some(base)) => format!("{sub}.{base}"),
        (sub, _) => or_dash(sub),
    }
}

fn detail(s: &SubdomainResponse) -> String {
    output::detail_lines(&[
        ("Subdomain", or_dash(s.subdomain.as_deref())),
        ("Storefront", full_name(s)),
    ])
}

fn print_subdomain(s: &SubdomainResponse, global: &GlobalOpts) {
    let out = output::render_single(&global.output, s, detail, |s| {
        s.subdomain.clone().unwrap_or_default()
    });
    output::print_output(&out, global.quiet);
}

pub async fn handle(
    editor: &mut DraftEditor,
    args: SubdomainArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        SubdomainCommand::Show => {
            let current = editor.subdomain().await?;
            print_subdomain(&current, global);
            Ok(())
        }

        SubdomainCommand::Check { subdomain } => {
            // Prime the current value so it is not reported as taken
            editor.subdomain().await?;
            let check = editor.check_subdomain(&subdomain).await?;
            let view = CheckView {
                subdomain: check.subdomain,
                available: check.available,
                current: check.is_current,
            };
            let color = output::should_color(&global.color);
            let out = output::render_single(
                &global.output,
                &view,
                |v| {
                    let verdict = match (v.current, v.available) {
                        (true, _) => output::flag("current", true, color),
                        (false, true) => output::flag("available", true, color),
                        (false, false) => output::flag("taken", false, color),
                    };
                    format!("{}: {verdict}", v.subdomain)
                },
                |v| v.available.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        SubdomainCommand::Set { subdomain } => {
            let updated = editor.set_subdomain(&subdomain).await?;
            output::print_status("Subdomain saved", global.quiet);
            print_subdomain(&updated, global);
            Ok(())
        }
    }
}
