mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use shopfront_core::{DraftEditor, Session};

use crate::cli::{Cli, Command};
use crate::config::TokenSource;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let global = cli.global;
    match cli.command {
        // Config commands don't need a backend
        Command::Config(args) => commands::config_cmd::handle(args, &global),

        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "shopfront", &mut std::io::stdout());
            Ok(())
        }

        // Public endpoint, no token
        Command::Storefront(args) => commands::storefront::handle(args, &global).await,

        // Everything else runs inside an authenticated session
        cmd => {
            let cfg = config::load_config_or_default();
            let resolved = config::resolve_editor(&global, &cfg)?;
            let profile_name = resolved.profile_name.clone();
            let token = config::resolve_token(&global, &resolved)?;
            let source = token.source;

            let session = Session::new(token.token);
            let session = if source.is_stored() {
                let name = profile_name.clone();
                session.on_teardown(move || forget_stored_token(&name, source))
            } else {
                session
            };

            let mut editor = DraftEditor::new(resolved.editor, session)?;

            tracing::debug!(command = ?cmd, profile = %profile_name, "dispatching command");
            commands::dispatch(cmd, &mut editor, &global)
                .await
                .map_err(|e| e.in_context(&profile_name, global.timeout))
        }
    }
}

/// Teardown hook: a rejected token is useless, so drop it from wherever
/// it was stored.
fn forget_stored_token(profile_name: &str, source: TokenSource) {
    match config::forget_token(profile_name, source) {
        Ok(true) => tracing::info!(profile = profile_name, ?source, "removed rejected token"),
        Ok(false) => {}
        Err(e) => tracing::warn!(error = %e, ?source, "could not remove rejected token"),
    }
}
