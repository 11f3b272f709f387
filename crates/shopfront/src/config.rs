//! CLI configuration -- thin wrapper around `shopfront_config`.
//!
//! Adds resolution that respects `GlobalOpts` flag overrides
//! (--api-url, --token, --insecure, --timeout).

use std::time::Duration;

use shopfront_core::{EditorConfig, TlsVerification};

use crate::cli::GlobalOpts;
use crate::error::CliError;

pub use shopfront_config::{
    Config, Profile, ResolvedToken, TokenSource, clear_token, config_path, forget_token,
    load_config_or_default, save_config, store_token,
};

/// Everything needed to open an editing session.
pub struct Resolved {
    pub profile_name: String,
    pub editor: EditorConfig,
    /// Present when the profile exists in the config file.
    pub profile: Option<Profile>,
}

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Build an `EditorConfig` from the profile and CLI overrides. Works
/// without a profile when `--api-url` is given.
pub fn resolve_editor(global: &GlobalOpts, cfg: &Config) -> Result<Resolved, CliError> {
    let profile_name = active_profile_name(global, cfg);
    let profile = cfg.profiles.get(&profile_name).cloned();

    if global.profile.is_some() && profile.is_none() && global.api_url.is_none() {
        return Err(CliError::ProfileNotFound {
            name: profile_name,
            available: available_profiles(cfg),
        });
    }

    let mut editor = match (&profile, global.api_url.as_deref()) {
        (Some(p), _) => shopfront_config::profile_to_editor_config(p, &cfg.defaults)?,
        (None, Some(url)) => EditorConfig::new(parse_url(url)?),
        (None, None) => {
            return Err(CliError::NoConfig {
                path: config_path().display().to_string(),
            });
        }
    };

    // Flag > env > profile
    if let Some(url) = global.api_url.as_deref() {
        editor.url = parse_url(url)?;
    }
    if global.insecure {
        editor.tls = TlsVerification::DangerAcceptInvalid;
    }
    if profile.as_ref().and_then(|p| p.timeout).is_none() {
        editor.timeout = Duration::from_secs(global.timeout);
    }

    Ok(Resolved {
        profile_name,
        editor,
        profile,
    })
}

/// Resolve the bearer token: `--token` / `SHOPFRONT_TOKEN`, then the
/// profile's chain.
pub fn resolve_token(global: &GlobalOpts, resolved: &Resolved) -> Result<ResolvedToken, CliError> {
    if let Some(ref token) = global.token {
        return Ok(ResolvedToken::new(token.clone(), TokenSource::Flag));
    }
    match resolved.profile {
        Some(ref profile) => Ok(shopfront_config::resolve_token(
            profile,
            &resolved.profile_name,
        )?),
        None => Err(CliError::NoCredentials {
            profile: resolved.profile_name.clone(),
        }),
    }
}

pub fn available_profiles(cfg: &Config) -> String {
    let names = cfg.profile_names();
    if names.is_empty() {
        "(none)".into()
    } else {
        names.join(", ")
    }
}

fn parse_url(raw: &str) -> Result<url::Url, CliError> {
    raw.parse().map_err(|_| CliError::Validation {
        field: "api_url".into(),
        reason: format!("invalid URL: {raw}"),
    })
}
