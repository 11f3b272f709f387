//! Shared configuration for the shopfront CLI.
//!
//! TOML profiles, bearer-token resolution (env + keyring + plaintext),
//! and translation to `shopfront_core::EditorConfig`. Resolved tokens
//! remember their source so a rejected one is cleared where it lives.
//! The CLI adds `GlobalOpts`-aware wrappers on top.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use shopfront_core::{DEFAULT_STOREFRONT_SUFFIX, EditorConfig, TlsVerification};

/// Keyring service all stored tokens live under.
pub const KEYRING_SERVICE: &str = "shopfront";

/// Overrides the config file location.
pub const CONFIG_PATH_ENV: &str = "SHOPFRONT_CONFIG";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no token configured for profile '{profile}'")]
    NoCredentials { profile: String },

    #[error("keyring error: {0}")]
    Keyring(#[from] keyring::Error),

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named backend profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

impl Config {
    /// Record the last storefront domain looked up under `profile_name`.
    /// Returns `false` when no such profile exists.
    pub fn remember_preview_domain(&mut self, profile_name: &str, domain: &str) -> bool {
        match self.profiles.get_mut(profile_name) {
            Some(profile) => {
                profile.preview_domain = Some(domain.to_owned());
                true
            }
            None => false,
        }
    }

    /// Remove the plaintext token of `profile_name`. Returns `false` when
    /// the profile had none.
    pub fn forget_plaintext_token(&mut self, profile_name: &str) -> bool {
        self.profiles
            .get_mut(profile_name)
            .and_then(|profile| profile.token.take())
            .is_some()
    }

    /// Profile names, sorted.
    pub fn profile_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.profiles.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default)]
    pub insecure: bool,

    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            insecure: false,
            timeout: default_timeout(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_timeout() -> u64 {
    30
}

/// A named CMS backend profile.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Profile {
    /// Backend base URL (e.g., "https://cms.example.com").
    pub api_url: String,

    /// Bearer token (plaintext; prefer keyring or env var).
    pub token: Option<String>,

    /// Environment variable name containing the token.
    pub token_env: Option<String>,

    /// Last storefront domain looked up.
    pub preview_domain: Option<String>,

    /// Domain bare storefront names resolve under.
    pub storefront_suffix: Option<String>,

    /// Path to custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Override insecure TLS setting.
    pub insecure: Option<bool>,

    /// Override timeout.
    pub timeout: Option<u64>,
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path: `SHOPFRONT_CONFIG`, then XDG / platform
/// conventions.
pub fn config_path() -> PathBuf {
    if let Some(path) = std::env::var_os(CONFIG_PATH_ENV) {
        return PathBuf::from(path);
    }
    ProjectDirs::from("com", "shopfront", "shopfront").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("shopfront");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from an explicit file. A missing file yields the defaults.
///
/// `SHOPFRONT_` variables override file values; nested keys use a double
/// underscore (`SHOPFRONT_DEFAULTS__TIMEOUT=60`).
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("SHOPFRONT_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Token storage ───────────────────────────────────────────────────

fn keyring_entry(profile_name: &str) -> Result<keyring::Entry, ConfigError> {
    Ok(keyring::Entry::new(
        KEYRING_SERVICE,
        &format!("{profile_name}/cms_token"),
    )?)
}

/// Where a resolved token came from. Decides what a rejected token clears.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    /// `--token` or `SHOPFRONT_TOKEN`.
    Flag,
    /// The variable named by the profile's `token_env`.
    Env,
    Keyring,
    /// The profile's `token` key in the config file.
    Plaintext,
}

impl TokenSource {
    /// Whether the token lives somewhere this tool can forget it.
    pub fn is_stored(self) -> bool {
        matches!(self, Self::Keyring | Self::Plaintext)
    }
}

#[derive(Debug)]
pub struct ResolvedToken {
    pub token: SecretString,
    pub source: TokenSource,
}

impl ResolvedToken {
    pub fn new(token: impl Into<String>, source: TokenSource) -> Self {
        Self {
            token: SecretString::from(token.into()),
            source,
        }
    }
}

/// Resolve the bearer token (no CLI flag step).
///
/// Order: profile `token_env` → system keyring → plaintext in config.
pub fn resolve_token(profile: &Profile, profile_name: &str) -> Result<ResolvedToken, ConfigError> {
    select_token(
        profile,
        profile_name,
        |name| std::env::var(name).ok(),
        || {
            keyring_entry(profile_name)
                .ok()
                .and_then(|entry| entry.get_password().ok())
        },
    )
}

fn select_token(
    profile: &Profile,
    profile_name: &str,
    env: impl Fn(&str) -> Option<String>,
    keyring: impl FnOnce() -> Option<String>,
) -> Result<ResolvedToken, ConfigError> {
    if let Some(val) = profile.token_env.as_deref().and_then(env) {
        return Ok(ResolvedToken::new(val, TokenSource::Env));
    }
    if let Some(secret) = keyring() {
        return Ok(ResolvedToken::new(secret, TokenSource::Keyring));
    }
    if let Some(ref token) = profile.token {
        return Ok(ResolvedToken::new(token.clone(), TokenSource::Plaintext));
    }
    Err(ConfigError::NoCredentials {
        profile: profile_name.into(),
    })
}

/// Store a token in the system keyring.
pub fn store_token(profile_name: &str, token: &str) -> Result<(), ConfigError> {
    if token.trim().is_empty() {
        return Err(ConfigError::Validation {
            field: "token".into(),
            reason: "token cannot be empty".into(),
        });
    }
    keyring_entry(profile_name)?.set_password(token)?;
    Ok(())
}

/// Forget the keyring token for a profile. Returns `false` when none was
/// stored.
pub fn clear_token(profile_name: &str) -> Result<bool, ConfigError> {
    match keyring_entry(profile_name)?.delete_credential() {
        Ok(()) => Ok(true),
        Err(keyring::Error::NoEntry) => Ok(false),
        Err(e) => Err(e.into()),
    }
}

/// Forget a token the backend rejected, wherever it was stored.
///
/// Flag and env tokens are left alone. Returns `true` when something was
/// removed.
pub fn forget_token(profile_name: &str, source: TokenSource) -> Result<bool, ConfigError> {
    match source {
        TokenSource::Flag | TokenSource::Env => Ok(false),
        TokenSource::Keyring => clear_token(profile_name),
        TokenSource::Plaintext => forget_plaintext_token_at(&config_path(), profile_name),
    }
}

/// Drop the plaintext token of `profile_name` from the config file at
/// `path`. The file is only rewritten when a token was present.
pub fn forget_plaintext_token_at(path: &Path, profile_name: &str) -> Result<bool, ConfigError> {
    let mut cfg = load_config_from(path)?;
    if !cfg.forget_plaintext_token(profile_name) {
        return Ok(false);
    }
    save_config_to(&cfg, path)?;
    Ok(true)
}

// ── EditorConfig translation ────────────────────────────────────────

/// Build an `EditorConfig` from a profile and global defaults, with no
/// CLI flag overrides.
pub fn profile_to_editor_config(
    profile: &Profile,
    defaults: &Defaults,
) -> Result<EditorConfig, ConfigError> {
    let url: url::Url = profile
        .api_url
        .parse()
        .map_err(|_| ConfigError::Validation {
            field: "api_url".into(),
            reason: format!("invalid URL: {}", profile.api_url),
        })?;

    let tls = if profile.insecure.unwrap_or(defaults.insecure) {
        TlsVerification::DangerAcceptInvalid
    } else if let Some(ref ca_path) = profile.ca_cert {
        TlsVerification::CustomCa(ca_path.clone())
    } else {
        TlsVerification::SystemDefaults
    };

    let timeout = Duration::from_secs(profile.timeout.unwrap_or(defaults.timeout));

    let storefront_suffix = profile
        .storefront_suffix
        .clone()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_STOREFRONT_SUFFIX.into());

    Ok(EditorConfig {
        url,
        tls,
        timeout,
        storefront_suffix,
    })
}
