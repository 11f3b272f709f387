//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use shopfront_config::ConfigError;
use shopfront_core::CoreError;

pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const PERMISSION: i32 = 5;
    pub const CONFLICT: i32 = 6;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
    pub const PARTIAL: i32 = 9;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to the CMS backend at {url}")]
    #[diagnostic(
        code(shopfront::connection_failed),
        help(
            "Check that the backend is reachable.\n\
             Reason: {reason}\n\
             Staging backends with self-signed certificates need --insecure (-k)."
        )
    )]
    ConnectionFailed { url: String, reason: String },

    #[error("Request timed out after {seconds}s")]
    #[diagnostic(
        code(shopfront::timeout),
        help("Increase the timeout with --timeout or check backend responsiveness.")
    )]
    Timeout { seconds: u64 },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Token rejected for profile '{profile}'")]
    #[diagnostic(
        code(shopfront::auth_failed),
        help(
            "The session has ended and the stored token was forgotten.\n\
             Store a fresh token with: shopfront config set-token --profile {profile}"
        )
    )]
    AuthFailed { profile: String },

    #[error("No token configured for profile '{profile}'")]
    #[diagnostic(
        code(shopfront::no_credentials),
        help(
            "Store one with: shopfront config set-token\n\
             Or pass --token / set SHOPFRONT_TOKEN."
        )
    )]
    NoCredentials { profile: String },

    // ── Draft ────────────────────────────────────────────────────────
    #[error("No {what} at position {position}")]
    #[diagnostic(
        code(shopfront::not_found),
        help("There are {len}. Run: shopfront {list_command}")
    )]
    NotFound {
        what: String,
        position: usize,
        len: usize,
        list_command: String,
    },

    #[error("{summary}")]
    #[diagnostic(
        code(shopfront::partial_save),
        help(
            "The other groups were saved. Fix the failed groups and run the command again."
        )
    )]
    PartialSave { summary: String },

    #[error("Publish aborted: {summary}")]
    #[diagnostic(
        code(shopfront::publish_aborted),
        help("Nothing was published. Fix the failed groups and publish again.")
    )]
    PublishAborted { summary: String },

    #[error("Publish rejected: {message}")]
    #[diagnostic(
        code(shopfront::publish_rejected),
        help("The draft is still saved. Resolve the problem above and publish again.")
    )]
    PublishRejected { message: String },

    #[error("Draft saved, but reloading it failed")]
    #[diagnostic(
        code(shopfront::reload_failed),
        help("Reason: {reason}\nRun: shopfront draft show")
    )]
    ReloadFailed { reason: String },

    // ── API ──────────────────────────────────────────────────────────
    #[error("API error{}: {message}", .status.map(|s| format!(" (HTTP {s})")).unwrap_or_default())]
    #[diagnostic(code(shopfront::api_error))]
    ApiError { status: Option<u16>, message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(shopfront::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(shopfront::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: shopfront config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No CMS backend configured")]
    #[diagnostic(
        code(shopfront::no_config),
        help(
            "Create a profile with: shopfront config init\n\
             Or pass --api-url. Expected config at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(shopfront::config))]
    Config(ConfigError),

    // ── Interactive ──────────────────────────────────────────────────
    #[error("'{action}' requires confirmation")]
    #[diagnostic(
        code(shopfront::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid edit script: {0}")]
    #[diagnostic(
        code(shopfront::script),
        help("An edit script is a JSON array of objects like {{\"op\": \"update_seo\", \"title\": \"...\"}}.")
    )]
    Script(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    #[diagnostic(code(shopfront::internal))]
    Internal(String),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::PartialSave { .. } | Self::PublishAborted { .. } => exit_code::PARTIAL,
            Self::PublishRejected { .. } => exit_code::CONFLICT,
            Self::ApiError { status, .. } => match status {
                Some(403) => exit_code::PERMISSION,
                Some(404) => exit_code::NOT_FOUND,
                Some(409 | 422) => exit_code::CONFLICT,
                _ => exit_code::GENERAL,
            },
            Self::Validation { .. }
            | Self::Script(_)
            | Self::NonInteractiveRequiresYes { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }

    /// Fill in invocation details core errors do not carry.
    pub fn in_context(self, profile: &str, timeout_secs: u64) -> Self {
        match self {
            Self::AuthFailed { .. } => Self::AuthFailed {
                profile: profile.to_owned(),
            },
            Self::Timeout { .. } => Self::Timeout {
                seconds: timeout_secs,
            },
            other => other,
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NoCredentials { profile } => Self::NoCredentials { profile },
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            other => Self::Config(other),
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Unauthorized => CliError::AuthFailed {
                profile: "default".into(),
            },

            CoreError::Validation { field, message } => CliError::Validation {
                field,
                reason: message,
            },

            CoreError::NothingToSave => CliError::Validation {
                field: "draft".into(),
                reason: "no changes to save".into(),
            },

            CoreError::LimitReached { what, limit } => CliError::Validation {
                field: what.into(),
                reason: format!("limit is {limit}"),
            },

            CoreError::IndexOutOfRange {
                what,
                position,
                len,
            } => CliError::NotFound {
                list_command: list_command_for(what).into(),
                what: what.into(),
                position,
                len,
            },

            err @ (CoreError::FileRead { .. } | CoreError::UnsupportedImage { .. }) => {
                CliError::Validation {
                    field: "image".into(),
                    reason: err.to_string(),
                }
            }

            CoreError::PublishRejected { message } => CliError::PublishRejected { message },

            CoreError::ReloadFailed { reason } => CliError::ReloadFailed { reason },

            CoreError::ConnectionFailed { url, reason } => {
                CliError::ConnectionFailed { url, reason }
            }

            CoreError::Timeout => CliError::Timeout { seconds: 0 },

            CoreError::Api { message, status } => CliError::ApiError { status, message },

            CoreError::Config { message } => CliError::Validation {
                field: "config".into(),
                reason: message,
            },

            err @ CoreError::NotLoaded => CliError::Internal(err.to_string()),

            CoreError::Internal(message) => CliError::Internal(message),
        }
    }
}

fn list_command_for(what: &str) -> &'static str {
    match what {
        "custom domain" | "custom domains" => "draft show",
        "banner footer" | "banner footers" => "footer show",
        _ => "banners list",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_status_drives_exit_code() {
        let err = CliError::from(CoreError::Api {
            message: "no such domain".into(),
            status: Some(404),
        });
        assert_eq!(err.exit_code(), exit_code::NOT_FOUND);
        assert_eq!(err.to_string(), "API error (HTTP 404): no such domain");
    }

    #[test]
    fn auth_failure_names_profile() {
        let err = CliError::from(CoreError::Unauthorized).in_context("staging", 30);
        assert_eq!(err.exit_code(), exit_code::AUTH);
        assert_eq!(err.to_string(), "Token rejected for profile 'staging'");
    }

    #[test]
    fn local_draft_errors_are_usage_errors() {
        let err = CliError::from(CoreError::LimitReached {
            what: "banners",
            limit: 10,
        });
        assert_eq!(err.exit_code(), exit_code::USAGE);

        let err = CliError::from(CoreError::IndexOutOfRange {
            what: "banner",
            position: 4,
            len: 2,
        });
        assert_eq!(err.exit_code(), exit_code::NOT_FOUND);
        assert_eq!(err.to_string(), "No banner at position 4");
    }
}
