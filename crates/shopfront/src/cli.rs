//! Clap derive structures for the `shopfront` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// shopfront -- edit, save and publish a storefront from the terminal
#[derive(Debug, Parser)]
#[command(
    name = "shopfront",
    version,
    about = "Edit and publish storefront CMS drafts from the command line",
    long_about = "Edit a business storefront's CMS draft: logo, branding, banners,\n\
        footer banner, SEO, contact links, subdomain and custom domains.\n\n\
        Every edit command loads the draft, applies the change and saves\n\
        only the groups that changed. `publish` saves pending changes first\n\
        and refuses to publish when any group failed.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Backend profile to use
    #[arg(long, short = 'p', env = "SHOPFRONT_PROFILE", global = true)]
    pub profile: Option<String>,

    /// CMS backend URL (overrides profile)
    #[arg(long, short = 'u', env = "SHOPFRONT_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Bearer token for the CMS backend
    #[arg(long, env = "SHOPFRONT_TOKEN", global = true, hide_env_values = true)]
    pub token: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "SHOPFRONT_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "SHOPFRONT_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds
    #[arg(long, env = "SHOPFRONT_TIMEOUT", default_value = "30", global = true)]
    pub timeout: u64,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Inspect the draft, preview it, or apply an edit script
    #[command(alias = "d")]
    Draft(DraftArgs),

    /// Manage hero banners
    #[command(alias = "b")]
    Banners(BannersArgs),

    /// Manage the footer banner
    Footer(FooterArgs),

    /// Site title, colors, font and favicon
    Branding(BrandingArgs),

    /// Set or remove the store logo
    Logo(LogoArgs),

    /// Business information
    Info(InfoArgs),

    /// Search engine title, description and share image
    Seo(SeoArgs),

    /// LINE and Facebook contact links
    Contact(ContactArgs),

    /// Save pending changes and publish the draft
    Publish(PublishArgs),

    /// Show unpublished-changes flag and last published version
    Status,

    /// Manage custom domains directly (outside the draft)
    #[command(alias = "dom")]
    Domains(DomainsArgs),

    /// Read, check and save the store subdomain
    #[command(alias = "sub")]
    Subdomain(SubdomainArgs),

    /// Fetch what visitors of a domain see (no token needed)
    Storefront(StorefrontArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  DRAFT
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct DraftArgs {
    #[command(subcommand)]
    pub command: DraftCommand,
}

#[derive(Debug, Subcommand)]
pub enum DraftCommand {
    /// Show the current draft, group by group
    Show,

    /// Render a text preview of the storefront as it would look
    Preview,

    /// Apply an edit script locally and list what would change
    Diff {
        /// JSON edit script (array of {"op": ...} objects, `-` for stdin)
        script: PathBuf,
    },

    /// Apply an edit script and save the changed groups
    Apply {
        /// JSON edit script (array of {"op": ...} objects, `-` for stdin)
        script: PathBuf,

        /// Print the fields that would be sent instead of saving
        #[arg(long)]
        dry_run: bool,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  BANNERS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct BannersArgs {
    #[command(subcommand)]
    pub command: BannersCommand,
}

#[derive(Debug, Subcommand)]
pub enum BannersCommand {
    /// List banners in display order
    #[command(alias = "ls")]
    List,

    /// Add a banner at the end
    Add {
        /// Desktop image (required for new banners)
        #[arg(long)]
        desktop: PathBuf,

        /// Mobile image
        #[arg(long)]
        mobile: Option<PathBuf>,

        /// Link opened when the banner is clicked
        #[arg(long)]
        link: Option<String>,

        /// Add the banner hidden
        #[arg(long)]
        inactive: bool,
    },

    /// Remove a banner
    #[command(alias = "rm")]
    Remove {
        /// 1-based position (see `banners list`)
        position: usize,
    },

    /// Move a banner one place up or down
    Move {
        /// 1-based position (see `banners list`)
        position: usize,

        /// Direction to move
        #[arg(value_enum)]
        direction: MoveDirection,
    },

    /// Change a banner's link or visibility
    Update {
        /// 1-based position (see `banners list`)
        position: usize,

        /// New link URL (empty string clears it)
        #[arg(long)]
        link: Option<String>,

        /// Show or hide the banner
        #[arg(long)]
        active: Option<bool>,
    },

    /// Replace a banner's desktop and/or mobile image
    SetImage {
        /// 1-based position (see `banners list`)
        position: usize,

        #[arg(long, required_unless_present = "mobile")]
        desktop: Option<PathBuf>,

        #[arg(long)]
        mobile: Option<PathBuf>,
    },

    /// Remove a banner's mobile image
    ClearMobile {
        /// 1-based position (see `banners list`)
        position: usize,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum MoveDirection {
    Up,
    Down,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  FOOTER
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct FooterArgs {
    #[command(subcommand)]
    pub command: FooterCommand,
}

#[derive(Debug, Subcommand)]
pub enum FooterCommand {
    /// Show the footer banner
    Show,

    /// Create the footer banner
    Create {
        /// Desktop image (required)
        #[arg(long)]
        desktop: PathBuf,

        #[arg(long)]
        mobile: Option<PathBuf>,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        link: Option<String>,
    },

    /// Remove the footer banner
    #[command(alias = "rm")]
    Remove,

    /// Change the footer banner's text, link or visibility
    Update {
        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        link: Option<String>,

        #[arg(long)]
        active: Option<bool>,
    },

    /// Replace the footer banner's desktop and/or mobile image
    SetImage {
        #[arg(long, required_unless_present = "mobile")]
        desktop: Option<PathBuf>,

        #[arg(long)]
        mobile: Option<PathBuf>,
    },

    /// Remove the footer banner's mobile image
    ClearMobile,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  BRANDING / LOGO / INFO
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct BrandingArgs {
    #[command(subcommand)]
    pub command: BrandingCommand,
}

#[derive(Debug, Subcommand)]
pub enum BrandingCommand {
    /// Show the current theme and the preset colors and fonts
    Show,

    /// Change title, colors or font (empty value clears a color or font)
    Set {
        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        primary_color: Option<String>,

        #[arg(long)]
        secondary_color: Option<String>,

        #[arg(long)]
        font: Option<String>,
    },

    /// Upload or remove the favicon
    Favicon {
        /// Image file
        #[arg(required_unless_present = "clear", conflicts_with = "clear")]
        path: Option<PathBuf>,

        /// Remove the current favicon
        #[arg(long)]
        clear: bool,
    },
}

#[derive(Debug, Args)]
pub struct LogoArgs {
    #[command(subcommand)]
    pub command: LogoCommand,
}

#[derive(Debug, Subcommand)]
pub enum LogoCommand {
    /// Upload a new logo
    Set {
        /// Image file
        path: PathBuf,
    },

    /// Remove the current logo
    Clear,
}

#[derive(Debug, Args)]
pub struct InfoArgs {
    #[command(subcommand)]
    pub command: InfoCommand,
}

#[derive(Debug, Subcommand)]
pub enum InfoCommand {
    /// Show business information
    Show,

    /// Change business information
    Set {
        #[arg(long)]
        company_name: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        phone: Option<String>,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        address: Option<String>,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  SEO / CONTACT
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct SeoArgs {
    #[command(subcommand)]
    pub command: SeoCommand,
}

#[derive(Debug, Subcommand)]
pub enum SeoCommand {
    /// Show SEO settings
    Show,

    /// Change the SEO title or description
    Set {
        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        description: Option<String>,
    },

    /// Upload or remove the share image
    Image {
        /// Image file
        #[arg(required_unless_present = "clear", conflicts_with = "clear")]
        path: Option<PathBuf>,

        /// Remove the current share image
        #[arg(long)]
        clear: bool,
    },
}

#[derive(Debug, Args)]
pub struct ContactArgs {
    #[command(subcommand)]
    pub command: ContactCommand,
}

#[derive(Debug, Subcommand)]
pub enum ContactCommand {
    /// Show contact links
    Show,

    /// Change the LINE contact link
    Line {
        #[arg(long)]
        url: Option<String>,

        #[arg(long)]
        enabled: Option<bool>,
    },

    /// Change the Facebook page link
    Facebook {
        #[arg(long)]
        url: Option<String>,

        #[arg(long)]
        enabled: Option<bool>,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  PUBLISH
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct PublishArgs {
    /// Apply this edit script before saving and publishing
    #[arg(long)]
    pub script: Option<PathBuf>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  DOMAINS / SUBDOMAIN / STOREFRONT
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct DomainsArgs {
    #[command(subcommand)]
    pub command: DomainsCommand,
}

#[derive(Debug, Subcommand)]
pub enum DomainsCommand {
    /// List custom domains
    #[command(alias = "ls")]
    List,

    /// Register a custom domain
    Add {
        /// Domain name (e.g. shop.example.com)
        domain_name: String,
    },

    /// Rename or enable/disable a domain
    Update {
        /// Domain ID (see `domains list`)
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        active: Option<bool>,
    },

    /// Delete a custom domain
    #[command(alias = "rm")]
    Remove {
        /// Domain ID (see `domains list`)
        id: String,
    },
}

#[derive(Debug, Args)]
pub struct SubdomainArgs {
    #[command(subcommand)]
    pub command: SubdomainCommand,
}

#[derive(Debug, Subcommand)]
pub enum SubdomainCommand {
    /// Show the current subdomain
    Show,

    /// Check whether a subdomain is available
    Check {
        subdomain: String,
    },

    /// Claim a subdomain
    Set {
        subdomain: String,
    },
}

#[derive(Debug, Args)]
pub struct StorefrontArgs {
    /// Domain or bare store name (defaults to the last one used)
    pub domain: Option<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG / COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create initial config file with guided setup
    Init,

    /// Display current resolved configuration
    Show,

    /// Set a profile value
    Set {
        /// Profile key (api_url, token_env, storefront_suffix, ca_cert, insecure, timeout)
        key: String,

        /// Value to set
        value: String,
    },

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },

    /// Store a token for the active profile in the system keyring
    SetToken,

    /// Remove the active profile's token from the system keyring
    ClearToken,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
