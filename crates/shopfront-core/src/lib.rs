//! Draft editing engine between `shopfront-api` and presentation layers.
//!
//! - **[`DraftEditor`]** loads the aggregate draft, runs the save
//!   orchestrator ([`save()`](DraftEditor::save)) and the publish gate
//!   ([`publish()`](DraftEditor::publish)), and fronts the standalone
//!   domain and subdomain endpoints. A 401 from any call tears down the
//!   [`Session`] exactly once.
//!
//! - **[`Draft`]**: editable state forked from an immutable
//!   [`DraftSnapshot`]. Every mutation is recorded in a [`ChangeLog`];
//!   [`Draft::dirty_set()`] folds that log and snapshot comparisons into
//!   the one [`DirtySet`] the encoder consumes.
//!
//! - **[`encode`]**: local validation and the multipart encoding of the
//!   dirty groups.
//!
//! - **[`PreviewRegistry`]**: scoped table of local preview handles,
//!   released on replacement, removal, discard and teardown.

pub mod config;
pub mod draft;
pub mod editor;
pub mod encode;
pub mod error;
pub mod model;
pub mod preview;
pub mod session;
pub mod storefront;
pub mod summary;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{DEFAULT_STOREFRONT_SUFFIX, EditorConfig, TlsVerification};
pub use draft::{
    BannerPatch, ChangeLog, DirtySet, Direction, DomainPatch, Draft, Edit, FacebookPagePatch,
    FooterPatch, Group, InfoPatch, LineContactPatch, MAX_BANNERS, MAX_DOMAINS, SeoPatch,
    ThemePatch, parse_script,
};
pub use editor::{DraftEditor, EditorState, PublishOutcome, SaveReport, SubdomainCheck};
pub use error::CoreError;
pub use model::{DraftSnapshot, LocalFile};
pub use preview::PreviewRegistry;
pub use session::Session;
pub use storefront::{fetch_storefront, resolve_domain};
pub use summary::PreviewSummary;

// Wire types consumers render directly.
pub use shopfront_api::{DraftForm, FormValue};
pub use shopfront_api::types::{
    BrandingOptions, DomainResponse, PublishStatus, StorefrontData, SubdomainResponse,
};
