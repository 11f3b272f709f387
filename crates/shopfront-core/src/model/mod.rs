// ── Draft domain model ──
//
// Canonical, presentation-free types for every editable group of the
// storefront draft: the immutable server snapshot and the editable
// counterparts forked from it.

pub mod banner;
pub mod groups;
pub mod image;
pub mod snapshot;

pub use banner::{EditableBanner, EditableFooter};
pub use groups::{BusinessInfo, DomainEntry, FacebookPage, LineContact, SeoText, Theme};
pub use image::{ImageField, ImageSlot, LocalFile};
pub use snapshot::{BannerRecord, DomainRecord, DraftSnapshot};
