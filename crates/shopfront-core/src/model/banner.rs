// ── Editable banners ──

use uuid::Uuid;

use super::image::ImageField;
use super::snapshot::BannerRecord;
use crate::preview::PreviewRegistry;

/// A banner being edited.
///
/// `client_id` identifies the row locally across reorders and is never
/// sent. `id` is present only for rows that exist on the server; a row
/// without one must have a desktop file before it can be submitted.
#[derive(Debug)]
pub struct EditableBanner {
    client_id: Uuid,
    pub id: Option<String>,
    pub desktop: ImageField,
    pub mobile: ImageField,
    pub link_url: String,
    pub is_active: bool,
}

impl EditableBanner {
    /// A fresh, active banner with no images.
    pub fn new_local() -> Self {
        Self {
            client_id: Uuid::new_v4(),
            id: None,
            desktop: ImageField::empty(),
            mobile: ImageField::empty(),
            link_url: String::new(),
            is_active: true,
        }
    }

    pub(crate) fn from_record(record: &BannerRecord) -> Self {
        Self {
            client_id: Uuid::new_v4(),
            id: Some(record.id.clone()),
            desktop: ImageField::from_remote(record.desktop_url.clone()),
            mobile: ImageField::from_remote(record.mobile_url.clone()),
            link_url: record.link_url.clone(),
            is_active: record.is_active,
        }
    }

    pub fn client_id(&self) -> Uuid {
        self.client_id
    }

    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    /// True only when a stored mobile image was cleared without a
    /// replacement.
    pub fn remove_mobile_image(&self) -> bool {
        self.mobile.remove_requested()
    }

    pub(crate) fn release(&mut self, previews: &mut PreviewRegistry) {
        self.desktop.release(previews);
        self.mobile.release(previews);
    }
}

/// The banner footer: a banner with a title and description.
#[derive(Debug)]
pub struct EditableFooter {
    pub banner: EditableBanner,
    pub title: String,
    pub description: String,
}

impl EditableFooter {
    pub fn new_local() -> Self {
        Self {
            banner: EditableBanner::new_local(),
            title: String::new(),
            description: String::new(),
        }
    }

    pub(crate) fn from_record(record: &BannerRecord) -> Self {
        Self {
            banner: EditableBanner::from_record(record),
            title: record.title.clone(),
            description: record.description.clone(),
        }
    }
}
