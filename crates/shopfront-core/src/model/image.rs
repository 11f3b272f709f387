// ── Image slots ──
//
// Every image in the draft (logo, favicon, SEO image, banner desktop and
// mobile) is a tri-state slot: unset, a stored remote URL, or a local file
// waiting to be uploaded.

use std::path::Path;

use bytes::Bytes;

use shopfront_api::FilePart;

use crate::error::CoreError;
use crate::preview::{PreviewHandle, PreviewRegistry};

// ── Local files ─────────────────────────────────────────────────────

/// An image read from disk, not yet uploaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalFile {
    pub name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

impl LocalFile {
    /// Read an image file. The type is taken from the extension; only
    /// jpeg, png, gif, webp and svg are accepted.
    pub fn read(path: &Path) -> Result<Self, CoreError> {
        let Some(content_type) = content_type_for(path) else {
            return Err(CoreError::UnsupportedImage {
                path: path.to_path_buf(),
            });
        };
        let bytes = std::fs::read(path).map_err(|e| CoreError::FileRead {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let name = path
            .file_name()
            .map_or_else(|| "upload".into(), |n| n.to_string_lossy().into_owned());

        Ok(Self {
            name,
            content_type: content_type.into(),
            bytes: Bytes::from(bytes),
        })
    }

    /// Build from in-memory bytes, typing by the name's extension.
    pub fn from_bytes(name: impl Into<String>, bytes: impl Into<Bytes>) -> Result<Self, CoreError> {
        let name = name.into();
        let Some(content_type) = content_type_for(Path::new(&name)) else {
            return Err(CoreError::UnsupportedImage { path: name.into() });
        };
        Ok(Self {
            name,
            content_type: content_type.into(),
            bytes: bytes.into(),
        })
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub(crate) fn to_part(&self) -> FilePart {
        FilePart {
            file_name: self.name.clone(),
            content_type: self.content_type.clone(),
            bytes: self.bytes.clone(),
        }
    }
}

fn content_type_for(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "svg" => Some("image/svg+xml"),
        _ => None,
    }
}

// ── Slots ───────────────────────────────────────────────────────────

/// What an image slot currently shows.
#[derive(Debug, PartialEq, Eq)]
pub enum ImageSlot {
    Unset,
    Remote(String),
    Pending {
        file: LocalFile,
        preview: PreviewHandle,
    },
}

/// An editable image.
///
/// `persisted` is the URL the server had at load time. Clearing the slot
/// requests removal only when such a URL exists; a new file always
/// cancels a pending removal. The slot never holds a new file and a
/// removal request at the same time.
#[derive(Debug)]
pub struct ImageField {
    slot: ImageSlot,
    persisted: Option<String>,
    remove_requested: bool,
}

impl ImageField {
    pub fn from_remote(url: Option<String>) -> Self {
        let slot = url.clone().map_or(ImageSlot::Unset, ImageSlot::Remote);
        Self {
            slot,
            persisted: url,
            remove_requested: false,
        }
    }

    pub fn empty() -> Self {
        Self::from_remote(None)
    }

    pub fn slot(&self) -> &ImageSlot {
        &self.slot
    }

    /// Stage a new local file, releasing any superseded local preview.
    pub fn replace(&mut self, file: LocalFile, previews: &mut PreviewRegistry) {
        self.release(previews);
        self.slot = ImageSlot::Pending {
            file,
            preview: previews.create(),
        };
        self.remove_requested = false;
    }

    /// Clear the slot. Removal of the stored image is requested only when
    /// one exists; clearing an unsaved local file just drops it.
    pub fn clear(&mut self, previews: &mut PreviewRegistry) {
        self.release(previews);
        self.slot = ImageSlot::Unset;
        self.remove_requested = self.persisted.is_some();
    }

    /// Release this slot's local preview, if any, without changing what
    /// will be submitted.
    pub(crate) fn release(&mut self, previews: &mut PreviewRegistry) {
        if let ImageSlot::Pending { preview, .. } = &self.slot {
            previews.revoke(preview);
        }
    }

    pub fn pending_file(&self) -> Option<&LocalFile> {
        match &self.slot {
            ImageSlot::Pending { file, .. } => Some(file),
            _ => None,
        }
    }

    pub fn remove_requested(&self) -> bool {
        self.remove_requested
    }

    pub fn persisted_url(&self) -> Option<&str> {
        self.persisted.as_deref()
    }

    /// The URL a preview would render: the remote URL or the local handle.
    pub fn display_url(&self) -> Option<&str> {
        match &self.slot {
            ImageSlot::Unset => None,
            ImageSlot::Remote(url) => Some(url),
            ImageSlot::Pending { preview, .. } => Some(preview.as_str()),
        }
    }

    pub fn is_set(&self) -> bool {
        !matches!(self.slot, ImageSlot::Unset)
    }

    /// A new file is staged or removal was requested.
    pub fn is_dirty(&self) -> bool {
        self.pending_file().is_some() || self.remove_requested
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::preview::is_local;

    fn png() -> LocalFile {
        LocalFile::from_bytes("a.png", &b"\x89PNG"[..]).unwrap()
    }

    #[test]
    fn reads_supported_images_and_rejects_others() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("Hero.JPG");
        std::fs::File::create(&good)
            .unwrap()
            .write_all(b"\xff\xd8")
            .unwrap();
        let file = LocalFile::read(&good).unwrap();
        assert_eq!(file.content_type, "image/jpeg");
        assert_eq!(file.name, "Hero.JPG");
        assert_eq!(file.len(), 2);

        let bad = dir.path().join("notes.txt");
        std::fs::write(&bad, b"hi").unwrap();
        assert!(matches!(
            LocalFile::read(&bad),
            Err(CoreError::UnsupportedImage { .. })
        ));

        let missing = dir.path().join("gone.png");
        assert!(matches!(
            LocalFile::read(&missing),
            Err(CoreError::FileRead { .. })
        ));
    }

    #[test]
    fn clearing_remote_requests_removal() {
        let mut previews = PreviewRegistry::new();
        let mut field = ImageField::from_remote(Some("https://cdn/x.png".into()));
        assert!(!field.is_dirty());

        field.clear(&mut previews);
        assert!(field.remove_requested());
        assert!(field.is_dirty());
        assert!(!field.is_set());
    }

    #[test]
    fn new_file_cancels_pending_removal() {
        let mut previews = PreviewRegistry::new();
        let mut field = ImageField::from_remote(Some("https://cdn/x.png".into()));
        field.clear(&mut previews);
        field.replace(png(), &mut previews);

        assert!(!field.remove_requested());
        assert!(field.pending_file().is_some());
        assert!(is_local(field.display_url().unwrap()));
    }

    #[test]
    fn clearing_unsaved_file_is_not_a_removal() {
        let mut previews = PreviewRegistry::new();
        let mut field = ImageField::empty();
        field.replace(png(), &mut previews);
        assert_eq!(previews.outstanding(), 1);

        field.clear(&mut previews);
        assert!(!field.remove_requested());
        assert!(!field.is_dirty());
        assert_eq!(previews.outstanding(), 0);
    }

    #[test]
    fn replacing_releases_superseded_preview() {
        let mut previews = PreviewRegistry::new();
        let mut field = ImageField::empty();
        field.replace(png(), &mut previews);
        field.replace(png(), &mut previews);
        assert_eq!(previews.outstanding(), 1);
    }
}
