// ── Multipart draft form ──
//
// An inspectable, ordered model of the multipart body sent to
// `PUT /business/cms/draft`. The encoder in `shopfront-core` builds one of
// these; it is converted to a `reqwest::multipart::Form` only at send
// time, so the exact set of fields can be asserted on without a network.

use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use serde::Serialize;

use crate::error::Error;
use crate::operation::PendingOperation;

/// A file attached to the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

/// The value of one multipart field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormValue {
    Text(String),
    File(FilePart),
}

/// Ordered multipart fields. Field order is preserved on the wire.
#[derive(Debug, Clone, Default)]
pub struct DraftForm {
    fields: Vec<(String, FormValue)>,
}

/// Name of the per-operation file field for slot `index`, e.g.
/// `desktop_banner_0`. The server matches files to operations by this
/// index, so it must be the operation's position in its JSON array.
pub fn indexed_field_name(prefix: &str, index: usize) -> String {
    format!("{prefix}_{index}")
}

impl DraftForm {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Building ─────────────────────────────────────────────────────

    /// Append a plain text field.
    pub fn text(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields
            .push((name.into(), FormValue::Text(value.into())));
    }

    /// Append a boolean marker field (`name=true`).
    pub fn flag(&mut self, name: impl Into<String>) {
        self.text(name, "true");
    }

    /// Append a field holding the JSON encoding of `value`.
    pub fn json<T: Serialize + ?Sized>(
        &mut self,
        name: impl Into<String>,
        value: &T,
    ) -> Result<(), Error> {
        let name = name.into();
        let encoded = serde_json::to_string(value).map_err(|e| Error::MalformedField {
            field: name.clone(),
            reason: e.to_string(),
        })?;
        self.text(name, encoded);
        Ok(())
    }

    /// Append a file field.
    pub fn file(&mut self, name: impl Into<String>, part: FilePart) {
        self.fields.push((name.into(), FormValue::File(part)));
    }

    // ── Inspection ───────────────────────────────────────────────────

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn fields(&self) -> &[(String, FormValue)] {
        &self.fields
    }

    /// Field names in wire order.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.iter().any(|(n, _)| n == name)
    }

    /// The first text value stored under `name`.
    pub fn text_value(&self, name: &str) -> Option<&str> {
        self.fields.iter().find_map(|(n, v)| match v {
            FormValue::Text(text) if n == name => Some(text.as_str()),
            _ => None,
        })
    }

    /// The first file stored under `name`.
    pub fn file_part(&self, name: &str) -> Option<&FilePart> {
        self.fields.iter().find_map(|(n, v)| match v {
            FormValue::File(part) if n == name => Some(part),
            _ => None,
        })
    }

    /// The file correlated with operation `index` under `prefix`.
    pub fn indexed_file(&self, prefix: &str, index: usize) -> Option<&FilePart> {
        self.file_part(&indexed_field_name(prefix, index))
    }

    /// Decode the JSON operations list stored under `name`.
    ///
    /// Returns `Ok(None)` when the field is absent (the group was not
    /// submitted), and an error when it is present but not a valid list.
    pub fn operations(&self, name: &str) -> Result<Option<Vec<PendingOperation>>, Error> {
        let Some(raw) = self.text_value(name) else {
            return Ok(None);
        };
        serde_json::from_str(raw)
            .map(Some)
            .map_err(|e| Error::MalformedField {
                field: name.to_owned(),
                reason: e.to_string(),
            })
    }

    // ── Conversion ───────────────────────────────────────────────────

    /// Convert into a `reqwest` multipart form, preserving field order.
    pub fn into_multipart(self) -> Result<Form, Error> {
        let mut form = Form::new();
        for (name, value) in self.fields {
            form = match value {
                FormValue::Text(text) => form.text(name, text),
                FormValue::File(file) => {
                    let part = Part::bytes(file.bytes.to_vec())
                        .file_name(file.file_name)
                        .mime_str(&file.content_type)
                        .map_err(|e| Error::InvalidPart {
                            field: name.clone(),
                            reason: e.to_string(),
                        })?;
                    form.part(name, part)
                }
            };
        }
        Ok(form)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn png(name: &str) -> FilePart {
        FilePart {
            file_name: name.into(),
            content_type: "image/png".into(),
            bytes: Bytes::from_static(b"\x89PNG"),
        }
    }

    #[test]
    fn preserves_field_order() {
        let mut form = DraftForm::new();
        form.text("title", "Shop");
        form.file("logo", png("logo.png"));
        form.flag("remove_favicon");

        assert_eq!(form.field_names(), vec!["title", "logo", "remove_favicon"]);
        assert_eq!(form.text_value("remove_favicon"), Some("true"));
        assert_eq!(form.file_part("logo").unwrap().file_name, "logo.png");
        assert!(form.text_value("logo").is_none());
    }

    #[test]
    fn decodes_operations_and_indexed_files() {
        let mut form = DraftForm::new();
        let ops = vec![
            PendingOperation::create().with_active(true),
            PendingOperation::delete("b1"),
        ];
        form.json("banners", &ops).unwrap();
        form.file(indexed_field_name("desktop_banner", 0), png("a.png"));

        assert_eq!(form.operations("banners").unwrap().unwrap(), ops);
        assert!(form.operations("banner_footers").unwrap().is_none());
        assert!(form.indexed_file("desktop_banner", 0).is_some());
        assert!(form.indexed_file("desktop_banner", 1).is_none());
    }

    #[test]
    fn rejects_malformed_operations() {
        let mut form = DraftForm::new();
        form.text("banners", "not json");
        assert!(matches!(
            form.operations("banners"),
            Err(Error::MalformedField { .. })
        ));
    }

    #[test]
    fn converts_to_multipart() {
        let mut form = DraftForm::new();
        form.text("seo_title", "Hello");
        form.file("seo_image", png("og.png"));
        assert!(form.into_multipart().is_ok());
    }
}
