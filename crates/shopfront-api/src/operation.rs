// ── List-resource operations ──
//
// Banners, banner footers and custom domains are submitted as a JSON
// array of create/update/delete instructions. Field order here is the
// order the keys appear on the wire.

use serde::{Deserialize, Serialize};

/// What a [`PendingOperation`] does to its row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationAction {
    Create,
    Update,
    Delete,
}

/// One create/update/delete instruction for a list-resource item.
///
/// A create never carries `id`, an update always does, and a delete
/// carries nothing but `id`. The constructors enforce this shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingOperation {
    pub action: OperationAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remove_mobile_image: Option<bool>,
}

impl PendingOperation {
    fn bare(action: OperationAction, id: Option<String>) -> Self {
        Self {
            action,
            id,
            domain_name: None,
            title: None,
            description: None,
            link_url: None,
            is_active: None,
            remove_mobile_image: None,
        }
    }

    /// A create instruction. The server assigns the id.
    pub fn create() -> Self {
        Self::bare(OperationAction::Create, None)
    }

    /// An update instruction for an existing row.
    pub fn update(id: impl Into<String>) -> Self {
        Self::bare(OperationAction::Update, Some(id.into()))
    }

    /// A delete instruction: `{"action":"delete","id":...}` and nothing else.
    pub fn delete(id: impl Into<String>) -> Self {
        Self::bare(OperationAction::Delete, Some(id.into()))
    }

    pub fn with_domain_name(mut self, name: impl Into<String>) -> Self {
        self.domain_name = Some(name.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_link_url(mut self, link_url: impl Into<String>) -> Self {
        self.link_url = Some(link_url.into());
        self
    }

    pub fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }

    /// Mark the existing mobile image for removal. Only meaningful on updates.
    pub fn removing_mobile_image(mut self) -> Self {
        self.remove_mobile_image = Some(true);
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn update_serializes_in_wire_order() {
        let op = PendingOperation::update("b1")
            .with_link_url("https://a.com")
            .with_active(false);
        assert_eq!(
            serde_json::to_string(&op).unwrap(),
            r#"{"action":"update","id":"b1","link_url":"https://a.com","is_active":false}"#
        );
    }

    #[test]
    fn create_omits_id_and_unset_fields() {
        let op = PendingOperation::create().with_active(true);
        assert_eq!(
            serde_json::to_string(&op).unwrap(),
            r#"{"action":"create","is_active":true}"#
        );
    }

    #[test]
    fn delete_carries_only_the_id() {
        let op = PendingOperation::delete("b9");
        assert_eq!(
            serde_json::to_string(&op).unwrap(),
            r#"{"action":"delete","id":"b9"}"#
        );
        assert_eq!(op.action, OperationAction::Delete);
    }
}
