// ── Local preview handles ──
//
// A pending local file is shown through a `local:` handle until it is
// uploaded. Handles are a manually released resource: every replacement
// releases the superseded handle, removing an item releases its handles,
// and discard/teardown releases everything still outstanding.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use tracing::trace;
use uuid::Uuid;

/// Scheme marker distinguishing local previews from remote URLs.
pub const LOCAL_SCHEME: &str = "local:";

/// Opaque handle for a local file preview, e.g. `local:6f1c…`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PreviewHandle(String);

impl PreviewHandle {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PreviewHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Whether `url` refers to a local preview rather than a stored image.
pub fn is_local(url: &str) -> bool {
    url.starts_with(LOCAL_SCHEME)
}

/// Table of live preview handles and when they were created.
#[derive(Debug, Default)]
pub struct PreviewRegistry {
    live: HashMap<PreviewHandle, DateTime<Utc>>,
}

impl PreviewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh handle.
    pub fn create(&mut self) -> PreviewHandle {
        let handle = PreviewHandle(format!("{LOCAL_SCHEME}{}", Uuid::new_v4()));
        self.live.insert(handle.clone(), Utc::now());
        trace!(%handle, "preview created");
        handle
    }

    /// Release one handle. Returns `false` if it was already released.
    pub fn revoke(&mut self, handle: &PreviewHandle) -> bool {
        let released = self.live.remove(handle).is_some();
        if released {
            trace!(%handle, "preview released");
        }
        released
    }

    /// Release every outstanding handle, returning how many there were.
    pub fn release_all(&mut self) -> usize {
        let count = self.live.len();
        self.live.clear();
        count
    }

    pub fn is_live(&self, handle: &PreviewHandle) -> bool {
        self.live.contains_key(handle)
    }

    /// Number of handles not yet released.
    pub fn outstanding(&self) -> usize {
        self.live.len()
    }

    pub fn created_at(&self, handle: &PreviewHandle) -> Option<DateTime<Utc>> {
        self.live.get(handle).copied()
    }
}
