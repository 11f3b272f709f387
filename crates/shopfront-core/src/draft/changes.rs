// ── Change tracking ──
//
// One change log per draft records every mutation by group. It feeds the
// single `DirtySet` the encoder consumes: list groups are dirty once
// touched, scalar groups are dirty when they differ from the snapshot.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};

use super::group::Group;

/// One recorded mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
    pub group: Group,
    pub summary: String,
    pub at: DateTime<Utc>,
}

/// Ordered record of mutations since the last fork.
///
/// The touched set only grows; it is reset by forking a new draft, which
/// happens after a save or an explicit reload.
#[derive(Debug, Clone, Default)]
pub struct ChangeLog {
    entries: Vec<Change>,
    touched: BTreeSet<Group>,
}

impl ChangeLog {
    pub fn record(&mut self, group: Group, summary: impl Into<String>) {
        self.touched.insert(group);
        self.entries.push(Change {
            group,
            summary: summary.into(),
            at: Utc::now(),
        });
    }

    pub fn touched(&self, group: Group) -> bool {
        self.touched.contains(&group)
    }

    pub fn entries(&self) -> &[Change] {
        &self.entries
    }

    pub fn for_group(&self, group: Group) -> impl Iterator<Item = &Change> {
        self.entries.iter().filter(move |c| c.group == group)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The groups that will be submitted by the next save.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirtySet(BTreeSet<Group>);

impl DirtySet {
    pub fn contains(&self, group: Group) -> bool {
        self.0.contains(&group)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Groups in encode order.
    pub fn iter(&self) -> impl Iterator<Item = Group> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<Group> for DirtySet {
    fn from_iter<I: IntoIterator<Item = Group>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for DirtySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys: Vec<&str> = self.iter().map(Group::wire_key).collect();
        f.write_str(&keys.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touched_is_monotonic() {
        let mut log = ChangeLog::default();
        log.record(Group::Banners, "banner #1 added");
        log.record(Group::Banners, "banner #1 removed");

        assert!(log.touched(Group::Banners));
        assert!(!log.touched(Group::Domains));
        assert_eq!(log.for_group(Group::Banners).count(), 2);
    }

    #[test]
    fn dirty_set_iterates_in_encode_order() {
        let dirty: DirtySet = [Group::Domains, Group::Logo, Group::Seo].into_iter().collect();
        assert_eq!(dirty.to_string(), "logo, seo, domains");
        assert_eq!(dirty.len(), 3);
        assert!(dirty.contains(Group::Seo));
    }
}
