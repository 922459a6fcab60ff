//! The resolved identity of the caller.

use std::collections::BTreeSet;

/// A caller identity: username plus the full effective group-name list.
///
/// Group order is irrelevant for matching and the primary group is not
/// distinguished, so groups are kept as a set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    /// Login name of the caller.
    pub username: String,
    /// Every group the caller is effectively a member of.
    pub groups: BTreeSet<String>,
}

impl Principal {
    /// Builds a principal from a username and its group names.
    pub fn new(username: impl Into<String>, groups: impl IntoIterator<Item = String>) -> Self {
        Self {
            username: username.into(),
            groups: groups.into_iter().collect(),
        }
    }

    /// Whether the caller holds every group in `required`.
    pub fn holds_all_groups<'a>(&self, required: impl IntoIterator<Item = &'a str>) -> bool {
        required.into_iter().all(|g| self.groups.contains(g))
    }
}
