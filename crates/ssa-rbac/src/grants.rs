//! # Grant Sets
//!
//! The per-check mapping of capability key to boolean that the host assembles
//! for a user and the capability-check filter may amend.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::capabilities::{self, FULL_ACCESS};

/// Capability grants for a single user.
///
/// Keys are arbitrary host capability names (`read`, `administrator`,
/// `ssa_manage_staff`, ...). A key counts as granted only when it is present
/// and mapped to `true`; an explicit `false` is a denial recorded by the host.
///
/// # Example
///
/// ```
/// use ssa_rbac::GrantSet;
///
/// let mut grants = GrantSet::new();
/// grants.grant("read");
/// grants.set("ssa_manage_staff", false);
///
/// assert!(grants.is_granted("read"));
/// assert!(!grants.is_granted("ssa_manage_staff"));
/// assert!(!grants.is_granted("ssa_manage_resources"));
/// assert_eq!(grants.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GrantSet {
    grants: BTreeMap<String, bool>,
}

impl GrantSet {
    /// Create a new empty grant set.
    pub fn new() -> Self {
        Self {
            grants: BTreeMap::new(),
        }
    }

    /// Mark a capability as granted.
    pub fn grant(&mut self, key: impl Into<String>) {
        self.grants.insert(key.into(), true);
    }

    /// Record an explicit value for a capability.
    pub fn set(&mut self, key: impl Into<String>, granted: bool) {
        self.grants.insert(key.into(), granted);
    }

    /// Remove a capability entry entirely.
    ///
    /// # Returns
    ///
    /// The previous value, if the key was present
    pub fn remove(&mut self, key: &str) -> Option<bool> {
        self.grants.remove(key)
    }

    /// Check whether a capability is present and `true`.
    pub fn is_granted(&self, key: &str) -> bool {
        self.grants.get(key).copied().unwrap_or(false)
    }

    /// Check whether the synthetic full access capability is granted.
    pub fn has_full_access(&self) -> bool {
        self.is_granted(FULL_ACCESS)
    }

    /// Check whether any of the given keys is granted.
    pub fn has_any<'a, I>(&self, keys: I) -> bool
    where
        I: IntoIterator<Item = &'a str>,
    {
        keys.into_iter().any(|key| self.is_granted(key))
    }

    /// Check whether any registry capability is explicitly granted.
    ///
    /// `ssa_full_access` does not count: it is synthetic and never assigned
    /// through a role editor.
    pub fn has_any_registered(&self) -> bool {
        self.has_any(capabilities::get_all_cap_slugs())
    }

    /// Iterate over the keys that are granted.
    pub fn granted(&self) -> impl Iterator<Item = &str> {
        self.grants
            .iter()
            .filter(|(_, granted)| **granted)
            .map(|(key, _)| key.as_str())
    }

    /// Iterate over every entry, granted or not.
    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.grants.iter().map(|(key, granted)| (key.as_str(), *granted))
    }

    /// Merge another grant set into this one; entries in `other` win.
    pub fn merge(&mut self, other: &GrantSet) {
        for (key, granted) in &other.grants {
            self.grants.insert(key.clone(), *granted);
        }
    }

    /// Create a grant set with every given key granted.
    ///
    /// # Example
    ///
    /// ```
    /// use ssa_rbac::GrantSet;
    ///
    /// let grants = GrantSet::from_keys(&["read", "ssa_manage_appointments"]);
    /// assert!(grants.is_granted("ssa_manage_appointments"));
    /// ```
    pub fn from_keys(keys: &[&str]) -> Self {
        keys.iter().map(|key| (*key, true)).collect()
    }

    /// Get the number of entries.
    pub fn len(&self) -> usize {
        self.grants.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.grants.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, bool)> for GrantSet {
    fn from_iter<T: IntoIterator<Item = (K, bool)>>(iter: T) -> Self {
        let mut set = GrantSet::new();
        for (key, granted) in iter {
            set.set(key, granted);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grant_and_check() {
        let mut grants = GrantSet::new();
        assert!(grants.is_empty());

        grants.grant("ssa_manage_staff");
        assert!(grants.is_granted("ssa_manage_staff"));
        assert!(!grants.is_granted("ssa_manage_resources"));
        assert_eq!(grants.len(), 1);
    }

    #[test]
    fn test_explicit_false_is_not_granted() {
        let mut grants = GrantSet::new();
        grants.set(FULL_ACCESS, false);
        assert!(!grants.has_full_access());
        assert_eq!(grants.len(), 1);

        grants.set(FULL_ACCESS, true);
        assert!(grants.has_full_access());
    }

    #[test]
    fn test_has_any_registered_ignores_full_access() {
        let grants = GrantSet::from_keys(&["read", FULL_ACCESS]);
        assert!(!grants.has_any_registered());

        let grants = GrantSet::from_keys(&["read", "ssa_manage_resources"]);
        assert!(grants.has_any_registered());

        let mut grants = GrantSet::new();
        grants.set("ssa_manage_resources", false);
        assert!(!grants.has_any_registered());
    }

    #[test]
    fn test_granted_iterates_true_entries_only() {
        let mut grants = GrantSet::from_keys(&["read", "edit_posts"]);
        grants.set("delete_posts", false);

        let granted: Vec<&str> = grants.granted().collect();
        assert_eq!(granted, vec!["edit_posts", "read"]);
        assert_eq!(grants.iter().count(), 3);
    }

    #[test]
    fn test_merge_overrides() {
        let mut base = GrantSet::from_keys(&["read", "ssa_manage_staff"]);
        let mut overrides = GrantSet::new();
        overrides.set("ssa_manage_staff", false);
        overrides.grant("ssa_manage_resources");

        base.merge(&overrides);
        assert!(base.is_granted("read"));
        assert!(!base.is_granted("ssa_manage_staff"));
        assert!(base.is_granted("ssa_manage_resources"));
    }

    #[test]
    fn test_remove() {
        let mut grants = GrantSet::from_keys(&["read"]);
        assert_eq!(grants.remove("read"), Some(true));
        assert_eq!(grants.remove("read"), None);
        assert!(grants.is_empty());
    }

    #[test]
    fn test_serializes_as_plain_map() {
        let mut grants = GrantSet::from_keys(&["read"]);
        grants.set("ssa_manage_staff", false);

        let json = serde_json::to_value(&grants).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "read": true, "ssa_manage_staff": false })
        );

        let back: GrantSet = serde_json::from_value(json).unwrap();
        assert_eq!(back, grants);
    }
}
