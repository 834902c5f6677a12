#![forbid(unsafe_code)]

//! Insertion-ordered string mapping.
//!
//! [`OrderedEntries`] wraps an `IndexMap` hashed with ahash. Row `r` of a
//! table maps to the entry at index `r`.
//!
//! # Invariants
//!
//! 1. Keys are unique. Re-inserting a key replaces its value and keeps the
//!    key's original position.
//! 2. Positions only change through [`OrderedEntries::clear`] or wholesale
//!    replacement of the container.

use ahash::RandomState;
use indexmap::IndexMap;

type EntryMap = IndexMap<String, String, RandomState>;

/// An ordered mapping from unique string keys to string values.
#[derive(Debug, Clone, Default)]
pub struct OrderedEntries {
    map: EntryMap,
}

impl OrderedEntries {
    /// Create an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty mapping with room for `capacity` entries.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            map: IndexMap::with_capacity_and_hasher(capacity, RandomState::new()),
        }
    }

    /// Insert or replace an entry.
    ///
    /// A new key is appended at the end of the row order. An existing key
    /// keeps its position; the previous value is returned.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.map.insert(key.into(), value.into())
    }

    /// Value stored for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.map.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    /// Keys in row order.
    pub fn keys(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.map.keys().map(String::as_str)
    }

    /// Key at row position `row`.
    #[must_use]
    pub fn key_at(&self, row: usize) -> Option<&str> {
        self.entry_at(row).map(|(key, _)| key)
    }

    /// Entry at row position `row`.
    #[must_use]
    pub fn entry_at(&self, row: usize) -> Option<(&str, &str)> {
        self.map
            .get_index(row)
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Iterate `(key, value)` pairs in row order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &str)> + '_ {
        self.map
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.map.clear();
    }
}

impl PartialEq for OrderedEntries {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl Eq for OrderedEntries {}

impl<K, V> FromIterator<(K, V)> for OrderedEntries
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut entries = Self::new();
        entries.extend(iter);
        entries
    }
}

impl<K, V> Extend<(K, V)> for OrderedEntries
where
    K: Into<String>,
    V: Into<String>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl IntoIterator for OrderedEntries {
    type Item = (String, String);
    type IntoIter = indexmap::map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.map.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(entries: &OrderedEntries) -> Vec<&str> {
        entries.keys().collect()
    }

    #[test]
    fn insertion_order_is_row_order() {
        let entries: OrderedEntries = [("theme", "dark"), ("session", "abc123"), ("a", "1")]
            .into_iter()
            .collect();
        assert_eq!(keys(&entries), ["theme", "session", "a"]);
        assert_eq!(entries.key_at(1), Some("session"));
        assert_eq!(entries.entry_at(0), Some(("theme", "dark")));
        assert_eq!(entries.key_at(3), None);
        assert_eq!(entries.entry_at(3), None);
    }

    #[test]
    fn reinsert_keeps_position_and_replaces_value() {
        let mut entries = OrderedEntries::new();
        assert_eq!(entries.insert("a", "1"), None);
        assert_eq!(entries.insert("b", "2"), None);
        assert_eq!(entries.insert("a", "3"), Some("1".to_string()));
        assert_eq!(entries.len(), 2);
        assert_eq!(keys(&entries), ["a", "b"]);
        assert_eq!(entries.get("a"), Some("3"));
        assert_eq!(entries.entry_at(0), Some(("a", "3")));
    }

    #[test]
    fn clear_empties_everything() {
        let mut entries: OrderedEntries = [("k", "v")].into_iter().collect();
        entries.clear();
        assert!(entries.is_empty());
        assert!(!entries.contains_key("k"));
        assert_eq!(entries.iter().len(), 0);
    }

    #[test]
    fn equality_is_order_sensitive() {
        let ab: OrderedEntries = [("a", "1"), ("b", "2")].into_iter().collect();
        let ba: OrderedEntries = [("b", "2"), ("a", "1")].into_iter().collect();
        assert_ne!(ab, ba);
        assert_eq!(ab, ab.clone());
    }

    #[test]
    fn into_iter_yields_pairs_in_order() {
        let entries: OrderedEntries = [("x", "1"), ("y", "2")].into_iter().collect();
        let pairs: Vec<_> = entries.into_iter().collect();
        assert_eq!(
            pairs,
            vec![
                ("x".to_string(), "1".to_string()),
                ("y".to_string(), "2".to_string())
            ]
        );
    }

    #[test]
    fn empty_value_is_distinct_from_missing() {
        let entries: OrderedEntries = [("blank", "")].into_iter().collect();
        assert_eq!(entries.get("blank"), Some(""));
        assert_eq!(entries.get("missing"), None);
    }
}
