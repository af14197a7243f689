//! String key/value settings shared by projects and dependency edges.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A key/value store where an empty value means "not set".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigStore {
    values: BTreeMap<String, String>,
}

impl ConfigStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` under `key`, or removes the key when `value` is empty.
    ///
    /// Returns `true` if the stored value changed.
    pub fn set(&mut self, key: &str, value: &str) -> bool {
        if self.get(key) == value {
            return false;
        }

        if value.is_empty() {
            self.values.remove(key);
        } else {
            self.values.insert(key.to_string(), value.to_string());
        }

        true
    }

    /// Returns the value stored under `key`, or `""` if absent.
    pub fn get(&self, key: &str) -> &str {
        self.values.get(key).map(String::as_str).unwrap_or("")
    }

    /// Iterates over the stored entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get() {
        let mut store = ConfigStore::new();
        assert!(store.set("color", "red"));
        assert_eq!(store.get("color"), "red");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_set_same_value_reports_unchanged() {
        let mut store = ConfigStore::new();
        store.set("color", "red");
        assert!(!store.set("color", "red"));
        assert!(store.set("color", "blue"));
        assert_eq!(store.get("color"), "blue");
    }

    #[test]
    fn test_empty_value_deletes_key() {
        let mut store = ConfigStore::new();
        store.set("color", "red");
        assert!(store.set("color", ""));
        assert_eq!(store.get("color"), "");
        assert!(store.is_empty());
    }

    #[test]
    fn test_empty_value_on_missing_key_is_unchanged() {
        let mut store = ConfigStore::new();
        assert!(!store.set("color", ""));
        assert_eq!(store.get("color"), "");
    }

    #[test]
    fn test_iter_is_key_ordered() {
        let mut store = ConfigStore::new();
        store.set("b", "2");
        store.set("a", "1");
        let entries: Vec<_> = store.iter().collect();
        assert_eq!(entries, vec![("a", "1"), ("b", "2")]);
    }
}
