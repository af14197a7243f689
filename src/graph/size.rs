//! Additive size metrics attached to projects.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A bundle of volume counters for one size category of a project.
///
/// The fixed counters cover the common metrics, `other` holds any named
/// counter an importer wants to record (e.g. `"data"` and `"indexes"` for
/// database tables).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    /// Number of lines (rows, for database tables)
    pub lines: u64,
    /// Number of files
    pub files: u64,
    /// Number of bytes
    pub bytes: u64,
    /// Open-ended named counters
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub other: BTreeMap<String, u64>,
}

impl Size {
    /// Creates an all-zero size.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds every counter of `other` into `self`.
    ///
    /// Named counters missing on either side count as zero. Counters
    /// saturate at `u64::MAX` instead of overflowing.
    ///
    /// # Example
    ///
    /// ```rust
    /// use archscope::graph::Size;
    ///
    /// let mut total = Size { lines: 10, ..Size::default() };
    /// let mut more = Size { lines: 5, bytes: 100, ..Size::default() };
    /// more.other.insert("data".to_string(), 7);
    ///
    /// total.add(&more);
    /// assert_eq!(total.lines, 15);
    /// assert_eq!(total.bytes, 100);
    /// assert_eq!(total.other["data"], 7);
    /// ```
    pub fn add(&mut self, other: &Size) {
        self.lines = self.lines.saturating_add(other.lines);
        self.files = self.files.saturating_add(other.files);
        self.bytes = self.bytes.saturating_add(other.bytes);

        for (key, value) in &other.other {
            let counter = self.other.entry(key.clone()).or_insert(0);
            *counter = counter.saturating_add(*value);
        }
    }

    /// Returns the value of a named counter, zero if absent.
    pub fn other_value(&self, key: &str) -> u64 {
        self.other.get(key).copied().unwrap_or(0)
    }

    /// Returns true if every counter is zero.
    pub fn is_zero(&self) -> bool {
        self.lines == 0
            && self.files == 0
            && self.bytes == 0
            && self.other.values().all(|&v| v == 0)
    }
}
