//! Sorted translation table and its loader.
//!
//! A [`TranslationTable`] maps a case-folded key to one or more substitute
//! words. Entries are kept in a `Vec` sorted by byte-wise key order and looked
//! up with binary search; the table is immutable once built and can be shared
//! freely between threads.

pub mod loader;
pub mod reader;

use smallvec::SmallVec;

use crate::words::words;

/// One parsed dictionary line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationEntry {
    key: String,
    value: String,
    outputs: SmallVec<[String; 2]>,
}

impl TranslationEntry {
    /// Create an entry, splitting `value` into its output words.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        let value = value.into();
        let outputs = words(&value).map(str::to_string).collect();
        Self {
            key: key.into(),
            value,
            outputs,
        }
    }

    /// The lookup key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The raw value as it appeared after the key.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The substitute words, in value order.
    pub fn outputs(&self) -> &[String] {
        &self.outputs
    }
}

/// Immutable table of translation entries sorted by key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationTable {
    entries: Vec<TranslationEntry>,
}

impl TranslationTable {
    /// Build a table from entries in source order.
    ///
    /// Entries are stably sorted by key; when several entries share a key only
    /// the first one in source order is kept. Returns the table and the number
    /// of entries dropped as duplicates.
    pub fn from_entries(mut entries: Vec<TranslationEntry>) -> (Self, usize) {
        let before = entries.len();
        if entries.len() > 1 {
            entries.sort_by(|a, b| a.key.as_bytes().cmp(b.key.as_bytes()));
            // dedup_by passes (later, earlier) and removes `later`
            entries.dedup_by(|later, earlier| {
                let duplicate = later.key == earlier.key;
                if duplicate {
                    tracing::warn!(
                        key = %later.key,
                        kept = %earlier.value,
                        dropped = %later.value,
                        "duplicate translation key, keeping first occurrence"
                    );
                }
                duplicate
            });
        }
        let dropped = before - entries.len();
        (Self { entries }, dropped)
    }

    /// Find the entry whose key equals `key` byte for byte.
    pub fn find(&self, key: &str) -> Option<&TranslationEntry> {
        if self.entries.is_empty() {
            return None;
        }
        self.entries
            .binary_search_by(|entry| entry.key.as_bytes().cmp(key.as_bytes()))
            .ok()
            .map(|idx| &self.entries[idx])
    }

    /// Check if a key is present.
    pub fn contains(&self, key: &str) -> bool {
        self.find(key).is_some()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries in key order.
    pub fn iter(&self) -> std::slice::Iter<'_, TranslationEntry> {
        self.entries.iter()
    }

    /// Iterate over keys in key order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|e| e.key.as_str())
    }
}

impl<'a> IntoIterator for &'a TranslationTable {
    type Item = &'a TranslationEntry;
    type IntoIter = std::slice::Iter<'a, TranslationEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
