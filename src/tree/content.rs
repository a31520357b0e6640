//! Content map: file entry -> inlined text captured from a content block

use crate::tree::path::PathEntry;
use std::collections::BTreeMap;

/// Mapping from file path to its inlined content.
///
/// Only files that had a closed `>>>`/`<<<` block appear here; an empty block
/// maps to an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentMap {
    inner: BTreeMap<String, String>,
}

impl ContentMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert content for a file entry under its canonical key.
    pub fn insert(&mut self, entry: &PathEntry, content: String) -> Option<String> {
        self.inner.insert(entry.as_str().to_string(), content)
    }

    /// Insert content under an arbitrary key (e.g. a native `a\b.txt` path).
    #[cfg(test)]
    pub(crate) fn insert_raw(&mut self, key: impl Into<String>, content: impl Into<String>) {
        self.inner.insert(key.into(), content.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.inner.get(key).map(String::as_str)
    }

    /// Look up content for `entry`, trying each separator spelling of its path.
    pub fn resolve(&self, entry: &PathEntry) -> Option<&str> {
        lookup_keys(entry)
            .iter()
            .find_map(|key| self.inner.get(key))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inner.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

fn lookup_keys(entry: &PathEntry) -> Vec<String> {
    let canonical = entry.as_str();
    let candidates = [
        canonical.to_string(),
        canonical.replace('/', "\\"),
        canonical.replace('/', std::path::MAIN_SEPARATOR_STR),
        format!("./{}", canonical),
    ];
    let mut keys: Vec<String> = Vec::with_capacity(candidates.len());
    for key in candidates {
        if !keys.contains(&key) {
            keys.push(key);
        }
    }
    keys
}
