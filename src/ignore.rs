//! Exclusion set for dump and verify walks.
//!
//! Entries are matched by exact name at every directory level, never by path.
//! The set is assembled from the built-in defaults, the config file, the
//! `--exclude` comma list and an optional exclude file (one name per line,
//! `#` starts a comment).

use crate::error::TreeError;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Built-in names skipped unless defaults are disabled.
pub const DEFAULT_EXCLUDES: &[&str] = &[".git", "node_modules", "vendor", "__pycache__"];

const COMMENT_MARKER: char = '#';

/// Literal entry names skipped during traversal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExclusionSet {
    names: BTreeSet<String>,
}

impl ExclusionSet {
    /// Empty set: nothing is excluded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set seeded with [`DEFAULT_EXCLUDES`].
    pub fn with_defaults() -> Self {
        DEFAULT_EXCLUDES.iter().copied().collect()
    }

    /// Add a name; surrounding whitespace is trimmed and empty names are ignored.
    pub fn insert(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        self.names.insert(name.to_string())
    }

    /// Add the names listed in an exclude file. A missing file is skipped
    /// with a warning; a file that exists but cannot be read is an error.
    pub fn extend_from_file(&mut self, path: &Path) -> Result<usize, TreeError> {
        if !path.is_file() {
            warn!(exclude_file = %path.display(), "Exclude file not found; ignoring it");
            return Ok(0);
        }
        let text = fs::read_to_string(path).map_err(|source| TreeError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let names = parse_exclude_text(&text);
        let added = names.iter().filter(|name| self.insert(name)).count();
        debug!(exclude_file = %path.display(), added, "Loaded exclude file");
        Ok(added)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl<S: AsRef<str>> FromIterator<S> for ExclusionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = ExclusionSet::new();
        for name in iter {
            set.insert(name.as_ref());
        }
        set
    }
}

/// Names from exclude-file text: comments and blank lines dropped.
pub fn parse_exclude_text(text: &str) -> Vec<String> {
    text.lines()
        .map(|line| line.split(COMMENT_MARKER).next().unwrap_or("").trim())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}
