//! Relative path entries in canonical slash form
//!
//! Every path that crosses the tree-text boundary is normalized here so the
//! parser, dumper, builder and verifier all compare the same strings:
//! 1. `\` is treated as a separator, like `/`
//! 2. Unicode is normalized to NFC
//! 3. Empty and `.` segments are dropped; `..` pops lexically and never climbs above the root
//! 4. Directories carry exactly one trailing `/`, files never do

use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use unicode_normalization::UnicodeNormalization;

/// Canonical separator used in tree-text and in [`PathEntry`] strings.
pub const SEPARATOR: char = '/';

/// Kind of a path entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Directory,
    File,
}

/// A normalized, root-relative path tagged as directory or file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(into = "String")]
pub struct PathEntry {
    path: String,
    kind: EntryKind,
}

impl PathEntry {
    /// Build a directory entry. Returns `None` when the path normalizes to the root.
    pub fn directory(raw: &str) -> Option<Self> {
        let rel = normalize_relative(raw);
        if rel.is_empty() {
            return None;
        }
        Some(Self {
            path: format!("{}{}", rel, SEPARATOR),
            kind: EntryKind::Directory,
        })
    }

    /// Build a file entry. Returns `None` when the path normalizes to the root.
    pub fn file(raw: &str) -> Option<Self> {
        let rel = normalize_relative(raw);
        if rel.is_empty() {
            return None;
        }
        Some(Self {
            path: rel,
            kind: EntryKind::File,
        })
    }

    /// Classify by trailing separator (`/` or `\`) and normalize.
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.ends_with(SEPARATOR) || raw.ends_with('\\') {
            Self::directory(raw)
        } else {
            Self::file(raw)
        }
    }

    /// Entry for `segments` joined under their common ancestor chain.
    pub fn from_segments<S: AsRef<str>>(segments: &[S], kind: EntryKind) -> Option<Self> {
        let joined = segments
            .iter()
            .map(|s| s.as_ref())
            .collect::<Vec<_>>()
            .join("/");
        match kind {
            EntryKind::Directory => Self::directory(&joined),
            EntryKind::File => Self::file(&joined),
        }
    }

    /// Entry for a real path below `root`, or `None` if `path` is not under it.
    pub fn from_fs_path(root: &Path, path: &Path, kind: EntryKind) -> Option<Self> {
        let rel = path.strip_prefix(root).ok()?;
        let segments: Vec<String> = rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        Self::from_segments(&segments, kind)
    }

    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }

    /// Canonical form (`src/`, `src/main.rs`).
    pub fn as_str(&self) -> &str {
        &self.path
    }

    /// Path segments without the trailing separator.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.path.split(SEPARATOR).filter(|s| !s.is_empty())
    }

    /// Last segment.
    pub fn name(&self) -> &str {
        self.segments().last().unwrap_or("")
    }

    /// Number of segments; top-level entries have depth 1.
    pub fn depth(&self) -> usize {
        self.segments().count()
    }

    /// Lowercased extension of the last segment, without the dot.
    ///
    /// Leading-dot names such as `.bashrc` have no extension.
    pub fn extension(&self) -> Option<String> {
        Path::new(self.name())
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
    }

    /// Resolve against a real directory using platform separators.
    pub fn to_native(&self, root: &Path) -> PathBuf {
        let mut out = root.to_path_buf();
        for segment in self.segments() {
            out.push(segment);
        }
        out
    }
}

impl fmt::Display for PathEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

impl From<PathEntry> for String {
    fn from(entry: PathEntry) -> Self {
        entry.path
    }
}

/// Normalize a relative path string without touching the filesystem.
///
/// The result has `/` separators, no leading or trailing separator and no
/// `.`/`..` segments.
pub fn normalize_relative(raw: &str) -> String {
    let composed: String = raw.nfc().collect();
    let mut segments: Vec<&str> = Vec::new();
    for segment in composed.split(|c| c == '/' || c == '\\') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    segments.join("/")
}
