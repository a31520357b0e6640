//! Filesystem walker shared by the dumper and the dump check
//!
//! Both sides list a directory through the same `walkdir` traversal so they
//! agree on exclusions, depth and links. Links are followed; a dangling link
//! lists as a file and a link back to an ancestor is skipped.

use crate::error::TreeError;
use crate::ignore::ExclusionSet;
use crate::tree::path::{EntryKind, PathEntry};
use std::fs;
use std::io;
use std::path::PathBuf;
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

/// Walker configuration. Same depth and filtering rules as a dump.
#[derive(Debug, Clone)]
pub struct WalkerConfig {
    /// Follow symbolic links
    pub follow_symlinks: bool,
    /// Names skipped at every level
    pub excludes: ExclusionSet,
    /// Collect directories only
    pub dirs_only: bool,
    /// Maximum nesting level to list (None = unlimited)
    pub max_depth: Option<usize>,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            follow_symlinks: true,
            excludes: ExclusionSet::new(),
            dirs_only: false,
            max_depth: None,
        }
    }
}

/// One entry below the root, in walk order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkedEntry {
    pub path: PathBuf,
    pub name: String,
    /// Nesting level; direct children of the root are at 1
    pub depth: usize,
    pub is_dir: bool,
}

/// Filesystem walker
pub struct Walker {
    root: PathBuf,
    config: WalkerConfig,
}

impl Walker {
    /// Create a new walker for the given root path
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            config: WalkerConfig::default(),
        }
    }

    /// Create a walker with custom configuration
    pub fn with_config(root: PathBuf, config: WalkerConfig) -> Self {
        Self { root, config }
    }

    /// Fail unless the root is an existing directory.
    pub fn check_root(&self) -> Result<(), TreeError> {
        match fs::metadata(&self.root) {
            Ok(meta) if meta.is_dir() => Ok(()),
            Ok(_) => Err(TreeError::NotADirectory(self.root.clone())),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(TreeError::SourceNotFound(self.root.clone()))
            }
            Err(source) => Err(TreeError::Read {
                path: self.root.clone(),
                source,
            }),
        }
    }

    /// Walk the filesystem and collect all entries below the root.
    ///
    /// Returns entries sorted by path for determinism.
    pub fn walk(&self) -> Result<Vec<PathEntry>, TreeError> {
        let mut entries = Vec::new();
        for walked in self.walk_tree()? {
            let kind = if walked.is_dir {
                EntryKind::Directory
            } else {
                EntryKind::File
            };
            match PathEntry::from_fs_path(&self.root, &walked.path, kind) {
                Some(path_entry) => entries.push(path_entry),
                None => warn!(path = %walked.path.display(), "Walked path is outside the root"),
            }
        }
        entries.sort();
        Ok(entries)
    }

    /// Depth-first listing with siblings sorted by name, parents before
    /// their children. Unreadable entries and link loops are logged and
    /// skipped.
    pub fn walk_tree(&self) -> Result<Vec<WalkedEntry>, TreeError> {
        self.check_root()?;

        let walker = WalkDir::new(&self.root)
            .follow_links(self.config.follow_symlinks)
            .max_depth(self.config.max_depth.unwrap_or(usize::MAX))
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !self.should_ignore(entry));

        let mut entries = Vec::new();
        for entry in walker {
            let walked = match entry {
                Ok(entry) if entry.depth() == 0 => continue,
                Ok(entry) => WalkedEntry {
                    name: entry.file_name().to_string_lossy().into_owned(),
                    depth: entry.depth(),
                    is_dir: entry.file_type().is_dir(),
                    path: entry.into_path(),
                },
                Err(e) => match self.dangling_link(&e) {
                    Some(walked) => walked,
                    None => continue,
                },
            };
            if self.config.dirs_only && !walked.is_dir {
                continue;
            }
            entries.push(walked);
        }
        Ok(entries)
    }

    /// Excluded names are pruned with their whole subtree. The root itself is
    /// never excluded.
    fn should_ignore(&self, entry: &DirEntry) -> bool {
        entry.depth() > 0
            && self
                .config
                .excludes
                .contains(&entry.file_name().to_string_lossy())
    }

    /// A link whose target is missing becomes a file entry; every other walk
    /// error is logged and dropped.
    fn dangling_link(&self, err: &walkdir::Error) -> Option<WalkedEntry> {
        if let Some(ancestor) = err.loop_ancestor() {
            warn!(
                path = ?err.path(),
                ancestor = %ancestor.display(),
                "Skipping symlink that loops back to an ancestor"
            );
            return None;
        }

        let path = match err.path() {
            Some(path) if err.depth() > 0 => path,
            _ => {
                warn!(error = %err, "Skipping unreadable entry during walk");
                return None;
            }
        };
        let is_link = fs::symlink_metadata(path)
            .map(|meta| meta.file_type().is_symlink())
            .unwrap_or(false);
        if !is_link || fs::metadata(path).is_ok() {
            warn!(error = %err, "Skipping unreadable entry during walk");
            return None;
        }

        let name = path.file_name()?.to_string_lossy().into_owned();
        // Errors bypass filter_entry, so exclusions are applied here.
        if self.config.excludes.contains(&name) {
            return None;
        }
        debug!(path = %path.display(), "Listing dangling symlink as a file");
        Some(WalkedEntry {
            path: path.to_path_buf(),
            name,
            depth: err.depth(),
            is_dir: false,
        })
    }
}
