//! Tree-text serializer
//!
//! Renders the shared walker's depth-first listing, one line per entry.
//! Siblings are sorted by name with directories and files interleaved. Every
//! level inherits a four-column prefix from its ancestors: `│   ` under a
//! parent that has later siblings, four blanks under the last one.

use crate::error::TreeError;
use crate::ignore::ExclusionSet;
use crate::tree::format::{
    BLANK_PREFIX, BRANCH, COMMENT_MARKER, CONTENT_END, CONTENT_START, INDENT_UNIT, LAST_BRANCH,
    PIPE_PREFIX,
};
use crate::tree::walker::{WalkedEntry, Walker, WalkerConfig};
use serde::Serialize;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

/// Options for a dump
#[derive(Debug, Clone, Default)]
pub struct DumpOptions {
    /// Names skipped at every level
    pub excludes: ExclusionSet,
    /// Inline file contents in `>>>`/`<<<` blocks
    pub include_content: bool,
    /// Emit directories only
    pub dirs_only: bool,
    /// Stop descending once this nesting level is reached (root = 0)
    pub max_depth: Option<usize>,
}

impl DumpOptions {
    /// Walker settings that list exactly what this dump writes.
    pub fn walker_config(&self) -> WalkerConfig {
        WalkerConfig {
            excludes: self.excludes.clone(),
            dirs_only: self.dirs_only,
            max_depth: self.max_depth,
            ..Default::default()
        }
    }
}

/// Counters collected while dumping
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DumpSummary {
    pub directories: usize,
    pub files: usize,
    pub content_blocks: usize,
    /// Files whose content could not be read as text
    pub skipped_files: Vec<PathBuf>,
}

/// Serializes a directory into tree-text
pub struct TreeDumper {
    root: PathBuf,
    options: DumpOptions,
}

impl TreeDumper {
    /// Dumper with default options (no exclusions, structure only)
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            options: DumpOptions::default(),
        }
    }

    pub fn with_options(root: impl Into<PathBuf>, options: DumpOptions) -> Self {
        Self {
            root: root.into(),
            options,
        }
    }

    /// Dump into a string.
    pub fn dump_to_string(&self) -> Result<String, TreeError> {
        let mut buf = Vec::new();
        self.dump_to_writer(&mut buf)?;
        String::from_utf8(buf).map_err(|e| TreeError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))
    }

    /// Dump into `output`.
    ///
    /// The output file is created before the walk, so when it lies inside
    /// the source tree it lists itself (without content) and a later dump
    /// check of the same tree passes.
    #[instrument(skip(self), fields(source = %self.root.display()))]
    pub fn dump_to_file(&self, output: &Path) -> Result<DumpSummary, TreeError> {
        self.walker().check_root()?;
        let write_error = |source: io::Error| TreeError::Write {
            path: output.to_path_buf(),
            source,
        };
        fs::File::create(output).map_err(write_error)?;

        let mut buf = Vec::new();
        let summary = self.dump_to_writer(&mut buf)?;
        fs::write(output, &buf).map_err(write_error)?;
        info!(output = %output.display(), "Wrote tree-text");
        Ok(summary)
    }

    /// Dump into any writer.
    pub fn dump_to_writer<W: Write>(&self, out: &mut W) -> Result<DumpSummary, TreeError> {
        let start = Instant::now();
        let entries = self.walker().walk_tree()?;

        writeln!(out, "{}/", self.root_name())?;
        let mut summary = DumpSummary::default();
        self.render(out, &entries, &mut summary)?;

        info!(
            directories = summary.directories,
            files = summary.files,
            content_blocks = summary.content_blocks,
            skipped = summary.skipped_files.len(),
            duration_ms = start.elapsed().as_millis(),
            "Dump complete"
        );
        Ok(summary)
    }

    fn walker(&self) -> Walker {
        Walker::with_config(self.root.clone(), self.options.walker_config())
    }

    /// Base name of the root, resolving `.` and similar through the filesystem.
    fn root_name(&self) -> String {
        let base_name = |p: &Path| p.file_name().map(|n| n.to_string_lossy().into_owned());
        base_name(&self.root)
            .or_else(|| {
                dunce::canonicalize(&self.root)
                    .ok()
                    .and_then(|canonical| base_name(&canonical))
            })
            .unwrap_or_else(|| self.root.display().to_string())
    }

    fn render<W: Write>(
        &self,
        out: &mut W,
        entries: &[WalkedEntry],
        summary: &mut DumpSummary,
    ) -> Result<(), TreeError> {
        // Last-sibling flag of each open ancestor, outermost first.
        let mut ancestors_last: Vec<bool> = Vec::new();
        for (entry, is_last) in entries.iter().zip(last_sibling_flags(entries)) {
            ancestors_last.truncate(entry.depth - 1);
            let prefix: String = ancestors_last
                .iter()
                .map(|last| if *last { BLANK_PREFIX } else { PIPE_PREFIX })
                .collect();
            let connector = if is_last { LAST_BRANCH } else { BRANCH };
            let suffix = if entry.is_dir { "/" } else { "" };
            writeln!(out, "{}{}{}{}", prefix, connector, entry.name, suffix)?;
            debug!(path = %entry.path.display(), "Scanned entry");
            if entry.name.contains(COMMENT_MARKER) {
                warn!(path = %entry.path.display(), "Name contains the comment marker and will be truncated when parsed");
            }

            if entry.is_dir {
                summary.directories += 1;
            } else {
                summary.files += 1;
                if self.options.include_content && !self.options.dirs_only {
                    self.write_content_block(out, &entry.path, &prefix, summary)?;
                }
            }
            ancestors_last.push(is_last);
        }
        Ok(())
    }

    fn write_content_block<W: Write>(
        &self,
        out: &mut W,
        path: &Path,
        prefix: &str,
        summary: &mut DumpSummary,
    ) -> Result<(), TreeError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Cannot read file as text; skipping its content");
                summary.skipped_files.push(path.to_path_buf());
                return Ok(());
            }
        };
        let body = text.trim_end_matches('\n');
        if body.is_empty() {
            return Ok(());
        }

        writeln!(out, "{}{}{}", prefix, INDENT_UNIT, CONTENT_START)?;
        for line in body.split('\n') {
            writeln!(out, "{}{}{}", prefix, INDENT_UNIT, line)?;
        }
        writeln!(out, "{}{}{}", prefix, INDENT_UNIT, CONTENT_END)?;
        summary.content_blocks += 1;
        Ok(())
    }
}

/// For a depth-first listing, whether each entry is the last child of its
/// parent.
fn last_sibling_flags(entries: &[WalkedEntry]) -> Vec<bool> {
    let mut flags = vec![false; entries.len()];
    // later[d]: a sibling at depth d follows under the same parent.
    let mut later: Vec<bool> = Vec::new();
    for (idx, entry) in entries.iter().enumerate().rev() {
        later.resize(entry.depth + 1, false);
        flags[idx] = !later[entry.depth];
        later[entry.depth] = true;
    }
    flags
}
