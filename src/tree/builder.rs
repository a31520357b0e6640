//! Structure builder: materializes parsed entries under a destination directory

use crate::error::TreeError;
use crate::tree::content::ContentMap;
use crate::tree::parser::ParsedTree;
use crate::tree::path::PathEntry;
use crate::tree::templates;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, instrument};

/// When to fall back to starter templates for files without inlined content
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TemplatePolicy {
    /// Templates only when the source carries no inlined content at all.
    /// A dump made with content inclusion omits blocks for empty files, so
    /// in that case a missing block means an empty file.
    #[default]
    Auto,
    /// Always use the extension template when no block was captured
    Always,
    /// Never; files without a block are created empty
    Never,
}

/// Builder options
#[derive(Debug, Clone, Copy, Default)]
pub struct BuildOptions {
    /// Replace files that already exist
    pub overwrite: bool,
    pub templates: TemplatePolicy,
}

/// What a build did, by destination path
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildReport {
    pub created_dirs: Vec<PathBuf>,
    pub created_files: Vec<PathBuf>,
    pub overwritten_files: Vec<PathBuf>,
    /// Existing files left untouched because overwrite was off
    pub skipped_files: Vec<PathBuf>,
}

/// Creates directories and files for parsed tree-text
pub struct StructureBuilder {
    dest: PathBuf,
    options: BuildOptions,
}

impl StructureBuilder {
    pub fn new(dest: impl Into<PathBuf>) -> Self {
        Self {
            dest: dest.into(),
            options: BuildOptions::default(),
        }
    }

    pub fn with_options(dest: impl Into<PathBuf>, options: BuildOptions) -> Self {
        Self {
            dest: dest.into(),
            options,
        }
    }

    /// Build everything a parse produced.
    pub fn build_parsed(&self, parsed: &ParsedTree) -> Result<BuildReport, TreeError> {
        self.build(&parsed.entries, &parsed.contents)
    }

    /// Create `entries` in order under the destination.
    ///
    /// Directory creation is idempotent. Existing files are skipped unless
    /// overwrite is set, so a second run without overwrite changes nothing.
    #[instrument(skip_all, fields(dest = %self.dest.display(), entries = entries.len()))]
    pub fn build(
        &self,
        entries: &[PathEntry],
        contents: &ContentMap,
    ) -> Result<BuildReport, TreeError> {
        let start = Instant::now();
        let use_templates = match self.options.templates {
            TemplatePolicy::Auto => contents.is_empty(),
            TemplatePolicy::Always => true,
            TemplatePolicy::Never => false,
        };

        let mut report = BuildReport::default();
        for entry in entries {
            let target = entry.to_native(&self.dest);
            if entry.is_dir() {
                if !target.is_dir() {
                    create_dir_all(&target)?;
                    debug!(path = %target.display(), "Created directory");
                    report.created_dirs.push(target);
                }
                continue;
            }

            if let Some(parent) = target.parent() {
                if !parent.is_dir() {
                    create_dir_all(parent)?;
                    report.created_dirs.push(parent.to_path_buf());
                }
            }

            let exists = target.exists();
            if exists && !self.options.overwrite {
                debug!(path = %target.display(), "Skipped existing file");
                report.skipped_files.push(target);
                continue;
            }

            let content = match contents.resolve(entry) {
                Some(content) => content,
                None if use_templates => templates::default_content_for(entry),
                None => "",
            };
            fs::write(&target, content).map_err(|source| TreeError::Write {
                path: target.clone(),
                source,
            })?;

            if exists {
                debug!(path = %target.display(), "Overwrote file");
                report.overwritten_files.push(target);
            } else {
                debug!(path = %target.display(), "Created file");
                report.created_files.push(target);
            }
        }

        info!(
            created_dirs = report.created_dirs.len(),
            created_files = report.created_files.len(),
            overwritten = report.overwritten_files.len(),
            skipped = report.skipped_files.len(),
            duration_ms = start.elapsed().as_millis(),
            "Build complete"
        );
        Ok(report)
    }
}

fn create_dir_all(path: &Path) -> Result<(), TreeError> {
    fs::create_dir_all(path).map_err(|source| TreeError::Write {
        path: path.to_path_buf(),
        source,
    })
}
