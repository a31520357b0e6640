//! Verifier: cross-checks tree-text against the real filesystem
//!
//! - Build check: every parsed entry exists under the target directory.
//! - Dump check: the parsed entries equal the real tree, walked with the same
//!   exclusion, depth and directories-only rules the dump used.
//!
//! Discrepancies are collected, never raised.

use crate::error::TreeError;
use crate::tree::parser::{parse_tree_file, ParsedTree};
use crate::tree::path::PathEntry;
use crate::tree::walker::{Walker, WalkerConfig};
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::Path;
use tracing::{debug, info, instrument};

/// Which process a report validates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VerifyMode {
    Build,
    Dump,
}

/// Outcome of a verification
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerifyReport {
    pub mode: VerifyMode,
    /// Paths found on disk (dump) or entries checked (build)
    pub actual_paths: usize,
    /// Distinct entries recorded in the tree-text
    pub recorded_paths: usize,
    /// Build: entries with nothing at the target path
    pub missing_on_disk: Vec<PathEntry>,
    /// Build: entries whose target exists with the other kind
    pub kind_mismatches: Vec<PathEntry>,
    /// Dump: real paths absent from the tree-text
    pub missing_in_file: Vec<PathEntry>,
    /// Dump: tree-text paths absent from the real tree
    pub extra_in_file: Vec<PathEntry>,
}

impl VerifyReport {
    fn new(mode: VerifyMode) -> Self {
        Self {
            mode,
            actual_paths: 0,
            recorded_paths: 0,
            missing_on_disk: Vec::new(),
            kind_mismatches: Vec::new(),
            missing_in_file: Vec::new(),
            extra_in_file: Vec::new(),
        }
    }

    pub fn passed(&self) -> bool {
        self.discrepancy_count() == 0
    }

    pub fn discrepancy_count(&self) -> usize {
        self.missing_on_disk.len()
            + self.kind_mismatches.len()
            + self.missing_in_file.len()
            + self.extra_in_file.len()
    }
}

/// Parse `tree_text` and confirm each entry exists under `target_dir`.
#[instrument(skip_all, fields(input = %tree_text.display(), target = %target_dir.display()))]
pub fn verify_build(tree_text: &Path, target_dir: &Path) -> Result<VerifyReport, TreeError> {
    let parsed = parse_tree_file(tree_text)?;
    Ok(verify_build_parsed(&parsed, target_dir))
}

/// Build check against an already parsed tree.
pub fn verify_build_parsed(parsed: &ParsedTree, target_dir: &Path) -> VerifyReport {
    let mut report = VerifyReport::new(VerifyMode::Build);
    let mut seen = BTreeSet::new();

    for entry in &parsed.entries {
        if !seen.insert(entry) {
            continue;
        }
        let target = entry.to_native(target_dir);
        if !target.exists() {
            debug!(path = %target.display(), "Missing");
            report.missing_on_disk.push(entry.clone());
        } else if target.is_dir() != entry.is_dir() {
            debug!(path = %target.display(), "Exists with the wrong kind");
            report.kind_mismatches.push(entry.clone());
        } else {
            debug!(path = %target.display(), "Exists");
        }
    }
    report.actual_paths = seen.len();
    report.recorded_paths = seen.len();

    info!(
        checked = report.actual_paths,
        discrepancies = report.discrepancy_count(),
        "Build check complete"
    );
    report
}

/// Walk `source_dir`, parse `generated`, and report the symmetric difference.
#[instrument(skip_all, fields(source = %source_dir.display(), generated = %generated.display()))]
pub fn verify_dump(
    source_dir: &Path,
    generated: &Path,
    config: WalkerConfig,
) -> Result<VerifyReport, TreeError> {
    let parsed = parse_tree_file(generated)?;
    verify_dump_parsed(source_dir, &parsed, config)
}

/// Dump check against an already parsed tree.
pub fn verify_dump_parsed(
    source_dir: &Path,
    parsed: &ParsedTree,
    config: WalkerConfig,
) -> Result<VerifyReport, TreeError> {
    let actual: BTreeSet<PathEntry> = Walker::with_config(source_dir.to_path_buf(), config)
        .walk()?
        .into_iter()
        .collect();
    let recorded: BTreeSet<PathEntry> = parsed.entries.iter().cloned().collect();

    let mut report = VerifyReport::new(VerifyMode::Dump);
    report.actual_paths = actual.len();
    report.recorded_paths = recorded.len();
    report.missing_in_file = actual.difference(&recorded).cloned().collect();
    report.extra_in_file = recorded.difference(&actual).cloned().collect();

    info!(
        actual = report.actual_paths,
        recorded = report.recorded_paths,
        missing_in_file = report.missing_in_file.len(),
        extra_in_file = report.extra_in_file.len(),
        "Dump check complete"
    );
    Ok(report)
}
