//! CLI presentation: text and json formatters for command results.

use crate::error::ApiError;
use crate::tree::{BuildReport, DumpSummary, PathEntry, VerifyMode, VerifyReport};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;
use std::path::Path;

pub fn format_dump_summary(summary: &DumpSummary, output: &Path) -> String {
    let mut s = format!(
        "Dumped {} directories and {} files to {}",
        summary.directories,
        summary.files,
        output.display()
    );
    if summary.content_blocks > 0 {
        s.push_str(&format!(" ({} with content)", summary.content_blocks));
    }
    if !summary.skipped_files.is_empty() {
        s.push_str(&format!(
            "\nSkipped content of {} unreadable files:",
            summary.skipped_files.len()
        ));
        for path in &summary.skipped_files {
            s.push_str(&format!("\n  - {}", path.display()));
        }
    }
    s
}

pub fn format_build_report(report: &BuildReport, dest: &Path) -> String {
    let mut s = format!(
        "Built {}: {} directories created, {} files created, {} overwritten, {} skipped",
        dest.display(),
        report.created_dirs.len(),
        report.created_files.len(),
        report.overwritten_files.len(),
        report.skipped_files.len()
    );
    if !report.skipped_files.is_empty() {
        s.push_str("\nSkipped existing files (use --overwrite to replace):");
        for path in &report.skipped_files {
            s.push_str(&format!("\n  - {}", path.display()));
        }
    }
    s
}

pub fn format_verify_report_text(report: &VerifyReport, color: bool) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    match report.mode {
        VerifyMode::Build => {
            table.set_header(vec!["Checked", "Missing", "Wrong kind"]);
            table.add_row(vec![
                report.actual_paths.to_string(),
                report.missing_on_disk.len().to_string(),
                report.kind_mismatches.len().to_string(),
            ]);
        }
        VerifyMode::Dump => {
            table.set_header(vec!["Real paths", "Paths in file", "Missing", "Extra"]);
            table.add_row(vec![
                report.actual_paths.to_string(),
                report.recorded_paths.to_string(),
                report.missing_in_file.len().to_string(),
                report.extra_in_file.len().to_string(),
            ]);
        }
    }

    if report.passed() {
        let status = "TEST: all checks passed";
        let status = if color {
            status.green().bold().to_string()
        } else {
            status.to_string()
        };
        return format!("{}\n{}", status, table);
    }

    let status = format!("TEST: found {} discrepancies", report.discrepancy_count());
    let mut s = if color {
        status.red().bold().to_string()
    } else {
        status
    };
    push_section(&mut s, "Missing on disk", &report.missing_on_disk);
    push_section(&mut s, "Wrong kind on disk", &report.kind_mismatches);
    push_section(&mut s, "Missing from generated file", &report.missing_in_file);
    push_section(&mut s, "Extra in generated file", &report.extra_in_file);
    s.push('\n');
    s.push_str(&table.to_string());
    s
}

fn push_section(s: &mut String, title: &str, entries: &[PathEntry]) {
    if entries.is_empty() {
        return;
    }
    s.push_str(&format!("\n\n{} ({}):", title, entries.len()));
    for entry in entries {
        s.push_str(&format!("\n  - {}", entry));
    }
}

pub fn format_verify_report_json(report: &VerifyReport) -> Result<String, ApiError> {
    let out = serde_json::json!({
        "passed": report.passed(),
        "report": report,
    });
    serde_json::to_string_pretty(&out)
        .map_err(|e| ApiError::InvalidArgument(format!("Failed to serialize report: {}", e)))
}
