//! CLI route: single route table and run context. Dispatches to the tree core and presentation.

use crate::cli::parse::{Cli, Commands, TemplateArg, TestMode};
use crate::cli::presentation::{
    format_build_report, format_dump_summary, format_verify_report_json,
    format_verify_report_text,
};
use crate::config::FstreeConfig;
use crate::error::ApiError;
use crate::ignore::ExclusionSet;
use crate::tree::{
    parse_tree_file, verify_build, verify_dump, BuildOptions, DumpOptions, StructureBuilder,
    TemplatePolicy, TreeDumper,
};
use std::io::IsTerminal;
use tracing::{debug, info};

/// Result of a routed command: text for stdout and whether it succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutcome {
    pub output: String,
    pub success: bool,
}

impl CommandOutcome {
    fn ok(output: String) -> Self {
        Self {
            output,
            success: true,
        }
    }
}

/// Runtime context for CLI execution: resolved exclusions and output styling.
pub struct RunContext {
    excludes: ExclusionSet,
    color: bool,
}

impl RunContext {
    /// Resolve the exclusion set from config with CLI flags layered on top.
    pub fn new(config: FstreeConfig, cli: &Cli) -> Result<Self, ApiError> {
        let mut exclude = config.exclude;
        if cli.no_default_excludes {
            exclude.use_defaults = false;
        }
        exclude.names.extend(cli.exclude.iter().cloned());
        if let Some(ref file) = cli.exclude_file {
            exclude.file = Some(file.clone());
        }
        let excludes = exclude.to_exclusion_set()?;
        debug!(excludes = ?excludes.iter().collect::<Vec<_>>(), "Resolved exclusions");

        Ok(Self {
            excludes,
            color: std::io::stdout().is_terminal(),
        })
    }

    pub fn excludes(&self) -> &ExclusionSet {
        &self.excludes
    }

    /// Force colored report output on or off.
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Execute a CLI command via the single route table.
    pub fn execute(&self, command: &Commands) -> Result<CommandOutcome, ApiError> {
        match command {
            Commands::Dump {
                source,
                output,
                with_content,
                dirs_only,
                level,
            } => {
                let options = DumpOptions {
                    excludes: self.excludes.clone(),
                    include_content: *with_content,
                    dirs_only: *dirs_only,
                    max_depth: *level,
                };
                let summary = TreeDumper::with_options(source, options).dump_to_file(output)?;
                Ok(CommandOutcome::ok(format_dump_summary(&summary, output)))
            }
            Commands::Build {
                input,
                dest,
                overwrite,
                templates,
            } => {
                let parsed = parse_tree_file(input)?;
                let options = BuildOptions {
                    overwrite: *overwrite,
                    templates: template_policy(*templates),
                };
                let report = StructureBuilder::with_options(dest, options).build_parsed(&parsed)?;
                Ok(CommandOutcome::ok(format_build_report(&report, dest)))
            }
            Commands::Test {
                input,
                output,
                test_mode,
                dirs_only,
                level,
                format,
            } => {
                let report = match test_mode {
                    TestMode::Build => verify_build(input, output)?,
                    TestMode::Dump => {
                        let dumped_with = DumpOptions {
                            excludes: self.excludes.clone(),
                            dirs_only: *dirs_only,
                            max_depth: *level,
                            ..Default::default()
                        };
                        verify_dump(input, output, dumped_with.walker_config())?
                    }
                };
                info!(passed = report.passed(), "Verification finished");
                let text = match format.as_str() {
                    "json" => format_verify_report_json(&report)?,
                    "text" => format_verify_report_text(&report, self.color),
                    other => {
                        return Err(ApiError::InvalidArgument(format!(
                            "Unknown format '{}' (expected text or json)",
                            other
                        )))
                    }
                };
                Ok(CommandOutcome {
                    output: text,
                    success: report.passed(),
                })
            }
        }
    }
}

fn template_policy(arg: TemplateArg) -> TemplatePolicy {
    match arg {
        TemplateArg::Auto => TemplatePolicy::Auto,
        TemplateArg::Always => TemplatePolicy::Always,
        TemplateArg::Never => TemplatePolicy::Never,
    }
}
