//! CLI parse: clap types for fstree. No behavior; definitions only.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// fstree - dump a directory tree to tree-style text and rebuild it
#[derive(Parser, Debug)]
#[command(name = "fstree", version)]
#[command(about = "Dump a directory tree to tree-style text and rebuild directories from it")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Show detailed actions (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Comma separated names to exclude (e.g. .git,node_modules)
    #[arg(long, global = true, value_delimiter = ',')]
    pub exclude: Vec<String>,

    /// File with names to exclude, one per line (# starts a comment)
    #[arg(long, global = true)]
    pub exclude_file: Option<PathBuf>,

    /// Do not start from the built-in exclusions
    #[arg(long, global = true)]
    pub no_default_excludes: bool,

    /// Configuration file path (merged over the global and workspace files)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export a directory to a tree-text file
    Dump {
        /// Directory to export
        source: PathBuf,
        /// Tree-text file to write
        output: PathBuf,
        /// Inline file contents between >>> and <<<
        #[arg(long)]
        with_content: bool,
        /// List directories only
        #[arg(short = 'd', long)]
        dirs_only: bool,
        /// Limit directory depth
        #[arg(short = 'L', long = "level")]
        level: Option<usize>,
    },
    /// Rebuild a directory from a tree-text file
    Build {
        /// Tree-text file to read
        input: PathBuf,
        /// Destination directory
        dest: PathBuf,
        /// Overwrite existing files
        #[arg(long)]
        overwrite: bool,
        /// When to use starter templates for files without inlined content
        #[arg(long, value_enum, default_value_t = TemplateArg::Auto)]
        templates: TemplateArg,
    },
    /// Validate a build or dump
    Test {
        /// build: tree-text file; dump: source directory
        input: PathBuf,
        /// build: built directory; dump: generated tree-text file
        output: PathBuf,
        /// Which process to validate
        #[arg(long, value_enum, default_value_t = TestMode::Build)]
        test_mode: TestMode,
        /// The dump listed directories only
        #[arg(short = 'd', long)]
        dirs_only: bool,
        /// The dump was depth limited
        #[arg(short = 'L', long = "level")]
        level: Option<usize>,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum TestMode {
    Build,
    Dump,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum TemplateArg {
    Auto,
    Always,
    Never,
}
