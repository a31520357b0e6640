//! CLI domain: parse, route, output, and presentation only.
//! Route handlers call into the tree core and format its reports.

mod output;
mod parse;
mod presentation;
mod route;

pub use output::map_error;
pub use parse::{Cli, Commands, TemplateArg, TestMode};
pub use presentation::{
    format_build_report, format_dump_summary, format_verify_report_json,
    format_verify_report_text,
};
pub use route::{CommandOutcome, RunContext};
