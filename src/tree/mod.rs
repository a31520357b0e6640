//! Tree-text core
//!
//! Serializes a directory into tree-style text, parses it back, rebuilds the
//! structure elsewhere and verifies either direction against the filesystem.

pub mod builder;
pub mod content;
pub mod dumper;
pub mod format;
pub mod parser;
pub mod path;
pub mod templates;
pub mod verify;
pub mod walker;

pub use builder::{BuildOptions, BuildReport, StructureBuilder, TemplatePolicy};
pub use content::ContentMap;
pub use dumper::{DumpOptions, DumpSummary, TreeDumper};
pub use parser::{parse_tree_file, parse_tree_text, ParsedTree};
pub use path::{EntryKind, PathEntry};
pub use verify::{verify_build, verify_dump, VerifyMode, VerifyReport};
pub use walker::{WalkedEntry, Walker, WalkerConfig};
