//! Configuration System
//!
//! Layered configuration for exclusion names and logging. Sources are merged
//! by [`ConfigLoader`]; CLI flags are applied on top by the caller.

use crate::error::TreeError;
use crate::ignore::ExclusionSet;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;
pub use sources::global_file::global_config_path;
pub use sources::workspace_file::WORKSPACE_CONFIG_FILE;

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FstreeConfig {
    /// Names skipped while dumping and verifying
    #[serde(default)]
    pub exclude: ExcludeConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Exclusion settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExcludeConfig {
    /// Start from the built-in names (.git, node_modules, vendor, __pycache__)
    #[serde(default = "default_true")]
    pub use_defaults: bool,

    /// Extra names
    #[serde(default)]
    pub names: Vec<String>,

    /// Exclude file to read (one name per line, `#` comments)
    #[serde(default)]
    pub file: Option<PathBuf>,
}

fn default_true() -> bool {
    true
}

impl Default for ExcludeConfig {
    fn default() -> Self {
        Self {
            use_defaults: true,
            names: Vec::new(),
            file: None,
        }
    }
}

impl ExcludeConfig {
    /// Resolve into an exclusion set, reading the exclude file if one is set.
    pub fn to_exclusion_set(&self) -> Result<ExclusionSet, TreeError> {
        let mut set = if self.use_defaults {
            ExclusionSet::with_defaults()
        } else {
            ExclusionSet::new()
        };
        for name in &self.names {
            set.insert(name);
        }
        if let Some(ref file) = self.file {
            set.extend_from_file(file)?;
        }
        Ok(set)
    }
}
