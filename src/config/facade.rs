//! ConfigLoader: single entry point for layered configuration.

use crate::config::merge;
use crate::config::sources::{environment, explicit_file, global_file, workspace_file};
use crate::config::FstreeConfig;
use crate::error::ApiError;
use std::fs;
use std::path::Path;
use tracing::debug;

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for the current process.
    ///
    /// Precedence (lowest to highest): defaults, global file, `.fstree.toml`
    /// in the working directory, `explicit` file, `FSTREE_*` environment.
    pub fn load(explicit: Option<&Path>) -> Result<FstreeConfig, ApiError> {
        let global = global_file::global_config_path();
        let cwd = std::env::current_dir().ok();
        Self::load_layered(global.as_deref(), cwd.as_deref(), explicit)
    }

    /// Load with every file location given explicitly.
    pub fn load_layered(
        global: Option<&Path>,
        workspace_root: Option<&Path>,
        explicit: Option<&Path>,
    ) -> Result<FstreeConfig, ApiError> {
        let mut builder = merge::builder_with_defaults()?;
        builder = global_file::add_to_builder(builder, global)?;
        if let Some(root) = workspace_root {
            builder = workspace_file::add_to_builder(builder, root)?;
        }
        if let Some(path) = explicit {
            builder = explicit_file::add_to_builder(builder, path)?;
        }
        builder = environment::add_to_builder(builder);

        let config: FstreeConfig = builder.build()?.try_deserialize()?;
        debug!(?config, "Loaded configuration");
        Ok(config)
    }

    /// Read a single TOML file without layering.
    pub fn load_from_file(path: &Path) -> Result<FstreeConfig, ApiError> {
        let text = fs::read_to_string(path).map_err(|e| {
            ApiError::ConfigError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        toml::from_str(&text).map_err(|e| {
            ApiError::ConfigError(format!("Failed to parse {}: {}", path.display(), e))
        })
    }
}
