//! Global config file source: $XDG_CONFIG_HOME/fstree/config.toml (or the platform equivalent)

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::File;
use config::FileFormat;
use directories::BaseDirs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Path to global config file.
pub fn global_config_path() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.config_dir().join("fstree").join("config.toml"))
}

/// Add the global config file to the builder if it exists.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    path: Option<&Path>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    match path {
        Some(path) if path.is_file() => {
            debug!(config_path = %path.display(), "Using global config file");
            Ok(builder.add_source(
                File::new(&path.to_string_lossy(), FileFormat::Toml).required(false),
            ))
        }
        _ => Ok(builder),
    }
}
