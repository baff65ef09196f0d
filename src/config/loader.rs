//! Configuration loading with defaults

use std::path::Path;

use crate::errors::Result;
use crate::fs::{get_config_path, read_json, write_json};
use crate::schemas::Config;

/// Load configuration from the workspace, falling back to defaults.
///
/// If config.json exists it is read and merged with defaults (every field has
/// a serde default); if it doesn't, the default configuration is returned.
pub fn load_config(root: &Path) -> Result<Config> {
    let path = get_config_path(root);
    if !path.exists() {
        return Ok(Config::default());
    }
    read_json(&path)
}

/// Write configuration back to the workspace.
///
/// Used when a new custom license type is registered.
pub fn save_config(root: &Path, config: &Config) -> Result<()> {
    write_json(&get_config_path(root), config)
}
