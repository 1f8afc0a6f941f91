use super::types::{ConfigError, ForgeConfig};
use crate::utils::persistence::app_dir;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = "forge.json";

/// ~/.legendsim/forge.json, if the home directory is known.
pub fn default_config_path() -> Option<PathBuf> {
    app_dir().ok().map(|dir| dir.join(CONFIG_FILENAME))
}

/// Read and validate a forge table from a JSON file. Missing fields take
/// their default values.
pub fn load_config_file(path: &Path) -> Result<ForgeConfig, ConfigError> {
    let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config: ForgeConfig = serde_json::from_str(&json).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    config.validate()?;
    Ok(config)
}

/// Resolve the forge table: an explicit path must load, otherwise the file in
/// the app directory is used when present, otherwise the built-in table.
pub fn load_config(explicit: Option<&Path>) -> Result<ForgeConfig, ConfigError> {
    if let Some(path) = explicit {
        return load_config_file(path);
    }
    match default_config_path() {
        Some(path) if path.exists() => {
            tracing::debug!(path = %path.display(), "loading forge config");
            load_config_file(&path)
        }
        _ => Ok(ForgeConfig::default()),
    }
}
