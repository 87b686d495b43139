use std::path::{Path, PathBuf};

use crate::app_dirs::{self, AppDirError};

use super::types::{ConfigError, LabelerSettings};

/// File name of the labeler settings inside the app directory.
pub const CONFIG_FILE_NAME: &str = "labeler.toml";

/// Resolve `labeler.toml` in the app directory, creating the directory if needed.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    app_dirs::app_file(CONFIG_FILE_NAME).map_err(map_app_dir_error)
}

/// Load settings from the app directory, falling back to defaults when absent.
pub fn load_or_default() -> Result<LabelerSettings, ConfigError> {
    load_from(&config_path()?)
}

/// Load settings from `path`; a missing file yields defaults.
pub fn load_from(path: &Path) -> Result<LabelerSettings, ConfigError> {
    if !path.exists() {
        return Ok(LabelerSettings::default());
    }
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str::<LabelerSettings>(&text)
        .map(LabelerSettings::normalized)
        .map_err(|source| ConfigError::ParseToml {
            path: path.to_path_buf(),
            source,
        })
}

/// Write settings to `path`, creating parent directories as needed.
pub fn save_to_path(settings: &LabelerSettings, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| ConfigError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let text = toml::to_string_pretty(settings).map_err(|source| ConfigError::SerializeToml {
        path: path.to_path_buf(),
        source,
    })?;
    std::fs::write(path, text).map_err(|source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    })
}

fn map_app_dir_error(error: AppDirError) -> ConfigError {
    match error {
        AppDirError::NoBaseDir => ConfigError::NoConfigDir,
        AppDirError::CreateDir { path, source } => ConfigError::CreateDir { path, source },
    }
}
