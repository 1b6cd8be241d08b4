//! Persistent editor settings.

use std::path::{Path, PathBuf};

use scribble_core::util::normalize_text_option;
use scribble_core::EditorSettings;

use crate::error::CliError;

const CONFIG_FILE_NAME: &str = "settings.json";
const CONFIG_ENV_VAR: &str = "SCRIBBLE_CONFIG";

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("scribble").join(CONFIG_FILE_NAME))
}

/// Resolve the settings file: explicit flag, then `SCRIBBLE_CONFIG`, then the
/// platform config directory.
pub fn resolve_config_path(explicit: Option<&Path>) -> Result<PathBuf, CliError> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    if let Some(path) = normalize_text_option(std::env::var(CONFIG_ENV_VAR).ok()) {
        return Ok(PathBuf::from(path));
    }
    default_config_path()
        .ok_or_else(|| CliError::Config("Failed to resolve config directory".to_string()))
}

pub fn load_settings(path: &Path) -> Result<EditorSettings, CliError> {
    if !path.exists() {
        return Ok(EditorSettings::default());
    }

    let raw = std::fs::read_to_string(path).map_err(|error| {
        CliError::Config(format!(
            "Failed to read settings at {}: {error}",
            path.display()
        ))
    })?;
    let mut settings = serde_json::from_str::<EditorSettings>(&raw).map_err(|error| {
        CliError::Config(format!(
            "Failed to parse settings at {}: {error}",
            path.display()
        ))
    })?;
    settings.normalize();
    Ok(settings)
}

pub fn save_settings(settings: &EditorSettings, path: &Path) -> Result<(), CliError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|error| {
            CliError::Config(format!(
                "Failed to create config directory {}: {error}",
                parent.display()
            ))
        })?;
    }

    let mut normalized = settings.clone();
    normalized.normalize();
    let serialized = serde_json::to_string_pretty(&normalized)?;
    std::fs::write(path, serialized).map_err(|error| {
        CliError::Config(format!(
            "Failed to write settings at {}: {error}",
            path.display()
        ))
    })
}
