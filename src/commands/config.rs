use crate::error::{AppError, ConfigError};
use crate::models::config::AppConfig;
use crate::services::config::ConfigManager;
use std::path::PathBuf;

/// Config manager for `--config <PATH>` or the platform default
pub fn init_config_manager(path: Option<PathBuf>) -> Result<ConfigManager, ConfigError> {
    match path {
        Some(path) => Ok(ConfigManager::with_path(path)),
        None => ConfigManager::new(),
    }
}

/// Effective configuration as pretty JSON
pub fn show_config(config: &AppConfig) -> Result<String, AppError> {
    Ok(serde_json::to_string_pretty(config)?)
}

pub fn get_config_path(manager: &ConfigManager) -> String {
    manager.config_file_path().display().to_string()
}

/// Write a default config file unless one exists and `force` is unset
pub fn init_config(manager: &ConfigManager, force: bool) -> Result<String, AppError> {
    let path = get_config_path(manager);

    if manager.config_exists() && !force {
        return Ok(format!("Config already exists at {}", path));
    }

    manager.save(&AppConfig::default())?;
    Ok(format!("Wrote default config to {}", path))
}
