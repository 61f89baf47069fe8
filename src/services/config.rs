use crate::error::ConfigError;
use crate::models::config::AppConfig;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable overriding `ocr.server_url`
pub const OCR_URL_ENV: &str = "MEDSCAN_OCR_URL";
/// Environment variable overriding `logging.level`
pub const LOG_LEVEL_ENV: &str = "MEDSCAN_LOG_LEVEL";

/// Configuration manager for app settings
pub struct ConfigManager {
    config_dir: PathBuf,
    config_path: PathBuf,
}

impl ConfigManager {
    /// Manager for the platform config file (`<config dir>/medscan/config.json`)
    pub fn new() -> Result<Self, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NoConfigDir)?
            .join("medscan");

        Ok(Self {
            config_path: config_dir.join("config.json"),
            config_dir,
        })
    }

    /// Manager for an explicit config file path
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        let config_path = path.into();
        let config_dir = config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        Self {
            config_dir,
            config_path,
        }
    }

    /// Save configuration to disk
    pub fn save(&self, config: &AppConfig) -> Result<(), ConfigError> {
        fs::create_dir_all(&self.config_dir).map_err(ConfigError::CreateDir)?;

        // Pretty print for human editing
        let json = serde_json::to_string_pretty(config).map_err(ConfigError::Serialize)?;
        fs::write(&self.config_path, json).map_err(ConfigError::Write)?;

        debug!(path = %self.config_path.display(), "saved config");
        Ok(())
    }

    /// Load configuration from disk
    ///
    /// If config file doesn't exist, returns default configuration
    pub fn load(&self) -> Result<AppConfig, ConfigError> {
        if !self.config_exists() {
            return Ok(AppConfig::default());
        }

        let content = fs::read_to_string(&self.config_path).map_err(ConfigError::Read)?;
        let config: AppConfig = serde_json::from_str(&content).map_err(ConfigError::Parse)?;

        Ok(config)
    }

    /// Load, then apply environment overrides
    pub fn load_with_env(&self) -> Result<AppConfig, ConfigError> {
        let mut config = self.load()?;
        apply_env_overrides(&mut config, |key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn config_file_path(&self) -> &PathBuf {
        &self.config_path
    }

    pub fn config_exists(&self) -> bool {
        self.config_path.exists()
    }
}

/// Apply overrides from an environment lookup; blank values are ignored
pub fn apply_env_overrides(config: &mut AppConfig, env: impl Fn(&str) -> Option<String>) {
    let var = |key: &str| env(key).filter(|value| !value.trim().is_empty());

    if let Some(url) = var(OCR_URL_ENV) {
        config.ocr.server_url = url;
    }
    if let Some(level) = var(LOG_LEVEL_ENV) {
        config.logging.level = level;
    }
}
