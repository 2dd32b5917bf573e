//! Configuration file loader.

use std::path::{Path, PathBuf};

use super::types::NotifierConfig;

/// File name looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Template written when no configuration file exists yet.
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# poe-trade-notifier configuration

[Telegram]
BotToken = "YOUR_BOT_TOKEN"
ChatID = "YOUR_CHAT_ID"

# Install directories. Leave empty to search automatically.
# Keep the single quotes so Windows backslashes are read as-is, e.g.
# CustomPath = 'C:\Program Files (x86)\Grinding Gear Games\Path of Exile'
[PathOfExile]
CustomPath = ''

[PathOfExile2]
CustomPath = ''

[API]
ETM_URL = ""
ETM_TOKEN = ""

[Settings]
# Seconds between reads when the log has not grown.
PollInterval = 1
"#;

/// Configuration loader that searches multiple locations.
#[derive(Debug)]
pub struct ConfigLoader {
    /// Search paths in order of priority.
    search_paths: Vec<PathBuf>,
}

impl ConfigLoader {
    /// Create a new config loader with default search paths.
    #[must_use]
    pub fn new() -> Self {
        let mut search_paths = Vec::new();

        // 1. Current directory: config.toml
        search_paths.push(PathBuf::from(CONFIG_FILE_NAME));

        // 2. User config directory: ~/.config/poe-trade-notifier/config.toml
        if let Some(config_dir) = dirs::config_dir() {
            search_paths.push(config_dir.join("poe-trade-notifier").join(CONFIG_FILE_NAME));
        }

        Self { search_paths }
    }

    /// Create a config loader with a specific config file path.
    #[must_use]
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            search_paths: vec![path],
        }
    }

    /// Load configuration from the first available file.
    ///
    /// When no file exists, a commented template is written to the first
    /// search path and the defaults are returned. Failing to write the
    /// template is logged but not fatal.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be read or parsed.
    pub fn load(&self) -> Result<NotifierConfig, ConfigError> {
        if let Some(path) = self.find_config_file() {
            tracing::debug!(path = %path.display(), "Loading config file");
            return Self::load_from_path(&path);
        }

        if let Some(path) = self.search_paths.first() {
            match write_default_template(path) {
                Ok(()) => tracing::info!(
                    path = %path.display(),
                    "No config file found, wrote default template"
                ),
                Err(e) => tracing::warn!(error = %e, "Could not write default config"),
            }
        }

        Ok(NotifierConfig::default())
    }

    /// Load configuration from a specific path.
    fn load_from_path(path: &Path) -> Result<NotifierConfig, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the search paths for debugging.
    #[must_use]
    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }

    /// Find the first config file that exists.
    #[must_use]
    pub fn find_config_file(&self) -> Option<PathBuf> {
        self.search_paths.iter().find(|p| p.is_file()).cloned()
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Write [`DEFAULT_CONFIG_TEMPLATE`] to `path`, creating parent directories.
///
/// # Errors
///
/// Returns `ConfigError::WriteError` if the directory or file cannot be created.
pub fn write_default_template(path: &Path) -> Result<(), ConfigError> {
    let write = || -> std::io::Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, DEFAULT_CONFIG_TEMPLATE)
    };

    write().map_err(|e| ConfigError::WriteError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Errors that can occur during configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Failed to write config file {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
}
