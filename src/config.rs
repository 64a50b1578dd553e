//! Application configuration
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables (MELETE_*)
//! 3. Config file (~/.config/melete/config.toml)
//! 4. Default values

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(String),
}

/// Study tool endpoint configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StudyToolsConfig {
    /// Base URL the flashcard/quiz/study-buddy endpoints are served from
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for StudyToolsConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            timeout_secs: 30,
        }
    }
}

impl StudyToolsConfig {
    /// Request timeout as a [`Duration`]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// Data directory override; the platform default is used when unset
    pub data_dir: Option<PathBuf>,

    /// Identity the study plan is stored under
    pub user_id: String,

    /// Study tool endpoint configuration
    pub study_tools: StudyToolsConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            user_id: "localUser123".to_string(),
            study_tools: StudyToolsConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default config file location
    ///
    /// Returns default config if file doesn't exist
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::default_config_path();

        if let Some(path) = config_path {
            if path.exists() {
                return Self::load_from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &PathBuf) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Get the default config file path
    ///
    /// Returns `~/.config/melete/config.toml` on Unix
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("melete").join("config.toml"))
    }

    /// Apply environment variable overrides
    ///
    /// Supported variables:
    /// - MELETE_DATA_DIR: where study plans are stored
    /// - MELETE_USER_ID: identity the plan is stored under
    /// - MELETE_STUDY_TOOLS_URL: base URL of the study tool endpoints
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(dir) = std::env::var("MELETE_DATA_DIR") {
            self.data_dir = Some(PathBuf::from(dir));
        }

        if let Ok(user_id) = std::env::var("MELETE_USER_ID") {
            self.user_id = user_id;
        }

        if let Ok(url) = std::env::var("MELETE_STUDY_TOOLS_URL") {
            self.study_tools.base_url = url;
        }

        self
    }

    /// Apply CLI flag overrides
    pub fn with_cli_overrides(
        mut self,
        data_dir: Option<PathBuf>,
        user_id: Option<String>,
    ) -> Self {
        if let Some(dir) = data_dir {
            self.data_dir = Some(dir);
        }

        if let Some(user_id) = user_id {
            self.user_id = user_id;
        }

        self
    }

    /// Load configuration with all overrides applied
    ///
    /// Priority: CLI > env > config file > defaults
    pub fn load_with_overrides(
        data_dir: Option<PathBuf>,
        user_id: Option<String>,
    ) -> Result<Self, ConfigError> {
        Ok(Self::load()?
            .with_env_overrides()
            .with_cli_overrides(data_dir, user_id))
    }
}
