//! Configuration management for Sahayak
//!
//! Provides TOML-based configuration with defaults and validation.
//! Location: ~/.sahayak/config.toml
//!
//! The API key is deliberately not part of the file; it is resolved from
//! the environment at startup (see `ApiKey::from_env`).

use crate::errors::{Result, TriageError};
use crate::models::{ModelTier, DEFAULT_API_BASE};
use crate::prompt::TierVocabulary;
use crate::report::{RenderOptions, Theme};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Complete configuration for Sahayak
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub models: ModelsConfig,
    pub server: ServerConfig,
    pub report: ReportConfig,
}

/// Model tiers and upstream connection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelsConfig {
    pub api_base: String,
    pub timeout_secs: u64,
    pub vocabulary: TierVocabulary,
    pub primary: ModelTier,
    pub secondary: ModelTier,
}

/// HTTP server binding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_upload_mb: usize,
}

/// Presentation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub title: String,
    pub theme: Theme,
    pub emergency_number: String,
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            timeout_secs: 120,
            vocabulary: TierVocabulary::default(),
            primary: ModelTier::new("gemini-2.5-pro", "Gemini 2.5 Pro (High Intel)"),
            secondary: ModelTier::new("gemini-2.5-flash", "Gemini 2.5 Flash (Backup)"),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8501,
            max_upload_mb: 20,
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: "Swasthya Sahayak: Elite Triage".to_string(),
            theme: Theme::default(),
            emergency_number: "108".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from file or use defaults
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        if let Some(config_path) = path {
            Self::load_from_file(&config_path)
        } else {
            Self::load_default()
        }
    }

    /// Load configuration from specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            TriageError::ConfigError(format!("Failed to read config {}: {}", path.display(), e))
        })?;

        Self::from_toml(&contents)
    }

    /// Parse and validate TOML text
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)
            .map_err(|e| TriageError::ConfigError(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Load default configuration from standard location or use built-in defaults
    pub fn load_default() -> Result<Self> {
        if let Some(config_path) = Self::default_path() {
            if config_path.exists() {
                return Self::load_from_file(&config_path);
            }
        }

        Ok(Config::default())
    }

    /// Standard config file location
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".sahayak").join("config.toml"))
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        let tiers = [
            ("primary", &self.models.primary),
            ("secondary", &self.models.secondary),
        ];
        for (name, tier) in tiers {
            if tier.id.trim().is_empty() {
                return Err(TriageError::ConfigError(format!(
                    "models.{}.id must not be empty",
                    name
                )));
            }
            if tier.id.contains('/') || tier.id.contains(char::is_whitespace) {
                return Err(TriageError::ConfigError(format!(
                    "models.{}.id '{}' is not a bare model identifier",
                    name, tier.id
                )));
            }
            if tier.label.trim().is_empty() {
                return Err(TriageError::ConfigError(format!(
                    "models.{}.label must not be empty",
                    name
                )));
            }
        }

        let base = &self.models.api_base;
        if !base.starts_with("http://") && !base.starts_with("https://") {
            return Err(TriageError::ConfigError(format!(
                "models.api_base must be an http(s) URL, got '{}'",
                base
            )));
        }

        if self.models.timeout_secs == 0 {
            return Err(TriageError::ConfigError(
                "models.timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.server.max_upload_mb == 0 {
            return Err(TriageError::ConfigError(
                "server.max_upload_mb must be greater than 0".to_string(),
            ));
        }

        let number = &self.report.emergency_number;
        if number.is_empty() || !number.chars().all(|c| c.is_ascii_digit() || c == '+') {
            return Err(TriageError::ConfigError(format!(
                "report.emergency_number must contain only digits, got '{}'",
                number
            )));
        }

        Ok(())
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| TriageError::ConfigError(format!("Failed to serialize config: {}", e)))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| TriageError::ConfigError(format!("Failed to create config dir: {}", e)))?;
        }

        std::fs::write(path, contents)
            .map_err(|e| TriageError::ConfigError(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    /// Socket address the server binds to
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| TriageError::ConfigError(format!("Invalid server address: {}", e)))
    }

    /// Upstream request timeout
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.models.timeout_secs)
    }

    /// Upload limit in bytes
    pub fn max_upload_bytes(&self) -> usize {
        self.server.max_upload_mb * 1024 * 1024
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            emergency_number: self.report.emergency_number.clone(),
        }
    }
}
