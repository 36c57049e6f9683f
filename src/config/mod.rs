//! Configuration module
//!
//! Handles loading and saving rtps-guid configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::generator::{PrefixGenerator, DEFAULT_VENDOR_ID};
use crate::guid::{GuidError, GuidPrefix};

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    #[error("Invalid participant prefix: {0}")]
    InvalidPrefix(#[from] GuidError),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Participant identity settings
    #[serde(default)]
    pub participant: ParticipantConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Participant identity configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticipantConfig {
    /// Vendor id written into generated prefixes
    #[serde(default = "default_vendor_id")]
    pub vendor_id: u16,
    /// Fixed participant prefix as hex (generated if not set)
    pub prefix: Option<String>,
    /// Host id override (derived from the host name if not set)
    pub host_id: Option<u32>,
}

fn default_vendor_id() -> u16 {
    DEFAULT_VENDOR_ID
}

impl Default for ParticipantConfig {
    fn default() -> Self {
        Self {
            vendor_id: default_vendor_id(),
            prefix: None,
            host_id: None,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable verbose logging
    #[serde(default)]
    pub verbose: bool,
    /// Filter directive for tracing (e.g. "rtps_guid=debug")
    pub filter: Option<String>,
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the default location
    pub fn load_default() -> ConfigResult<Self> {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("rtps-guid/config.toml")),
            Some(PathBuf::from("./rtps-guid.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                tracing::debug!("Loading configuration from {}", path.display());
                return Self::load(path);
            }
        }

        // Return default config if no file found
        Ok(Self::default())
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        let contents = toml::to_string_pretty(self)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Check values that serde cannot
    pub fn validate(&self) -> ConfigResult<()> {
        self.fixed_prefix()?;
        Ok(())
    }

    /// The configured fixed prefix, if any
    pub fn fixed_prefix(&self) -> ConfigResult<Option<GuidPrefix>> {
        match &self.participant.prefix {
            Some(text) => Ok(Some(text.parse()?)),
            None => Ok(None),
        }
    }

    /// Build a prefix generator from the participant settings
    pub fn prefix_generator(&self) -> PrefixGenerator {
        match self.participant.host_id {
            Some(host_id) => PrefixGenerator::with_host_id(self.participant.vendor_id, host_id),
            None => PrefixGenerator::new(self.participant.vendor_id),
        }
    }

    /// The participant prefix: the fixed one if configured, otherwise generated
    pub fn participant_prefix(&self) -> ConfigResult<GuidPrefix> {
        match self.fixed_prefix()? {
            Some(prefix) => Ok(prefix),
            None => Ok(self.prefix_generator().next_prefix()),
        }
    }
}

/// Generate a sample configuration file
pub fn generate_sample_config() -> ConfigResult<String> {
    let config = Config {
        participant: ParticipantConfig {
            vendor_id: DEFAULT_VENDOR_ID,
            prefix: Some("01ff0000.00000001.00000000".to_string()),
            host_id: None,
        },
        logging: LoggingConfig {
            verbose: false,
            filter: Some("rtps_guid=info".to_string()),
        },
    };

    Ok(toml::to_string_pretty(&config)?)
}
