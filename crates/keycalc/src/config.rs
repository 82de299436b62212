//! Calculator configuration
//!
//! Loaded from YAML; every field has a default so a partial file is valid.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::Session;

/// Environment variable naming a configuration file
pub const CONFIG_ENV: &str = "KEYCALC_CONFIG";

/// Visual variant of the keypad
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Flat keypad, no key flash
    #[default]
    Plain,
    /// Pressed keys flash briefly
    Glow,
}

impl Theme {
    /// Returns true if pressed keys should flash
    #[must_use]
    pub const fn flashes(self) -> bool {
        matches!(self, Self::Glow)
    }
}

/// Errors raised while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file could not be read
    #[error("cannot read {path}: {source}")]
    Read {
        /// File that failed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is not valid YAML for this schema
    #[error("cannot parse {path}: {source}")]
    Parse {
        /// File that failed
        path: PathBuf,
        /// Underlying YAML error
        #[source]
        source: serde_yaml_ng::Error,
    },

    /// A value is out of range
    #[error("invalid {field}: {message}")]
    Invalid {
        /// Offending field
        field: &'static str,
        /// What is wrong with it
        message: String,
    },
}

impl ConfigError {
    /// Create an invalid-value error
    #[must_use]
    pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            message: message.into(),
        }
    }
}

/// Calculator configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CalcConfig {
    /// Keypad theme
    pub theme: Theme,
    /// Frames a pressed key stays lit under the glow theme
    pub flash_frames: u8,
    /// Maximum transcript length kept by a session
    pub transcript_capacity: usize,
    /// Log file for the terminal front end (stdout belongs to the UI)
    pub log_file: Option<PathBuf>,
}

impl Default for CalcConfig {
    fn default() -> Self {
        Self {
            theme: Theme::Plain,
            flash_frames: 3,
            transcript_capacity: Session::DEFAULT_CAPACITY,
            log_file: None,
        }
    }
}

impl CalcConfig {
    /// Upper bound for `flash_frames`
    pub const MAX_FLASH_FRAMES: u8 = 30;

    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set theme
    #[must_use]
    pub const fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Set flash duration in frames
    #[must_use]
    pub const fn with_flash_frames(mut self, frames: u8) -> Self {
        self.flash_frames = frames;
        self
    }

    /// Set transcript capacity
    #[must_use]
    pub const fn with_transcript_capacity(mut self, capacity: usize) -> Self {
        self.transcript_capacity = capacity;
        self
    }

    /// Set log file
    #[must_use]
    pub fn with_log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = Some(path.into());
        self
    }

    /// Parses configuration from YAML text
    pub fn from_yaml(text: &str, origin: &Path) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml_ng::from_str(text).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reads configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml(&text, path)?;
        tracing::debug!(path = %path.display(), ?config, "loaded configuration");
        Ok(config)
    }

    /// Loads from an explicit path, else `$KEYCALC_CONFIG`, else defaults
    pub fn discover(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match std::env::var_os(CONFIG_ENV) {
            Some(path) if !path.is_empty() => Self::load(Path::new(&path)),
            _ => Ok(Self::default()),
        }
    }

    /// Checks value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.flash_frames > Self::MAX_FLASH_FRAMES {
            return Err(ConfigError::invalid(
                "flash_frames",
                format!(
                    "{} exceeds maximum of {}",
                    self.flash_frames,
                    Self::MAX_FLASH_FRAMES
                ),
            ));
        }
        Ok(())
    }

    /// Renders the configuration as YAML
    pub fn to_yaml(&self) -> Result<String, serde_yaml_ng::Error> {
        serde_yaml_ng::to_string(self)
    }
}
