//! Persistent user configuration.
//!
//! A single TOML record lives at `~/.git-helper-cli/config.toml`:
//!
//! ```toml
//! abbreviation = "DS"
//! ```
//!
//! - A missing or blank file means "not configured yet" and loads as the default
//! - Unknown keys are ignored so newer files stay readable
//! - `GIT_HELPER_CONFIG_DIR` points the store at another directory

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::HelperError;
use crate::naming::validate_abbreviation;

/// Environment variable overriding the configuration directory
pub const CONFIG_DIR_ENV: &str = "GIT_HELPER_CONFIG_DIR";

const CONFIG_DIR_NAME: &str = ".git-helper-cli";
const CONFIG_FILE_NAME: &str = "config.toml";

/// The user's stored settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelperConfig {
    /// Two-letter prefix for branch names; empty until configured
    #[serde(default)]
    pub abbreviation: String,
}

impl HelperConfig {
    #[must_use]
    pub fn new(abbreviation: impl Into<String>) -> Self {
        Self {
            abbreviation: abbreviation.into(),
        }
    }

    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.abbreviation.is_empty()
    }

    /// Returns the abbreviation, or [`HelperError::ConfigurationMissing`].
    ///
    /// # Errors
    /// Fails when no abbreviation has been stored, or with
    /// [`HelperError::Format`] when the stored value is not two letters.
    pub fn require_abbreviation(&self) -> Result<&str, HelperError> {
        if !self.is_configured() {
            return Err(HelperError::ConfigurationMissing);
        }
        validate_abbreviation(&self.abbreviation)?;
        Ok(&self.abbreviation)
    }
}

/// Reads and writes [`HelperConfig`] at a fixed per-user location.
pub struct ConfigStore {
    dir: PathBuf,
}

impl ConfigStore {
    /// Creates a store rooted at `$GIT_HELPER_CONFIG_DIR` or `~/.git-helper-cli`.
    ///
    /// The directory is not created until the first save.
    ///
    /// # Errors
    /// Returns an error if the home directory cannot be determined
    pub fn new() -> Result<Self> {
        let dir = if let Ok(custom_dir) = std::env::var(CONFIG_DIR_ENV) {
            PathBuf::from(custom_dir)
        } else {
            dirs::home_dir()
                .context("Failed to get user home directory")?
                .join(CONFIG_DIR_NAME)
        };

        Ok(Self { dir })
    }

    /// Creates a store rooted at an explicit directory.
    #[must_use]
    pub fn at(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn config_path(&self) -> PathBuf {
        self.dir.join(CONFIG_FILE_NAME)
    }

    /// Loads the stored configuration.
    ///
    /// # Errors
    /// Returns [`HelperError::Io`] if the file exists but cannot be read, or
    /// [`HelperError::ConfigParse`] if it is not valid TOML, or
    /// [`HelperError::Format`] if the stored abbreviation is not two letters.
    /// A missing or blank file is not an error.
    pub fn load(&self) -> Result<HelperConfig, HelperError> {
        let path = self.config_path();

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no configuration file yet");
                return Ok(HelperConfig::default());
            }
            Err(source) => return Err(HelperError::Io { path, source }),
        };

        if content.trim().is_empty() {
            return Ok(HelperConfig::default());
        }

        let config = toml::from_str::<HelperConfig>(&content)
            .map_err(|source| HelperError::ConfigParse {
                path: path.clone(),
                source,
            })?;

        // Hand-edited files can bypass the check done by `config`
        if config.is_configured() {
            validate_abbreviation(&config.abbreviation).map_err(|e| {
                HelperError::format(format!("{e} (in {})", path.display()))
            })?;
        }
        debug!(path = %path.display(), configured = config.is_configured(), "loaded configuration");
        Ok(config)
    }

    /// Writes the configuration, replacing any existing record.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The configuration directory cannot be created
    /// - The record cannot be serialized or written
    pub fn save(&self, config: &HelperConfig) -> Result<()> {
        std::fs::create_dir_all(&self.dir).map_err(|source| HelperError::Io {
            path: self.dir.clone(),
            source,
        })?;

        let path = self.config_path();
        let content =
            toml::to_string_pretty(config).context("Failed to serialize configuration")?;

        // Write atomically: write to temp then rename
        let tmp_path = path.with_extension("toml.tmp");
        write_file(&tmp_path, &content)?;
        std::fs::rename(&tmp_path, &path).map_err(|source| HelperError::Io {
            path: path.clone(),
            source,
        })?;

        info!(path = %path.display(), "saved configuration");
        Ok(())
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

fn write_file(path: &Path, content: &str) -> Result<(), HelperError> {
    std::fs::write(path, content).map_err(|source| HelperError::Io {
        path: path.to_path_buf(),
        source,
    })
}
