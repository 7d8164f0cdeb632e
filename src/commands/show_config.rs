use anyhow::{Context, Result};
use std::path::Path;

use crate::config::{ConfigStore, HelperConfig};

/// Print the stored configuration, or a hint when nothing is configured
///
/// # Errors
/// Returns an error if the configuration file exists but cannot be read
pub fn show_config() -> Result<()> {
    let store = ConfigStore::new()?;
    let config = store.load().context("failed to load configuration")?;
    print!("{}", describe(&config, &store.config_path()));
    Ok(())
}

#[must_use]
pub fn describe(config: &HelperConfig, path: &Path) -> String {
    if !config.is_configured() {
        return "No configuration found. Please run 'git-helper config' to set up your configuration.\n"
            .to_string();
    }

    format!(
        "Current Configuration:\n  Two-letter Abbreviation: {}\n  Config file: {}\n",
        config.abbreviation,
        path.display()
    )
}
