use anyhow::{Context, Result};

use crate::config::{ConfigStore, HelperConfig};
use crate::naming::validate_abbreviation;
use crate::prompt::{InquirePrompter, Prompter};

/// Set or update the two-letter abbreviation
///
/// # Errors
/// Returns an error if the abbreviation is invalid, the prompt fails, or the
/// configuration cannot be written
pub fn configure(abbreviation: Option<&str>) -> Result<()> {
    let store = ConfigStore::new()?;
    configure_with(&store, &InquirePrompter, abbreviation)?;
    Ok(())
}

/// Validates the given abbreviation, or prompts for one, and saves it.
///
/// # Errors
/// Returns an error if the abbreviation is invalid, the prompt fails, or the
/// configuration cannot be written
pub fn configure_with(
    store: &ConfigStore,
    prompter: &dyn Prompter,
    abbreviation: Option<&str>,
) -> Result<HelperConfig> {
    let abbreviation = match abbreviation {
        Some(raw) => validate_abbreviation(raw)?,
        None => prompter.text("Enter your two-letter abbreviation:", validate_abbreviation)?,
    };

    let config = HelperConfig::new(abbreviation);
    store.save(&config).context("failed to save config")?;

    println!("Configuration saved successfully!");
    Ok(config)
}
