//! Application configuration.
//!
//! Handles loading, validating, and merging the TOML config file. Stock
//! defaults are the base layer; the user's file only needs the keys it wants
//! to change. Relative paths are resolved against the working directory.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! fonts_dir = "static/fonts"         # Catalog of .ttf/.otf fonts
//! output_dir = "static/signatures"   # Generated galleries, one subdirectory each
//!
//! [contact]
//! recipients = ["owner@example.com"] # Who receives contact notifications
//! sender = "noreply@example.com"     # From address on notifications
//! subject = "New Contact Form Submission"
//! outbox_dir = "outbox"              # Where notifications are delivered
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::contact::looks_like_email;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Application configuration loaded from the config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Directory holding the font catalog.
    pub fonts_dir: PathBuf,
    /// Directory receiving one subdirectory per generated gallery.
    pub output_dir: PathBuf,
    /// Contact form notification settings.
    pub contact: ContactConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            fonts_dir: PathBuf::from("static/fonts"),
            output_dir: PathBuf::from("static/signatures"),
            contact: ContactConfig::default(),
        }
    }
}

/// Contact form notification settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContactConfig {
    pub recipients: Vec<String>,
    pub sender: String,
    pub subject: String,
    /// Notifications are written here as `.eml` files.
    pub outbox_dir: PathBuf,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            recipients: vec!["owner@example.com".to_string()],
            sender: "noreply@example.com".to_string(),
            subject: "New Contact Form Submission".to_string(),
            outbox_dir: PathBuf::from("outbox"),
        }
    }
}

impl AppConfig {
    /// Validate config values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fonts_dir.as_os_str().is_empty() {
            return Err(ConfigError::Validation("fonts_dir must not be empty".into()));
        }
        if self.output_dir.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "output_dir must not be empty".into(),
            ));
        }
        if self.contact.outbox_dir.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "contact.outbox_dir must not be empty".into(),
            ));
        }
        if self.contact.recipients.is_empty() {
            return Err(ConfigError::Validation(
                "contact.recipients must not be empty".into(),
            ));
        }
        if let Some(bad) = self
            .contact
            .recipients
            .iter()
            .find(|r| !looks_like_email(r))
        {
            return Err(ConfigError::Validation(format!(
                "contact.recipients: '{bad}' is not an email address"
            )));
        }
        if !looks_like_email(&self.contact.sender) {
            return Err(ConfigError::Validation(format!(
                "contact.sender: '{}' is not an email address",
                self.contact.sender
            )));
        }
        Ok(())
    }

    /// Create the output and outbox directories. Safe to call repeatedly.
    pub fn ensure_directories(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.output_dir)?;
        fs::create_dir_all(&self.contact.outbox_dir)
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(AppConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a config file as a raw TOML value. `Ok(None)` if it does not exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<AppConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: AppConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `path`, falling back to stock defaults for absent keys
/// (or for everything when the file is missing).
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    resolve_config(stock_defaults_value(), load_raw_config(path)?)
}

/// Returns a fully-commented stock config file.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# signature-gal configuration
# ===========================
# All settings are optional. Values shown below are the defaults.
# Unknown keys will cause an error.

# Directory scanned for .ttf / .otf fonts (not recursive).
fonts_dir = "static/fonts"

# Each generated gallery gets its own subdirectory here.
output_dir = "static/signatures"

# ---------------------------------------------------------------------------
# Contact form
# ---------------------------------------------------------------------------
[contact]
# Addresses notified of each accepted submission.
recipients = ["owner@example.com"]

# From address on notifications.
sender = "noreply@example.com"

subject = "New Contact Form Submission"

# Accepted submissions are written here as .eml files.
outbox_dir = "outbox"
"##
}
