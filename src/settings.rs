//! Site-wide plugin settings.
//!
//! Settings live in a JSON object, typically a section of the site
//! configuration:
//!
//! ```json
//! { "style": "nature", "layout": "per-category", "base_dir": "content" }
//! ```
//!
//! Every field is optional.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sources::SourceLayout;
use crate::style::CitationStyle;

/// Errors that can occur when loading settings.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid settings: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// How the plugin reads and formats publications.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PluginSettings {
    pub style: CitationStyle,
    pub layout: SourceLayout,
    /// Relative source paths are resolved against this directory.
    pub base_dir: Option<PathBuf>,
}

/// Loads settings from a JSON file.
pub fn load_settings(path: &Path) -> Result<PluginSettings, SettingsError> {
    let content = fs::read_to_string(path)?;
    parse_settings(&content)
}

/// Parses settings from JSON text. Blank text yields the defaults.
pub fn parse_settings(content: &str) -> Result<PluginSettings, SettingsError> {
    if content.trim().is_empty() {
        return Ok(PluginSettings::default());
    }
    Ok(serde_json::from_str(content)?)
}
