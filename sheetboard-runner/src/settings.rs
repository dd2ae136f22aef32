//! Board settings — which sheet, which tabs, how much starting capital.
//!
//! Stored as a TOML file:
//!
//! ```toml
//! sheet_id = "1AbCdEf"
//! tabs = ["Alice", "Bob"]
//! initial_capital = 10000.0   # optional, defaults to 10000
//! api_key = "..."             # optional, never logged or exported
//! source_dir = "exports"      # optional, for the directory source
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use sheetboard_core::DEFAULT_INITIAL_CAPITAL;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("cannot read settings file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("settings list no tabs")]
    NoTabs,
}

#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardSettings {
    pub sheet_id: String,
    pub tabs: Vec<String>,
    #[serde(default = "default_initial_capital")]
    pub initial_capital: f64,
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub source_dir: Option<PathBuf>,
}

fn default_initial_capital() -> f64 {
    DEFAULT_INITIAL_CAPITAL
}

// Hand-written so the credential never reaches logs.
impl std::fmt::Debug for BoardSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoardSettings")
            .field("sheet_id", &self.sheet_id)
            .field("tabs", &self.tabs)
            .field("initial_capital", &self.initial_capital)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("source_dir", &self.source_dir)
            .finish()
    }
}

impl BoardSettings {
    /// Load settings from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse settings from a TOML string.
    ///
    /// Blank tab names are dropped; an empty tab list is an error.
    pub fn from_toml(content: &str) -> Result<Self, SettingsError> {
        let mut settings: Self = toml::from_str(content)?;
        settings.tabs.retain(|t| !t.trim().is_empty());
        if settings.tabs.is_empty() {
            return Err(SettingsError::NoTabs);
        }
        Ok(settings)
    }
}
