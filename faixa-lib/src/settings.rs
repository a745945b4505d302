//! Shared settings file (input locations, sheet rules, synonym table).
//!
//! The settings file lives at `~/.config/faixa/settings.toml`. Every key is
//! optional; command-line flags take precedence over it.

use std::path::{Path, PathBuf};

use faixa_catalog::HeaderRules;
use serde::{Deserialize, Serialize};

use crate::error::SettingsError;
use crate::synonyms::SynonymTable;

/// Sheet that carries in-band brand headers when none is configured.
pub const DEFAULT_CATCH_ALL_SHEET: &str = "OUTRAS";

/// One abbreviation pair in `[[synonyms]]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynonymEntry {
    pub short: String,
    pub long: String,
}

/// Contents of `settings.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Price-list workbook.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spreadsheet: Option<PathBuf>,
    /// Root of the brand/model image tree.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assets_root: Option<PathBuf>,
    /// SQLite database file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catch_all_sheet: Option<String>,
    /// Tokens that stop a lone model cell from being read as a brand header.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header_exclusions: Option<Vec<String>>,
    /// Replaces the built-in abbreviation table when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub synonyms: Option<Vec<SynonymEntry>>,
}

impl Settings {
    /// Load the settings file, or defaults when it does not exist.
    pub fn load() -> Result<Self, SettingsError> {
        Self::load_from(&settings_path())
    }

    /// Load settings from an explicit path. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let contents = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(SettingsError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        toml::from_str(&contents).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Pretty-printed TOML for display.
    pub fn to_toml(&self) -> Result<String, SettingsError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn catch_all_sheet(&self) -> &str {
        self.catch_all_sheet
            .as_deref()
            .unwrap_or(DEFAULT_CATCH_ALL_SHEET)
    }

    pub fn header_rules(&self) -> HeaderRules {
        match &self.header_exclusions {
            Some(tokens) => HeaderRules::new(tokens),
            None => HeaderRules::default(),
        }
    }

    pub fn synonym_table(&self) -> SynonymTable {
        match &self.synonyms {
            Some(entries) => SynonymTable::new(entries.iter().map(|e| (&e.short, &e.long))),
            None => SynonymTable::default(),
        }
    }

    /// Database path from the settings, or the per-user default.
    pub fn database_path(&self) -> PathBuf {
        self.database.clone().unwrap_or_else(default_database_path)
    }
}

/// Canonical path to the settings file: `~/.config/faixa/settings.toml`.
pub fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("faixa").join("settings.toml")
}

/// Default database location: `<data dir>/faixa/catalog.db`.
pub fn default_database_path() -> PathBuf {
    let data = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
    data.join("faixa").join("catalog.db")
}
