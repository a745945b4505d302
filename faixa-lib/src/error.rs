use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading or saving the settings file.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// I/O error reading or writing the settings file
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The settings file is not valid TOML for the expected shape
    #[error("Invalid settings in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Settings could not be serialized back to TOML
    #[error("Could not serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
}
