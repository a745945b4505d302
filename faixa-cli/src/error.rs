use thiserror::Error;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// Database could not be opened or queried
    #[error("Database error: {0}")]
    Database(String),

    /// Missing or invalid settings
    #[error("Config error: {0}")]
    Config(String),

    /// The import run itself failed
    #[error("Import error: {0}")]
    Import(String),
}

impl CliError {
    pub(crate) fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub(crate) fn import(msg: impl Into<String>) -> Self {
        Self::Import(msg.into())
    }
}
