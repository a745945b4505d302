pub(crate) mod config;
pub(crate) mod import;
pub(crate) mod stats;

use faixa_lib::Settings;

use crate::CliError;

/// Load the settings file, turning a bad file into a CLI error.
pub(crate) fn load_settings() -> Result<Settings, CliError> {
    Settings::load().map_err(|e| CliError::config(e.to_string()))
}

