use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use faixa_lib::settings::settings_path;

use crate::CliError;

use super::load_settings;

/// Print the settings file path.
pub(crate) fn run_config_path() {
    log::info!("{}", settings_path().display());
}

/// Show the settings file contents and the values an import would use.
pub(crate) fn run_config_show() -> Result<(), CliError> {
    let path = settings_path();
    let settings = load_settings()?;

    log::info!("{}", "Settings".if_supports_color(Stdout, |t| t.bold()));
    if path.exists() {
        log::info!(
            "  File: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(exists)".if_supports_color(Stdout, |t| t.green()),
        );
    } else {
        log::info!(
            "  File: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(not found, using defaults)".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    crate::log_blank();

    let unset = || "(not set)".if_supports_color(Stdout, |t| t.dimmed()).to_string();
    let show_path = |p: &Option<std::path::PathBuf>| {
        p.as_ref().map_or_else(unset, |p| p.display().to_string())
    };

    log::info!("  spreadsheet:       {}", show_path(&settings.spreadsheet));
    log::info!("  assets_root:       {}", show_path(&settings.assets_root));
    log::info!("  database:          {}", settings.database_path().display());
    log::info!("  catch_all_sheet:   {}", settings.catch_all_sheet());
    log::info!(
        "  header_exclusions: {}",
        settings.header_rules().exclusions().join(", ")
    );
    log::info!(
        "  synonyms:          {} pair(s){}",
        settings.synonym_table().len(),
        if settings.synonyms.is_none() { " (built-in)" } else { "" },
    );

    let contents = settings
        .to_toml()
        .map_err(|e| CliError::config(e.to_string()))?;
    if !contents.trim().is_empty() {
        crate::log_blank();
        for line in contents.lines() {
            log::info!("  {}", line.if_supports_color(Stdout, |t| t.dimmed()));
        }
    }

    Ok(())
}
