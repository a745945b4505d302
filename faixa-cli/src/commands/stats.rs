use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;

use super::load_settings;

/// Number of recent import runs listed.
const RECENT_IMPORTS: usize = 5;

pub(crate) fn run_stats(db_path: Option<PathBuf>) -> Result<(), CliError> {
    let db_path = match db_path {
        Some(p) => p,
        None => load_settings()?.database_path(),
    };

    if !db_path.exists() {
        log::warn!("No catalog database found at {}", db_path.display());
        log::info!("Run 'faixa import' to create one.");
        return Ok(());
    }

    let conn = faixa_db::open_database(&db_path)
        .map_err(|e| CliError::database(format!("Failed to open catalog database: {}", e)))?;

    let stats = faixa_db::catalog_stats(&conn)
        .map_err(|e| CliError::database(format!("Failed to query catalog stats: {}", e)))?;

    log::info!(
        "{}",
        "Catalog Database Statistics".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("  Database: {}", db_path.display());
    crate::log_blank();
    log::info!("  Price records:  {:>8}", stats.price_records);
    log::info!("  Variants:       {:>8}", stats.variants);
    log::info!("  Products:       {:>8}", stats.products);
    log::info!("  Images:         {:>8}", stats.product_images);
    log::info!("  Imports:        {:>8}", stats.imports);

    if !stats.brands.is_empty() {
        crate::log_blank();
        log::info!("{}", "Records per brand".if_supports_color(Stdout, |t| t.bold()));
        for brand in &stats.brands {
            log::info!("  {:<20} {:>8}", brand.brand, brand.records);
        }
    }

    let logs = faixa_db::list_import_logs(&conn, RECENT_IMPORTS)
        .map_err(|e| CliError::database(format!("Failed to read import log: {}", e)))?;
    if !logs.is_empty() {
        crate::log_blank();
        log::info!("{}", "Recent imports".if_supports_color(Stdout, |t| t.bold()));
        for entry in &logs {
            log::info!(
                "  {}  {}  records +{} ~{} !{}  products +{} ~{} !{}",
                entry.imported_at.if_supports_color(Stdout, |t| t.dimmed()),
                entry.source_name,
                entry.records_inserted,
                entry.records_replaced,
                entry.records_failed,
                entry.products_inserted,
                entry.products_replaced,
                entry.products_failed,
            );
        }
    }

    Ok(())
}
