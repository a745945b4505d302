use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use faixa_db::BulkWriteResult;
use faixa_import::{ImportOptions, ImportReport, LogProgress, WriteReport};

use crate::CliError;

use super::load_settings;

/// Command-line overrides for an import run.
pub(crate) struct ImportArgs {
    pub spreadsheet: Option<PathBuf>,
    pub assets: Option<PathBuf>,
    pub db: Option<PathBuf>,
    pub catch_all: Option<String>,
    pub dry_run: bool,
}

/// Import the price list and asset tree into the catalog database.
pub(crate) fn run_import(args: ImportArgs) -> Result<(), CliError> {
    let settings = load_settings()?;

    let spreadsheet = args
        .spreadsheet
        .or_else(|| settings.spreadsheet.clone())
        .ok_or_else(|| {
            CliError::config("no spreadsheet given; pass --spreadsheet or set `spreadsheet`")
        })?;
    let assets_root = args
        .assets
        .or_else(|| settings.assets_root.clone())
        .ok_or_else(|| CliError::config("no asset root given; pass --assets or set `assets_root`"))?;
    let db_path = args.db.unwrap_or_else(|| settings.database_path());

    let options = ImportOptions {
        spreadsheet,
        assets_root,
        catch_all_sheet: args
            .catch_all
            .unwrap_or_else(|| settings.catch_all_sheet().to_string()),
        header_rules: settings.header_rules(),
        synonyms: settings.synonym_table(),
        dry_run: args.dry_run,
    };

    let conn = faixa_db::open_database(&db_path).map_err(|e| {
        CliError::database(format!(
            "Failed to open catalog database at {}: {}",
            db_path.display(),
            e
        ))
    })?;

    if options.dry_run {
        log::info!(
            "{}",
            "Dry run: nothing will be written".if_supports_color(Stdout, |t| t.yellow()),
        );
    }

    let report = faixa_import::run_import(&conn, &options, &LogProgress)
        .map_err(|e| CliError::import(e.to_string()))?;

    print_report(&report);
    Ok(())
}

fn print_report(report: &ImportReport) {
    crate::log_blank();
    log::info!("{}", "Import Summary".if_supports_color(Stdout, |t| t.bold()));
    log::info!(
        "  Sheets:            {:>6}   rows: {}   blocks: {}   brand headers: {}",
        report.sheets.sheets,
        report.sheets.rows,
        report.sheets.blocks,
        report.sheets.brand_headers,
    );
    log::info!(
        "  Price records:     {:>6}   variants: {}   merged blocks: {}",
        report.consolidation.records,
        report.consolidation.variants,
        report.consolidation.blocks_merged,
    );
    log::info!(
        "  Asset folders:     {:>6}   brands: {}   images: {}",
        report.asset_folders,
        report.asset_brands,
        report.asset_images,
    );
    log::info!(
        "  Products:          {:>6}   images attached: {}",
        report.projection.products,
        report.projection.images,
    );

    let warnings = [
        (report.sheets.malformed_prices, "malformed price cell(s) read as 0"),
        (report.consolidation.blocks_without_model, "block(s) without a model skipped"),
        (report.projection.products_without_assets, "product(s) without images"),
        (report.projection.variants_without_image, "variant(s) without a bound image"),
        (report.projection.handle_collisions, "product(s) sharing a handle with an earlier product"),
        (report.dedup.total(), "duplicate row(s) removed before indexing"),
    ];
    for (count, what) in warnings {
        if count > 0 {
            log::info!(
                "  {} {} {}",
                "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
                count,
                what,
            );
        }
    }

    crate::log_blank();
    print_writes("Price records", &report.prices);
    print_writes("Products", &report.products);

    if report.has_failures() {
        log::warn!("Some writes failed; the rest of the batch was applied");
    }
}

fn print_writes(label: &str, write: &WriteReport) {
    let matched = format!(
        "{} matched, {} via legacy key, {} new",
        write.reconcile.matched_primary, write.reconcile.matched_legacy, write.reconcile.new,
    );

    let Some(result) = &write.result else {
        log::info!("  {:<15} {}", label, matched);
        return;
    };

    log::info!(
        "  {:<15} {} ({})",
        label,
        write_counts(result),
        matched.if_supports_color(Stdout, |t| t.dimmed()),
    );
    for error in &result.errors {
        log::warn!("    {}", error);
    }
}

fn write_counts(result: &BulkWriteResult) -> String {
    let ok = format!(
        "{} inserted, {} replaced",
        result.inserted, result.replaced
    );
    if result.failed == 0 {
        format!("{}", ok.if_supports_color(Stdout, |t| t.green()))
    } else {
        format!(
            "{}, {}",
            ok,
            format!("{} failed", result.failed).if_supports_color(Stdout, |t| t.red()),
        )
    }
}
