//! End-to-end import run.
//!
//! Reads the workbook, segments and consolidates it into price records,
//! projects those into catalog products against the asset index, and writes
//! both collections through reconciliation. The two collections are written
//! as separate batches; a failure in one does not affect the other.

use std::path::{Path, PathBuf};

use faixa_catalog::{HeaderRules, ImportLog, normalize};
use faixa_db::{
    BulkWriteResult, DedupStats, OperationError, bulk_write_prices, bulk_write_products,
    ensure_natural_key_indexes, insert_import_log, load_price_identities,
    load_product_identities,
};
use faixa_lib::{SynonymTable, build_index};
use rusqlite::Connection;
use thiserror::Error;

use crate::consolidate::{ConsolidationStats, consolidate};
use crate::progress::ImportProgress;
use crate::project::{ProjectionStats, project_all};
use crate::reconcile::{ReconcileStats, reconcile};
use crate::segment::segment_sheet;
use crate::sheet::{SheetStats, Workbook, read_workbook};

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Cannot read workbook: {0}")]
    Workbook(#[from] calamine::Error),
    #[error("Database error: {0}")]
    Db(#[from] OperationError),
}

/// Inputs and rules for one import run.
#[derive(Debug, Clone)]
pub struct ImportOptions {
    pub spreadsheet: PathBuf,
    pub assets_root: PathBuf,
    /// Sheet whose rows may carry in-band brand headers.
    pub catch_all_sheet: String,
    pub header_rules: HeaderRules,
    pub synonyms: SynonymTable,
    /// Compute everything but write nothing.
    pub dry_run: bool,
}

/// Reconciliation and write outcome for one collection.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct WriteReport {
    pub reconcile: ReconcileStats,
    /// `None` on a dry run.
    pub result: Option<BulkWriteResult>,
}

/// Everything an import run did.
#[derive(Debug, Default, Clone)]
pub struct ImportReport {
    pub sheets: SheetStats,
    pub consolidation: ConsolidationStats,
    pub projection: ProjectionStats,
    pub asset_brands: usize,
    pub asset_folders: usize,
    pub asset_images: usize,
    pub dedup: DedupStats,
    pub prices: WriteReport,
    pub products: WriteReport,
    /// UTC RFC 3339 timestamp stamped on every row written by this run.
    pub imported_at: String,
    /// Id of the `import_log` row, unless this was a dry run.
    pub log_id: Option<i64>,
}

impl ImportReport {
    /// True when any item of either batch failed.
    pub fn has_failures(&self) -> bool {
        [&self.prices, &self.products]
            .iter()
            .any(|w| w.result.as_ref().is_some_and(|r| r.failed > 0))
    }
}

/// Read the workbook named in `options` and import it.
///
/// Failing to open the workbook aborts the run before anything is written.
pub fn run_import(
    conn: &Connection,
    options: &ImportOptions,
    progress: &dyn ImportProgress,
) -> Result<ImportReport, ImportError> {
    progress.on_phase(&format!("Reading {}", options.spreadsheet.display()));
    let (workbook, sheet_stats) = read_workbook(&options.spreadsheet)?;
    import_workbook(conn, &workbook, sheet_stats, options, progress)
}

/// Import an already loaded workbook.
pub fn import_workbook(
    conn: &Connection,
    workbook: &Workbook,
    sheet_stats: SheetStats,
    options: &ImportOptions,
    progress: &dyn ImportProgress,
) -> Result<ImportReport, ImportError> {
    let mut report = ImportReport {
        sheets: sheet_stats,
        imported_at: chrono::Utc::now().to_rfc3339(),
        ..Default::default()
    };

    // Segment
    progress.on_phase("Segmenting sheets");
    let catch_all = normalize(&options.catch_all_sheet);
    let total = workbook.sheets.len();
    let mut blocks = Vec::new();
    for (i, sheet) in workbook.sheets.iter().enumerate() {
        let is_catch_all = normalize(&sheet.name) == catch_all;
        let (sheet_blocks, headers) = segment_sheet(sheet, is_catch_all, &options.header_rules);
        progress.on_sheet(i + 1, total, &sheet.name, sheet_blocks.len());
        report.sheets.blocks += sheet_blocks.len();
        report.sheets.brand_headers += headers;
        blocks.extend(sheet_blocks);
    }

    // Consolidate
    let (records, consolidation) = consolidate(&blocks);
    report.consolidation = consolidation;

    // Project
    progress.on_phase(&format!("Indexing assets in {}", options.assets_root.display()));
    let index = build_index(&options.assets_root);
    report.asset_brands = index.brand_count();
    report.asset_folders = index.folder_count();
    report.asset_images = index.image_count();

    progress.on_phase(&format!("Projecting {} record(s)", records.len()));
    let (products, projection) = project_all(&records, &index, &options.synonyms);
    report.projection = projection;

    // Reconcile and write
    if !options.dry_run {
        report.dedup = ensure_natural_key_indexes(conn)?;
    }

    progress.on_phase("Writing price records");
    let (price_ops, price_stats) = reconcile(records, &load_price_identities(conn)?);
    report.prices.reconcile = price_stats;
    if !options.dry_run {
        report.prices.result = Some(bulk_write_prices(conn, &price_ops, &report.imported_at)?);
    }

    progress.on_phase("Writing catalog products");
    let (product_ops, product_stats) = reconcile(products, &load_product_identities(conn)?);
    report.products.reconcile = product_stats;
    if !options.dry_run {
        report.products.result =
            Some(bulk_write_products(conn, &product_ops, &report.imported_at)?);
        report.log_id = Some(insert_import_log(conn, &import_log(&options.spreadsheet, &report))?);
    }

    progress.on_complete(&format!(
        "Import complete: {} record(s), {} product(s)",
        report.consolidation.records, report.projection.products
    ));
    Ok(report)
}

fn import_log(spreadsheet: &Path, report: &ImportReport) -> ImportLog {
    let counts = |w: &WriteReport| {
        w.result
            .as_ref()
            .map_or((0, 0, 0), |r| (r.inserted as i64, r.replaced as i64, r.failed as i64))
    };
    let (records_inserted, records_replaced, records_failed) = counts(&report.prices);
    let (products_inserted, products_replaced, products_failed) = counts(&report.products);

    ImportLog {
        id: 0,
        source_name: spreadsheet
            .file_name()
            .map_or_else(|| spreadsheet.display().to_string(), |n| n.to_string_lossy().into_owned()),
        imported_at: report.imported_at.clone(),
        records_inserted,
        records_replaced,
        records_failed,
        products_inserted,
        products_replaced,
        products_failed,
    }
}
