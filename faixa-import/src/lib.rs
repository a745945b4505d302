//! Import a price-list workbook and an image tree into the catalog database.
//!
//! This crate owns all ETL logic: reading sheets, segmenting rows into
//! brand-scoped blocks, consolidating blocks into price records, projecting
//! catalog products with their images, and reconciling both collections
//! against the identities already stored.

pub mod consolidate;
pub mod progress;
pub mod project;
pub mod reconcile;
pub mod run;
pub mod segment;
pub mod sheet;

pub use consolidate::{ConsolidationStats, build_record, consolidate};
pub use progress::{ImportProgress, LogProgress, SilentProgress};
pub use project::{DESCRIPTION_TEMPLATE, ProjectionStats, project, project_all};
pub use reconcile::{Reconcilable, ReconcileStats, reconcile};
pub use run::{ImportError, ImportOptions, ImportReport, WriteReport, import_workbook, run_import};
pub use segment::{segment_sheet, sheet_brand};
pub use sheet::{Sheet, SheetStats, Workbook, read_workbook, rows_from_range};
