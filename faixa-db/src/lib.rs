//! SQLite persistence for the price list and the product catalog.
//!
//! Provides schema creation, natural-key deduplication, identity snapshots,
//! unordered bulk upserts, and query APIs backed by SQLite (via rusqlite
//! with the bundled feature).

pub mod operations;
pub mod queries;
pub mod schema;

pub use operations::{
    BulkWriteResult, DedupStats, OperationError, WriteOp, bulk_write_prices, bulk_write_products,
    ensure_natural_key_indexes, insert_import_log, load_price_identities,
    load_product_identities,
};
pub use queries::{
    BrandCount, CatalogStats, StoredPriceRecord, StoredProduct, catalog_stats, find_price_record,
    find_product, list_import_logs,
};
pub use schema::{SchemaError, open_database, open_memory};
