//! Read-only query APIs for the price list and catalog.

use faixa_catalog::types::*;
use rusqlite::{Connection, OptionalExtension, params};

use crate::operations::OperationError;

/// Aggregate counts across the database.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CatalogStats {
    pub price_records: i64,
    pub variants: i64,
    pub products: i64,
    pub product_images: i64,
    pub imports: i64,
    /// Price records per brand, largest first.
    pub brands: Vec<BrandCount>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrandCount {
    pub brand: String,
    pub records: i64,
}

/// A price record as stored, with its identity and timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredPriceRecord {
    pub identity: PersistedIdentity,
    pub updated_at: String,
    pub record: PriceRecord,
}

/// A catalog product as stored, with its identity and timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredProduct {
    pub identity: PersistedIdentity,
    pub updated_at: String,
    pub product: CatalogProduct,
}

/// Collect database-wide statistics.
pub fn catalog_stats(conn: &Connection) -> Result<CatalogStats, OperationError> {
    let count = |sql: &str| -> Result<i64, OperationError> {
        Ok(conn.query_row(sql, [], |row| row.get(0))?)
    };

    let mut stats = CatalogStats {
        price_records: count("SELECT COUNT(*) FROM price_records")?,
        variants: count("SELECT COALESCE(SUM(json_array_length(variants)), 0) FROM price_records")?,
        products: count("SELECT COUNT(*) FROM catalog_products")?,
        product_images: count(
            "SELECT COALESCE(SUM(json_array_length(document, '$.images')), 0) FROM catalog_products",
        )?,
        imports: count("SELECT COUNT(*) FROM import_log")?,
        brands: Vec::new(),
    };

    let mut stmt = conn.prepare(
        "SELECT brand, COUNT(*) AS n FROM price_records GROUP BY brand ORDER BY n DESC, brand",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok(BrandCount {
            brand: row.get(0)?,
            records: row.get(1)?,
        })
    })?;
    for row in rows {
        stats.brands.push(row?);
    }

    Ok(stats)
}

/// Find a price record by its natural key.
pub fn find_price_record(
    conn: &Connection,
    key: &NaturalKey,
) -> Result<Option<StoredPriceRecord>, OperationError> {
    let row = conn
        .query_row(
            "SELECT id, created_at, updated_at, brand, model, legacy_model, color, year, variants
             FROM price_records WHERE brand = ?1 AND model = ?2 AND color = ?3",
            params![key.brand, key.model, key.color],
            |row| {
                Ok((
                    PersistedIdentity {
                        id: row.get(0)?,
                        created_at: row.get(1)?,
                    },
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, String>(4)?,
                    row.get::<_, Option<String>>(5)?,
                    row.get::<_, String>(6)?,
                    row.get::<_, Option<i32>>(7)?,
                    row.get::<_, String>(8)?,
                ))
            },
        )
        .optional()?;

    let Some((identity, updated_at, brand, model, legacy_model, color, year, variants)) = row else {
        return Ok(None);
    };

    Ok(Some(StoredPriceRecord {
        identity,
        updated_at,
        record: PriceRecord {
            brand,
            model,
            legacy_model,
            color,
            year,
            variants: serde_json::from_str(&variants)?,
        },
    }))
}

/// Find a catalog product by handle.
pub fn find_product(
    conn: &Connection,
    handle: &str,
) -> Result<Option<StoredProduct>, OperationError> {
    let row = conn
        .query_row(
            "SELECT id, created_at, updated_at, document FROM catalog_products WHERE handle = ?1",
            params![handle],
            |row| {
                Ok((
                    PersistedIdentity {
                        id: row.get(0)?,
                        created_at: row.get(1)?,
                    },
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                ))
            },
        )
        .optional()?;

    match row {
        Some((identity, updated_at, document)) => Ok(Some(StoredProduct {
            identity,
            updated_at,
            product: serde_json::from_str(&document)?,
        })),
        None => Ok(None),
    }
}

/// Most recent import runs first.
pub fn list_import_logs(conn: &Connection, limit: usize) -> Result<Vec<ImportLog>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT id, source_name, imported_at,
                records_inserted, records_replaced, records_failed,
                products_inserted, products_replaced, products_failed
         FROM import_log ORDER BY id DESC LIMIT ?1",
    )?;
    let rows = stmt.query_map(params![limit as i64], |row| {
        Ok(ImportLog {
            id: row.get(0)?,
            source_name: row.get(1)?,
            imported_at: row.get(2)?,
            records_inserted: row.get(3)?,
            records_replaced: row.get(4)?,
            records_failed: row.get(5)?,
            products_inserted: row.get(6)?,
            products_replaced: row.get(7)?,
            products_failed: row.get(8)?,
        })
    })?;

    let mut logs = Vec::new();
    for row in rows {
        logs.push(row?);
    }
    Ok(logs)
}
