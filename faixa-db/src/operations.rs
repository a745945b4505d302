//! Write operations: natural-key maintenance, identity snapshots, and
//! unordered bulk upserts.

use std::collections::{HashMap, HashSet};

use faixa_catalog::types::*;
use rusqlite::{Connection, OptionalExtension, params};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OperationError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Entity not found: {entity_type} with id '{id}'")]
    NotFound { entity_type: String, id: String },
    #[error("Key already written earlier in this batch: {0}")]
    DuplicateInBatch(String),
}

/// One item of a bulk write, as decided by reconciliation.
#[derive(Debug, Clone, PartialEq)]
pub enum WriteOp<T> {
    /// Overwrite the stored row with this identity. `created_at` is kept.
    Replace {
        identity: PersistedIdentity,
        record: T,
    },
    /// Insert under the natural key. An existing row with the same key is
    /// updated in place instead and counted as replaced.
    Insert { record: T },
}

impl<T> WriteOp<T> {
    pub fn record(&self) -> &T {
        match self {
            Self::Replace { record, .. } | Self::Insert { record } => record,
        }
    }
}

/// Outcome of an unordered bulk write.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct BulkWriteResult {
    pub inserted: usize,
    pub replaced: usize,
    pub failed: usize,
    /// One message per failed item.
    pub errors: Vec<String>,
}

impl BulkWriteResult {
    pub fn succeeded(&self) -> usize {
        self.inserted + self.replaced
    }
}

/// Rows removed by the natural-key dedup pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DedupStats {
    pub price_records_removed: usize,
    pub products_removed: usize,
}

impl DedupStats {
    pub fn total(&self) -> usize {
        self.price_records_removed + self.products_removed
    }
}

// ── Natural keys ────────────────────────────────────────────────────────────

/// Remove duplicate natural keys, then create the unique indexes.
///
/// For every duplicated key the row with the lowest id (the oldest identity)
/// is kept. Idempotent: with the indexes in place there is nothing to delete.
pub fn ensure_natural_key_indexes(conn: &Connection) -> Result<DedupStats, OperationError> {
    let price_records_removed = conn.execute(
        "DELETE FROM price_records WHERE id NOT IN (
             SELECT MIN(id) FROM price_records GROUP BY brand, model, color
         )",
        [],
    )?;
    let products_removed = conn.execute(
        "DELETE FROM catalog_products WHERE id NOT IN (
             SELECT MIN(id) FROM catalog_products GROUP BY handle
         )",
        [],
    )?;

    conn.execute_batch(
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_price_records_natural
             ON price_records(brand, model, color);
         CREATE UNIQUE INDEX IF NOT EXISTS idx_catalog_products_handle
             ON catalog_products(handle);",
    )?;

    let stats = DedupStats {
        price_records_removed,
        products_removed,
    };
    if stats.total() > 0 {
        log::warn!(
            "Removed {} duplicate price record(s) and {} duplicate product(s)",
            stats.price_records_removed,
            stats.products_removed
        );
    }
    Ok(stats)
}

// ── Identity snapshots ──────────────────────────────────────────────────────

/// Natural key → identity for every stored price record.
pub fn load_price_identities(
    conn: &Connection,
) -> Result<HashMap<NaturalKey, PersistedIdentity>, OperationError> {
    let mut stmt = conn.prepare("SELECT id, created_at, brand, model, color FROM price_records")?;
    let rows = stmt.query_map([], |row| {
        Ok((
            NaturalKey::new(
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, String>(4)?,
            ),
            PersistedIdentity {
                id: row.get(0)?,
                created_at: row.get(1)?,
            },
        ))
    })?;

    let mut snapshot = HashMap::new();
    for row in rows {
        let (key, identity) = row?;
        snapshot.insert(key, identity);
    }
    Ok(snapshot)
}

/// Handle → identity for every stored catalog product.
pub fn load_product_identities(
    conn: &Connection,
) -> Result<HashMap<String, PersistedIdentity>, OperationError> {
    let mut stmt = conn.prepare("SELECT id, created_at, handle FROM catalog_products")?;
    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, String>(2)?,
            PersistedIdentity {
                id: row.get(0)?,
                created_at: row.get(1)?,
            },
        ))
    })?;

    let mut snapshot = HashMap::new();
    for row in rows {
        let (handle, identity) = row?;
        snapshot.insert(handle, identity);
    }
    Ok(snapshot)
}

// ── Bulk writes ─────────────────────────────────────────────────────────────

/// Outcome of applying a single item.
enum Applied {
    Inserted,
    Replaced,
}

/// Apply price-record writes as one unordered batch.
///
/// Each item runs in its own savepoint: a failing item is rolled back and
/// counted, and the remaining items are still applied. A second item with a
/// key already written by this batch fails instead of overwriting the first.
/// `now` stamps `updated_at` (and `created_at` for new rows).
pub fn bulk_write_prices(
    conn: &Connection,
    ops: &[WriteOp<PriceRecord>],
    now: &str,
) -> Result<BulkWriteResult, OperationError> {
    bulk_write(conn, ops, |c, op| apply_price(c, op, now), |r| {
        format!("{} | {} | {}", r.brand, r.model, r.color)
    })
}

/// Apply catalog-product writes as one unordered batch.
pub fn bulk_write_products(
    conn: &Connection,
    ops: &[WriteOp<CatalogProduct>],
    now: &str,
) -> Result<BulkWriteResult, OperationError> {
    bulk_write(conn, ops, |c, op| apply_product(c, op, now), |p| {
        p.handle.clone()
    })
}

fn bulk_write<T>(
    conn: &Connection,
    ops: &[WriteOp<T>],
    apply: impl Fn(&Connection, &WriteOp<T>) -> Result<Applied, OperationError>,
    key: impl Fn(&T) -> String,
) -> Result<BulkWriteResult, OperationError> {
    let mut result = BulkWriteResult::default();
    let mut written: HashSet<String> = HashSet::new();
    let mut tx = conn.unchecked_transaction()?;

    for op in ops {
        let item_key = key(op.record());
        let outcome = if written.contains(&item_key) {
            Err(OperationError::DuplicateInBatch(item_key.clone()))
        } else {
            let sp = tx.savepoint()?;
            match apply(&*sp, op) {
                Ok(applied) => {
                    sp.commit()?;
                    Ok(applied)
                }
                // Dropping the savepoint rolls back just this item.
                Err(e) => Err(e),
            }
        };

        match outcome {
            Ok(applied) => {
                written.insert(item_key);
                match applied {
                    Applied::Inserted => result.inserted += 1,
                    Applied::Replaced => result.replaced += 1,
                }
            }
            Err(e) => {
                let message = format!("{}: {}", item_key, e);
                log::warn!("Write failed for {}", message);
                result.failed += 1;
                result.errors.push(message);
            }
        }
    }

    tx.commit()?;
    Ok(result)
}

fn apply_price(
    conn: &Connection,
    op: &WriteOp<PriceRecord>,
    now: &str,
) -> Result<Applied, OperationError> {
    match op {
        WriteOp::Replace { identity, record } => replace_price(conn, identity.id, record, now),
        WriteOp::Insert { record } => {
            let existing: Option<i64> = conn
                .query_row(
                    "SELECT id FROM price_records WHERE brand = ?1 AND model = ?2 AND color = ?3",
                    params![record.brand, record.model, record.color],
                    |row| row.get(0),
                )
                .optional()?;
            if let Some(id) = existing {
                return replace_price(conn, id, record, now);
            }

            let variants = serde_json::to_string(&record.variants)?;
            conn.execute(
                "INSERT INTO price_records
                     (brand, model, legacy_model, color, year, variants, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)",
                params![
                    record.brand,
                    record.model,
                    record.legacy_model,
                    record.color,
                    record.year,
                    variants,
                    now,
                ],
            )?;
            Ok(Applied::Inserted)
        }
    }
}

/// Overwrite the price row with this id. `created_at` is left untouched.
fn replace_price(
    conn: &Connection,
    id: i64,
    record: &PriceRecord,
    now: &str,
) -> Result<Applied, OperationError> {
    let variants = serde_json::to_string(&record.variants)?;
    let changed = conn.execute(
        "UPDATE price_records SET
             brand = ?2, model = ?3, legacy_model = ?4, color = ?5,
             year = ?6, variants = ?7, updated_at = ?8
         WHERE id = ?1",
        params![
            id,
            record.brand,
            record.model,
            record.legacy_model,
            record.color,
            record.year,
            variants,
            now,
        ],
    )?;
    if changed == 0 {
        return Err(OperationError::NotFound {
            entity_type: "price_record".to_string(),
            id: id.to_string(),
        });
    }
    Ok(Applied::Replaced)
}

fn apply_product(
    conn: &Connection,
    op: &WriteOp<CatalogProduct>,
    now: &str,
) -> Result<Applied, OperationError> {
    match op {
        WriteOp::Replace { identity, record } => replace_product(conn, identity.id, record, now),
        WriteOp::Insert { record } => {
            let existing: Option<i64> = conn
                .query_row(
                    "SELECT id FROM catalog_products WHERE handle = ?1",
                    params![record.handle],
                    |row| row.get(0),
                )
                .optional()?;
            if let Some(id) = existing {
                return replace_product(conn, id, record, now);
            }

            let document = serde_json::to_string(record)?;
            conn.execute(
                "INSERT INTO catalog_products
                     (handle, name, description, document, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
                params![
                    record.handle,
                    record.name,
                    record.description,
                    document,
                    now,
                ],
            )?;
            Ok(Applied::Inserted)
        }
    }
}

/// Overwrite the product row with this id. `created_at` is left untouched.
fn replace_product(
    conn: &Connection,
    id: i64,
    record: &CatalogProduct,
    now: &str,
) -> Result<Applied, OperationError> {
    let document = serde_json::to_string(record)?;
    let changed = conn.execute(
        "UPDATE catalog_products SET
             handle = ?2, name = ?3, description = ?4, document = ?5, updated_at = ?6
         WHERE id = ?1",
        params![
            id,
            record.handle,
            record.name,
            record.description,
            document,
            now,
        ],
    )?;
    if changed == 0 {
        return Err(OperationError::NotFound {
            entity_type: "catalog_product".to_string(),
            id: id.to_string(),
        });
    }
    Ok(Applied::Replaced)
}

// ── Import Log ──────────────────────────────────────────────────────────────

/// Record an import run. Returns the new log id.
pub fn insert_import_log(conn: &Connection, log: &ImportLog) -> Result<i64, OperationError> {
    conn.execute(
        "INSERT INTO import_log (source_name, imported_at,
             records_inserted, records_replaced, records_failed,
             products_inserted, products_replaced, products_failed)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            log.source_name,
            log.imported_at,
            log.records_inserted,
            log.records_replaced,
            log.records_failed,
            log.products_inserted,
            log.products_replaced,
            log.products_failed,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}
