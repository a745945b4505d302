use faixa_catalog::types::*;
use faixa_db::*;

const T0: &str = "2024-01-01T00:00:00+00:00";
const T1: &str = "2024-06-01T00:00:00+00:00";

fn variant(part: &str, price: f64) -> Variant {
    Variant {
        part: part.to_string(),
        element: String::new(),
        price,
        location: "A1".to_string(),
        reference: String::new(),
    }
}

fn record(model: &str, legacy: Option<&str>, color: &str) -> PriceRecord {
    PriceRecord {
        brand: "SUZUKI".to_string(),
        model: model.to_string(),
        legacy_model: legacy.map(str::to_string),
        color: color.to_string(),
        year: None,
        variants: vec![variant("TANQUE", 120.0)],
    }
}

fn product(handle: &str) -> CatalogProduct {
    CatalogProduct {
        handle: handle.to_string(),
        legacy_handle: None,
        name: handle.to_uppercase(),
        description: "<p>Kit</p>".to_string(),
        variants: vec![],
        images: vec![],
        metadata: ProductMetadata {
            brand: "SUZUKI".to_string(),
            model: "HAYABUSA".to_string(),
            color: "AZUL".to_string(),
            year: None,
        },
    }
}

#[test]
fn insert_then_replace_preserves_identity_and_created_at() {
    let conn = open_memory().unwrap();
    let inserted = bulk_write_prices(
        &conn,
        &[WriteOp::Insert {
            record: record("HAYABUSA 08", None, "AZUL"),
        }],
        T0,
    )
    .unwrap();
    assert_eq!(inserted.inserted, 1);

    let snapshot = load_price_identities(&conn).unwrap();
    let identity = snapshot[&NaturalKey::new("SUZUKI", "HAYABUSA 08", "AZUL")].clone();
    assert_eq!(identity.created_at, T0);

    let mut updated = record("HAYABUSA 2008", Some("HAYABUSA 08"), "AZUL");
    updated.year = Some(2008);
    let replaced = bulk_write_prices(
        &conn,
        &[WriteOp::Replace {
            identity: identity.clone(),
            record: updated,
        }],
        T1,
    )
    .unwrap();
    assert_eq!(replaced.replaced, 1);

    let stored = find_price_record(&conn, &NaturalKey::new("SUZUKI", "HAYABUSA 2008", "AZUL"))
        .unwrap()
        .unwrap();
    assert_eq!(stored.identity, identity);
    assert_eq!(stored.updated_at, T1);
    assert_eq!(stored.record.year, Some(2008));
    assert_eq!(stored.record.legacy_model.as_deref(), Some("HAYABUSA 08"));
    assert!(
        find_price_record(&conn, &NaturalKey::new("SUZUKI", "HAYABUSA 08", "AZUL"))
            .unwrap()
            .is_none()
    );
}

#[test]
fn insert_on_existing_key_updates_in_place() {
    let conn = open_memory().unwrap();
    let op = WriteOp::Insert {
        record: record("GSX 750", None, "PRETA"),
    };
    let first = bulk_write_prices(&conn, &[op.clone()], T0).unwrap();
    assert_eq!(first.inserted, 1);
    let second = bulk_write_prices(&conn, &[op], T1).unwrap();
    assert_eq!(second.inserted, 0);
    assert_eq!(second.replaced, 1);

    let stored = find_price_record(&conn, &NaturalKey::new("SUZUKI", "GSX 750", "PRETA"))
        .unwrap()
        .unwrap();
    assert_eq!(stored.identity.created_at, T0);
    assert_eq!(stored.updated_at, T1);
    assert_eq!(load_price_identities(&conn).unwrap().len(), 1);
}

#[test]
fn repeated_key_in_one_batch_fails_instead_of_overwriting() {
    let conn = open_memory().unwrap();
    let mut second = product("honda-cg-160-azul-branco");
    second.name = "HONDA CG 160 AZUL BRANCO".to_string();
    let ops = vec![
        WriteOp::Insert {
            record: product("honda-cg-160-azul-branco"),
        },
        WriteOp::Insert { record: second },
    ];

    let result = bulk_write_products(&conn, &ops, T0).unwrap();
    assert_eq!(result.inserted, 1);
    assert_eq!(result.replaced, 0);
    assert_eq!(result.failed, 1);
    assert!(result.errors[0].contains("honda-cg-160-azul-branco"));

    let stored = find_product(&conn, "honda-cg-160-azul-branco").unwrap().unwrap();
    assert_eq!(stored.product.name, "HONDA-CG-160-AZUL-BRANCO");
}

#[test]
fn failing_item_does_not_block_siblings() {
    let conn = open_memory().unwrap();
    bulk_write_products(
        &conn,
        &[
            WriteOp::Insert { record: product("a") },
            WriteOp::Insert { record: product("b") },
        ],
        T0,
    )
    .unwrap();
    let snapshot = load_product_identities(&conn).unwrap();

    // Renaming "a" to "b" violates the unique handle; the others still apply.
    let ops = vec![
        WriteOp::Insert { record: product("c") },
        WriteOp::Replace {
            identity: snapshot["a"].clone(),
            record: product("b"),
        },
        WriteOp::Replace {
            identity: snapshot["b"].clone(),
            record: product("b"),
        },
        WriteOp::Insert { record: product("d") },
    ];
    let result = bulk_write_products(&conn, &ops, T1).unwrap();
    assert_eq!(result.inserted, 2);
    assert_eq!(result.replaced, 1);
    assert_eq!(result.failed, 1);
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.succeeded(), 3);

    let handles = load_product_identities(&conn).unwrap();
    for handle in ["a", "b", "c", "d"] {
        assert!(handles.contains_key(handle), "missing {handle}");
    }
    assert_eq!(handles["a"], snapshot["a"]);
}

#[test]
fn replace_of_vanished_identity_fails_alone() {
    let conn = open_memory().unwrap();
    let ops = vec![
        WriteOp::Replace {
            identity: PersistedIdentity {
                id: 4242,
                created_at: T0.to_string(),
            },
            record: record("GSX 750", None, "AZUL"),
        },
        WriteOp::Insert {
            record: record("GSX 750", None, "PRETA"),
        },
    ];
    let result = bulk_write_prices(&conn, &ops, T1).unwrap();
    assert_eq!(result.failed, 1);
    assert_eq!(result.inserted, 1);
    assert!(result.errors[0].contains("4242"));
}

#[test]
fn dedup_pass_keeps_oldest_row() {
    let conn = open_memory().unwrap();
    conn.execute_batch("DROP INDEX idx_price_records_natural; DROP INDEX idx_catalog_products_handle;")
        .unwrap();
    for _ in 0..3 {
        conn.execute(
            "INSERT INTO price_records (brand, model, color, created_at, updated_at)
             VALUES ('HONDA', 'CG 160', 'AZUL', ?1, ?1)",
            [T0],
        )
        .unwrap();
    }
    conn.execute(
        "INSERT INTO catalog_products (handle, name, description, document, created_at, updated_at)
         VALUES ('x', 'x', '', '{}', ?1, ?1), ('x', 'x', '', '{}', ?1, ?1)",
        [T0],
    )
    .unwrap();

    let stats = ensure_natural_key_indexes(&conn).unwrap();
    assert_eq!(stats.price_records_removed, 2);
    assert_eq!(stats.products_removed, 1);

    let min_id: i64 = conn
        .query_row("SELECT id FROM price_records", [], |row| row.get(0))
        .unwrap();
    assert_eq!(min_id, 1);

    // Indexes are back, so a second pass has nothing to do.
    assert_eq!(ensure_natural_key_indexes(&conn).unwrap().total(), 0);
}

#[test]
fn import_log_roundtrip() {
    let conn = open_memory().unwrap();
    let log = ImportLog {
        id: 0,
        source_name: "precos.xlsx".to_string(),
        imported_at: T0.to_string(),
        records_inserted: 10,
        records_replaced: 2,
        records_failed: 0,
        products_inserted: 9,
        products_replaced: 3,
        products_failed: 1,
    };
    let id = insert_import_log(&conn, &log).unwrap();
    let logs = list_import_logs(&conn, 5).unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].id, id);
    assert_eq!(logs[0].records_inserted, 10);
    assert_eq!(logs[0].products_failed, 1);
}
