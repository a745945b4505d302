//! Block consolidation: one price record per block, then a merge of blocks
//! that share a natural key.

use std::collections::HashMap;

use faixa_catalog::{Block, NaturalKey, PriceRecord, Variant, normalize_model};

/// Counters from consolidation.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConsolidationStats {
    pub blocks: usize,
    /// Blocks skipped because no row carried a model.
    pub blocks_without_model: usize,
    /// Blocks folded into an earlier record with the same key.
    pub blocks_merged: usize,
    pub records: usize,
    pub variants: usize,
}

/// Build the price record for one block.
///
/// Returns `None` when no row has a model, since such a block has no key.
pub fn build_record(block: &Block) -> Option<PriceRecord> {
    let model = block.rows.iter().map(|r| r.model.as_str()).find(|m| !m.is_empty())?;
    let model = normalize_model(model);

    let mut colors: Vec<&str> = Vec::new();
    for row in &block.rows {
        if !row.color.is_empty() && !colors.contains(&row.color.as_str()) {
            colors.push(&row.color);
        }
    }

    let block_location = block
        .rows
        .iter()
        .map(|r| r.location.as_str())
        .find(|l| !l.is_empty())
        .unwrap_or_default();

    let variants = block
        .rows
        .iter()
        .filter(|r| !r.part.is_empty() || !r.price_is_zero())
        .map(|r| Variant {
            part: r.part.clone(),
            element: r.element.clone(),
            price: r.price_or_zero().max(0.0),
            location: if r.location.is_empty() {
                block_location.to_string()
            } else {
                r.location.clone()
            },
            reference: r.reference.clone(),
        })
        .collect();

    Some(PriceRecord {
        brand: block.brand.clone(),
        model: model.canonical,
        legacy_model: model.legacy,
        color: colors.join(" "),
        year: model.year,
        variants,
    })
}

/// Consolidate all blocks of a run into unique price records.
///
/// Records keep the order in which their key was first seen. A later block
/// with an existing key only contributes its variants.
pub fn consolidate(blocks: &[Block]) -> (Vec<PriceRecord>, ConsolidationStats) {
    let mut stats = ConsolidationStats {
        blocks: blocks.len(),
        ..Default::default()
    };
    let mut records: Vec<PriceRecord> = Vec::new();
    let mut by_key: HashMap<NaturalKey, usize> = HashMap::new();

    for block in blocks {
        let Some(record) = build_record(block) else {
            log::warn!(
                "Skipping block without a model in {} ({} row(s))",
                block.brand,
                block.rows.len()
            );
            stats.blocks_without_model += 1;
            continue;
        };

        let key = record.key();
        match by_key.get(&key) {
            Some(&idx) => {
                log::debug!("Merging block into {} {} {}", key.brand, key.model, key.color);
                records[idx].variants.extend(record.variants);
                stats.blocks_merged += 1;
            }
            None => {
                by_key.insert(key, records.len());
                records.push(record);
            }
        }
    }

    stats.records = records.len();
    stats.variants = records.iter().map(|r| r.variants.len()).sum();
    (records, stats)
}
