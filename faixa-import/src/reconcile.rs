//! Upsert reconciliation against stored identities.
//!
//! Each incoming record is looked up by its natural key, then by the key it
//! would have had under the legacy model spelling. A hit becomes a replace
//! of that stored row, which keeps its id and `created_at`; a miss becomes
//! an insert keyed by the natural key.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use faixa_catalog::{CatalogProduct, NaturalKey, PersistedIdentity, PriceRecord};
use faixa_db::WriteOp;

/// A record that can be matched against stored identities.
pub trait Reconcilable {
    type Key: Eq + Hash;

    fn primary_key(&self) -> Self::Key;

    /// Key under the pre-migration spelling, if the record has one.
    fn legacy_key(&self) -> Option<Self::Key>;
}

impl Reconcilable for PriceRecord {
    type Key = NaturalKey;

    fn primary_key(&self) -> NaturalKey {
        self.key()
    }

    fn legacy_key(&self) -> Option<NaturalKey> {
        PriceRecord::legacy_key(self)
    }
}

impl Reconcilable for CatalogProduct {
    type Key = String;

    fn primary_key(&self) -> String {
        self.handle.clone()
    }

    fn legacy_key(&self) -> Option<String> {
        self.legacy_handle.clone()
    }
}

/// How incoming records were matched.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReconcileStats {
    pub matched_primary: usize,
    pub matched_legacy: usize,
    pub new: usize,
}

/// Turn records into write operations.
///
/// An identity is handed out at most once. If a stored row was already
/// claimed by an earlier record, later records fall through to an insert.
pub fn reconcile<T: Reconcilable>(
    records: Vec<T>,
    snapshot: &HashMap<T::Key, PersistedIdentity>,
) -> (Vec<WriteOp<T>>, ReconcileStats) {
    let mut stats = ReconcileStats::default();
    let mut claimed: HashSet<i64> = HashSet::new();

    let ops = records
        .into_iter()
        .map(|record| {
            let primary = snapshot
                .get(&record.primary_key())
                .filter(|identity| !claimed.contains(&identity.id));
            let hit = match primary {
                Some(identity) => {
                    stats.matched_primary += 1;
                    Some(identity)
                }
                None => {
                    let legacy = record
                        .legacy_key()
                        .and_then(|key| snapshot.get(&key))
                        .filter(|identity| !claimed.contains(&identity.id));
                    if legacy.is_some() {
                        stats.matched_legacy += 1;
                    }
                    legacy
                }
            };

            match hit {
                Some(identity) => {
                    claimed.insert(identity.id);
                    WriteOp::Replace {
                        identity: identity.clone(),
                        record,
                    }
                }
                None => {
                    stats.new += 1;
                    WriteOp::Insert { record }
                }
            }
        })
        .collect();

    (ops, stats)
}
