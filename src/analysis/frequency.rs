//! Cross-day deduplication and occurrence statistics.
//!
//! Items are grouped by their normalized identity (trimmed, lower-cased value
//! of the identity field). Each group becomes one [`FrequencyRecord`].
//!
//! # Ordering
//!
//! Records are sorted by descending `count`; ties keep the record with the
//! *earlier* `last_seen` first, and remaining ties keep first-encounter order.
//! The representative `item` is whichever item of the group was folded last,
//! so with a newest-first window it is usually the *oldest* occurrence.

use crate::models::{FrequencyRecord, Item};
use std::collections::HashMap;
use tracing::{debug, instrument};

/// Normalized identity of `item`, or `None` when it cannot be deduplicated.
pub fn normalize_identity(item: &Item, identity_field: &str) -> Option<String> {
    let identity = item.get_str(identity_field)?.trim().to_lowercase();
    (!identity.is_empty()).then_some(identity)
}

/// Deduplicate `items` by `identity_field` and compute per-identity statistics.
///
/// Items with an empty or non-string identity, or without a valid
/// `observed_date`, are skipped.
#[instrument(level = "debug", skip(items), fields(items = items.len()))]
pub fn analyze_frequency(items: &[Item], identity_field: &str) -> Vec<FrequencyRecord> {
    let mut records: Vec<FrequencyRecord> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut skipped = 0usize;

    for item in items {
        let Some(identity) = normalize_identity(item, identity_field) else {
            skipped += 1;
            continue;
        };
        let Some(seen) = item.observed_on() else {
            skipped += 1;
            continue;
        };

        match index.get(&identity) {
            Some(&i) => {
                let record = &mut records[i];
                record.count += 1;
                record.first_seen = record.first_seen.min(seen);
                record.last_seen = record.last_seen.max(seen);
                record.item = item.clone();
            }
            None => {
                index.insert(identity.clone(), records.len());
                records.push(FrequencyRecord {
                    identity,
                    count: 1,
                    first_seen: seen,
                    last_seen: seen,
                    item: item.clone(),
                });
            }
        }
    }

    // stable: first-encounter order survives full ties
    records.sort_by(|a, b| b.count.cmp(&a.count).then(a.last_seen.cmp(&b.last_seen)));

    debug!(unique = records.len(), skipped, "Frequency analysis complete");
    records
}
