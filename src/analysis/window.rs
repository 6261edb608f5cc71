//! Window loading: the last N calendar days of snapshots, flattened per source.

use crate::config::SourceSpec;
use crate::models::Item;
use crate::store::SnapshotStore;
use chrono::{Days, NaiveDate};
use std::collections::HashMap;
use tracing::{debug, info, instrument, warn};

/// Longest window the loader will walk; larger requests are clamped.
pub const MAX_WINDOW_DAYS: u32 = 3660;

/// Items of every configured source across the days that had a snapshot.
#[derive(Debug, Clone, Default)]
pub struct Window {
    /// Dates that had a snapshot, in loading order (newest first).
    pub dates: Vec<NaiveDate>,
    items: HashMap<String, Vec<Item>>,
    order: Vec<String>,
}

impl Window {
    /// Flattened items for `source`, newest day first.
    pub fn items(&self, source: &str) -> &[Item] {
        self.items.get(source).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All items of all sources, in configured source order.
    pub fn all_items(&self) -> impl Iterator<Item = &Item> {
        self.order.iter().flat_map(|source| self.items(source).iter())
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

/// Load the `days` calendar days ending at `today` (inclusive) from `store`.
///
/// Days are visited from `today` backwards. A missing snapshot and a store
/// error both leave the day out of the window. Requests longer than
/// [`MAX_WINDOW_DAYS`] are clamped, and the walk stops at the earliest
/// representable date.
#[instrument(level = "info", skip(store, sources), fields(sources = sources.len()))]
pub fn load_window<S: SnapshotStore + ?Sized>(
    store: &S,
    sources: &[SourceSpec],
    today: NaiveDate,
    days: u32,
) -> Window {
    let mut window = Window {
        dates: Vec::new(),
        items: sources.iter().map(|s| (s.key.clone(), Vec::new())).collect(),
        order: sources.iter().map(|s| s.key.clone()).collect(),
    };

    if days > MAX_WINDOW_DAYS {
        warn!(requested_days = days, max = MAX_WINDOW_DAYS, "Window too long; clamping");
    }
    let walk = days.min(MAX_WINDOW_DAYS);

    for offset in 0..walk {
        let Some(date) = today.checked_sub_days(Days::new(u64::from(offset))) else {
            debug!(offset, "Reached earliest representable date");
            break;
        };
        let snapshot = match store.load(date) {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => {
                debug!(%date, "No snapshot");
                continue;
            }
            Err(e) => {
                warn!(%date, error = %e, "Snapshot unreadable; treating day as missing");
                continue;
            }
        };

        let stamp = date.format("%Y-%m-%d").to_string();
        for source in sources {
            let items = snapshot.items(&source.key);
            let bucket = window.items.entry(source.key.clone()).or_default();
            bucket.extend(items.iter().cloned().map(|mut item| {
                item.observed_date = Some(stamp.clone());
                item
            }));
        }
        window.dates.push(date);
    }

    info!(
        requested_days = days,
        days_with_data = window.dates.len(),
        total_items = window.all_items().count(),
        "Loaded snapshot window"
    );
    window
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::store::MemorySnapshotStore;
    use serde_json::json;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_load_window_stamps_and_skips_missing_days() {
        let mut store = MemorySnapshotStore::default();
        store.insert(date("2026-01-31"), json!({"product_hunt": [{"name": "Acme"}]}));
        store.insert(date("2026-01-29"), json!({"product_hunt": [{"name": "Beta"}], "hacker_news": [{"title": "Hi"}]}));
        store.insert(date("2026-01-20"), json!({"product_hunt": [{"name": "Too old"}]}));

        let config = EngineConfig::default();
        let window = load_window(&store, &config.sources, date("2026-01-31"), 7);

        assert_eq!(window.dates, vec![date("2026-01-31"), date("2026-01-29")]);
        let ph = window.items("product_hunt");
        assert_eq!(ph.len(), 2);
        assert_eq!(ph[0].observed_date.as_deref(), Some("2026-01-31"));
        assert_eq!(ph[1].observed_date.as_deref(), Some("2026-01-29"));
        assert_eq!(window.items("hacker_news").len(), 1);
        assert!(window.items("ai_tools").is_empty());
        assert_eq!(window.all_items().count(), 3);
    }

    #[test]
    fn test_empty_but_present_snapshot_counts_as_a_day() {
        let mut store = MemorySnapshotStore::default();
        store.insert(date("2026-01-31"), json!({"product_hunt": []}));

        let config = EngineConfig::default();
        let window = load_window(&store, &config.sources, date("2026-01-31"), 7);
        assert_eq!(window.dates.len(), 1);
        assert_eq!(window.all_items().count(), 0);
        assert!(!window.is_empty());
    }

    #[test]
    fn test_store_errors_are_treated_as_missing() {
        let mut store = MemorySnapshotStore::default();
        store.insert(date("2026-01-31"), json!({"product_hunt": [{"name": "Acme"}]}));
        store.insert(date("2026-01-30"), json!({"product_hunt": [{"name": "Beta"}]}));
        store.failing.insert(date("2026-01-30"));

        let config = EngineConfig::default();
        let window = load_window(&store, &config.sources, date("2026-01-31"), 7);
        assert_eq!(window.dates, vec![date("2026-01-31")]);
        assert_eq!(window.items("product_hunt").len(), 1);
    }

    #[test]
    fn test_zero_days_is_empty() {
        let mut store = MemorySnapshotStore::default();
        store.insert(date("2026-01-31"), json!({"product_hunt": [{"name": "Acme"}]}));

        let config = EngineConfig::default();
        let window = load_window(&store, &config.sources, date("2026-01-31"), 0);
        assert!(window.is_empty());
    }

    #[test]
    fn test_huge_window_is_clamped() {
        let mut store = MemorySnapshotStore::default();
        store.insert(date("2026-01-31"), json!({"product_hunt": [{"name": "Acme"}]}));
        store.insert(date("2016-01-01"), json!({"product_hunt": [{"name": "Ancient"}]}));

        let config = EngineConfig::default();
        let window = load_window(&store, &config.sources, date("2026-01-31"), u32::MAX);
        assert_eq!(window.dates, vec![date("2026-01-31")]);
        assert_eq!(window.items("product_hunt").len(), 1);
    }

    #[test]
    fn test_walk_stops_at_earliest_date() {
        let mut store = MemorySnapshotStore::default();
        store.insert(NaiveDate::MIN, json!({"product_hunt": [{"name": "First ever"}]}));

        let config = EngineConfig::default();
        let window = load_window(&store, &config.sources, NaiveDate::MIN, 30);
        assert_eq!(window.dates, vec![NaiveDate::MIN]);
    }

    #[test]
    fn test_all_items_follows_source_order() {
        let mut store = MemorySnapshotStore::default();
        store.insert(
            date("2026-01-31"),
            json!({"hacker_news": [{"title": "Last"}], "product_hunt": [{"name": "First"}]}),
        );

        let config = EngineConfig::default();
        let window = load_window(&store, &config.sources, date("2026-01-31"), 1);
        let names: Vec<&str> = window.all_items().filter_map(|i| i.display_name()).collect();
        assert_eq!(names, vec!["First", "Last"]);
    }
}
