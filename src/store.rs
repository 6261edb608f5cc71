//! Read access to daily snapshots.
//!
//! The collectors write one JSON document per calendar day. The engine only
//! reads them, through the [`SnapshotStore`] trait, so tests can substitute an
//! in-memory store.
//!
//! # On-disk Layout
//!
//! ```text
//! data_dir/
//! ├── 2026-01-29.json
//! ├── 2026-01-30.json
//! └── 2026-01-31.json
//! ```

use crate::models::Snapshot;
use chrono::{Days, NaiveDate};
use std::error::Error;
use std::path::PathBuf;
use tracing::{debug, instrument, warn};

/// Source of daily snapshots.
pub trait SnapshotStore {
    /// Load the snapshot for `date`.
    ///
    /// `Ok(None)` means no snapshot exists for that day. A snapshot that exists
    /// but has empty source lists is `Ok(Some(..))`.
    fn load(&self, date: NaiveDate) -> Result<Option<Snapshot>, Box<dyn Error>>;

    /// Dates with a snapshot in the `days` calendar days ending at `today`,
    /// newest first.
    fn list_recent(&self, today: NaiveDate, days: u32) -> Result<Vec<NaiveDate>, Box<dyn Error>>;
}

/// First day of the `days` calendar days ending at `today`, saturating at
/// [`NaiveDate::MIN`]. `days` must be at least 1.
fn window_start(today: NaiveDate, days: u32) -> NaiveDate {
    today
        .checked_sub_days(Days::new(u64::from(days.saturating_sub(1))))
        .unwrap_or(NaiveDate::MIN)
}

/// Snapshot store backed by a directory of `YYYY-MM-DD.json` files.
#[derive(Debug, Clone)]
pub struct FsSnapshotStore {
    dir: PathBuf,
}

impl FsSnapshotStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, date: NaiveDate) -> PathBuf {
        self.dir.join(format!("{}.json", date.format("%Y-%m-%d")))
    }
}

impl SnapshotStore for FsSnapshotStore {
    #[instrument(level = "debug", skip(self), fields(dir = %self.dir.display()))]
    fn load(&self, date: NaiveDate) -> Result<Option<Snapshot>, Box<dyn Error>> {
        let path = self.path_for(date);
        if !path.exists() {
            debug!(path = %path.display(), "No snapshot for date");
            return Ok(None);
        }

        let raw = std::fs::read_to_string(&path)?;
        let value: serde_json::Value = serde_json::from_str(&raw)?;
        match Snapshot::from_value(value) {
            Some(snapshot) => Ok(Some(snapshot)),
            None => Err(format!("snapshot {} is not a JSON object", path.display()).into()),
        }
    }

    #[instrument(level = "debug", skip(self), fields(dir = %self.dir.display()))]
    fn list_recent(&self, today: NaiveDate, days: u32) -> Result<Vec<NaiveDate>, Box<dyn Error>> {
        if days == 0 || !self.dir.exists() {
            return Ok(Vec::new());
        }
        let cutoff = window_start(today, days);

        let mut dates = Vec::new();
        for entry in std::fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            match NaiveDate::parse_from_str(stem, "%Y-%m-%d") {
                Ok(date) if date >= cutoff && date <= today => dates.push(date),
                Ok(_) => {}
                Err(_) => warn!(path = %path.display(), "Skipping file with non-date name"),
            }
        }

        dates.sort_unstable_by(|a, b| b.cmp(a));
        Ok(dates)
    }
}

/// In-memory store for tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemorySnapshotStore {
    pub snapshots: std::collections::BTreeMap<NaiveDate, Snapshot>,
    pub failing: std::collections::BTreeSet<NaiveDate>,
}

#[cfg(test)]
impl MemorySnapshotStore {
    pub fn insert(&mut self, date: NaiveDate, value: serde_json::Value) {
        let snapshot = Snapshot::from_value(value).expect("fixture must be an object");
        self.snapshots.insert(date, snapshot);
    }
}

#[cfg(test)]
impl SnapshotStore for MemorySnapshotStore {
    fn load(&self, date: NaiveDate) -> Result<Option<Snapshot>, Box<dyn Error>> {
        if self.failing.contains(&date) {
            return Err(format!("store unavailable for {date}").into());
        }
        Ok(self.snapshots.get(&date).cloned())
    }

    fn list_recent(&self, today: NaiveDate, days: u32) -> Result<Vec<NaiveDate>, Box<dyn Error>> {
        if days == 0 {
            return Ok(Vec::new());
        }
        let cutoff = window_start(today, days);
        Ok(self
            .snapshots
            .keys()
            .rev()
            .filter(|d| **d >= cutoff && **d <= today)
            .copied()
            .collect())
    }
}
