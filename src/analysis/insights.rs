//! Insight assembly: the window, per-source frequency analysis and keywords
//! combined into one [`InsightReport`].
//!
//! Per source, deduplicated records are split two ways:
//! - **repeated** (`count >= 2`): kept in frequency order and truncated
//! - **new** (`count == 1`): re-sorted most recent `last_seen` first, then truncated
//!
//! The two lists use different orderings on purpose.

use crate::analysis::frequency::analyze_frequency;
use crate::analysis::keywords::KeywordMiner;
use crate::analysis::window::{Window, load_window};
use crate::config::{EngineConfig, SourceSpec};
use crate::models::{FrequencyRecord, InsightReport, Insights, Item, Period, SourceInsights};
use crate::store::SnapshotStore;
use crate::utils::today_in;
use chrono::NaiveDate;
use chrono_tz::Tz;
use std::error::Error;
use tracing::{info, instrument, warn};

/// Reads snapshots from a store and produces insight reports.
#[derive(Debug)]
pub struct InsightEngine<S> {
    store: S,
    config: EngineConfig,
    tz: Tz,
}

impl<S: SnapshotStore> InsightEngine<S> {
    /// Build an engine, validating `config` and resolving its timezone.
    pub fn new(store: S, config: EngineConfig) -> Result<Self, Box<dyn Error>> {
        config.validate()?;
        let tz: Tz = config
            .timezone
            .parse()
            .map_err(|e| format!("unknown timezone `{}`: {}", config.timezone, e))?;
        Ok(Self { store, config, tz })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn timezone(&self) -> &Tz {
        &self.tz
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Current calendar date in the configured timezone.
    pub fn today(&self) -> NaiveDate {
        today_in(&self.tz)
    }

    /// Load the `days` most recent calendar days.
    pub fn load_window(&self, days: u32) -> Window {
        self.load_window_at(self.today(), days)
    }

    pub fn load_window_at(&self, today: NaiveDate, days: u32) -> Window {
        load_window(&self.store, &self.config.sources, today, days)
    }

    /// Build the insight report for the `days` most recent calendar days.
    pub fn generate_insights(&self, days: u32) -> InsightReport {
        self.assemble(self.load_window(days), days)
    }

    pub fn generate_insights_at(&self, today: NaiveDate, days: u32) -> InsightReport {
        self.assemble(self.load_window_at(today, days), days)
    }

    #[instrument(level = "info", skip(self, window), fields(days_with_data = window.dates.len()))]
    fn assemble(&self, window: Window, days: u32) -> InsightReport {
        let (Some(start), Some(end)) = (window.dates.iter().min(), window.dates.iter().max()) else {
            warn!(requested_days = days, "No snapshots in window");
            return InsightReport::insufficient(days, 0);
        };
        let period = Period {
            start: *start,
            end: *end,
            days_with_data: window.dates.len(),
        };

        let sources: Vec<SourceInsights> = self
            .config
            .sources
            .iter()
            .map(|spec| self.source_insights(spec, window.items(&spec.key)))
            .collect();

        let miner = KeywordMiner::new(
            &self.config.text_fields,
            &self.config.stop_words,
            self.config.min_token_len,
        );
        let keywords = miner.extract(window.all_items(), self.config.keyword_top_n);

        info!(
            start = %period.start,
            end = %period.end,
            days_with_data = period.days_with_data,
            keywords = keywords.len(),
            "Generated insights"
        );

        InsightReport::Ready(Insights {
            period,
            sources,
            keywords,
        })
    }

    fn source_insights(&self, spec: &SourceSpec, items: &[Item]) -> SourceInsights {
        let records = analyze_frequency(items, &spec.identity_field);
        let unique = records.len();
        let (repeated, new) = split_records(records, self.config.repeated_limit, self.config.new_limit);

        info!(
            source = %spec.key,
            total = items.len(),
            unique,
            repeated = repeated.len(),
            new = new.len(),
            "Analyzed source"
        );

        SourceInsights {
            source: spec.key.clone(),
            total: items.len(),
            unique,
            repeated,
            new,
        }
    }
}

/// Split frequency-ordered records into `(repeated, new)`.
///
/// `repeated` keeps the incoming order. `new` is stably re-sorted by
/// descending `last_seen`.
pub fn split_records(
    records: Vec<FrequencyRecord>,
    repeated_limit: usize,
    new_limit: usize,
) -> (Vec<FrequencyRecord>, Vec<FrequencyRecord>) {
    let (mut repeated, mut new): (Vec<_>, Vec<_>) = records.into_iter().partition(|r| r.count >= 2);
    repeated.truncate(repeated_limit);
    new.sort_by(|a, b| b.last_seen.cmp(&a.last_seen));
    new.truncate(new_limit);
    (repeated, new)
}
