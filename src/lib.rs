//! # Trend Digest
//!
//! Trend aggregation over daily snapshots of public content feeds: product
//! launches, AI tool listings, browser-extension listings, trending
//! repositories and link-aggregator posts.
//!
//! ## Architecture
//!
//! 1. **Window**: Load the last N calendar days of snapshots from a [`store::SnapshotStore`]
//! 2. **Frequency**: Deduplicate each source's items across days and count occurrences
//! 3. **Keywords**: Mine frequent terms across every source
//! 4. **Assembly**: Split items into repeated vs. new and build an [`models::InsightReport`]
//! 5. **Output**: Render the report as Markdown and JSON
//!
//! ```ignore
//! use trend_digest::{EngineConfig, FsSnapshotStore, InsightEngine};
//!
//! let engine = InsightEngine::new(FsSnapshotStore::new("data/daily"), EngineConfig::default())?;
//! let report = engine.generate_insights(7);
//! ```

pub mod analysis;
pub mod config;
pub mod models;
pub mod outputs;
pub mod store;
pub mod utils;

pub use analysis::InsightEngine;
pub use config::EngineConfig;
pub use models::InsightReport;
pub use store::{FsSnapshotStore, SnapshotStore};
