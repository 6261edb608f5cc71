//! The trend-aggregation engine.
//!
//! # Submodules
//!
//! - [`window`]: Loads the last N days of snapshots and stamps each item with its date
//! - [`frequency`]: Deduplicates items across days and computes occurrence statistics
//! - [`keywords`]: Mines frequent keywords from item names and descriptions
//! - [`insights`]: Runs the above per source and assembles the [`InsightReport`]
//!
//! # Pipeline
//!
//! ```text
//! SnapshotStore ─► window ─┬─► frequency (per source) ─┐
//!                          └─► keywords (all sources) ─┴─► InsightReport
//! ```
//!
//! [`InsightReport`]: crate::models::InsightReport

pub mod frequency;
pub mod insights;
pub mod keywords;
pub mod window;

pub use insights::InsightEngine;
