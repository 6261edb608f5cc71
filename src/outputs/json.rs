//! JSON output of the insight report.
//!
//! # Output Structure
//!
//! ```text
//! json_output_dir/
//! ├── weekly-2026-01-31.json
//! └── weekly-insufficient.json
//! ```
//!
//! Reports are named after the last day with data. A run with no data in the
//! window writes `weekly-insufficient.json`.

use crate::models::InsightReport;
use std::error::Error;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, info, instrument};

/// File stem shared by the JSON and Markdown outputs of one report.
pub fn report_stem(report: &InsightReport) -> String {
    match report {
        InsightReport::Ready(insights) => format!("weekly-{}", insights.period.end),
        InsightReport::Insufficient { .. } => "weekly-insufficient".to_string(),
    }
}

/// Write `report` as pretty-printed JSON into `json_output_dir`.
///
/// Creates the directory if needed and returns the path written.
#[instrument(level = "info", skip_all, fields(json_output_dir = %json_output_dir.as_ref().display()))]
pub async fn write_report(
    report: &InsightReport,
    json_output_dir: impl AsRef<Path>,
) -> Result<PathBuf, Box<dyn Error>> {
    let dir = json_output_dir.as_ref();
    let json = serde_json::to_string_pretty(report)?;

    if let Err(e) = fs::create_dir_all(dir).await {
        error!(dir = %dir.display(), error = %e, "Failed to create JSON dir");
        return Err(e.into());
    }

    let path = dir.join(format!("{}.json", report_stem(report)));
    fs::write(&path, json).await?;
    info!(path = %path.display(), "Wrote JSON report");
    Ok(path)
}
