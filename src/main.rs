//! # Trend Digest
//!
//! Reads the daily feed snapshots written by the collectors and produces a
//! digest of what kept trending and what was new over the last N days.
//!
//! ## Usage
//!
//! ```sh
//! trend_digest -d ./data/daily -m ./reports/weekly --days 7
//! ```
//!
//! ## Flow
//!
//! 1. **Configuration**: Defaults, optionally overridden by a YAML file
//! 2. **Analysis**: Load the snapshot window and assemble insights
//! 3. **Output**: Write the Markdown digest and, optionally, the JSON report

use chrono::Utc;
use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};
use trend_digest::outputs::{json, markdown};
use trend_digest::utils::ensure_writable_dir;
use trend_digest::{EngineConfig, FsSnapshotStore, InsightEngine, InsightReport, SnapshotStore};

mod cli;

use cli::Cli;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("trend_digest starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    // ---- Configuration ----
    let mut config = match &args.config {
        Some(path) => EngineConfig::from_yaml_file(path)?,
        None => EngineConfig::default(),
    };
    if let Some(top_n) = args.top_keywords {
        config.keyword_top_n = top_n;
    }

    let store = FsSnapshotStore::new(&args.data_dir);
    let engine = InsightEngine::new(store, config)?;
    let today = engine.today();
    info!(%today, timezone = %engine.config().timezone, data_dir = %args.data_dir, "Engine ready");

    if args.list_dates {
        for date in engine.store().list_recent(today, args.days)? {
            println!("{date}");
        }
        return Ok(());
    }

    // ---- Analysis ----
    info!(days = args.days, "Analyzing snapshot window");
    let report = engine.generate_insights(args.days);

    let insights = match &report {
        InsightReport::Ready(insights) => insights,
        InsightReport::Insufficient { error, message } => {
            error!(%error, %message, "Analysis failed");
            return Err(message.clone().into());
        }
    };

    let period = &insights.period;
    info!(start = %period.start, end = %period.end, days_with_data = period.days_with_data, "Analysis period");
    if period.days_with_data < args.days as usize {
        warn!(
            requested = args.days,
            available = period.days_with_data,
            "Fewer days with data than requested; building digest from available days"
        );
    }

    // ---- Markdown output ----
    ensure_writable_dir(&args.markdown_output_dir).await?;
    let generated_at = Utc::now().with_timezone(engine.timezone());
    let md = markdown::report_to_markdown(&report, engine.config(), generated_at)?;
    let md_path = format!(
        "{}/{}.md",
        args.markdown_output_dir.trim_end_matches('/'),
        json::report_stem(&report)
    );
    info!(path = %md_path, "Writing Markdown");
    if let Err(e) = tokio::fs::write(&md_path, md).await {
        error!(path = %md_path, error = %e, "Failed writing Markdown");
        return Err(e.into());
    }
    info!(path = %md_path, "Wrote Markdown digest");

    // ---- JSON output ----
    if let Some(dir) = &args.json_output_dir {
        json::write_report(&report, dir).await?;
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}
