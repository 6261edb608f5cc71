//! Utility functions for calendar days, text trimming and file system checks.
//!
//! This module provides helpers shared by the engine and the report writers:
//! - The current calendar date in a fixed timezone
//! - Description truncation and compact date labels for rendered reports
//! - File system validation for output directories

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use std::error::Error;
use std::fs as stdfs;
use tokio::fs;
use tracing::{info, instrument};

/// Today's date in `tz`, independent of the host's local timezone.
pub fn today_in(tz: &Tz) -> NaiveDate {
    let today = today_at(tz, Utc::now());
    tracing::debug!(%today, timezone = %tz, "Computed today");
    today
}

/// Calendar date of the instant `now` as seen in `tz`.
pub fn today_at(tz: &Tz, now: DateTime<Utc>) -> NaiveDate {
    now.with_timezone(tz).date_naive()
}

/// Shorten a description for report output.
///
/// Whitespace is trimmed. Text longer than `max` characters is cut to
/// `max - 3` characters followed by `"..."`.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_description("  short  ", 100), "short");
/// assert_eq!(truncate_description(&"a".repeat(120), 100).len(), 100);
/// ```
pub fn truncate_description(s: &str, max: usize) -> String {
    let s = s.trim();
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

/// Compact date label, e.g. `"Jan 30"`.
pub fn short_date(date: NaiveDate) -> String {
    date.format("%b %-d").to_string()
}

/// Ensure a directory exists and is writable.
///
/// This function creates the directory if it doesn't exist, then performs
/// a write test by creating and immediately deleting a probe file.
///
/// # Errors
///
/// Returns an error if:
/// - The directory cannot be created
/// - The directory is not writable (permission denied, read-only filesystem, etc.)
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn ensure_writable_dir(path: &str) -> Result<(), Box<dyn Error>> {
    fs::create_dir_all(path).await?;
    let probe_path = format!("{}/..__probe_write__", path.trim_end_matches('/'));
    stdfs::File::create(&probe_path)?;
    let _ = stdfs::remove_file(&probe_path);
    info!("Output directory is writable");
    Ok(())
}
