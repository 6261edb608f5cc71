//! Command-line interface definitions for Trend Digest.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Paths can also be provided through environment variables.

use clap::Parser;
use trend_digest::analysis::window::MAX_WINDOW_DAYS;

/// Command-line arguments for the Trend Digest application.
///
/// # Examples
///
/// ```sh
/// # Digest of the last 7 days from ./data/daily
/// trend_digest
///
/// # Last 14 days, JSON output alongside Markdown
/// trend_digest --days 14 -d ./snapshots -m ./reports -j ./api
///
/// # Custom sources and stop-words
/// trend_digest -c ./digest.yaml
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Directory holding one `YYYY-MM-DD.json` snapshot per day
    #[arg(short, long, env = "TREND_DATA_DIR", default_value = "data/daily")]
    pub data_dir: String,

    /// Number of calendar days to analyze, ending today
    #[arg(
        long,
        default_value_t = 7,
        value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_WINDOW_DAYS))
    )]
    pub days: u32,

    /// Output directory for the Markdown digest
    #[arg(short, long, default_value = "reports/weekly")]
    pub markdown_output_dir: String,

    /// Optional output directory for the JSON report
    #[arg(short, long)]
    pub json_output_dir: Option<String>,

    /// Optional path to a YAML engine configuration
    #[arg(short, long, env = "TREND_CONFIG")]
    pub config: Option<String>,

    /// Override the number of keywords in the report
    #[arg(long)]
    pub top_keywords: Option<usize>,

    /// Print the dates that have snapshots in the window and exit
    #[arg(long)]
    pub list_dates: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["trend_digest"]);
        assert_eq!(cli.days, 7);
        assert_eq!(cli.markdown_output_dir, "reports/weekly");
        assert!(cli.json_output_dir.is_none());
        assert!(cli.top_keywords.is_none());
        assert!(!cli.list_dates);
    }

    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from([
            "trend_digest",
            "-d",
            "/tmp/snapshots",
            "-m",
            "/tmp/markdown",
            "-j",
            "/tmp/json",
            "--days",
            "14",
            "--top-keywords",
            "20",
        ]);

        assert_eq!(cli.data_dir, "/tmp/snapshots");
        assert_eq!(cli.markdown_output_dir, "/tmp/markdown");
        assert_eq!(cli.json_output_dir.as_deref(), Some("/tmp/json"));
        assert_eq!(cli.days, 14);
        assert_eq!(cli.top_keywords, Some(20));
    }

    #[test]
    fn test_cli_rejects_zero_days() {
        assert!(Cli::try_parse_from(["trend_digest", "--days", "0"]).is_err());
    }

    #[test]
    fn test_cli_caps_days() {
        let max = MAX_WINDOW_DAYS.to_string();
        assert_eq!(Cli::parse_from(["trend_digest", "--days", max.as_str()]).days, MAX_WINDOW_DAYS);
        let over = (MAX_WINDOW_DAYS + 1).to_string();
        assert!(Cli::try_parse_from(["trend_digest", "--days", over.as_str()]).is_err());
        assert!(Cli::try_parse_from(["trend_digest", "--days", "4294967295"]).is_err());
    }
}
