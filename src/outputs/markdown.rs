//! Markdown rendering of the insight report.
//!
//! The digest has five sections, each separated by a horizontal rule:
//!
//! 1. **Overview**: monitored item counts per source
//! 2. **Top Keywords**: the most frequent terms across all sources
//! 3. **Trending Again**: items seen on more than one day
//! 4. **New This Week**: the freshest single-occurrence items
//! 5. **Statistics**: total, unique and repeated counts per source

use crate::config::{EngineConfig, SourceSpec};
use crate::models::{FrequencyRecord, InsightReport, Insights, Item};
use crate::utils::{short_date, truncate_description};
use chrono::DateTime;
use chrono_tz::Tz;
use serde_json::Value;
use std::fmt::{self, Write};

const KEYWORDS_SHOWN: usize = 10;
const REPEATED_SHOWN: usize = 5;
const NEW_SHOWN: usize = 5;
const DESCRIPTION_MAX: usize = 100;

/// Render `report` as a Markdown digest.
///
/// `generated_at` is printed in the header with its timezone abbreviation.
pub fn report_to_markdown(
    report: &InsightReport,
    config: &EngineConfig,
    generated_at: DateTime<Tz>,
) -> Result<String, fmt::Error> {
    let mut md = String::new();

    let insights = match report {
        InsightReport::Ready(insights) => insights,
        InsightReport::Insufficient { message, .. } => {
            writeln!(md, "# Trend Digest Unavailable\n")?;
            writeln!(md, "{message}")?;
            return Ok(md);
        }
    };

    writeln!(md, "# Trend Digest\n")?;
    writeln!(
        md,
        "**Period**: {} to {} ({} days with data)  ",
        insights.period.start, insights.period.end, insights.period.days_with_data
    )?;
    writeln!(md, "**Generated**: {}\n", generated_at.format("%Y-%m-%d %H:%M (%Z)"))?;
    rule(&mut md)?;

    overview(&mut md, insights, config)?;
    keywords(&mut md, insights)?;
    repeated(&mut md, insights, config)?;
    new_this_week(&mut md, insights, config)?;
    statistics(&mut md, insights, config)?;

    rule(&mut md)?;
    writeln!(md, "*Generated by trend_digest*")?;
    Ok(md)
}

fn rule(md: &mut String) -> fmt::Result {
    writeln!(md, "---\n")
}

fn overview(md: &mut String, insights: &Insights, config: &EngineConfig) -> fmt::Result {
    writeln!(md, "## Overview\n")?;
    writeln!(md, "- **Items monitored**: {}\n", insights.total_items())?;
    for spec in &config.sources {
        if let Some(source) = insights.source(&spec.key) {
            writeln!(
                md,
                "- {}: {} ({} after deduplication)",
                spec.label, source.total, source.unique
            )?;
        }
    }
    writeln!(md)?;
    rule(md)
}

fn keywords(md: &mut String, insights: &Insights) -> fmt::Result {
    writeln!(md, "## Top Keywords\n")?;
    if insights.keywords.is_empty() {
        writeln!(md, "*No keywords this period*")?;
    }
    for (i, keyword) in insights.keywords.iter().take(KEYWORDS_SHOWN).enumerate() {
        writeln!(md, "{}. **{}** - {} occurrences", i + 1, keyword.token, keyword.count)?;
    }
    writeln!(md)?;
    rule(md)
}

fn repeated(md: &mut String, insights: &Insights, config: &EngineConfig) -> fmt::Result {
    writeln!(md, "## Trending Again\n")?;
    writeln!(md, "*Seen on more than one day this period:*\n")?;

    let mut any = false;
    for spec in &config.sources {
        let Some(source) = insights.source(&spec.key) else {
            continue;
        };
        writeln!(md, "### {}\n", spec.label)?;
        if source.repeated.is_empty() {
            writeln!(md, "*No repeated items*\n")?;
            continue;
        }
        any = true;

        for (i, record) in source.repeated.iter().take(REPEATED_SHOWN).enumerate() {
            writeln!(md, "{}. **{}** - seen {} times", i + 1, linked_name(record), record.count)?;
            if let Some(desc) = description(&record.item, spec) {
                writeln!(md, "   - Description: {desc}")?;
            }
            writeln!(md, "   - First seen: {}", short_date(record.first_seen))?;
            writeln!(md, "   - Last seen: {}", short_date(record.last_seen))?;
            if let Some(extra) = extra_info(&record.item, spec) {
                writeln!(md, "   - {extra}")?;
            }
            writeln!(md)?;
        }
    }

    if !any {
        writeln!(md, "*No source had repeated items this period*\n")?;
    }
    rule(md)
}

fn new_this_week(md: &mut String, insights: &Insights, config: &EngineConfig) -> fmt::Result {
    writeln!(md, "## New This Week\n")?;
    writeln!(md, "*Seen once, most recent first:*\n")?;

    for spec in &config.sources {
        let Some(source) = insights.source(&spec.key) else {
            continue;
        };
        writeln!(md, "### {}\n", spec.label)?;
        if source.new.is_empty() {
            writeln!(md, "*Nothing new*\n")?;
            continue;
        }
        for (i, record) in source.new.iter().take(NEW_SHOWN).enumerate() {
            let date = short_date(record.last_seen);
            match description(&record.item, spec) {
                Some(desc) => writeln!(md, "{}. **{}** ({date}) - {desc}", i + 1, linked_name(record))?,
                None => writeln!(md, "{}. **{}** ({date})", i + 1, linked_name(record))?,
            }
        }
        writeln!(md)?;
    }
    rule(md)
}

fn statistics(md: &mut String, insights: &Insights, config: &EngineConfig) -> fmt::Result {
    writeln!(md, "## Statistics\n")?;
    for spec in &config.sources {
        let Some(source) = insights.source(&spec.key) else {
            continue;
        };
        writeln!(md, "### {}", spec.label)?;
        writeln!(md, "- Total: {}", source.total)?;
        writeln!(md, "- Unique: {}", source.unique)?;
        writeln!(md, "- Repeated: {}\n", source.repeated.len())?;
    }
    Ok(())
}

fn linked_name(record: &FrequencyRecord) -> String {
    let name = record.item.display_name().unwrap_or(&record.identity);
    match record.item.link() {
        Some(link) => format!("[{name}]({link})"),
        None => name.to_string(),
    }
}

/// Preferred description field, then `tagline`, then `description`.
fn description(item: &Item, spec: &SourceSpec) -> Option<String> {
    spec.description_field
        .iter()
        .map(String::as_str)
        .chain(["tagline", "description"])
        .filter_map(|field| item.get_str(field))
        .find(|s| !s.trim().is_empty())
        .map(|s| truncate_description(s, DESCRIPTION_MAX))
}

fn extra_info(item: &Item, spec: &SourceSpec) -> Option<String> {
    let parts: Vec<String> = spec
        .extra_fields
        .iter()
        .filter_map(|field| {
            let value = match item.get(field)? {
                Value::String(s) if !s.is_empty() => s.clone(),
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                _ => return None,
            };
            Some(format!("{field}: {value}"))
        })
        .collect();
    (!parts.is_empty()).then(|| parts.join(" | "))
}
