//! Data models for collected items, daily snapshots and the insight report.
//!
//! This module defines the structures that flow through the digest pipeline:
//! - [`Item`]: One collected entry from one source, kept as an opaque JSON map
//! - [`Snapshot`]: All per-source item lists collected for one calendar day
//! - [`FrequencyRecord`]: Occurrence statistics for one distinct item
//! - [`KeywordCount`]: One mined keyword and how often it appeared
//! - [`InsightReport`]: The assembled output handed to the report renderers
//!
//! Items are produced by external collectors whose payloads vary per source,
//! so they are not given a fixed schema. The only field the engine attaches
//! is `observed_date`.

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::debug;

/// A single collected entry, e.g. a product launch or a trending repository.
///
/// The collector payload is kept verbatim in `fields`. `observed_date` is the
/// ISO date (`YYYY-MM-DD`) of the snapshot the item was loaded from.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Item {
    /// Date of the snapshot this item came from, attached by the window loader.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observed_date: Option<String>,
    /// The collector payload.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Item {
    /// Wrap a collector payload. An `observed_date` key in the payload is lifted
    /// into the typed field.
    pub fn from_fields(mut fields: Map<String, Value>) -> Self {
        let observed_date = match fields.remove("observed_date") {
            Some(Value::String(s)) => Some(s),
            _ => None,
        };
        Self {
            observed_date,
            fields,
        }
    }

    /// Raw field access.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// String value of `field`, if present and a string.
    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.fields.get(field).and_then(Value::as_str)
    }

    /// Text contribution of `field` for keyword mining.
    ///
    /// Null, empty strings, `false` and zero are treated as absent. Numbers and
    /// booleans are rendered as text. Arrays and objects deliberately contribute
    /// nothing rather than a stringified dump of their contents.
    pub fn text_of(&self, field: &str) -> Option<String> {
        match self.fields.get(field)? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Bool(true) => Some("true".to_string()),
            Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Parsed `observed_date`, if present and well formed.
    pub fn observed_on(&self) -> Option<NaiveDate> {
        self.observed_date
            .as_deref()
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
    }

    /// Display name: `name`, falling back to `title`.
    pub fn display_name(&self) -> Option<&str> {
        self.get_str("name")
            .filter(|s| !s.is_empty())
            .or_else(|| self.get_str("title").filter(|s| !s.is_empty()))
    }

    /// Outbound link: `link`, falling back to `url`.
    pub fn link(&self) -> Option<&str> {
        self.get_str("link")
            .filter(|s| !s.is_empty())
            .or_else(|| self.get_str("url").filter(|s| !s.is_empty()))
    }
}

/// The per-source item lists collected on one calendar day.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Snapshot {
    /// The date recorded by the collector, if any.
    pub date: Option<String>,
    /// Collection timestamp recorded by the collector, if any.
    pub timestamp: Option<String>,
    /// Items keyed by source key.
    pub sources: BTreeMap<String, Vec<Item>>,
}

impl Snapshot {
    /// Build a snapshot from a decoded JSON document.
    ///
    /// Parsing is lenient: a source whose value is not an array yields no
    /// items, and array elements that are not objects are skipped. `date` and
    /// `timestamp` are metadata, not sources.
    pub fn from_value(value: Value) -> Option<Self> {
        let Value::Object(map) = value else {
            return None;
        };

        let mut snapshot = Snapshot::default();
        for (key, value) in map {
            if key == "date" {
                snapshot.date = value.as_str().map(str::to_string);
                continue;
            }
            if key == "timestamp" {
                snapshot.timestamp = value.as_str().map(str::to_string);
                continue;
            }
            match value {
                Value::Array(entries) => {
                    let total = entries.len();
                    let items: Vec<Item> = entries
                        .into_iter()
                        .filter_map(|entry| match entry {
                            Value::Object(fields) => Some(Item::from_fields(fields)),
                            _ => None,
                        })
                        .collect();
                    if items.len() < total {
                        debug!(source = %key, skipped = total - items.len(), "Skipped non-object entries");
                    }
                    snapshot.sources.insert(key, items);
                }
                other => {
                    debug!(source = %key, kind = ?other, "Ignoring non-array source value");
                }
            }
        }
        Some(snapshot)
    }

    /// Items for `source`; a missing source is an empty list.
    pub fn items(&self, source: &str) -> &[Item] {
        self.sources.get(source).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Occurrence statistics for one distinct normalized identity within a source.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrequencyRecord {
    /// Trimmed, lower-cased identity value.
    pub identity: String,
    /// Number of occurrences across the window.
    pub count: usize,
    /// Earliest `observed_date` of the group.
    pub first_seen: NaiveDate,
    /// Latest `observed_date` of the group.
    pub last_seen: NaiveDate,
    /// The last item folded into the group (processing order, not date order).
    pub item: Item,
}

/// One mined keyword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeywordCount {
    pub token: String,
    pub count: usize,
}

/// Date span covered by the snapshots that were actually found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Period {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub days_with_data: usize,
}

/// Aggregated view of one source over the window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceInsights {
    /// Source key, e.g. `"hacker_news"`.
    pub source: String,
    /// Raw item count before deduplication.
    pub total: usize,
    /// Number of distinct identities.
    pub unique: usize,
    /// Items seen two or more times, in frequency order.
    pub repeated: Vec<FrequencyRecord>,
    /// Items seen exactly once, most recent first.
    pub new: Vec<FrequencyRecord>,
}

/// A successful insight run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Insights {
    pub period: Period,
    /// Per-source results in configured source order.
    pub sources: Vec<SourceInsights>,
    pub keywords: Vec<KeywordCount>,
}

impl Insights {
    /// Results for `source`, if it is configured.
    pub fn source(&self, source: &str) -> Option<&SourceInsights> {
        self.sources.iter().find(|s| s.source == source)
    }

    /// Sum of raw item counts across all sources.
    pub fn total_items(&self) -> usize {
        self.sources.iter().map(|s| s.total).sum()
    }
}

/// Outcome of an insight run.
///
/// `Insufficient` is a normal return value, produced when no snapshot exists
/// in the requested window.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum InsightReport {
    Ready(Insights),
    Insufficient { error: String, message: String },
}

impl InsightReport {
    pub fn insufficient(requested_days: u32, found_days: usize) -> Self {
        InsightReport::Insufficient {
            error: "insufficient data".to_string(),
            message: format!(
                "at least 1 day of data is required, found {found_days} (requested {requested_days})"
            ),
        }
    }

    pub fn insights(&self) -> Option<&Insights> {
        match self {
            InsightReport::Ready(insights) => Some(insights),
            InsightReport::Insufficient { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item(value: Value) -> Item {
        match value {
            Value::Object(map) => Item::from_fields(map),
            _ => panic!("fixture must be an object"),
        }
    }

    #[test]
    fn test_item_serialization_keeps_payload_and_date() {
        let mut it = item(json!({"name": "Acme", "stars": 12}));
        it.observed_date = Some("2026-01-30".to_string());

        let value = serde_json::to_value(&it).unwrap();
        assert_eq!(value["name"], "Acme");
        assert_eq!(value["stars"], 12);
        assert_eq!(value["observed_date"], "2026-01-30");
    }

    #[test]
    fn test_item_from_fields_lifts_observed_date() {
        let it = item(json!({"name": "Acme", "observed_date": "2026-01-30"}));
        assert_eq!(it.observed_date.as_deref(), Some("2026-01-30"));
        assert!(it.get("observed_date").is_none());
        assert_eq!(it.observed_on(), NaiveDate::from_ymd_opt(2026, 1, 30));
    }

    #[test]
    fn test_observed_on_rejects_garbage() {
        let mut it = item(json!({"name": "Acme"}));
        assert_eq!(it.observed_on(), None);
        it.observed_date = Some("yesterday".to_string());
        assert_eq!(it.observed_on(), None);
    }

    #[test]
    fn test_text_of_truthiness() {
        let it = item(json!({
            "name": "Acme",
            "empty": "",
            "zero": 0,
            "score": 42,
            "flag": false,
            "tags": ["a", "b"],
            "maker": {"name": "Jane"},
            "nothing": null
        }));
        assert_eq!(it.text_of("name").as_deref(), Some("Acme"));
        assert_eq!(it.text_of("empty"), None);
        assert_eq!(it.text_of("zero"), None);
        assert_eq!(it.text_of("score").as_deref(), Some("42"));
        assert_eq!(it.text_of("flag"), None);
        assert_eq!(it.text_of("tags"), None);
        assert_eq!(it.text_of("maker"), None);
        assert_eq!(it.text_of("nothing"), None);
        assert_eq!(it.text_of("missing"), None);
    }

    #[test]
    fn test_display_name_and_link_fallbacks() {
        let story = item(json!({"title": "Show HN: Thing", "url": "https://example.com"}));
        assert_eq!(story.display_name(), Some("Show HN: Thing"));
        assert_eq!(story.link(), Some("https://example.com"));

        let product = item(json!({"name": "", "title": "Fallback", "link": "https://p.example"}));
        assert_eq!(product.display_name(), Some("Fallback"));
        assert_eq!(product.link(), Some("https://p.example"));
    }

    #[test]
    fn test_snapshot_from_value_is_lenient() {
        let snapshot = Snapshot::from_value(json!({
            "date": "2026-01-30",
            "timestamp": "2026-01-30T08:00:00-08:00",
            "product_hunt": [{"name": "Acme"}, "not an object", {"name": "Beta"}],
            "ai_tools": {"oops": true},
            "hacker_news": []
        }))
        .unwrap();

        assert_eq!(snapshot.date.as_deref(), Some("2026-01-30"));
        assert_eq!(snapshot.items("product_hunt").len(), 2);
        assert!(snapshot.items("ai_tools").is_empty());
        assert!(snapshot.items("hacker_news").is_empty());
        assert!(snapshot.items("github_trending").is_empty());
        assert!(snapshot.sources.contains_key("hacker_news"));
        assert!(!snapshot.sources.contains_key("ai_tools"));
    }

    #[test]
    fn test_snapshot_from_non_object_is_none() {
        assert!(Snapshot::from_value(json!([1, 2, 3])).is_none());
    }

    #[test]
    fn test_insufficient_report_serialization() {
        let report = InsightReport::insufficient(7, 0);
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["error"], "insufficient data");
        assert!(value["message"].as_str().unwrap().contains("found 0"));
        assert!(value["message"].as_str().unwrap().contains("requested 7"));
        assert!(report.insights().is_none());
    }
}
