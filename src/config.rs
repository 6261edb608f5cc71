//! Engine configuration: sources, identity fields, stop-words and limits.
//!
//! All tunables live in [`EngineConfig`] and are handed to the engine at
//! construction. The defaults reproduce the five collected feeds; a YAML file
//! can override any subset of keys.
//!
//! ```yaml
//! timezone: America/Los_Angeles
//! keyword_top_n: 20
//! stop_words: [the, a, an, for]
//! ```

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::error::Error;
use std::path::Path;
use tracing::{info, instrument};

/// English function words excluded from keyword mining.
const DEFAULT_STOP_WORDS: &[&str] = &[
    "the", "a", "an", "for", "with", "and", "or", "to", "of", "in", "on", "at", "is", "it", "be",
    "as", "by", "this", "that", "from", "your", "you", "we", "our", "all", "any", "can", "has",
    "have", "will", "more", "most", "new", "one", "two", "using", "use", "used", "into", "are",
    "was", "been", "being", "their", "them", "they", "what", "when", "where", "which", "who",
    "how", "just", "like", "make", "get", "also", "its", "about", "than", "then", "only",
    "other", "such", "some", "each", "every", "but", "not", "no",
];

/// One collected feed and how its items are identified and described.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SourceSpec {
    /// Key of the source's item list inside a snapshot.
    pub key: String,
    /// Human-readable name used in rendered reports.
    pub label: String,
    /// Field used to deduplicate items across days.
    pub identity_field: String,
    /// Preferred description field for rendered reports.
    #[serde(default)]
    pub description_field: Option<String>,
    /// Source-specific metrics shown next to repeated items.
    #[serde(default)]
    pub extra_fields: Vec<String>,
}

impl SourceSpec {
    fn new(key: &str, label: &str, identity_field: &str, description_field: Option<&str>, extra_fields: &[&str]) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            identity_field: identity_field.to_string(),
            description_field: description_field.map(str::to_string),
            extra_fields: extra_fields.iter().map(|f| f.to_string()).collect(),
        }
    }
}

/// Configuration for the insight engine.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct EngineConfig {
    /// IANA timezone that defines calendar-day boundaries.
    pub timezone: String,
    /// Sources in report order.
    pub sources: Vec<SourceSpec>,
    /// Fields concatenated, in order, to form each item's keyword text.
    pub text_fields: Vec<String>,
    pub stop_words: BTreeSet<String>,
    /// Shortest token length kept by the keyword miner.
    pub min_token_len: usize,
    pub repeated_limit: usize,
    pub new_limit: usize,
    pub keyword_top_n: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            timezone: "America/Los_Angeles".to_string(),
            sources: vec![
                SourceSpec::new("product_hunt", "Product Hunt", "name", Some("tagline"), &[]),
                SourceSpec::new("ai_tools", "AI Tools", "name", Some("description"), &[]),
                SourceSpec::new(
                    "chrome_extensions",
                    "Chrome Extensions",
                    "name",
                    Some("description"),
                    &["users", "rating"],
                ),
                SourceSpec::new(
                    "github_trending",
                    "GitHub Trending",
                    "name",
                    Some("description"),
                    &["today_stars"],
                ),
                SourceSpec::new("hacker_news", "Hacker News", "title", None, &["score", "comments"]),
            ],
            text_fields: ["name", "title", "description", "tagline"]
                .iter()
                .map(|f| f.to_string())
                .collect(),
            stop_words: DEFAULT_STOP_WORDS.iter().map(|w| w.to_string()).collect(),
            min_token_len: 3,
            repeated_limit: 10,
            new_limit: 5,
            keyword_top_n: 15,
        }
    }
}

impl EngineConfig {
    /// Load and validate a YAML configuration file.
    ///
    /// Keys missing from the file keep their default values.
    #[instrument(level = "info", skip_all, fields(path = %path.as_ref().display()))]
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_yaml_str(&raw)?;
        info!(sources = config.sources.len(), timezone = %config.timezone, "Loaded engine configuration");
        Ok(config)
    }

    pub fn from_yaml_str(raw: &str) -> Result<Self, Box<dyn Error>> {
        let config: EngineConfig = serde_yaml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the engine cannot run with.
    pub fn validate(&self) -> Result<(), Box<dyn Error>> {
        if self.sources.is_empty() {
            return Err("configuration must name at least one source".into());
        }
        let mut seen = HashSet::new();
        for source in &self.sources {
            if !seen.insert(source.key.as_str()) {
                return Err(format!("duplicate source key `{}`", source.key).into());
            }
            if source.identity_field.trim().is_empty() {
                return Err(format!("source `{}` has an empty identity field", source.key).into());
            }
        }
        if self.min_token_len == 0 {
            return Err("min_token_len must be at least 1".into());
        }
        Ok(())
    }

    pub fn source(&self, key: &str) -> Option<&SourceSpec> {
        self.sources.iter().find(|s| s.key == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sources_and_identity_fields() {
        let config = EngineConfig::default();
        let keys: Vec<&str> = config.sources.iter().map(|s| s.key.as_str()).collect();
        assert_eq!(
            keys,
            vec!["product_hunt", "ai_tools", "chrome_extensions", "github_trending", "hacker_news"]
        );
        assert_eq!(config.source("hacker_news").unwrap().identity_field, "title");
        assert!(
            config
                .sources
                .iter()
                .filter(|s| s.key != "hacker_news")
                .all(|s| s.identity_field == "name")
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_limits() {
        let config = EngineConfig::default();
        assert_eq!(config.timezone, "America/Los_Angeles");
        assert_eq!(config.repeated_limit, 10);
        assert_eq!(config.new_limit, 5);
        assert_eq!(config.keyword_top_n, 15);
        assert!(config.stop_words.contains("the"));
        assert!(config.stop_words.contains("new"));
        assert!(!config.stop_words.contains("assistant"));
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = EngineConfig::from_yaml_str("keyword_top_n: 20\ntimezone: Europe/Berlin\n").unwrap();
        assert_eq!(config.keyword_top_n, 20);
        assert_eq!(config.timezone, "Europe/Berlin");
        assert_eq!(config.sources.len(), 5);
        assert_eq!(config.repeated_limit, 10);
    }

    #[test]
    fn test_yaml_custom_sources() {
        let yaml = r#"
sources:
  - key: lobsters
    label: Lobsters
    identity_field: title
    extra_fields: [score]
stop_words: [the]
"#;
        let config = EngineConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.sources.len(), 1);
        let lobsters = config.source("lobsters").unwrap();
        assert_eq!(lobsters.description_field, None);
        assert_eq!(lobsters.extra_fields, vec!["score".to_string()]);
        assert_eq!(config.stop_words.len(), 1);
    }

    #[test]
    fn test_validate_rejects_duplicates_and_empty() {
        let mut config = EngineConfig::default();
        config.sources.push(config.sources[0].clone());
        assert!(config.validate().is_err());

        config.sources.clear();
        assert!(config.validate().is_err());

        let mut config = EngineConfig::default();
        config.sources[1].identity_field = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_yaml_is_an_error() {
        assert!(EngineConfig::from_yaml_str("sources: 12").is_err());
    }
}
