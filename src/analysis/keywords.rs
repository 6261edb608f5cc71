//! Keyword mining over item names and descriptions.
//!
//! Tokens are maximal runs of ASCII letters bounded by word boundaries, so
//! `"GPT4"` and `"café"` contribute nothing. Ranking is by descending count;
//! equal counts keep the order in which tokens were first encountered.

use crate::models::{Item, KeywordCount};
use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{BTreeSet, HashMap};
use tracing::{debug, instrument};

static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b[a-zA-Z]+\b").unwrap());

/// Field order used when no configuration is supplied.
pub const DEFAULT_TEXT_FIELDS: &[&str] = &["name", "title", "description", "tagline"];

/// Frequency-ranked keyword extraction.
#[derive(Debug, Clone)]
pub struct KeywordMiner<'a> {
    text_fields: &'a [String],
    stop_words: &'a BTreeSet<String>,
    min_len: usize,
}

impl<'a> KeywordMiner<'a> {
    pub fn new(text_fields: &'a [String], stop_words: &'a BTreeSet<String>, min_len: usize) -> Self {
        Self {
            text_fields,
            stop_words,
            min_len,
        }
    }

    /// Concatenated text of an item's configured fields, in field order.
    pub fn item_text(&self, item: &Item) -> String {
        self.text_fields
            .iter()
            .filter_map(|field| item.text_of(field))
            .join(" ")
    }

    /// Lower-cased tokens of `text` that survive the length and stop-word filters.
    pub fn tokens<'t>(&'t self, text: &'t str) -> impl Iterator<Item = String> + 't {
        WORD_RE
            .find_iter(text)
            .filter(|m| m.as_str().len() >= self.min_len)
            .map(|m| m.as_str().to_ascii_lowercase())
            .filter(|w| !self.stop_words.contains(w))
    }

    /// The `top_n` most frequent tokens across `items`.
    #[instrument(level = "debug", skip_all, fields(top_n = top_n))]
    pub fn extract<'i>(&self, items: impl IntoIterator<Item = &'i Item>, top_n: usize) -> Vec<KeywordCount> {
        let mut counts: HashMap<String, usize> = HashMap::new();
        let mut first_seen: Vec<String> = Vec::new();

        for item in items {
            let text = self.item_text(item);
            for token in self.tokens(&text) {
                let count = counts.entry(token.clone()).or_insert(0);
                if *count == 0 {
                    first_seen.push(token);
                }
                *count += 1;
            }
        }

        let ranked: Vec<KeywordCount> = first_seen
            .into_iter()
            .map(|token| {
                let count = counts[&token];
                KeywordCount { token, count }
            })
            .sorted_by(|a, b| b.count.cmp(&a.count))
            .take(top_n)
            .collect();

        debug!(distinct = counts.len(), returned = ranked.len(), "Keyword extraction complete");
        ranked
    }
}

/// Extract the `top_n` keywords from `items` with the default text fields and
/// minimum token length of 3.
pub fn extract_keywords(items: &[Item], top_n: usize, stop_words: &BTreeSet<String>) -> Vec<KeywordCount> {
    let text_fields: Vec<String> = DEFAULT_TEXT_FIELDS.iter().map(|f| f.to_string()).collect();
    KeywordMiner::new(&text_fields, stop_words, 3).extract(items, top_n)
}
