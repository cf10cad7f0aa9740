use crate::util::parse_timestamp;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

/// Catch-all category for items the generator could not classify.
pub const OTHER_CATEGORY: &str = "기타";

/// One news entry from the feed. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewsItem {
    /// Stable identifier assigned by the feed generator, when present.
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default = "other_category", deserialize_with = "category_or_other")]
    pub category: String,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub summary: Summary,
    pub source: Source,
    #[serde(default, deserialize_with = "null_as_default")]
    pub country: String,
    pub url: String,
    /// `None` when the feed carried no usable publication time.
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub collected_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_trending: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub relevance_score: Option<f64>,
}

/// Generated and source-provided summaries.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Summary {
    #[serde(default)]
    pub auto: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
}

impl Summary {
    /// The text to display: `auto` when present and non-empty, else `source`.
    pub fn display_text(&self) -> &str {
        match self.auto.as_deref() {
            Some(auto) if !auto.is_empty() => auto,
            _ => self.source.as_deref().unwrap_or(""),
        }
    }
}

/// Publisher of an item.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Source {
    pub name: String,
    #[serde(default)]
    pub domain: Option<String>,
    /// Copyright status reported by the generator (e.g. "official").
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

/// A fully parsed feed document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedDocument {
    /// `None` when the document had no parseable `generated_at`.
    pub generated_at: Option<DateTime<Utc>>,
    pub version: Option<String>,
    /// Item count claimed by the generator; may disagree with `items.len()`.
    pub total_items: Option<u64>,
    pub items: Vec<NewsItem>,
}

fn other_category() -> String {
    OTHER_CATEGORY.to_string()
}

fn category_or_other<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(match raw {
        Some(s) if !s.trim().is_empty() => s,
        _ => other_category(),
    })
}

/// Treat an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Deserialize an optional timestamp string, mapping unparseable values to `None`.
pub(crate) fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_timestamp))
}
