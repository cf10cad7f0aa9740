use super::types::{lenient_timestamp, FeedDocument, NewsItem};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{Map, Value};

/// Outcome of parsing a feed document.
///
/// Malformed items do not fail the document; they are dropped and counted in
/// `skipped` so the caller can report them.
#[derive(Debug)]
pub struct ParseResult {
    pub document: FeedDocument,
    pub skipped: usize,
}

#[derive(Deserialize)]
struct RawDocument {
    #[serde(default, deserialize_with = "lenient_timestamp")]
    generated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    version: Option<String>,
    #[serde(default)]
    total_items: Option<u64>,
    #[serde(default)]
    items: Option<Vec<serde_json::Value>>,
}

/// Parse a feed document from raw JSON bytes.
///
/// The top level must be an object. A missing or `null` `items` field yields
/// an empty item list; a non-array `items` is an error. Each item is decoded
/// on its own and skipped if it does not match the item shape.
pub fn parse_feed(bytes: &[u8]) -> Result<ParseResult, serde_json::Error> {
    // Decoding through a map rejects arrays, which derived structs would accept
    let object: Map<String, Value> = serde_json::from_slice(bytes)?;
    let raw: RawDocument = serde_json::from_value(Value::Object(object))?;

    let values = raw.items.unwrap_or_default();
    let total = values.len();
    let mut skipped = 0;

    let items: Vec<NewsItem> = values
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value::<NewsItem>(value) {
            Ok(item) => Some(item),
            Err(e) => {
                skipped += 1;
                tracing::debug!(index, error = %e, "Skipping malformed feed item");
                None
            }
        })
        .collect();

    tracing::debug!(total, kept = items.len(), skipped, "Parsed feed document");

    Ok(ParseResult {
        document: FeedDocument {
            generated_at: raw.generated_at,
            version: raw.version,
            total_items: raw.total_items,
            items,
        },
        skipped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = r#"{
        "generated_at": "2024-10-17T03:00:00Z",
        "version": "1.0",
        "total_items": 2,
        "items": [
            {
                "id": "1",
                "title": "美 연준 금리 동결",
                "url": "https://example.com/fed",
                "source": { "name": "Reuters" },
                "published_at": "2024-10-17T02:00:00Z",
                "category": "금리",
                "tags": ["연준"],
                "country": "US",
                "summary": { "auto": "연준이 금리를 동결했다...", "source": "" },
                "is_trending": true
            },
            {
                "id": "2",
                "title": "원/달러 환율 상승",
                "url": "https://example.com/fx",
                "source": { "name": "연합뉴스" },
                "published_at": "2024-10-16T17:00:00Z",
                "category": "환율",
                "tags": [],
                "country": "KR",
                "summary": { "auto": "", "source": "환율이 올랐다" },
                "is_trending": false
            }
        ]
    }"#;

    #[test]
    fn test_parse_sample_document() {
        let result = parse_feed(SAMPLE.as_bytes()).unwrap();
        assert_eq!(result.skipped, 0);

        let doc = result.document;
        assert_eq!(
            doc.generated_at,
            Some(Utc.with_ymd_and_hms(2024, 10, 17, 3, 0, 0).unwrap())
        );
        assert_eq!(doc.version.as_deref(), Some("1.0"));
        assert_eq!(doc.total_items, Some(2));

        let titles: Vec<&str> = doc.items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["美 연준 금리 동결", "원/달러 환율 상승"]);
        assert_eq!(doc.items[1].summary.display_text(), "환율이 올랐다");
    }

    #[test]
    fn test_missing_items_is_empty() {
        let result = parse_feed(br#"{"generated_at": "2024-10-17T03:00:00Z"}"#).unwrap();
        assert!(result.document.items.is_empty());
        assert_eq!(result.skipped, 0);
    }

    #[test]
    fn test_null_items_is_empty() {
        let result = parse_feed(br#"{"items": null}"#).unwrap();
        assert!(result.document.items.is_empty());
    }

    #[test]
    fn test_missing_generated_at_is_none() {
        let result = parse_feed(br#"{"items": []}"#).unwrap();
        assert_eq!(result.document.generated_at, None);

        let result = parse_feed(br#"{"generated_at": "whenever", "items": []}"#).unwrap();
        assert_eq!(result.document.generated_at, None);
    }

    #[test]
    fn test_malformed_items_are_skipped_in_order() {
        let json = r#"{"items": [
            {"title": "first", "url": "https://a", "source": {"name": "A"}},
            {"title": "no url", "source": {"name": "B"}},
            42,
            {"title": "last", "url": "https://c", "source": {"name": "C"}, "tags": "oops"},
            {"title": "kept", "url": "https://d", "source": {"name": "D"}}
        ]}"#;
        let result = parse_feed(json.as_bytes()).unwrap();
        assert_eq!(result.skipped, 3);
        let titles: Vec<&str> = result
            .document
            .items
            .iter()
            .map(|i| i.title.as_str())
            .collect();
        assert_eq!(titles, vec!["first", "kept"]);
    }

    #[test]
    fn test_non_object_document_fails() {
        assert!(parse_feed(b"[]").is_err());
        assert!(parse_feed(b"\"feed\"").is_err());
        assert!(parse_feed(b"<html>").is_err());
        assert!(parse_feed(b"").is_err());
    }

    #[test]
    fn test_top_level_array_is_not_a_document() {
        assert!(parse_feed(br#"["2024-10-17T03:00:00Z"]"#).is_err());
        assert!(parse_feed(br#"[null, "1.0", 1, []]"#).is_err());
    }

    #[test]
    fn test_null_optional_fields_keep_item() {
        let json = r#"{"items": [
            {"title": "t", "url": "https://a", "source": {"name": "A"},
             "is_trending": null, "tags": null, "summary": null, "country": null}
        ]}"#;
        let result = parse_feed(json.as_bytes()).unwrap();
        assert_eq!(result.skipped, 0);
        let item = &result.document.items[0];
        assert!(!item.is_trending);
        assert!(item.tags.is_empty());
        assert_eq!(item.summary.display_text(), "");
        assert_eq!(item.country, "");
    }

    #[test]
    fn test_non_array_items_fails() {
        assert!(parse_feed(br#"{"items": {"title": "x"}}"#).is_err());
        assert!(parse_feed(br#"{"items": "none"}"#).is_err());
    }
}
