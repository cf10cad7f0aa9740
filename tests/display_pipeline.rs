//! End-to-end tests of the display pipeline: a parsed document flows through
//! stats, tabs, filtering and paging into cards and the exported page.

use chrono::{DateTime, TimeZone, Utc};
use econfeed::app::{App, FeedStatus};
use econfeed::display::{
    compute_stats, render_list, CategoryFilter, CategoryTabs, DisplayState, ListBody, ALL_LABEL,
    PAGE_SIZE,
};
use econfeed::feed::{parse_feed, FeedDocument, FeedError, FeedLoader, FeedSource, NewsItem};
use econfeed::html::{export_document, export_failure};
use pretty_assertions::assert_eq;

const SAMPLE: &str = include_str!("fixtures/feed-sample.json");

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 10, 17, 12, 0, 0).unwrap()
}

fn sample() -> FeedDocument {
    let result = parse_feed(SAMPLE.as_bytes()).unwrap();
    assert_eq!(result.skipped, 1);
    result.document
}

fn bulk(n: usize, category: &str) -> Vec<NewsItem> {
    let doc = format!(
        r#"{{"items": [{}]}}"#,
        (0..n)
            .map(|i| format!(
                r#"{{"title": "n{i}", "url": "https://e.com/{i}", "source": {{"name": "S"}}, "category": "{category}"}}"#
            ))
            .collect::<Vec<_>>()
            .join(",")
    );
    parse_feed(doc.as_bytes()).unwrap().document.items
}

fn app() -> App {
    let source = FeedSource::parse("data/feed-latest.json").unwrap();
    App::new(FeedLoader::new(reqwest::Client::new(), source))
}

#[test]
fn test_stats_over_sample() {
    let stats = compute_stats(&sample().items, now());
    assert_eq!(stats.total, 5);
    assert_eq!(stats.recent, 2);
    assert_eq!(stats.trending, 2);
}

#[test]
fn test_tabs_follow_first_occurrence() {
    let tabs = CategoryTabs::derive(&sample().items);
    let labels: Vec<&str> = tabs.tabs().iter().map(|t| t.label()).collect();
    assert_eq!(labels, vec![ALL_LABEL, "금리", "환율", "주식", "기타"]);
    assert_eq!(tabs.active_index(), Some(0));
}

#[test]
fn test_category_filter_then_cards() {
    let mut state = DisplayState::new();
    state.load(sample().items);
    state.select_category(CategoryFilter::from_label("금리"));

    let view = render_list(&state, now());
    let titles: Vec<&str> = view.cards().iter().map(|c| c.title.as_str()).collect();
    assert_eq!(titles, vec!["Fed holds rates steady", "BoK signals cut"]);
    assert!(!view.show_load_more);

    let fed = &view.cards()[0];
    assert_eq!(fed.time, "1 hours ago");
    assert_eq!(fed.tags, vec!["#연준".to_string(), "#FOMC".to_string()]);
    assert!(fed.trending);
}

#[test]
fn test_unknown_category_shows_placeholder() {
    let mut state = DisplayState::new();
    state.load(sample().items);
    state.select_category(CategoryFilter::from_label("부동산"));

    let view = render_list(&state, now());
    assert_eq!(view.body, ListBody::Empty);
    assert!(!view.show_load_more);
}

#[test]
fn test_paging_through_large_category() {
    let mut state = DisplayState::new();
    state.load(bulk(45, "주식"));

    assert_eq!(render_list(&state, now()).cards().len(), PAGE_SIZE);
    state.load_more();
    assert_eq!(render_list(&state, now()).cards().len(), 2 * PAGE_SIZE);
    state.load_more();
    let view = render_list(&state, now());
    assert_eq!(view.cards().len(), 45);
    assert!(!view.show_load_more);

    // Switching category restarts paging
    state.select_category(CategoryFilter::All);
    assert_eq!(state.display_count(), PAGE_SIZE);
}

#[test]
fn test_app_refresh_cycle() {
    let mut app = app();

    let first = app.begin_load();
    assert!(app.apply_load(first, Ok(sample()), now()));
    app.next_category();
    assert_eq!(app.display.category().label(), "금리");

    // A refresh started while an older one is still pending wins
    let stale = app.begin_load();
    let fresh = app.begin_load();
    let replacement = FeedDocument {
        items: bulk(3, "환율"),
        ..FeedDocument::default()
    };
    assert!(app.apply_load(fresh, Ok(replacement), now()));
    assert!(!app.apply_load(stale, Err(FeedError::Timeout), now()));

    assert_eq!(app.feed_status, FeedStatus::Loaded);
    assert_eq!(*app.display.category(), CategoryFilter::All);
    assert_eq!(app.stats.total, 3);
    assert_eq!(app.tabs.len(), 2);
}

#[test]
fn test_exported_page() {
    let html = export_document(sample(), CategoryFilter::from_label("환율"), 0, now());

    assert!(html.starts_with("<!DOCTYPE html>"));
    assert_eq!(html.matches(r#"<article class="card">"#).count(), 1);
    assert!(html.contains("원/달러 환율 1,380원 돌파"));
    assert!(html.contains(r#"rel="noopener noreferrer""#));
    assert!(html.contains(r#"class="tab active" data-category="환율""#));
    assert!(html.contains("load-more hidden"));

    let failed = export_failure();
    assert!(failed.contains("Failed to load the news feed."));
    assert!(!failed.contains("<article"));
}
