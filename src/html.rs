//! Static HTML rendering of the feed view.
//!
//! These are maud functions returning `Markup` fragments, composed into one
//! self-contained page. Every feed-supplied string goes through maud's
//! escaping; outbound links open in a new tab without an opener reference or
//! referrer.

use chrono::{DateTime, Utc};
use maud::{html, Markup, PreEscaped, DOCTYPE};

use crate::display::{
    compute_stats, render_list, Card, CategoryFilter, CategoryTabs, DisplayState, FeedStats,
    ListBody, ListView, EMPTY_CATEGORY_MESSAGE,
};
use crate::feed::{FeedDocument, LOAD_FAILED_HINT, LOAD_FAILED_MESSAGE};
use crate::util::{format_last_updated, validate_url_for_open, TIME_PLACEHOLDER};
use crate::APP_TITLE;

/// Inline CSS: layout plus the badge color classes used by [`crate::display::CategoryColor`].
pub const PAGE_CSS: &str = r#"
*{margin:0;padding:0;box-sizing:border-box}
body{font-family:-apple-system,BlinkMacSystemFont,"Segoe UI","Apple SD Gothic Neo","Malgun Gothic",sans-serif;background:#f9fafb;color:#111827;line-height:1.5}
header{background:#fff;border-bottom:1px solid #e5e7eb;padding:1rem 1.5rem}
header h1{font-size:1.5rem;font-weight:700}
.updated{font-size:.85rem;color:#6b7280}
main{max-width:960px;margin:0 auto;padding:1rem}
.stats{display:flex;gap:1rem;margin:1rem 0}
.stat{flex:1;background:#fff;border-radius:8px;padding:.75rem 1rem}
.stat-label{font-size:.8rem;color:#6b7280}
.stat-value{font-size:1.5rem;font-weight:700}
.tabs{display:flex;flex-wrap:wrap;gap:.5rem;margin-bottom:1rem}
.tab{padding:.35rem .9rem;border-radius:999px;background:#fff;color:#374151;font-size:.9rem}
.tab.active{background:#1f2937;color:#fff}
.news{display:grid;gap:1rem}
.card{background:#fff;border-radius:8px;padding:1rem 1.25rem}
.card-meta{display:flex;align-items:center;gap:.5rem;font-size:.8rem;color:#6b7280;margin-bottom:.5rem}
.badge{padding:.1rem .55rem;border-radius:999px;font-weight:600}
.trending{background:#fee2e2;color:#b91c1c;padding:.1rem .55rem;border-radius:999px}
.card h2{font-size:1.05rem;margin-bottom:.35rem}
.card h2 a{color:inherit;text-decoration:none}
.card h2 a:hover{text-decoration:underline}
.summary{color:#4b5563;font-size:.92rem}
.source{margin-top:.5rem;font-size:.8rem;color:#9ca3af}
.tags{margin-top:.5rem;display:flex;flex-wrap:wrap;gap:.35rem;font-size:.78rem;color:#2563eb}
.placeholder,.error{text-align:center;padding:3rem 1rem;color:#6b7280}
.error p:first-child{color:#b91c1c;font-weight:600}
.load-more{display:block;margin:1.5rem auto;padding:.6rem 1.5rem;border:none;border-radius:6px;background:#1f2937;color:#fff}
.hidden{display:none}
.bg-blue-100{background:#dbeafe}.text-blue-800{color:#1e40af}
.bg-red-100{background:#fee2e2}.text-red-800{color:#991b1b}
.bg-green-100{background:#dcfce7}.text-green-800{color:#166534}
.bg-purple-100{background:#f3e8ff}.text-purple-800{color:#6b21a8}
.bg-yellow-100{background:#fef9c3}.text-yellow-800{color:#854d0e}
.bg-orange-100{background:#ffedd5}.text-orange-800{color:#9a3412}
.bg-indigo-100{background:#e0e7ff}.text-indigo-800{color:#3730a3}
.bg-pink-100{background:#fce7f3}.text-pink-800{color:#9d174d}
.bg-teal-100{background:#ccfbf1}.text-teal-800{color:#115e59}
.bg-gray-100{background:#f3f4f6}.text-gray-800{color:#1f2937}
"#;

/// What goes into the list area of the page.
#[derive(Debug, Clone, Copy)]
pub enum ListArea<'a> {
    View(&'a ListView),
    /// The feed could not be loaded.
    LoadFailed,
}

/// Everything the page shows.
#[derive(Debug, Clone, Copy)]
pub struct PageData<'a> {
    pub title: &'a str,
    pub last_updated: &'a str,
    pub stats: FeedStats,
    pub tabs: &'a CategoryTabs,
    pub list: ListArea<'a>,
}

/// Render a loaded feed as a complete page.
///
/// Applies the same transitions the terminal view does: load, select
/// `category`, then `extra_pages` load-more steps.
pub fn export_document(
    document: FeedDocument,
    category: CategoryFilter,
    extra_pages: usize,
    now: DateTime<Utc>,
) -> String {
    let stats = compute_stats(&document.items, now);
    let mut tabs = CategoryTabs::derive(&document.items);
    let last_updated = format_last_updated(document.generated_at);

    let mut state = DisplayState::new();
    state.load(document.items);
    tabs.set_active(&category);
    state.select_category(category);
    for _ in 0..extra_pages {
        state.load_more();
    }

    let view = render_list(&state, now);
    let page = PageData {
        title: APP_TITLE,
        last_updated: &last_updated,
        stats,
        tabs: &tabs,
        list: ListArea::View(&view),
    };
    render_page(&page).into_string()
}

/// Render the page shown when the feed could not be loaded.
pub fn export_failure() -> String {
    let tabs = CategoryTabs::default();
    let page = PageData {
        title: APP_TITLE,
        last_updated: TIME_PLACEHOLDER,
        stats: FeedStats::default(),
        tabs: &tabs,
        list: ListArea::LoadFailed,
    };
    render_page(&page).into_string()
}

/// Render the full page.
pub fn render_page(page: &PageData<'_>) -> Markup {
    html! {
        (DOCTYPE)
        html lang="ko" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (page.title) }
                style { (PreEscaped(PAGE_CSS)) }
            }
            body {
                header {
                    h1 { (page.title) }
                    div class="updated" id="lastUpdate" { "Last updated: " (page.last_updated) }
                }
                main {
                    (stats_bar(&page.stats))
                    (tab_bar(page.tabs))
                    @match page.list {
                        ListArea::View(view) => {
                            (news_list(view))
                        }
                        ListArea::LoadFailed => {
                            (error_panel())
                        }
                    }
                }
            }
        }
    }
}

/// Total, recent and trending counts.
pub fn stats_bar(stats: &FeedStats) -> Markup {
    html! {
        section class="stats" {
            div class="stat" {
                div class="stat-label" { "Total" }
                div class="stat-value" id="totalCount" { (stats.total) }
            }
            div class="stat" {
                div class="stat-label" { "Last 6 hours" }
                div class="stat-value" id="recentCount" { (stats.recent) }
            }
            div class="stat" {
                div class="stat-label" { "Trending" }
                div class="stat-value" id="trendingCount" { (stats.trending) }
            }
        }
    }
}

/// Category tabs; the active one carries the `active` class.
pub fn tab_bar(tabs: &CategoryTabs) -> Markup {
    html! {
        nav class="tabs" id="categoryTabs" {
            @for (idx, tab) in tabs.tabs().iter().enumerate() {
                @let active = tabs.is_active(idx);
                button.tab.active[active] data-category=(tab.label()) {
                    (tab.label())
                }
            }
        }
    }
}

/// Cards or the empty-category placeholder, plus the load-more button.
pub fn news_list(view: &ListView) -> Markup {
    html! {
        section class="news" id="newsList" {
            @match &view.body {
                ListBody::Empty => {
                    div class="placeholder" { (EMPTY_CATEGORY_MESSAGE) }
                }
                ListBody::Cards(cards) => {
                    @for card in cards {
                        (card_fragment(card))
                    }
                }
            }
        }
        button.load-more.hidden[!view.show_load_more] id="loadMoreBtn" {
            "Load more"
        }
    }
}

/// One news card.
///
/// The title links out only when the URL passes [`validate_url_for_open`];
/// otherwise it is plain text.
pub fn card_fragment(card: &Card) -> Markup {
    let link_ok = match validate_url_for_open(&card.url) {
        Ok(_) => true,
        Err(e) => {
            tracing::warn!(url = %card.url, error = %e, "Not linking unsafe article URL");
            false
        }
    };

    html! {
        article class="card" {
            div class="card-meta" {
                span class={ "badge " (card.color.css_class()) } { (card.category) }
                @if card.trending {
                    span class="trending" { "Trending" }
                }
                span class="time" { (card.time) }
            }
            h2 {
                @if link_ok {
                    a href=(card.url) target="_blank" rel="noopener noreferrer" { (card.title) }
                } @else {
                    (card.title)
                }
            }
            p class="summary" { (card.summary) }
            div class="source" { (card.source) " · " (card.country) }
            @if card.has_tags() {
                div class="tags" {
                    @for tag in &card.tags {
                        span class="tag" { (tag) }
                    }
                }
            }
        }
    }
}

/// The "feed unavailable" panel.
pub fn error_panel() -> Markup {
    html! {
        section class="error" id="newsList" {
            p { (LOAD_FAILED_MESSAGE) }
            p { (LOAD_FAILED_HINT) }
        }
    }
}
