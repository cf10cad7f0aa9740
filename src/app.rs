use crate::display::{compute_stats, CategoryFilter, CategoryTabs, DisplayState, FeedStats};
use crate::feed::{FeedDocument, FeedError, FeedLoader, NewsItem};
use crate::keybindings::KeybindingRegistry;
use crate::theme::{StyleMap, ThemeVariant};
use anyhow::Result;
use chrono::{DateTime, Utc};
use ratatui::style::Style;
use reqwest::redirect::Policy;
use std::borrow::Cow;
use std::time::Duration;
use tokio::time::Instant;

/// How long a status message stays on screen.
pub const STATUS_TTL: Duration = Duration::from_secs(3);

// ============================================================================
// HTTP Client Configuration
// ============================================================================

/// Create a custom redirect policy with loop detection and limited hops.
///
/// - Limits redirects to 3 hops maximum
/// - Detects redirect loops (same URL appearing twice in chain)
/// - Logs redirect chain for debugging
fn create_redirect_policy() -> Policy {
    Policy::custom(|attempt| {
        if attempt.previous().len() >= 3 {
            return attempt.error("Too many redirects (max 3)");
        }

        let url = attempt.url();
        for prev in attempt.previous() {
            if prev.as_str() == url.as_str() {
                return attempt.error("Redirect loop detected");
            }
        }

        tracing::debug!(
            from = %attempt.previous().last().map(|u| u.as_str()).unwrap_or("initial"),
            to = %url,
            hop = attempt.previous().len() + 1,
            "Following redirect"
        );

        attempt.follow()
    })
}

/// HTTP client used for fetching the feed document.
///
/// The per-request deadline is enforced by [`FeedLoader`]; the client
/// itself only bounds the connect phase.
pub fn build_http_client() -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .redirect(create_redirect_policy())
        .connect_timeout(Duration::from_secs(10))
        .user_agent(concat!("econfeed/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}

// ============================================================================
// Focus and Load State
// ============================================================================

/// Which region has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Tabs,
    NewsList,
}

/// Where the feed is in its load lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedStatus {
    /// The first load has not completed yet.
    Loading,
    Loaded,
    /// The most recent load failed; the error text is kept for the status bar.
    Failed(String),
}

/// Events from background tasks
#[derive(Debug)]
pub enum AppEvent {
    /// A feed load finished.
    ///
    /// `generation` is the value of [`App::load_generation`] when the load
    /// was spawned; results from older generations are dropped.
    FeedLoaded {
        generation: u64,
        result: Result<FeedDocument, FeedError>,
    },
    /// A background task panicked.
    ///
    /// Carries the generation of the load it belonged to, like `FeedLoaded`.
    TaskPanicked {
        generation: u64,
        task: &'static str,
        error: String,
    },
}

// ============================================================================
// Application State
// ============================================================================

/// Central application state
pub struct App {
    pub loader: FeedLoader,

    // Theme
    pub theme_variant: ThemeVariant,
    pub theme: StyleMap,

    pub keybindings: KeybindingRegistry,

    // Data
    pub display: DisplayState,
    pub tabs: CategoryTabs,
    pub stats: FeedStats,
    /// When the feed generator produced the loaded document.
    pub generated_at: Option<DateTime<Utc>>,
    pub feed_status: FeedStatus,

    // UI State
    pub focus: Focus,
    /// Cursor over the visible cards.
    pub selected: usize,

    /// Status message with expiry. Cow avoids allocation for static literals.
    pub status_message: Option<(Cow<'static, str>, Instant)>,

    /// Dirty flag to skip unnecessary frame renders
    pub needs_redraw: bool,

    /// Generation counter for feed loads.
    ///
    /// Incremented each time a load is spawned. Loads are never cancelled,
    /// so a slow earlier load may finish after a newer one; its
    /// `FeedLoaded` carries the old generation and is ignored.
    pub load_generation: u64,
    /// True while the latest load is in flight.
    pub loading: bool,

    /// Whether the help overlay is currently displayed.
    pub show_help: bool,
    /// Scroll offset in the help screen for long keybinding lists.
    pub help_scroll_offset: usize,
}

impl App {
    pub fn new(loader: FeedLoader) -> Self {
        Self {
            loader,
            theme_variant: ThemeVariant::Dark,
            theme: StyleMap::from_palette(&ThemeVariant::Dark.palette()),
            keybindings: KeybindingRegistry::new(),
            display: DisplayState::new(),
            tabs: CategoryTabs::default(),
            stats: FeedStats::default(),
            generated_at: None,
            feed_status: FeedStatus::Loading,
            focus: Focus::NewsList,
            selected: 0,
            status_message: None,
            needs_redraw: true,
            load_generation: 0,
            loading: false,
            show_help: false,
            help_scroll_offset: 0,
        }
    }

    /// Resolve a semantic role name to its `Style`.
    ///
    /// Returns `Style::default()` for unknown roles.
    pub fn style(&self, role: &str) -> Style {
        self.theme.resolve(role)
    }

    /// Switch to a different theme variant at runtime.
    pub fn set_theme(&mut self, variant: ThemeVariant) {
        self.theme_variant = variant;
        self.theme = StyleMap::from_palette(&variant.palette());
        self.needs_redraw = true;
    }

    /// Cycle to the next theme variant (Dark → Light → Dark).
    ///
    /// Returns the name of the new theme for status display.
    pub fn cycle_theme(&mut self) -> &'static str {
        let next = self.theme_variant.next();
        self.set_theme(next);
        next.name()
    }

    // ------------------------------------------------------------------------
    // Loading
    // ------------------------------------------------------------------------

    /// Mark a new load as started and return its generation.
    pub fn begin_load(&mut self) -> u64 {
        self.load_generation = self.load_generation.wrapping_add(1);
        self.loading = true;
        self.load_generation
    }

    /// Apply a finished load.
    ///
    /// Returns `false` when the result belongs to a superseded load and was
    /// discarded. On success every derived view (stats, tabs, filter, page)
    /// is rebuilt from scratch; on failure the previously loaded items are
    /// kept but the list area switches to the error panel.
    pub fn apply_load(
        &mut self,
        generation: u64,
        result: Result<FeedDocument, FeedError>,
        now: DateTime<Utc>,
    ) -> bool {
        if generation != self.load_generation {
            tracing::debug!(
                generation,
                current = self.load_generation,
                "Discarding stale feed load"
            );
            return false;
        }
        self.loading = false;

        match result {
            Ok(document) => {
                self.stats = compute_stats(&document.items, now);
                self.tabs = CategoryTabs::derive(&document.items);
                self.generated_at = document.generated_at;
                self.display.load(document.items);
                self.selected = 0;
                self.feed_status = FeedStatus::Loaded;
                tracing::debug!(
                    total = self.stats.total,
                    recent = self.stats.recent,
                    trending = self.stats.trending,
                    tabs = self.tabs.len(),
                    "Feed applied"
                );
            }
            Err(e) => {
                tracing::warn!(error = %e, source = %self.loader.source(), "Feed load failed");
                self.feed_status = FeedStatus::Failed(e.to_string());
            }
        }
        self.needs_redraw = true;
        true
    }

    // ------------------------------------------------------------------------
    // Filtering and paging
    // ------------------------------------------------------------------------

    /// Switch the active category and reset paging and the cursor.
    pub fn select_category(&mut self, filter: CategoryFilter) {
        if !self.tabs.set_active(&filter) {
            tracing::debug!(category = %filter, "Selected category has no tab");
        }
        self.display.select_category(filter);
        self.selected = 0;
    }

    pub fn next_category(&mut self) {
        if self.tabs.is_empty() {
            return;
        }
        let next = self.tabs.next();
        self.select_category(next);
    }

    pub fn prev_category(&mut self) {
        if self.tabs.is_empty() {
            return;
        }
        let prev = self.tabs.prev();
        self.select_category(prev);
    }

    /// Reveal the next page. Returns how many cards became visible.
    pub fn load_more(&mut self) -> usize {
        let before = self.display.visible_len();
        self.display.load_more();
        self.display.visible_len() - before
    }

    /// Whether the list area shows the error panel instead of cards.
    pub fn load_failed(&self) -> bool {
        matches!(self.feed_status, FeedStatus::Failed(_))
    }

    // ------------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------------

    pub fn cycle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Tabs => Focus::NewsList,
            Focus::NewsList => Focus::Tabs,
        };
    }

    pub fn nav_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn nav_down(&mut self) {
        let len = self.display.visible_len();
        if len > 0 {
            self.selected = self.selected.saturating_add(1).min(len - 1);
        }
    }

    pub fn nav_top(&mut self) {
        self.selected = 0;
    }

    pub fn nav_bottom(&mut self) {
        self.selected = self.display.visible_len().saturating_sub(1);
    }

    /// Item under the cursor, if any card is visible.
    pub fn selected_item(&self) -> Option<&NewsItem> {
        self.display.visible().nth(self.selected)
    }

    // ------------------------------------------------------------------------
    // Status
    // ------------------------------------------------------------------------

    /// Set status message (will auto-expire after 3 seconds)
    pub fn set_status(&mut self, msg: impl Into<Cow<'static, str>>) {
        self.status_message = Some((msg.into(), Instant::now()));
    }

    /// Clear status message if expired (older than 3 seconds)
    /// Returns true if a message was actually cleared
    pub fn clear_expired_status(&mut self) -> bool {
        if let Some((_, time)) = &self.status_message {
            if time.elapsed() >= STATUS_TTL {
                self.status_message = None;
                return true;
            }
        }
        false
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::display::state::tests::item;
    use crate::display::{ALL_LABEL, PAGE_SIZE};
    use crate::feed::FeedSource;
    use chrono::TimeZone;
    use tokio::time;

    pub(crate) fn test_app() -> App {
        let source = FeedSource::parse("data/feed-latest.json").unwrap();
        App::new(FeedLoader::new(reqwest::Client::new(), source))
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 10, 17, 12, 0, 0).unwrap()
    }

    pub(crate) fn document(items: Vec<NewsItem>) -> FeedDocument {
        FeedDocument {
            generated_at: Some(now()),
            version: None,
            total_items: None,
            items,
        }
    }

    /// An app with a completed first load.
    pub(crate) fn loaded_app(items: Vec<NewsItem>) -> App {
        let mut app = test_app();
        let generation = app.begin_load();
        assert!(app.apply_load(generation, Ok(document(items)), now()));
        app
    }

    #[test]
    fn test_new_app_is_loading() {
        let app = test_app();
        assert_eq!(app.feed_status, FeedStatus::Loading);
        assert!(app.display.items().is_empty());
        assert!(app.selected_item().is_none());
    }

    #[test]
    fn test_apply_load_rebuilds_views() {
        let mut trending = item("b", "환율");
        trending.is_trending = true;
        let app = loaded_app(vec![item("a", "금리"), trending, item("c", "금리")]);

        assert_eq!(app.feed_status, FeedStatus::Loaded);
        assert_eq!(app.stats.total, 3);
        assert_eq!(app.stats.trending, 1);
        let labels: Vec<&str> = app.tabs.tabs().iter().map(|t| t.label()).collect();
        assert_eq!(labels, vec![ALL_LABEL, "금리", "환율"]);
        assert_eq!(app.tabs.active_index(), Some(0));
        assert_eq!(app.generated_at, Some(now()));
        assert!(!app.loading);
    }

    #[test]
    fn test_stale_load_is_discarded() {
        let mut app = test_app();
        let first = app.begin_load();
        let second = app.begin_load();

        assert!(app.apply_load(second, Ok(document(vec![item("new", "금리")])), now()));
        assert!(!app.apply_load(first, Ok(document(vec![item("old", "환율")])), now()));

        assert_eq!(app.display.items().len(), 1);
        assert_eq!(app.display.items()[0].title, "new");
    }

    #[test]
    fn test_failed_refresh_keeps_items() {
        let mut app = loaded_app(vec![item("a", "금리")]);

        let generation = app.begin_load();
        let err = FeedError::HttpStatus(503);
        assert!(app.apply_load(generation, Err(err), now()));

        assert!(app.load_failed());
        assert_eq!(app.display.items().len(), 1);
    }

    #[test]
    fn test_successful_refresh_resets_filter_and_page() {
        let mut app = loaded_app((0..30).map(|i| item(&i.to_string(), "금리")).collect());
        app.select_category(CategoryFilter::from_label("금리"));
        app.load_more();
        app.selected = 5;

        let generation = app.begin_load();
        app.apply_load(generation, Ok(document(vec![item("x", "환율")])), now());

        assert_eq!(*app.display.category(), CategoryFilter::All);
        assert_eq!(app.display.display_count(), PAGE_SIZE);
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn test_category_cycling_updates_tabs_and_filter() {
        let mut app = loaded_app(vec![item("a", "금리"), item("b", "환율")]);
        app.selected = 1;

        app.next_category();
        assert_eq!(app.display.category().label(), "금리");
        assert_eq!(app.tabs.active_index(), Some(1));
        assert_eq!(app.selected, 0);

        app.prev_category();
        app.prev_category();
        assert_eq!(app.display.category().label(), "환율");
        assert_eq!(app.display.filtered_len(), 1);
    }

    #[test]
    fn test_category_cycling_without_tabs_is_noop() {
        let mut app = test_app();
        app.next_category();
        assert_eq!(*app.display.category(), CategoryFilter::All);
    }

    #[test]
    fn test_load_more_reports_revealed_cards() {
        let mut app = loaded_app((0..25).map(|i| item(&i.to_string(), "주식")).collect());
        assert_eq!(app.load_more(), 5);
        assert_eq!(app.load_more(), 0);
        assert_eq!(app.display.display_count(), 3 * PAGE_SIZE);
    }

    #[test]
    fn test_nav_clamps_to_visible() {
        let mut app = loaded_app((0..25).map(|i| item(&i.to_string(), "주식")).collect());
        app.nav_bottom();
        assert_eq!(app.selected, PAGE_SIZE - 1);
        app.nav_down();
        assert_eq!(app.selected, PAGE_SIZE - 1);
        app.nav_top();
        app.nav_up();
        assert_eq!(app.selected, 0);
        assert_eq!(app.selected_item().map(|i| i.title.as_str()), Some("0"));
    }

    #[test]
    fn test_nav_on_empty_list() {
        let mut app = test_app();
        app.nav_down();
        app.nav_bottom();
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn test_cycle_focus_and_theme() {
        let mut app = test_app();
        assert_eq!(app.focus, Focus::NewsList);
        app.cycle_focus();
        assert_eq!(app.focus, Focus::Tabs);

        assert_eq!(app.cycle_theme(), "Light");
        assert_eq!(app.theme_variant, ThemeVariant::Light);
        assert_eq!(app.style("tab_active"), ThemeVariant::Light.palette().tab_active);
    }

    #[tokio::test]
    async fn test_status_expires_after_3_seconds() {
        let mut app = test_app();
        time::pause();
        app.set_status("Test message");

        time::advance(Duration::from_secs(2)).await;
        assert!(!app.clear_expired_status());
        assert!(app.status_message.is_some());

        time::advance(Duration::from_secs(2)).await;
        assert!(app.clear_expired_status());
        assert!(app.status_message.is_none());
    }

    #[tokio::test]
    async fn test_status_not_expired_before_3_seconds() {
        let mut app = test_app();
        time::pause();
        app.set_status("Test");

        time::advance(Duration::from_millis(2999)).await;
        app.clear_expired_status();
        assert!(app.status_message.is_some());
    }
}
