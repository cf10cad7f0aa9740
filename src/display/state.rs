use crate::feed::NewsItem;
use std::fmt;
use std::sync::Arc;

/// Number of cards revealed initially and by each "load more".
pub const PAGE_SIZE: usize = 20;

/// Label of the tab that shows every item.
pub const ALL_LABEL: &str = "ALL";

/// The active category filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum CategoryFilter {
    /// No filtering; every item is shown.
    #[default]
    All,
    /// Only items whose `category` equals this label.
    Named(String),
}

impl CategoryFilter {
    /// Build a filter from a tab label. `"ALL"` selects [`CategoryFilter::All`].
    pub fn from_label(label: &str) -> Self {
        if label == ALL_LABEL {
            Self::All
        } else {
            Self::Named(label.to_string())
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::All => ALL_LABEL,
            Self::Named(name) => name,
        }
    }

    pub fn matches(&self, item: &NewsItem) -> bool {
        match self {
            Self::All => true,
            Self::Named(name) => item.category == *name,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Which slice of the feed is on screen.
///
/// Holds the loaded items, the active category and how many filtered items
/// are revealed. The filtered view is stored as indices into the loaded
/// items and is recomputed on every category change, so it can never go
/// stale. Transitions are synchronous and never fail.
#[derive(Debug, Clone)]
pub struct DisplayState {
    items: Arc<[NewsItem]>,
    filtered: Vec<usize>,
    category: CategoryFilter,
    display_count: usize,
}

impl Default for DisplayState {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayState {
    /// An empty state: no items, "ALL" selected, one page revealed.
    pub fn new() -> Self {
        Self {
            items: Arc::from(Vec::new()),
            filtered: Vec::new(),
            category: CategoryFilter::All,
            display_count: PAGE_SIZE,
        }
    }

    /// Replace the loaded items and return to the initial state ("ALL", one page).
    pub fn load(&mut self, items: Vec<NewsItem>) {
        self.items = Arc::from(items);
        self.select_category(CategoryFilter::All);
    }

    /// Switch to `category` and reset the revealed count to one page.
    ///
    /// Selecting the active category again yields the same state.
    pub fn select_category(&mut self, category: CategoryFilter) {
        self.filtered = self
            .items
            .iter()
            .enumerate()
            .filter(|(_, item)| category.matches(item))
            .map(|(idx, _)| idx)
            .collect();
        self.category = category;
        self.display_count = PAGE_SIZE;
    }

    /// Reveal one more page. Going past the end of the filtered list is allowed.
    pub fn load_more(&mut self) {
        self.display_count = self.display_count.saturating_add(PAGE_SIZE);
    }

    /// All loaded items, in feed order.
    pub fn items(&self) -> &[NewsItem] {
        &self.items
    }

    /// Shared handle to the loaded items.
    pub fn items_arc(&self) -> Arc<[NewsItem]> {
        Arc::clone(&self.items)
    }

    pub fn category(&self) -> &CategoryFilter {
        &self.category
    }

    pub fn display_count(&self) -> usize {
        self.display_count
    }

    /// Items matching the active category, in feed order.
    pub fn filtered(&self) -> impl Iterator<Item = &NewsItem> + '_ {
        self.filtered.iter().map(move |&idx| &self.items[idx])
    }

    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    /// The first `display_count` filtered items.
    pub fn visible(&self) -> impl Iterator<Item = &NewsItem> + '_ {
        self.filtered().take(self.display_count)
    }

    pub fn visible_len(&self) -> usize {
        self.filtered.len().min(self.display_count)
    }

    /// Whether the "load more" affordance should be offered.
    pub fn has_more(&self) -> bool {
        self.filtered.len() > self.display_count
    }
}
