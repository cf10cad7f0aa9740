use super::state::CategoryFilter;
use crate::feed::NewsItem;
use std::collections::HashSet;

/// Category tabs: "ALL" first, then each distinct category in first-occurrence order.
///
/// At most one tab is active at a time; it is the tab whose label equals the
/// last label passed to [`CategoryTabs::set_active`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTabs {
    tabs: Vec<CategoryFilter>,
    active: Option<usize>,
}

impl Default for CategoryTabs {
    fn default() -> Self {
        Self::derive(&[])
    }
}

impl CategoryTabs {
    /// Derive the tab set from the loaded items. "ALL" starts out active.
    pub fn derive(items: &[NewsItem]) -> Self {
        let mut seen = HashSet::new();
        let tabs = std::iter::once(CategoryFilter::All)
            .chain(
                items
                    .iter()
                    .filter(|item| seen.insert(item.category.as_str()))
                    .map(|item| CategoryFilter::Named(item.category.clone())),
            )
            .collect();

        Self {
            tabs,
            active: Some(0),
        }
    }

    pub fn tabs(&self) -> &[CategoryFilter] {
        &self.tabs
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    /// Mark the tab whose label equals `filter` as active and every other tab inactive.
    ///
    /// Returns `false`, leaving no tab active, when no tab carries that label.
    pub fn set_active(&mut self, filter: &CategoryFilter) -> bool {
        self.active = self.tabs.iter().position(|tab| tab.label() == filter.label());
        self.active.is_some()
    }

    pub fn is_active(&self, index: usize) -> bool {
        self.active == Some(index)
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn active(&self) -> Option<&CategoryFilter> {
        self.active.and_then(|idx| self.tabs.get(idx))
    }

    /// The tab after the active one, wrapping around.
    pub fn next(&self) -> CategoryFilter {
        let idx = self.active.map_or(0, |idx| (idx + 1) % self.tabs.len());
        self.tabs[idx].clone()
    }

    /// The tab before the active one, wrapping around.
    pub fn prev(&self) -> CategoryFilter {
        let len = self.tabs.len();
        let idx = self.active.map_or(0, |idx| (idx + len - 1) % len);
        self.tabs[idx].clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::state::tests::item;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn labels(tabs: &CategoryTabs) -> Vec<&str> {
        tabs.tabs().iter().map(|t| t.label()).collect()
    }

    #[test]
    fn test_empty_feed_has_only_all() {
        let tabs = CategoryTabs::derive(&[]);
        assert_eq!(labels(&tabs), vec!["ALL"]);
        assert!(tabs.is_active(0));
    }

    #[test]
    fn test_first_occurrence_order() {
        let items = vec![
            item("a", "환율"),
            item("b", "금리"),
            item("c", "환율"),
            item("d", "기타"),
            item("e", "금리"),
        ];
        let tabs = CategoryTabs::derive(&items);
        assert_eq!(labels(&tabs), vec!["ALL", "환율", "금리", "기타"]);
    }

    #[test]
    fn test_set_active_marks_exactly_one() {
        let items = vec![item("a", "환율"), item("b", "금리")];
        let mut tabs = CategoryTabs::derive(&items);

        assert!(tabs.set_active(&CategoryFilter::from_label("금리")));
        let active: Vec<usize> = (0..tabs.len()).filter(|&i| tabs.is_active(i)).collect();
        assert_eq!(active, vec![2]);

        assert!(tabs.set_active(&CategoryFilter::All));
        assert_eq!(tabs.active(), Some(&CategoryFilter::All));
    }

    #[test]
    fn test_set_active_unknown_label() {
        let mut tabs = CategoryTabs::derive(&[item("a", "환율")]);
        assert!(!tabs.set_active(&CategoryFilter::from_label("부동산")));
        assert_eq!(tabs.active_index(), None);
        assert!((0..tabs.len()).all(|i| !tabs.is_active(i)));
    }

    #[test]
    fn test_next_prev_wrap() {
        let mut tabs = CategoryTabs::derive(&[item("a", "환율"), item("b", "금리")]);
        assert_eq!(tabs.next().label(), "환율");
        assert_eq!(tabs.prev().label(), "금리");

        tabs.set_active(&CategoryFilter::from_label("금리"));
        assert_eq!(tabs.next(), CategoryFilter::All);
    }

    #[test]
    fn test_single_tab_navigation_stays() {
        let tabs = CategoryTabs::derive(&[]);
        assert_eq!(tabs.next(), CategoryFilter::All);
        assert_eq!(tabs.prev(), CategoryFilter::All);
    }

    proptest! {
        #[test]
        fn prop_tabs_are_distinct_and_complete(
            cats in prop::collection::vec(prop::sample::select(vec!["금리", "환율", "주식", "기타"]), 0..60)
        ) {
            let items: Vec<NewsItem> = cats.iter().enumerate().map(|(i, c)| item(&i.to_string(), c)).collect();
            let tabs = CategoryTabs::derive(&items);

            prop_assert_eq!(tabs.tabs()[0].clone(), CategoryFilter::All);
            let named: Vec<&str> = tabs.tabs()[1..].iter().map(|t| t.label()).collect();
            let unique: HashSet<&str> = named.iter().copied().collect();
            prop_assert_eq!(unique.len(), named.len());
            for c in &cats {
                prop_assert!(named.contains(c));
            }
        }
    }
}
