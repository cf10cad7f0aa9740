use crate::feed::NewsItem;
use chrono::{DateTime, Duration, Utc};

/// Items published within this many hours of `now` count as recent.
pub const RECENT_WINDOW_HOURS: i64 = 6;

/// Summary counts over the whole feed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeedStats {
    pub total: usize,
    /// Published strictly after `now - 6h`.
    pub recent: usize,
    pub trending: usize,
}

/// Count items, recent items and trending items.
///
/// Items without a publication time are never recent.
pub fn compute_stats(items: &[NewsItem], now: DateTime<Utc>) -> FeedStats {
    let cutoff = now - Duration::hours(RECENT_WINDOW_HOURS);

    items.iter().fold(
        FeedStats {
            total: items.len(),
            ..FeedStats::default()
        },
        |mut stats, item| {
            if item.published_at.is_some_and(|published| published > cutoff) {
                stats.recent += 1;
            }
            if item.is_trending {
                stats.trending += 1;
            }
            stats
        },
    )
}
