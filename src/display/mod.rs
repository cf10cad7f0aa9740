//! Pure display pipeline shared by the terminal view and the HTML export.
//!
//! [`DisplayState`] holds the loaded items and the active filter; the
//! renderers turn it into plain data ([`ListView`], [`Card`]) that a painter
//! draws. Nothing here touches the terminal or does I/O.

mod card;
mod list;
pub(crate) mod state;
mod stats;
mod tabs;

pub use card::{render_card, Card, CategoryColor, CATEGORY_COLORS};
pub use list::{render_list, ListBody, ListView, EMPTY_CATEGORY_MESSAGE};
pub use state::{CategoryFilter, DisplayState, ALL_LABEL, PAGE_SIZE};
pub use stats::{compute_stats, FeedStats, RECENT_WINDOW_HOURS};
pub use tabs::CategoryTabs;
