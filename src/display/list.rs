use super::card::{render_card, Card};
use super::state::DisplayState;
use chrono::{DateTime, Utc};

/// Placeholder shown when the active category has nothing to display.
pub const EMPTY_CATEGORY_MESSAGE: &str = "No news in this category.";

/// What the list area shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListBody {
    /// The filtered slice was empty.
    Empty,
    /// Cards for the visible slice, in feed order.
    Cards(Vec<Card>),
}

/// The rendered list area plus the "load more" affordance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListView {
    pub body: ListBody,
    pub show_load_more: bool,
}

impl ListView {
    pub fn cards(&self) -> &[Card] {
        match &self.body {
            ListBody::Empty => &[],
            ListBody::Cards(cards) => cards,
        }
    }
}

/// Render the first `display_count` filtered items.
///
/// "Load more" is offered only while filtered items remain hidden.
pub fn render_list(state: &DisplayState, now: DateTime<Utc>) -> ListView {
    let cards: Vec<Card> = state.visible().map(|item| render_card(item, now)).collect();

    let body = if cards.is_empty() {
        ListBody::Empty
    } else {
        ListBody::Cards(cards)
    };

    ListView {
        body,
        show_load_more: state.has_more(),
    }
}
