use crate::feed::{NewsItem, OTHER_CATEGORY};
use crate::util::{format_relative, strip_control_chars, TIME_PLACEHOLDER};
use chrono::{DateTime, Local, Utc};

/// Badge color of a category label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoryColor {
    Blue,
    Red,
    Green,
    Purple,
    Yellow,
    Orange,
    Indigo,
    Pink,
    Teal,
    Gray,
}

/// Known categories and their badge colors. The last entry is the fallback.
pub const CATEGORY_COLORS: [(&str, CategoryColor); 10] = [
    ("거시경제", CategoryColor::Blue),
    ("금리", CategoryColor::Red),
    ("환율", CategoryColor::Green),
    ("주식", CategoryColor::Purple),
    ("원자재", CategoryColor::Yellow),
    ("부동산", CategoryColor::Orange),
    ("암호화폐", CategoryColor::Indigo),
    ("정책", CategoryColor::Pink),
    ("무역", CategoryColor::Teal),
    (OTHER_CATEGORY, CategoryColor::Gray),
];

impl CategoryColor {
    /// Color for a category label. Unknown labels get the "기타" color.
    pub fn for_category(category: &str) -> Self {
        CATEGORY_COLORS
            .iter()
            .find(|(label, _)| *label == category)
            .map_or(Self::OTHER, |&(_, color)| color)
    }

    const OTHER: Self = Self::Gray;

    /// Utility classes used for the badge in the HTML page.
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Blue => "bg-blue-100 text-blue-800",
            Self::Red => "bg-red-100 text-red-800",
            Self::Green => "bg-green-100 text-green-800",
            Self::Purple => "bg-purple-100 text-purple-800",
            Self::Yellow => "bg-yellow-100 text-yellow-800",
            Self::Orange => "bg-orange-100 text-orange-800",
            Self::Indigo => "bg-indigo-100 text-indigo-800",
            Self::Pink => "bg-pink-100 text-pink-800",
            Self::Teal => "bg-teal-100 text-teal-800",
            Self::Gray => "bg-gray-100 text-gray-800",
        }
    }
}

/// Display fragment for one news item.
///
/// Plain data: the terminal and HTML painters decide how it looks. Text
/// fields are stripped of terminal control sequences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub category: String,
    pub color: CategoryColor,
    pub trending: bool,
    /// Relative publication time, or `-` when unknown.
    pub time: String,
    pub title: String,
    pub summary: String,
    pub source: String,
    pub country: String,
    pub url: String,
    /// Tags, each prefixed with `#`. Empty when the item has none.
    pub tags: Vec<String>,
}

impl Card {
    pub fn has_tags(&self) -> bool {
        !self.tags.is_empty()
    }
}

fn clean(s: &str) -> String {
    strip_control_chars(s).into_owned()
}

/// Project an item into a card, timing it relative to `now`.
pub fn render_card(item: &NewsItem, now: DateTime<Utc>) -> Card {
    let time = item.published_at.map_or_else(
        || TIME_PLACEHOLDER.to_string(),
        |published| format_relative(&published.with_timezone(&Local), now),
    );

    Card {
        category: clean(&item.category),
        color: CategoryColor::for_category(&item.category),
        trending: item.is_trending,
        time,
        title: clean(&item.title),
        summary: clean(item.summary.display_text()),
        source: clean(&item.source.name),
        country: clean(&item.country),
        url: item.url.clone(),
        tags: item
            .tags
            .iter()
            .map(|tag| format!("#{}", strip_control_chars(tag)))
            .collect(),
    }
}
