//! econfeed: a terminal viewer for a pre-generated economic news feed.
//!
//! The feed is one JSON document of news items. [`feed`] loads it once,
//! [`display`] turns it into stats, category tabs and pages of cards, and
//! the result is painted either by the terminal [`ui`] or as a static
//! [`html`] page.

pub mod app;
pub mod config;
pub mod display;
pub mod feed;
pub mod html;
pub mod keybindings;
pub mod theme;
pub mod ui;
pub mod util;

/// Title shown in the terminal header and the exported page.
pub const APP_TITLE: &str = "Economic News";
