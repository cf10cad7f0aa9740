//! Terminal User Interface module.
//!
//! # Module Structure
//!
//! - `loop_runner` - Main event loop and terminal management
//! - `input` - Keyboard input handling
//! - `events` - Background task event processing
//! - `render` - Layout and overlay dispatch
//! - `helpers` - Background load spawning and panic containment
//! - `header` - Title, last-updated line and stats
//! - `tabs` - Category tab bar
//! - `news` - News card list
//! - `status` - Status bar widget
//! - `help` - Keybinding help overlay

mod events;
mod header;
mod help;
mod helpers;
mod input;
mod loop_runner;
mod news;
mod render;
mod status;
mod tabs;

pub use loop_runner::{run, Action};
