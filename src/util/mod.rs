//! Utility functions shared by the feed, display and UI layers.
//!
//! - **Time formatting**: absolute and "time ago" strings, lenient timestamp parsing
//! - **Text processing**: Unicode-aware width, truncation, line clamping, control-char stripping
//! - **URL validation**: refusing unsafe article links before opening them
//!
//! # Examples
//!
//! ```
//! use econfeed::util::{display_width, truncate_to_width};
//!
//! assert_eq!(display_width("금리"), 4);
//! assert_eq!(truncate_to_width("Fed holds rates steady", 12), "Fed holds...");
//! ```

mod text;
mod time;
mod url_validator;

pub use text::{clamp_lines, display_width, strip_control_chars, truncate_to_width};
pub use time::{
    format_absolute, format_last_updated, format_relative, parse_timestamp, TIME_PLACEHOLDER,
};
pub use url_validator::{validate_url_for_open, UrlValidationError};
