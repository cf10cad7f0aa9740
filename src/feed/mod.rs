//! Feed loading for the pre-generated economic news document.
//!
//! - **Types**: [`NewsItem`] and [`FeedDocument`], deserialized leniently
//! - **Parsing**: per-item decoding that skips malformed entries
//! - **Loading**: one-shot fetch from an http(s) URL or a local file
//!
//! # Example
//!
//! ```ignore
//! use econfeed::feed::{FeedLoader, FeedSource};
//!
//! let source = FeedSource::parse("data/feed-latest.json")?;
//! let document = FeedLoader::new(reqwest::Client::new(), source).load().await?;
//! ```

mod loader;
mod parser;
mod types;

pub use loader::{
    FeedError, FeedLoader, FeedSource, DEFAULT_FEED, DEFAULT_TIMEOUT, LOAD_FAILED_HINT,
    LOAD_FAILED_MESSAGE,
};
pub use parser::{parse_feed, ParseResult};
pub use types::{FeedDocument, NewsItem, Source, Summary, OTHER_CATEGORY};
