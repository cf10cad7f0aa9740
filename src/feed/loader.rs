use super::parser::{parse_feed, ParseResult};
use super::types::FeedDocument;
use futures::StreamExt;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Default feed location, relative to the working directory.
pub const DEFAULT_FEED: &str = "data/feed-latest.json";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const MAX_FEED_SIZE: usize = 10 * 1024 * 1024; // 10MB

/// Headline shown in the list area when a load fails.
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load the news feed.";
/// Follow-up line shown under [`LOAD_FAILED_MESSAGE`].
pub const LOAD_FAILED_HINT: &str = "Please try again later.";

/// Errors that make the feed unavailable.
///
/// Users see a single "feed unavailable" panel regardless of the variant;
/// the variant and its payload exist for logging.
#[derive(Debug, Error)]
pub enum FeedError {
    /// Network-level error (DNS, connection, TLS, etc.)
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),
    /// HTTP response with non-2xx status code
    #[error("HTTP error: status {0}")]
    HttpStatus(u16),
    /// Request exceeded the configured timeout
    #[error("Request timed out")]
    Timeout,
    /// Response body exceeded the 10MB size limit
    #[error("Response too large")]
    ResponseTooLarge,
    /// Response was incomplete (received fewer bytes than Content-Length)
    #[error("Incomplete response: expected {expected} bytes, received {received}")]
    IncompleteResponse { expected: u64, received: usize },
    /// Local feed file could not be read
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Document is not a JSON object of the expected shape
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    /// The feed location could not be interpreted
    #[error("Invalid feed source: {0}")]
    InvalidSource(String),
}

/// Where the feed document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedSource {
    /// Fetched over http(s).
    Remote(Url),
    /// Read from the local filesystem.
    Local(PathBuf),
}

impl FeedSource {
    /// Interpret a feed location string.
    ///
    /// `http://` and `https://` URLs are remote, `file://` URLs and
    /// everything else are filesystem paths.
    ///
    /// ```
    /// use econfeed::feed::FeedSource;
    ///
    /// assert!(matches!(FeedSource::parse("https://example.com/feed.json"), Ok(FeedSource::Remote(_))));
    /// assert!(matches!(FeedSource::parse("data/feed-latest.json"), Ok(FeedSource::Local(_))));
    /// ```
    pub fn parse(raw: &str) -> Result<Self, FeedError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(FeedError::InvalidSource("empty feed location".into()));
        }

        let lower = raw.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            let url = Url::parse(raw).map_err(|e| FeedError::InvalidSource(e.to_string()))?;
            return Ok(Self::Remote(url));
        }

        if lower.starts_with("file://") {
            let url = Url::parse(raw).map_err(|e| FeedError::InvalidSource(e.to_string()))?;
            let path = url
                .to_file_path()
                .map_err(|()| FeedError::InvalidSource(format!("not a local path: {raw}")))?;
            return Ok(Self::Local(path));
        }

        Ok(Self::Local(PathBuf::from(raw)))
    }
}

impl fmt::Display for FeedSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remote(url) => write!(f, "{url}"),
            Self::Local(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Loads the feed document from its source.
///
/// Cheap to clone; the HTTP client is reference counted.
#[derive(Debug, Clone)]
pub struct FeedLoader {
    client: reqwest::Client,
    source: FeedSource,
    timeout: Duration,
}

impl FeedLoader {
    pub fn new(client: reqwest::Client, source: FeedSource) -> Self {
        Self {
            client,
            source,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn source(&self) -> &FeedSource {
        &self.source
    }

    /// Fetch and parse the feed once.
    ///
    /// There are no retries. Malformed items are dropped (see
    /// [`parse_feed`]); any other problem fails the whole load.
    ///
    /// # Errors
    ///
    /// - [`FeedError::Network`] - Connection or TLS errors
    /// - [`FeedError::Timeout`] - Request exceeded the timeout
    /// - [`FeedError::HttpStatus`] - Non-2xx HTTP response
    /// - [`FeedError::ResponseTooLarge`] - Body exceeded 10MB
    /// - [`FeedError::IncompleteResponse`] - Body shorter than Content-Length
    /// - [`FeedError::Io`] - Local file missing or unreadable
    /// - [`FeedError::Parse`] - Document is not a feed object
    pub async fn load(&self) -> Result<FeedDocument, FeedError> {
        let bytes = match &self.source {
            FeedSource::Remote(url) => self.fetch(url).await?,
            FeedSource::Local(path) => read_local(path, MAX_FEED_SIZE).await?,
        };

        let ParseResult { document, skipped } = parse_feed(&bytes)?;

        if skipped > 0 {
            tracing::warn!(
                source = %self.source,
                skipped = skipped,
                "Malformed feed items skipped"
            );
        }

        tracing::info!(
            source = %self.source,
            items = document.items.len(),
            generated_at = ?document.generated_at,
            "Feed loaded"
        );

        Ok(document)
    }

    async fn fetch(&self, url: &Url) -> Result<Vec<u8>, FeedError> {
        let request = async {
            let response = self.client.get(url.clone()).send().await?;

            if !response.status().is_success() {
                return Err(FeedError::HttpStatus(response.status().as_u16()));
            }

            read_limited_bytes(response, MAX_FEED_SIZE).await
        };

        tokio::time::timeout(self.timeout, request)
            .await
            .map_err(|_| FeedError::Timeout)?
    }
}

async fn read_local(path: &Path, limit: usize) -> Result<Vec<u8>, FeedError> {
    let io_err = |source| FeedError::Io {
        path: path.to_path_buf(),
        source,
    };

    let metadata = tokio::fs::metadata(path).await.map_err(io_err)?;
    if metadata.len() > limit as u64 {
        return Err(FeedError::ResponseTooLarge);
    }

    tokio::fs::read(path).await.map_err(io_err)
}

async fn read_limited_bytes(response: reqwest::Response, limit: usize) -> Result<Vec<u8>, FeedError> {
    let expected_length = response.content_length();

    if let Some(len) = expected_length {
        if len > limit as u64 {
            return Err(FeedError::ResponseTooLarge);
        }
    }

    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        if bytes.len().saturating_add(chunk.len()) > limit {
            return Err(FeedError::ResponseTooLarge);
        }
        bytes.extend_from_slice(&chunk);
    }

    if let Some(expected) = expected_length {
        if (bytes.len() as u64) < expected {
            return Err(FeedError::IncompleteResponse {
                expected,
                received: bytes.len(),
            });
        }
    }

    Ok(bytes)
}
