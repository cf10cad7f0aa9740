use thiserror::Error;
use url::Url;

/// Reasons an article link is refused before it reaches the system browser.
#[derive(Error, Debug)]
pub enum UrlValidationError {
    /// The URL string could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    /// The URL uses a scheme other than http or https.
    #[error("Unsupported scheme: {0} (only http/https allowed)")]
    UnsupportedScheme(String),
    /// The URL has no host component.
    #[error("URL has no host")]
    MissingHost,
    /// The URL embeds a username or password.
    #[error("URL contains credentials")]
    Credentials,
}

/// Validate an article link before handing it to the system browser.
///
/// Feed items are external input, so only plain `http`/`https` links with a
/// host and no embedded credentials are opened. Anything else (`file://`,
/// `javascript:`, custom handlers) is refused.
///
/// ```
/// use econfeed::util::validate_url_for_open;
///
/// assert!(validate_url_for_open("https://news.example.com/a/1").is_ok());
/// assert!(validate_url_for_open("javascript:alert(1)").is_err());
/// ```
pub fn validate_url_for_open(url_str: &str) -> Result<Url, UrlValidationError> {
    let url = Url::parse(url_str.trim())?;

    match url.scheme() {
        "http" | "https" => {}
        scheme => return Err(UrlValidationError::UnsupportedScheme(scheme.to_owned())),
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(UrlValidationError::MissingHost);
    }

    if !url.username().is_empty() || url.password().is_some() {
        return Err(UrlValidationError::Credentials);
    }

    Ok(url)
}
