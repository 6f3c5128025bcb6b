//! URL validation for the fetch pipeline.

/// Error type for URL validation failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UrlError {
    #[error("url parameter is required")]
    Empty,

    #[error("URL must use http or https scheme")]
    MissingScheme,

    #[error("URL must use http or https scheme (got {0})")]
    UnsupportedScheme(String),

    #[error("{0}")]
    InvalidUrl(String),
}

/// Parse a caller-supplied URL, accepting only `http` and `https`.
///
/// Leading and trailing whitespace is ignored. Nothing else is normalized:
/// the URL is fetched and cached exactly as given.
pub fn parse_http_url(input: &str) -> Result<url::Url, UrlError> {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Err(UrlError::Empty);
    }

    let parsed = url::Url::parse(trimmed).map_err(|e| match e {
        url::ParseError::RelativeUrlWithoutBase => UrlError::MissingScheme,
        other => UrlError::InvalidUrl(other.to_string()),
    })?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        scheme => Err(UrlError::UnsupportedScheme(scheme.to_string())),
    }
}
