use thiserror::Error;

/// Failure while fetching a single URL.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("{url} answered with HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("{url} is not an HTML page ({content_type})")]
    UnsupportedContent { url: String, content_type: String },

    #[error("invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    #[error("no response stored for {0}")]
    NotFound(String),
}

impl FetchError {
    /// Whether the failure came from the remote server rather than the transport.
    pub fn is_http_status(&self) -> bool {
        matches!(self, FetchError::Status { .. })
    }
}

/// Failure while loading a crawl configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid url pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

/// A violated invariant of the static format tables.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RulesError {
    #[error("format '{format}' shrinks '{field}' between tiers")]
    NonMonotonic {
        format: &'static str,
        field: &'static str,
    },

    #[error("no content rules for format '{0}'")]
    MissingFormat(&'static str),

    #[error("format '{next}' is not more expensive than '{previous}'")]
    PriceOrder {
        previous: &'static str,
        next: &'static str,
    },
}
