use crate::error::FetchError;
use crate::parsers::ContentKind;
use std::future::Future;
use url::Url;

/// A successfully fetched (2xx) response
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Final URL after redirects
    pub url: Url,
    pub status: u16,
    pub content_type: Option<String>,
    pub body: String,
}

impl FetchedPage {
    /// Kind of body, judged from the Content-Type header
    pub fn kind(&self) -> ContentKind {
        ContentKind::from_content_type(self.content_type.as_deref())
    }

    /// Keep the response only if it is an HTML page
    pub fn into_html(self) -> Result<Self, FetchError> {
        if self.kind().is_page() {
            Ok(self)
        } else {
            Err(FetchError::UnsupportedContent {
                url: self.url.to_string(),
                content_type: self.content_type.unwrap_or_default(),
            })
        }
    }
}

/// Source of pages for the crawler.
///
/// Implementations return `Ok` only for 2xx responses.
pub trait Fetcher: Send + Sync {
    fn fetch(&self, url: &Url) -> impl Future<Output = Result<FetchedPage, FetchError>> + Send;
}
