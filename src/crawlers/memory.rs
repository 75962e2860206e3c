use crate::crawlers::fetcher::{FetchedPage, Fetcher};
use crate::error::FetchError;
use std::collections::HashMap;
use std::sync::Mutex;
use url::Url;

#[derive(Debug, Clone)]
struct StoredResponse {
    final_url: Url,
    status: u16,
    content_type: Option<String>,
    body: String,
}

/// Fetcher answering from an in-memory table of responses.
///
/// Useful for running the crawl engine offline; unknown URLs fail with
/// `FetchError::NotFound`. Every request is recorded in order.
#[derive(Debug, Default)]
pub struct MemoryFetcher {
    responses: HashMap<String, StoredResponse>,
    requests: Mutex<Vec<String>>,
}

impl MemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` as `text/html` with status 200
    pub fn page(self, url: &str, body: &str) -> Self {
        self.response(url, 200, Some("text/html; charset=utf-8"), body)
    }

    /// Serve an arbitrary response
    pub fn response(mut self, url: &str, status: u16, content_type: Option<&str>, body: &str) -> Self {
        let final_url = Url::parse(url).unwrap_or_else(|e| panic!("bad url {:?}: {}", url, e));
        self.responses.insert(
            final_url.to_string(),
            StoredResponse {
                final_url,
                status,
                content_type: content_type.map(str::to_string),
                body: body.to_string(),
            },
        );
        self
    }

    /// Answer requests for `from` with the response stored for `to`
    pub fn redirect(mut self, from: &str, to: &str) -> Self {
        let target = Url::parse(to).unwrap_or_else(|e| panic!("bad url {:?}: {}", to, e));
        if let Some(stored) = self.responses.get(target.as_str()).cloned() {
            let from = Url::parse(from).unwrap_or_else(|e| panic!("bad url {:?}: {}", from, e));
            self.responses.insert(from.to_string(), stored);
        }
        self
    }

    /// URLs requested so far, in request order
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    fn lookup(&self, url: &Url) -> Result<FetchedPage, FetchError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(url.to_string());
        }

        let stored = self
            .responses
            .get(url.as_str())
            .ok_or_else(|| FetchError::NotFound(url.to_string()))?;

        if !(200..300).contains(&stored.status) {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: stored.status,
            });
        }

        Ok(FetchedPage {
            url: stored.final_url.clone(),
            status: stored.status,
            content_type: stored.content_type.clone(),
            body: stored.body.clone(),
        })
    }
}

impl Fetcher for MemoryFetcher {
    async fn fetch(&self, url: &Url) -> Result<FetchedPage, FetchError> {
        self.lookup(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::ContentKind;

    #[tokio::test]
    async fn test_memory_fetcher_serves_and_records() {
        let fetcher = MemoryFetcher::new()
            .page("https://bedrift.no/", "<h1>Hei</h1>")
            .response("https://bedrift.no/gammel", 500, None, "");

        let root = Url::parse("https://bedrift.no/").unwrap();
        let page = fetcher.fetch(&root).await.unwrap();
        assert_eq!(page.body, "<h1>Hei</h1>");
        assert_eq!(page.kind(), ContentKind::Html);

        let broken = Url::parse("https://bedrift.no/gammel").unwrap();
        let err = fetcher.fetch(&broken).await.unwrap_err();
        assert!(err.is_http_status());

        let missing = Url::parse("https://bedrift.no/finnes-ikke").unwrap();
        assert!(matches!(
            fetcher.fetch(&missing).await,
            Err(FetchError::NotFound(_))
        ));

        assert_eq!(
            fetcher.requests(),
            vec![
                "https://bedrift.no/",
                "https://bedrift.no/gammel",
                "https://bedrift.no/finnes-ikke"
            ]
        );
    }

    #[tokio::test]
    async fn test_redirect_reports_final_url() {
        let fetcher = MemoryFetcher::new()
            .page("https://bedrift.no/hjem/", "<p>Hjem</p>")
            .redirect("https://bedrift.no/", "https://bedrift.no/hjem/");

        let page = fetcher
            .fetch(&Url::parse("https://bedrift.no/").unwrap())
            .await
            .unwrap();
        assert_eq!(page.url.as_str(), "https://bedrift.no/hjem/");
    }
}
