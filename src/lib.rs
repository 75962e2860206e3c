// Re-export modules
pub mod cache;
pub mod config;
pub mod crawlers;
pub mod error;
pub mod extractors;
pub mod filter;
pub mod formats;
pub mod parsers;
pub mod proposal;
pub mod results;
pub mod sizing;
pub mod utils;

// Re-export commonly used types for convenience
pub use config::CrawlConfig;
pub use results::{ScrapeReport, ScrapeStatus, ScrapedData, SocialMedia};

use crawlers::{HttpFetcher, WebCrawler};
use std::time::{Duration, Instant};

/// Main builder for scraping one advertiser website
#[derive(Debug, Clone)]
pub struct SiteScrape {
    url: String,
    config: CrawlConfig,
}

impl SiteScrape {
    /// Create a new builder for `url`; a missing scheme means https
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            config: CrawlConfig::default(),
        }
    }

    /// Set the maximum number of URLs to visit
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.config.max_pages = max_pages;
        self
    }

    /// Set the total timeout (maximum runtime)
    pub fn with_total_timeout(mut self, timeout_seconds: u64) -> Self {
        self.config.total_timeout_secs = timeout_seconds;
        self
    }

    /// Replace the whole configuration
    pub fn with_config(mut self, config: CrawlConfig) -> Self {
        self.config = config;
        self
    }

    /// Load configuration from a file
    pub fn with_config_file(
        self,
        path: impl AsRef<std::path::Path>,
    ) -> Result<Self, error::ConfigError> {
        let config = CrawlConfig::from_file(path)?;
        Ok(self.with_config(config))
    }

    /// Load configuration from a string
    pub fn with_config_str(self, config_str: &str) -> Result<Self, error::ConfigError> {
        let config = CrawlConfig::from_json(config_str)?;
        Ok(self.with_config(config))
    }

    pub fn config(&self) -> &CrawlConfig {
        &self.config
    }

    /// Crawl the site over HTTP and report what was found
    pub async fn run(self) -> ScrapeReport {
        let started = Instant::now();
        let fetcher = match HttpFetcher::new(&self.config) {
            Ok(fetcher) => fetcher,
            Err(e) => {
                ::log::error!("Failed to build HTTP client: {}", e);
                let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
                return ScrapeReport::failed(e.to_string(), elapsed_ms);
            }
        };

        WebCrawler::new(fetcher, self.config).run(&self.url).await
    }
}

/// Scrape `url`, visiting at most `max_pages` URLs within the default time budget.
///
/// Never fails: an unreachable or unusable site yields [`ScrapedData::empty`].
pub async fn scrape_website(url: &str, max_pages: usize) -> ScrapedData {
    SiteScrape::new(url).with_max_pages(max_pages).run().await.data
}

/// Like [`scrape_website`] with an explicit time budget, reporting how the scrape ended
pub async fn scrape_with_timeout(url: &str, max_pages: usize, timeout: Duration) -> ScrapeReport {
    SiteScrape::new(url)
        .with_max_pages(max_pages)
        .with_total_timeout(timeout.as_secs())
        .run()
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_overrides() {
        let scrape = SiteScrape::new("bedrift.no")
            .with_max_pages(3)
            .with_total_timeout(5);
        assert_eq!(scrape.config().max_pages, 3);
        assert_eq!(scrape.config().total_timeout_secs, 5);
        assert_eq!(scrape.config().request_timeout_secs, 10);
    }

    #[test]
    fn test_config_str_replaces_defaults() {
        let scrape = SiteScrape::new("bedrift.no")
            .with_max_pages(3)
            .with_config_str(r#"{"max_pages": 7, "guess_common_pages": false}"#)
            .unwrap();
        assert_eq!(scrape.config().max_pages, 7);
        assert!(!scrape.config().guess_common_pages);
        assert!(SiteScrape::new("bedrift.no").with_config_str("[").is_err());
    }

    #[tokio::test]
    async fn test_invalid_url_gives_empty_data() {
        let report = SiteScrape::new("http://").with_max_pages(2).run().await;
        assert!(matches!(report.status, ScrapeStatus::Failed { .. }));
        assert!(report.data.is_empty());
    }
}
