use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Duration;

/// Configuration for one website scrape
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlConfig {
    /// Maximum number of URLs visited (successful or not)
    #[serde(default = "default_max_pages")]
    pub max_pages: usize,

    /// Wall-clock budget for the whole scrape
    #[serde(default = "default_total_timeout_secs")]
    pub total_timeout_secs: u64,

    /// Timeout for a single HTTP request
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Accept-Language header sent with every request
    #[serde(default = "default_accept_language")]
    pub accept_language: String,

    /// Whether to look for sitemap.xml / sitemap_index.xml / sitemap.txt first
    #[serde(default = "default_true")]
    pub probe_sitemaps: bool,

    /// Whether to queue common page names (om-oss, kontakt, ...) at the site root
    #[serde(default = "default_true")]
    pub guess_common_pages: bool,

    /// Regex patterns a URL must match to be crawled (empty means all)
    #[serde(default)]
    pub include_patterns: Vec<String>,

    /// Extra regex patterns that exclude a URL from the crawl
    #[serde(default)]
    pub exclude_patterns: Vec<String>,
}

/// Default value for max_pages
fn default_max_pages() -> usize {
    10
}

/// Default value for total_timeout_secs
fn default_total_timeout_secs() -> u64 {
    30
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36".to_string()
}

fn default_accept_language() -> String {
    "nb-NO,nb;q=0.9,no;q=0.8".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            max_pages: default_max_pages(),
            total_timeout_secs: default_total_timeout_secs(),
            request_timeout_secs: default_request_timeout_secs(),
            user_agent: default_user_agent(),
            accept_language: default_accept_language(),
            probe_sitemaps: true,
            guess_common_pages: true,
            include_patterns: Vec::new(),
            exclude_patterns: Vec::new(),
        }
    }
}

impl CrawlConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config)
    }

    pub fn total_timeout(&self) -> Duration {
        Duration::from_secs(self.total_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_caller_budget() {
        let config = CrawlConfig::default();
        assert_eq!(config.max_pages, 10);
        assert_eq!(config.total_timeout(), Duration::from_secs(30));
        assert!(config.accept_language.starts_with("nb-NO"));
        assert!(config.probe_sitemaps);
        assert!(config.guess_common_pages);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config = CrawlConfig::from_json(r#"{"max_pages": 3, "probe_sitemaps": false}"#).unwrap();
        assert_eq!(config.max_pages, 3);
        assert!(!config.probe_sitemaps);
        assert_eq!(config.total_timeout_secs, 30);
        assert!(config.user_agent.starts_with("Mozilla/5.0"));
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let result = CrawlConfig::from_json("{ not json");
        assert!(matches!(result, Err(ConfigError::Json(_))));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result = CrawlConfig::from_file("/definitely/not/here/crawl.json");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
