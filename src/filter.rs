use crate::error::ConfigError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use url::Url;

/// File extensions that are never crawled as pages
pub const EXCLUDED_EXTENSIONS: &str = r"(?i)\.(pdf|jpg|jpeg|png|gif|svg|webp|doc|docx|xls|xlsx|zip|rar)$";

/// WordPress internals that never contain advertiser content
pub const WORDPRESS_INTERNALS: &str = r"/wp-(admin|content|includes)/";

/// Configuration for URL filtering in crawlers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UrlFilterConfig {
    /// Exact host every crawled URL must have (no subdomain matching)
    pub required_host: String,

    /// Regex patterns for URLs to include (if empty, all URLs are included unless excluded)
    #[serde(default)]
    pub include_patterns: Vec<String>,

    /// Regex patterns matched against the URL path; these take precedence over include patterns
    #[serde(default = "default_exclude_patterns")]
    pub exclude_patterns: Vec<String>,
}

fn default_exclude_patterns() -> Vec<String> {
    vec![
        EXCLUDED_EXTENSIONS.to_string(),
        WORDPRESS_INTERNALS.to_string(),
    ]
}

impl UrlFilterConfig {
    /// Filter configuration scoped to the host of `root_url`
    pub fn for_root(root_url: &Url) -> Self {
        Self {
            required_host: root_url.host_str().unwrap_or_default().to_string(),
            include_patterns: Vec::new(),
            exclude_patterns: default_exclude_patterns(),
        }
    }
}

/// URL filter that decides which discovered links belong to the crawl
#[derive(Debug)]
pub struct UrlFilter {
    config: UrlFilterConfig,
    include_regexes: Vec<Regex>,
    exclude_regexes: Vec<Regex>,
}

impl UrlFilter {
    /// Create a new URL filter from configuration
    pub fn new(config: UrlFilterConfig) -> Result<Self, ConfigError> {
        let mut include_regexes = Vec::with_capacity(config.include_patterns.len());
        for pattern in &config.include_patterns {
            include_regexes.push(Regex::new(pattern)?);
        }

        let mut exclude_regexes = Vec::with_capacity(config.exclude_patterns.len());
        for pattern in &config.exclude_patterns {
            exclude_regexes.push(Regex::new(pattern)?);
        }

        Ok(Self {
            config,
            include_regexes,
            exclude_regexes,
        })
    }

    /// The host this filter is scoped to
    pub fn required_host(&self) -> &str {
        &self.config.required_host
    }

    /// Determine if a URL should be crawled based on all filtering rules
    pub fn should_crawl(&self, url: &Url) -> bool {
        // mailto:, tel:, javascript: and friends
        if !matches!(url.scheme(), "http" | "https") {
            return false;
        }

        if url.fragment().is_some() {
            return false;
        }

        if !self.is_in_host_scope(url) {
            return false;
        }

        // Exclusions look at the path so query strings don't hide an extension
        let path = url.path();
        if self.exclude_regexes.iter().any(|regex| regex.is_match(path)) {
            return false;
        }

        if !self.include_regexes.is_empty() {
            let url_str = url.as_str();
            return self.include_regexes.iter().any(|regex| regex.is_match(url_str));
        }

        true
    }

    /// Resolve `href` against `base` and keep it only if it should be crawled
    pub fn accept_link(&self, base: &Url, href: &str) -> Option<Url> {
        let href = href.trim();
        if href.is_empty() {
            return None;
        }

        let resolved = match base.join(href) {
            Ok(url) => url,
            Err(e) => {
                ::log::trace!("Discarding unresolvable link {:?}: {}", href, e);
                return None;
            }
        };

        if self.should_crawl(&resolved) {
            Some(resolved)
        } else {
            ::log::trace!("URL filter rejected: {}", resolved);
            None
        }
    }

    fn is_in_host_scope(&self, url: &Url) -> bool {
        url.host_str()
            .map(|host| host.eq_ignore_ascii_case(&self.config.required_host))
            .unwrap_or(false)
    }
}
