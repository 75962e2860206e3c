use crate::config::CrawlConfig;
use crate::crawlers::fetcher::{FetchedPage, Fetcher};
use crate::crawlers::sitemap;
use crate::error::{ConfigError, FetchError};
use crate::extractors;
use crate::extractors::headings::{is_heading_length, is_subheading_length};
use crate::filter::{UrlFilter, UrlFilterConfig};
use crate::results::{PageData, ScrapeReport, ScrapedData};
use crate::utils::{dedupe_capped, normalize_seed_url, truncate_chars};
use std::collections::{HashSet, VecDeque};
use std::time::Instant;
use url::Url;

/// Page names tried at the site root after the first page, whether linked or not
pub const COMMON_PAGE_GUESSES: [&str; 8] = [
    "om-oss",
    "tjenester",
    "kontakt",
    "about",
    "services",
    "contact",
    "produkter",
    "products",
];

pub const MAX_SERVICES: usize = 20;
pub const MAX_IMAGES: usize = 15;
pub const MAX_CERTIFICATIONS: usize = 10;
pub const MAX_HEADINGS: usize = 15;
pub const MAX_SUBHEADINGS: usize = 10;
pub const MAX_CONTENT_CHARS: usize = 50_000;

/// Breadth-first, same-host crawler that fetches one page at a time
pub struct WebCrawler<F: Fetcher> {
    fetcher: F,
    config: CrawlConfig,
}

impl<F: Fetcher> WebCrawler<F> {
    pub fn new(fetcher: F, config: CrawlConfig) -> Self {
        Self { fetcher, config }
    }

    pub fn config(&self) -> &CrawlConfig {
        &self.config
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Crawl `seed` within the configured wall-clock budget.
    ///
    /// A crawl that runs out of time is abandoned; its partial results are
    /// discarded and the report says `TimedOut`.
    pub async fn run(&self, seed: &str) -> ScrapeReport {
        let started = Instant::now();
        let budget = self.config.total_timeout();

        match tokio::time::timeout(budget, self.crawl(seed)).await {
            Ok(report) => report,
            Err(_) => {
                ::log::warn!(
                    "Scrape of {} timed out after {} seconds",
                    seed,
                    budget.as_secs()
                );
                ScrapeReport::timed_out(budget.as_secs(), elapsed_ms(started))
            }
        }
    }

    /// Crawl `seed` with no time limit
    pub async fn crawl(&self, seed: &str) -> ScrapeReport {
        let started = Instant::now();

        let seed_url = match parse_seed(seed) {
            Some(url) => url,
            None => {
                ::log::error!("Cannot crawl {:?}: not a valid http(s) URL", seed);
                return ScrapeReport::failed(format!("invalid url: {}", seed), elapsed_ms(started));
            }
        };

        let mut url_filter = match create_url_filter(&seed_url, &self.config) {
            Ok(filter) => filter,
            Err(e) => {
                ::log::error!("Invalid URL patterns in crawl config: {}", e);
                return ScrapeReport::failed(e.to_string(), elapsed_ms(started));
            }
        };

        ::log::info!(
            "Starting crawl of {} (max {} pages)",
            seed_url,
            self.config.max_pages
        );

        let mut frontier = Frontier::default();
        frontier.push(seed_url.clone());

        if self.config.probe_sitemaps {
            let from_sitemap = sitemap::discover(
                &self.fetcher,
                &seed_url,
                &url_filter,
                self.config.max_pages,
            )
            .await;
            ::log::debug!("Queuing {} URLs from sitemap", from_sitemap.len());
            for url in from_sitemap {
                frontier.push(url);
            }
        }

        let mut scrape = ScrapeAccumulator::default();
        let mut scope_root = seed_url.clone();

        while frontier.attempts() < self.config.max_pages {
            let Some(url) = frontier.pop() else {
                break;
            };

            let page = match self.fetch_page(&url).await {
                Ok(page) => page,
                Err(e) if e.is_http_status() => {
                    ::log::debug!("Skipping {}: {}", url, e);
                    continue;
                }
                Err(e) => {
                    ::log::warn!("Skipping {}: {}", url, e);
                    continue;
                }
            };

            if page.url != url && !frontier.mark_seen(&page.url) {
                ::log::debug!("{} redirected to already visited {}", url, page.url);
                continue;
            }

            // A seed that redirects to another host (bedrift.no -> www.bedrift.no)
            // moves the crawl scope to that host
            if scrape.pages_scraped() == 0 && page.url.host_str() != scope_root.host_str() {
                match create_url_filter(&page.url, &self.config) {
                    Ok(filter) => {
                        ::log::info!("{} redirected to {}, crawling that host", seed_url, page.url);
                        url_filter = filter;
                        scope_root = page.url.clone();
                    }
                    Err(e) => ::log::warn!("Keeping crawl scope of {}: {}", seed_url, e),
                }
            }

            // The parsed document is dropped before the next await
            let data = extractors::extract_page(&page.body, &page.url);
            ::log::debug!(
                "Scraped {} ({} links, {} bytes of text)",
                page.url,
                data.links.len(),
                data.content.len()
            );

            queue_links(&mut frontier, &url_filter, &page.url, &data.links);

            if scrape.pages_scraped() == 0 && self.config.guess_common_pages {
                queue_common_pages(&mut frontier, &url_filter, &scope_root);
            }

            scrape.add_page(data);
        }

        let elapsed = elapsed_ms(started);
        if scrape.pages_scraped() == 0 {
            ::log::error!(
                "No page of {} could be fetched ({} attempts)",
                seed_url,
                frontier.attempts()
            );
            return ScrapeReport::failed(format!("no page of {} could be fetched", seed_url), elapsed);
        }

        let data = scrape.finish();
        ::log::info!(
            "Crawl of {} complete - scraped {} pages in {:.2} seconds",
            seed_url,
            data.pages_scraped,
            elapsed as f64 / 1000.0
        );
        ScrapeReport::completed(data, elapsed)
    }

    async fn fetch_page(&self, url: &Url) -> Result<FetchedPage, FetchError> {
        self.fetcher.fetch(url).await?.into_html()
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}

/// Normalized seed URL, if it is an http(s) URL with a host
fn parse_seed(seed: &str) -> Option<Url> {
    let url = Url::parse(&normalize_seed_url(seed)).ok()?;
    url.host_str().filter(|host| !host.is_empty())?;
    Some(url)
}

/// Creates a URL filter scoped to the seed host plus the configured patterns
fn create_url_filter(seed_url: &Url, config: &CrawlConfig) -> Result<UrlFilter, ConfigError> {
    let mut filter_config = UrlFilterConfig::for_root(seed_url);
    filter_config
        .include_patterns
        .extend(config.include_patterns.iter().cloned());
    filter_config
        .exclude_patterns
        .extend(config.exclude_patterns.iter().cloned());
    UrlFilter::new(filter_config)
}

fn queue_links(frontier: &mut Frontier, url_filter: &UrlFilter, base: &Url, links: &[String]) {
    for link in links {
        if let Some(resolved) = url_filter.accept_link(base, link) {
            if frontier.push(resolved.clone()) {
                ::log::trace!("Queuing link for crawling: {}", resolved);
            }
        }
    }
}

fn queue_common_pages(frontier: &mut Frontier, url_filter: &UrlFilter, root: &Url) {
    for guess in COMMON_PAGE_GUESSES {
        let Ok(url) = root.join(&format!("/{}", guess)) else {
            continue;
        };
        if url_filter.should_crawl(&url) && frontier.push(url.clone()) {
            ::log::trace!("Queuing guessed page: {}", url);
        }
    }
}

/// FIFO work queue that hands out every URL at most once
#[derive(Debug, Default)]
struct Frontier {
    queue: VecDeque<Url>,
    seen: HashSet<String>,
    attempts: usize,
}

impl Frontier {
    /// Enqueue `url` unless it was queued or visited before
    fn push(&mut self, url: Url) -> bool {
        if self.seen.insert(url.to_string()) {
            self.queue.push_back(url);
            true
        } else {
            false
        }
    }

    /// Next URL to visit; counts against the page budget
    fn pop(&mut self) -> Option<Url> {
        let url = self.queue.pop_front()?;
        self.attempts += 1;
        Some(url)
    }

    /// Remember a URL reached by redirect so it is not fetched again.
    ///
    /// Returns `false` if it was already queued or visited.
    fn mark_seen(&mut self, url: &Url) -> bool {
        self.seen.insert(url.to_string())
    }

    /// Number of URLs handed out so far, fetched successfully or not
    fn attempts(&self) -> usize {
        self.attempts
    }
}

/// Folds per-page results into one `ScrapedData`.
///
/// The first page sets the singular fields; later pages only fill fields
/// that are still missing, except that a longer description replaces a
/// shorter one. List fields collect from every page.
#[derive(Debug, Default)]
struct ScrapeAccumulator {
    data: ScrapedData,
    content: Vec<String>,
    content_chars: usize,
    headings: Vec<String>,
    subheadings: Vec<String>,
}

fn fill_missing(slot: &mut Option<String>, candidate: Option<String>) {
    if slot.is_none() {
        *slot = candidate;
    }
}

impl ScrapeAccumulator {
    fn pages_scraped(&self) -> usize {
        self.data.pages_scraped
    }

    fn add_page(&mut self, page: PageData) {
        let data = &mut self.data;

        fill_missing(&mut data.company_name, page.company_name);
        fill_missing(&mut data.phone, page.phone);
        fill_missing(&mut data.email, page.email);
        fill_missing(&mut data.address, page.address);
        fill_missing(&mut data.opening_hours, page.opening_hours);
        data.social_media.merge_missing(&page.social_media);

        let longer = match (&data.description, &page.description) {
            (None, Some(_)) => true,
            (Some(current), Some(candidate)) => candidate.chars().count() > current.chars().count(),
            _ => false,
        };
        if longer {
            data.description = page.description;
        }

        data.services.extend(page.services);
        data.images.extend(page.images);
        data.certifications.extend(page.certifications);
        self.headings.extend(page.headings);
        self.subheadings.extend(page.subheadings);

        // Text beyond the cap would be cut anyway
        if self.content_chars < MAX_CONTENT_CHARS && !page.content.is_empty() {
            self.content_chars += page.content.chars().count() + 1;
            self.content.push(page.content);
        }

        data.pages_scraped += 1;
    }

    fn finish(self) -> ScrapedData {
        let mut data = self.data;

        data.services = dedupe_capped(data.services, MAX_SERVICES);
        data.images = dedupe_capped(data.images, MAX_IMAGES);
        data.certifications = dedupe_capped(data.certifications, MAX_CERTIFICATIONS);
        data.potential_headings = dedupe_capped(
            self.headings
                .into_iter()
                .filter(|h| is_heading_length(h))
                .collect(),
            MAX_HEADINGS,
        );
        data.potential_subheadings = dedupe_capped(
            self.subheadings
                .into_iter()
                .filter(|s| is_subheading_length(s))
                .collect(),
            MAX_SUBHEADINGS,
        );
        data.all_page_content = truncate_chars(&self.content.join(" "), MAX_CONTENT_CHARS);

        data
    }
}
