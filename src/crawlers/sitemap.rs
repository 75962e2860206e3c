use crate::crawlers::fetcher::Fetcher;
use crate::filter::UrlFilter;
use crate::parsers::ContentKind;
use crate::parsers::text::non_empty_lines;
use regex::Regex;
use std::sync::LazyLock;
use url::Url;

/// Locations probed at the site root, in order; the first 2xx answer wins
pub const SITEMAP_PATHS: [&str; 3] = ["/sitemap.xml", "/sitemap_index.xml", "/sitemap.txt"];

static LOC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?is)<loc>\s*(.*?)\s*</loc>").unwrap());

/// URLs listed in a sitemap body
pub fn parse_sitemap(body: &str, kind: ContentKind) -> Vec<String> {
    match kind {
        ContentKind::Text => non_empty_lines(body)
            .into_iter()
            .map(str::to_string)
            .collect(),
        _ => LOC
            .captures_iter(body)
            .filter_map(|cap| cap.get(1))
            .map(|m| unescape_xml(m.as_str()))
            .filter(|loc| !loc.is_empty())
            .collect(),
    }
}

fn unescape_xml(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

/// Whether a sitemap entry points at another sitemap rather than a page
fn is_nested_sitemap(loc: &Url) -> bool {
    loc.path().to_ascii_lowercase().ends_with(".xml")
}

/// Sitemap bodies are classified by header first, then by URL
fn sitemap_kind(content_type: Option<&str>, url: &Url) -> ContentKind {
    match ContentKind::from_content_type(content_type) {
        kind @ (ContentKind::Xml | ContentKind::Text) => kind,
        _ => ContentKind::from_url(url.as_str()),
    }
}

/// Look for a sitemap at the root of `root` and return up to `limit` crawlable
/// pages it lists.
///
/// Best effort: every failure is logged and yields an empty list. Nested
/// sitemaps are followed one level deep, and no further once `limit` pages
/// are known.
pub async fn discover<F: Fetcher>(
    fetcher: &F,
    root: &Url,
    filter: &UrlFilter,
    limit: usize,
) -> Vec<Url> {
    for path in SITEMAP_PATHS {
        let Ok(sitemap_url) = root.join(path) else {
            continue;
        };

        let page = match fetcher.fetch(&sitemap_url).await {
            Ok(page) => page,
            Err(e) => {
                ::log::debug!("No sitemap at {}: {}", sitemap_url, e);
                continue;
            }
        };

        let kind = sitemap_kind(page.content_type.as_deref(), &page.url);
        let entries = parse_sitemap(&page.body, kind);
        ::log::info!("Found sitemap {} with {} entries", page.url, entries.len());

        let mut pages = Vec::new();
        for entry in entries {
            if pages.len() >= limit {
                ::log::debug!("Sitemap {} listed more than {} pages", page.url, limit);
                break;
            }
            let Ok(loc) = page.url.join(&entry) else {
                ::log::trace!("Discarding unresolvable sitemap entry {:?}", entry);
                continue;
            };

            if is_nested_sitemap(&loc) {
                pages.extend(expand_nested(fetcher, &loc, filter).await);
            } else if filter.should_crawl(&loc) {
                pages.push(loc);
            }
        }
        pages.truncate(limit);
        return pages;
    }

    ::log::debug!("No sitemap found for {}", root);
    Vec::new()
}

/// Pages listed in a nested sitemap; sitemaps inside it are not followed
async fn expand_nested<F: Fetcher>(fetcher: &F, sitemap_url: &Url, filter: &UrlFilter) -> Vec<Url> {
    let page = match fetcher.fetch(sitemap_url).await {
        Ok(page) => page,
        Err(e) => {
            ::log::debug!("Skipping nested sitemap {}: {}", sitemap_url, e);
            return Vec::new();
        }
    };

    let kind = sitemap_kind(page.content_type.as_deref(), &page.url);
    parse_sitemap(&page.body, kind)
        .into_iter()
        .filter_map(|entry| page.url.join(&entry).ok())
        .filter(|loc| !is_nested_sitemap(loc) && filter.should_crawl(loc))
        .collect()
}
