pub mod fetcher;
pub mod http;
#[cfg(test)]
pub(crate) mod memory;
pub mod sitemap;
pub mod web;

pub use fetcher::{FetchedPage, Fetcher};
pub use http::HttpFetcher;
pub use web::WebCrawler;
