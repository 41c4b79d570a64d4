//! Crawler module for catalogue listing pages
//!
//! This module contains the core crawling logic, including:
//! - The browsing capability the crawler depends on (`session`)
//! - HTTP-backed sessions with navigation and listing timeouts (`fetcher`)
//! - Listing card extraction (`parser`)
//! - Pagination, deduplication and termination (`coordinator`)

mod coordinator;
mod fetcher;
mod parser;
mod session;

pub use coordinator::{CrawlRequest, Crawler, DEFAULT_LIMIT};
pub use fetcher::{build_http_client, HttpBrowser, HttpSession};
pub use parser::{extract_card, parse_listing, ListingPage, RawCard};
pub use session::{CatalogueBrowser, CatalogueSession};

use crate::book::BookRecord;
use crate::config::Config;
use crate::BookshelfError;

/// Runs a complete crawl operation over HTTP
///
/// This is the main entry point for a one-off crawl. It will:
/// 1. Build an HTTP browser from the configuration
/// 2. Walk listing pages until the request is satisfied
/// 3. Return the deduplicated records
///
/// # Returns
///
/// * `Ok(Vec<BookRecord>)` - Crawl completed successfully
/// * `Err(BookshelfError)` - Crawl failed; no partial result
pub async fn crawl(config: &Config, request: CrawlRequest) -> Result<Vec<BookRecord>, BookshelfError> {
    let crawler = Crawler::from_config(config)?;
    Ok(crawler.crawl(request).await?)
}
