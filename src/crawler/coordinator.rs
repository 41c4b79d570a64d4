//! Crawler coordinator - the catalogue pagination loop
//!
//! This module contains the crawl loop that:
//! - Opens one browsing session and guarantees it is closed again
//! - Walks listing pages from the root (or visits one pinned page)
//! - Turns cards into records and drops repeated identities
//! - Stops on the record limit, a pinned page, catalogue exhaustion or the page cap

use crate::book::BookRecord;
use crate::config::{Config, CrawlerConfig};
use crate::crawler::fetcher::HttpBrowser;
use crate::crawler::parser::RawCard;
use crate::crawler::session::{CatalogueBrowser, CatalogueSession};
use crate::url::{catalogue_page_url, parse_base_url};
use crate::{BookshelfError, CrawlError, CrawlResult};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;
use url::Url;

/// Number of records requested when the caller does not say
pub const DEFAULT_LIMIT: usize = 50;

/// Arguments of one crawl invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrawlRequest {
    /// Maximum number of records returned
    pub limit: usize,

    /// Visit only this listing page (1-based) instead of walking from page 1
    pub target_page: Option<u32>,
}

impl CrawlRequest {
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            target_page: None,
        }
    }

    pub fn with_target_page(mut self, page: u32) -> Self {
        self.target_page = Some(page);
        self
    }

    fn validate(&self) -> CrawlResult<()> {
        if self.limit == 0 {
            return Err(CrawlError::InvalidRequest(
                "limit must be at least 1".to_string(),
            ));
        }
        if self.target_page == Some(0) {
            return Err(CrawlError::InvalidRequest(
                "page must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for CrawlRequest {
    fn default() -> Self {
        Self::new(DEFAULT_LIMIT)
    }
}

/// Crawls the catalogue through an injected browser
#[derive(Clone)]
pub struct Crawler {
    browser: Arc<dyn CatalogueBrowser>,
    base_url: Url,
    max_pages: u32,
}

impl Crawler {
    /// Creates a crawler over `browser`
    ///
    /// # Returns
    ///
    /// * `Ok(Crawler)` - Ready to crawl
    /// * `Err(BookshelfError)` - The configured base URL is unusable
    pub fn new(
        config: &CrawlerConfig,
        browser: Arc<dyn CatalogueBrowser>,
    ) -> Result<Self, BookshelfError> {
        Ok(Self {
            browser,
            base_url: parse_base_url(&config.base_url)?,
            max_pages: config.max_pages.max(1),
        })
    }

    /// Creates a crawler that fetches listing pages over HTTP
    pub fn from_config(config: &Config) -> Result<Self, BookshelfError> {
        Self::new(&config.crawler, Arc::new(HttpBrowser::from_config(config)))
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Runs one crawl invocation
    ///
    /// The result holds at most `request.limit` records with unique ids, in the
    /// order their cards appear across pages. On any page-load failure the records
    /// gathered so far are discarded and the error is returned. The session is
    /// closed before this returns, whatever the outcome.
    pub async fn crawl(&self, request: CrawlRequest) -> CrawlResult<Vec<BookRecord>> {
        request.validate()?;

        let start_time = Instant::now();
        tracing::info!(
            "Starting crawl of {} (limit {}, page {})",
            self.base_url,
            request.limit,
            request
                .target_page
                .map(|p| p.to_string())
                .unwrap_or_else(|| "all".to_string())
        );

        let mut session = self.browser.open_session().await?;
        let outcome = self.walk(session.as_mut(), &request).await;

        if let Err(e) = session.close().await {
            tracing::warn!("Failed to close browsing session: {}", e);
        }
        drop(session);

        match &outcome {
            Ok(records) => tracing::info!(
                "Crawl completed: {} records in {:?}",
                records.len(),
                start_time.elapsed()
            ),
            Err(e) => tracing::warn!("Crawl failed after {:?}: {}", start_time.elapsed(), e),
        }

        outcome
    }

    async fn walk(
        &self,
        session: &mut dyn CatalogueSession,
        request: &CrawlRequest,
    ) -> CrawlResult<Vec<BookRecord>> {
        let mut records = Vec::new();
        let mut seen = HashSet::new();
        let mut current_page = request.target_page.unwrap_or(1);
        let mut pages_visited = 0u32;

        while records.len() < request.limit {
            if pages_visited >= self.max_pages {
                tracing::warn!(
                    "Stopping after {} pages (max-pages reached) with {} records",
                    pages_visited,
                    records.len()
                );
                break;
            }

            let page_url = catalogue_page_url(&self.base_url, current_page).map_err(|e| {
                CrawlError::page_load(format!("listing page {}", current_page), e.to_string())
            })?;

            tracing::debug!("Loading listing page {}: {}", current_page, page_url);
            let listing = session.load_listing(&page_url).await?;
            pages_visited += 1;

            let added = collect_records(
                &listing.cards,
                &page_url,
                request.limit,
                &mut seen,
                &mut records,
            );
            tracing::info!(
                "Page {}: {} cards, {} new records ({} total)",
                current_page,
                listing.cards.len(),
                added,
                records.len()
            );

            if request.target_page.is_some() {
                break;
            }

            if !listing.has_next_page {
                tracing::debug!("No next page after page {}", current_page);
                break;
            }

            current_page = match current_page.checked_add(1) {
                Some(next) => next,
                None => break,
            };
        }

        records.truncate(request.limit);
        Ok(records)
    }
}

/// Appends records for `cards` until `limit` is reached, skipping seen identities
///
/// Returns how many records were appended.
fn collect_records(
    cards: &[RawCard],
    page_url: &Url,
    limit: usize,
    seen: &mut HashSet<String>,
    records: &mut Vec<BookRecord>,
) -> usize {
    let before = records.len();

    for card in cards {
        if records.len() >= limit {
            break;
        }

        let record = BookRecord::from_card(card, page_url);
        if !seen.insert(record.id.clone()) {
            tracing::debug!("Skipping duplicate {}", record.id);
            continue;
        }

        records.push(record);
    }

    records.len() - before
}
