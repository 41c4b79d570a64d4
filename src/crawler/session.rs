//! Browsing capability the crawler depends on
//!
//! The crawler never talks to the network or queries markup itself. It opens a
//! [`CatalogueSession`] from a [`CatalogueBrowser`], asks it for one listing page
//! at a time, and closes it when the crawl ends.

use crate::crawler::parser::ListingPage;
use crate::CrawlResult;
use async_trait::async_trait;
use url::Url;

/// Opens browsing sessions
#[async_trait]
pub trait CatalogueBrowser: Send + Sync {
    /// Acquires a session with one viewing context
    ///
    /// Fails with `CrawlError::Session` when the session cannot be created.
    async fn open_session(&self) -> CrawlResult<Box<dyn CatalogueSession>>;
}

/// One browsing session, exclusively owned by one crawl
#[async_trait]
pub trait CatalogueSession: Send {
    /// Navigates to `url` and extracts its listing cards
    ///
    /// Fails with `CrawlError::PageLoad` when navigation or the wait for listing
    /// markup times out, the request fails, or the page has no listing.
    async fn load_listing(&mut self, url: &Url) -> CrawlResult<ListingPage>;

    /// Releases the session; the crawler calls this on every exit path
    async fn close(&mut self) -> CrawlResult<()>;
}
