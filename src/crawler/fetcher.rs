//! HTTP-backed browsing sessions
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building HTTP clients with proper user agent strings
//! - GET requests for listing pages, bounded by the navigation timeout
//! - Reading the body and locating the listing, bounded by the listing timeout
//! - Error classification into page-load failures

use crate::config::{Config, UserAgentConfig};
use crate::crawler::parser::{parse_listing, ListingPage};
use crate::crawler::session::{CatalogueBrowser, CatalogueSession};
use crate::{CrawlError, CrawlResult};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tokio::time::timeout;
use url::Url;

/// Builds an HTTP client with proper configuration
///
/// # Example
///
/// ```no_run
/// use bookshelf::config::UserAgentConfig;
/// use bookshelf::crawler::build_http_client;
///
/// let config = UserAgentConfig {
///     crawler_name: "bookshelf".to_string(),
///     crawler_version: "0.1".to_string(),
///     contact_url: None,
/// };
///
/// let client = build_http_client(&config).unwrap();
/// ```
pub fn build_http_client(config: &UserAgentConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.header_value())
        .gzip(true)
        .brotli(true)
        .build()
}

/// Browser that fetches listing pages over plain HTTP
///
/// The catalogue serves its listings as static markup, so no script execution
/// is needed to see the cards.
#[derive(Debug, Clone)]
pub struct HttpBrowser {
    user_agent: UserAgentConfig,
    navigation_timeout: Duration,
    listing_timeout: Duration,
}

impl HttpBrowser {
    pub fn new(
        user_agent: UserAgentConfig,
        navigation_timeout: Duration,
        listing_timeout: Duration,
    ) -> Self {
        Self {
            user_agent,
            navigation_timeout,
            listing_timeout,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.user_agent.clone(),
            config.crawler.navigation_timeout(),
            config.crawler.listing_timeout(),
        )
    }
}

#[async_trait]
impl CatalogueBrowser for HttpBrowser {
    async fn open_session(&self) -> CrawlResult<Box<dyn CatalogueSession>> {
        let client = build_http_client(&self.user_agent)
            .map_err(|e| CrawlError::Session(e.to_string()))?;

        tracing::debug!("Opened HTTP browsing session");

        Ok(Box::new(HttpSession {
            client: Some(client),
            navigation_timeout: self.navigation_timeout,
            listing_timeout: self.listing_timeout,
            pages_loaded: 0,
        }))
    }
}

/// One HTTP session; its client's connection pool is the viewing context
/// shared by every page of the crawl
pub struct HttpSession {
    client: Option<Client>,
    navigation_timeout: Duration,
    listing_timeout: Duration,
    pages_loaded: u32,
}

#[async_trait]
impl CatalogueSession for HttpSession {
    async fn load_listing(&mut self, url: &Url) -> CrawlResult<ListingPage> {
        let client = self
            .client
            .as_ref()
            .ok_or_else(|| CrawlError::Session("session already closed".to_string()))?;

        let response = match timeout(self.navigation_timeout, client.get(url.clone()).send()).await
        {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => return Err(CrawlError::page_load(url.as_str(), classify_error(&e))),
            Err(_) => {
                return Err(CrawlError::page_load(
                    url.as_str(),
                    format!(
                        "navigation timed out after {}ms",
                        self.navigation_timeout.as_millis()
                    ),
                ))
            }
        };

        let status = response.status();
        if !status.is_success() {
            return Err(CrawlError::page_load(
                url.as_str(),
                format!("HTTP status {}", status),
            ));
        }

        let body = match timeout(self.listing_timeout, response.text()).await {
            Ok(Ok(body)) => body,
            Ok(Err(e)) => return Err(CrawlError::page_load(url.as_str(), classify_error(&e))),
            Err(_) => {
                return Err(CrawlError::page_load(
                    url.as_str(),
                    format!(
                        "listing did not appear within {}ms",
                        self.listing_timeout.as_millis()
                    ),
                ))
            }
        };

        self.pages_loaded += 1;

        parse_listing(&body).map_err(|message| CrawlError::page_load(url.as_str(), message))
    }

    async fn close(&mut self) -> CrawlResult<()> {
        if self.client.take().is_some() {
            tracing::debug!(
                "Closed HTTP browsing session after {} page(s)",
                self.pages_loaded
            );
        }
        Ok(())
    }
}

/// Describes a transport failure the way it is reported to crawl callers
fn classify_error(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        "Request timeout".to_string()
    } else if e.is_connect() {
        format!("Connection failed: {}", e)
    } else {
        e.to_string()
    }
}
