//! Bookshelf: a bounded catalogue crawler for books.toscrape.com
//!
//! This crate walks the paginated listing pages of a single fixed catalogue site,
//! extracts book records from each listing card, deduplicates them by canonical
//! identity, and serves the latest result set through a small paginated HTTP API.

pub mod book;
pub mod config;
pub mod crawler;
pub mod output;
pub mod server;
pub mod storage;
pub mod url;

use thiserror::Error;

/// Main error type for Bookshelf operations
#[derive(Debug, Error)]
pub enum BookshelfError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Crawl error: {0}")]
    Crawl(#[from] CrawlError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that abort a crawl invocation
///
/// Only these cross the crawler boundary. Missing card fields are never errors;
/// they are defaulted when the record is built.
#[derive(Debug, Error)]
pub enum CrawlError {
    /// The browsing session or its viewing context could not be created
    #[error("Failed to open browsing session: {0}")]
    Session(String),

    /// A listing page could not be navigated to or never showed its listing markup
    #[error("Failed to load {url}: {message}")]
    PageLoad { url: String, message: String },

    /// The crawl arguments were rejected before any session was opened
    #[error("Invalid crawl request: {0}")]
    InvalidRequest(String),
}

impl CrawlError {
    pub(crate) fn page_load(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::PageLoad {
            url: url.into(),
            message: message.into(),
        }
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("URL cannot be used as a base: {0}")]
    CannotBeABase(String),
}

/// Result type alias for Bookshelf operations
pub type Result<T> = std::result::Result<T, BookshelfError>;

/// Result type alias for crawl operations
pub type CrawlResult<T> = std::result::Result<T, CrawlError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use book::{BookRecord, StarRating};
pub use config::Config;
pub use crawler::{CrawlRequest, Crawler, HttpBrowser};
pub use storage::BookStore;
