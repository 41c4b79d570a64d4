//! URL handling module for Bookshelf
//!
//! This module knows the catalogue's URL layout: where listing pages live, how
//! card-relative references become absolute URLs, and how a book's canonical
//! identity is read off its detail-page URL.

mod identity;
mod normalize;

use crate::{UrlError, UrlResult};
use url::Url;

// Re-export main functions
pub use identity::derive_book_id;
pub use normalize::{parse_base_url, resolve_against};

/// Computes the URL of listing page `page` (1-based) under the catalogue root
///
/// Page 1 is the site root itself; later pages live at `catalogue/page-<N>.html`.
///
/// # Examples
///
/// ```
/// use bookshelf::url::{catalogue_page_url, parse_base_url};
///
/// let base = parse_base_url("http://books.toscrape.com").unwrap();
/// assert_eq!(catalogue_page_url(&base, 1).unwrap().as_str(), "http://books.toscrape.com/");
/// assert_eq!(
///     catalogue_page_url(&base, 3).unwrap().as_str(),
///     "http://books.toscrape.com/catalogue/page-3.html"
/// );
/// ```
pub fn catalogue_page_url(base: &Url, page: u32) -> UrlResult<Url> {
    match page {
        0 => Err(UrlError::Parse("listing pages are numbered from 1".to_string())),
        1 => Ok(base.clone()),
        n => base
            .join(&format!("catalogue/page-{}.html", n))
            .map_err(|e| UrlError::Parse(e.to_string())),
    }
}
