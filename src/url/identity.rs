/// Derives a book's canonical identity from its absolute detail-page URL
///
/// One trailing slash is stripped, the URL is split on `/`, and the last two
/// segments are joined back together. Catalogue detail pages look like
/// `.../catalogue/<slug>_<n>/index.html`, so this yields `<slug>_<n>/index.html`.
///
/// This depends on that URL layout. A site that puts every book under the same
/// last two segments would collapse all of them into one identity.
///
/// # Examples
///
/// ```
/// use bookshelf::url::derive_book_id;
///
/// let id = derive_book_id("http://books.toscrape.com/catalogue/sharp-objects_997/index.html");
/// assert_eq!(id, "sharp-objects_997/index.html");
/// ```
pub fn derive_book_id(link: &str) -> String {
    let trimmed = link.strip_suffix('/').unwrap_or(link);
    let segments: Vec<&str> = trimmed.split('/').collect();
    let start = segments.len().saturating_sub(2);
    segments[start..].join("/")
}
