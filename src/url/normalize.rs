use crate::{UrlError, UrlResult};
use url::Url;

/// Parses the catalogue root URL
///
/// # Normalization Steps
///
/// 1. Parse the URL; reject if malformed
/// 2. Require an HTTP or HTTPS scheme
/// 3. Remove query and fragment
/// 4. Ensure the path ends with `/` so page paths join beneath it
///
/// # Examples
///
/// ```
/// use bookshelf::url::parse_base_url;
///
/// let url = parse_base_url("http://books.toscrape.com").unwrap();
/// assert_eq!(url.as_str(), "http://books.toscrape.com/");
/// ```
pub fn parse_base_url(url_str: &str) -> UrlResult<Url> {
    let mut url = Url::parse(url_str.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.cannot_be_a_base() {
        return Err(UrlError::CannotBeABase(url_str.to_string()));
    }

    url.set_query(None);
    url.set_fragment(None);

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}

/// Resolves a card-relative reference against the page it was found on
///
/// An empty reference resolves to the page itself (minus any fragment), the same
/// way a browser resolves `href=""`. Returns `None` when the reference cannot be
/// resolved into an absolute URL.
pub fn resolve_against(base: &Url, reference: &str) -> Option<Url> {
    base.join(reference.trim()).ok()
}
