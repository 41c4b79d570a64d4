//! HTML parser for catalogue listing pages
//!
//! This module handles parsing one listing page to extract:
//! - One [`RawCard`] per `.product_pod` listing card, in document order
//! - Whether the page offers a "next page" link
//!
//! Each card field has its own extraction function returning `None` when the
//! field is missing or blank. No defaults are applied here.

use crate::book::StarRating;
use scraper::{ElementRef, Html, Selector};

/// Marker of one listing card
pub const CARD_SELECTOR: &str = ".product_pod";

/// Marker of the "next page" link
pub const NEXT_PAGE_SELECTOR: &str = ".next";

/// Fields found on one listing card, before any defaulting
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawCard {
    /// `title` attribute of the card's heading link
    pub title: Option<String>,

    /// `href` of the card's heading link, relative to the listing page
    pub href: Option<String>,

    /// Price text, e.g. "£51.77"
    pub price: Option<String>,

    /// Stock text with whitespace runs collapsed
    pub availability: Option<String>,

    /// Star rating read from the `star-rating` class list
    pub rating: Option<StarRating>,

    /// `src` of the thumbnail, relative to the listing page
    pub image: Option<String>,
}

/// Everything the crawler needs from one listing page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingPage {
    /// Cards in document order
    pub cards: Vec<RawCard>,

    /// Whether a "next page" link is present
    pub has_next_page: bool,
}

/// Parses a listing page
///
/// # Returns
///
/// * `Ok(ListingPage)` - The page carries listing markup
/// * `Err(String)` - No listing card was found on the page
///
/// # Example
///
/// ```
/// use bookshelf::crawler::parse_listing;
///
/// let html = r#"<article class="product_pod"><h3><a href="x_1/index.html" title="X">X</a></h3></article>"#;
/// let page = parse_listing(html).unwrap();
/// assert_eq!(page.cards.len(), 1);
/// assert_eq!(page.cards[0].title.as_deref(), Some("X"));
/// assert!(!page.has_next_page);
/// ```
pub fn parse_listing(html: &str) -> Result<ListingPage, String> {
    let document = Html::parse_document(html);

    let card_selector = Selector::parse(CARD_SELECTOR)
        .map_err(|e| format!("invalid card selector: {:?}", e))?;

    let cards: Vec<RawCard> = document.select(&card_selector).map(extract_card).collect();

    if cards.is_empty() {
        return Err("listing markup not found".to_string());
    }

    Ok(ListingPage {
        cards,
        has_next_page: has_next_page(&document),
    })
}

/// Extracts every field of one card independently
pub fn extract_card(card: ElementRef<'_>) -> RawCard {
    RawCard {
        title: extract_title(card),
        href: extract_href(card),
        price: extract_price(card),
        availability: extract_availability(card),
        rating: extract_rating(card),
        image: extract_image(card),
    }
}

fn has_next_page(document: &Html) -> bool {
    Selector::parse(NEXT_PAGE_SELECTOR)
        .map(|selector| document.select(&selector).next().is_some())
        .unwrap_or(false)
}

fn first_match<'a>(card: ElementRef<'a>, selector: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(selector).ok()?;
    card.select(&selector).next()
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn extract_title(card: ElementRef<'_>) -> Option<String> {
    first_match(card, "h3 a")?
        .value()
        .attr("title")
        .and_then(non_empty)
}

fn extract_href(card: ElementRef<'_>) -> Option<String> {
    first_match(card, "h3 a")?
        .value()
        .attr("href")
        .and_then(non_empty)
}

fn extract_price(card: ElementRef<'_>) -> Option<String> {
    let element = first_match(card, ".price_color")?;
    non_empty(&element.text().collect::<String>())
}

fn extract_availability(card: ElementRef<'_>) -> Option<String> {
    let element = first_match(card, ".instock.availability")?;
    let text = element.text().collect::<String>();
    non_empty(&text.split_whitespace().collect::<Vec<_>>().join(" "))
}

/// The rating class sits on the card itself or on a `.star-rating` descendant
fn extract_rating(card: ElementRef<'_>) -> Option<StarRating> {
    let holder = if card.value().classes().any(|c| c == "star-rating") {
        card
    } else {
        first_match(card, ".star-rating")?
    };

    holder
        .value()
        .classes()
        .find_map(|class| class.parse::<StarRating>().ok())
}

fn extract_image(card: ElementRef<'_>) -> Option<String> {
    first_match(card, "img")?.value().attr("src").and_then(non_empty)
}
