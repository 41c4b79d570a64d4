//! Book records produced by a catalogue crawl
//!
//! A `BookRecord` is built from one listing card. All "what counts as missing"
//! decisions are made here, in [`BookRecord::from_card`]; the extraction layer only
//! reports which fields it could find.

use crate::crawler::RawCard;
use crate::url::{derive_book_id, resolve_against};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

/// Title used when a card has no usable title attribute
pub const UNTITLED: &str = "Untitled";

/// The catalogue never exposes authors, years or genres
pub const UNKNOWN: &str = "Unknown";

/// Placeholder genre list
pub const GENERAL_GENRE: &str = "General";

/// One book as listed in the catalogue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRecord {
    /// Canonical identity derived from the absolute detail-page URL
    pub id: String,

    pub title: String,

    pub author: String,

    /// Absolute URL of the detail page
    pub link: String,

    /// Raw price text, e.g. "£51.77"
    pub price: String,

    /// Whitespace-normalized stock text, e.g. "In stock"
    pub availability: String,

    /// Word form of the star rating ("One".."Five"), or empty
    pub rating: String,

    /// Absolute thumbnail URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    pub year: String,

    pub genres: Vec<String>,
}

impl BookRecord {
    /// Builds a record from raw card fields found on the listing page at `page_url`
    ///
    /// Link and image are resolved against the page URL. A missing link resolves to
    /// the page itself; an image that is missing or cannot be resolved is omitted.
    pub fn from_card(card: &RawCard, page_url: &Url) -> Self {
        let href = card.href.as_deref().unwrap_or_default();
        let link = resolve_against(page_url, href).unwrap_or_else(|| {
            tracing::debug!("Unresolvable card link {:?} on {}", href, page_url);
            page_url.clone()
        });

        let image = card
            .image
            .as_deref()
            .and_then(|src| resolve_against(page_url, src))
            .map(String::from);

        let link = link.to_string();

        Self {
            id: derive_book_id(&link),
            title: card.title.clone().unwrap_or_else(|| UNTITLED.to_string()),
            author: UNKNOWN.to_string(),
            link,
            price: card.price.clone().unwrap_or_default(),
            availability: card.availability.clone().unwrap_or_default(),
            rating: card
                .rating
                .map(|rating| rating.as_str().to_string())
                .unwrap_or_default(),
            image,
            year: UNKNOWN.to_string(),
            genres: vec![GENERAL_GENRE.to_string()],
        }
    }

    /// Parsed star rating, if the record has one
    pub fn star_rating(&self) -> Option<StarRating> {
        self.rating.parse().ok()
    }
}

/// Star rating as encoded in the catalogue's `star-rating` class list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StarRating {
    One,
    Two,
    Three,
    Four,
    Five,
}

impl StarRating {
    pub const ALL: [StarRating; 5] = [
        StarRating::One,
        StarRating::Two,
        StarRating::Three,
        StarRating::Four,
        StarRating::Five,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::One => "One",
            Self::Two => "Two",
            Self::Three => "Three",
            Self::Four => "Four",
            Self::Five => "Five",
        }
    }

    /// Number of stars
    pub fn stars(&self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
            Self::Three => 3,
            Self::Four => 4,
            Self::Five => 5,
        }
    }
}

impl fmt::Display for StarRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StarRating {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|rating| rating.as_str() == s)
            .ok_or(())
    }
}
