//! Statistics over a crawl result set
//!
//! This module provides functionality for summarizing and displaying
//! what a crawl brought back.

use crate::book::{BookRecord, StarRating};
use std::collections::BTreeMap;
use std::io::{self, Write};

/// Catalogue statistics summary
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogueStatistics {
    /// Total number of records
    pub total: u64,

    /// Records whose availability reads "In stock"
    pub in_stock: u64,

    /// Records carrying a thumbnail URL
    pub with_image: u64,

    /// Count of records by star rating
    pub by_rating: BTreeMap<StarRating, u64>,

    /// Records without a recognizable rating
    pub unrated: u64,
}

impl CatalogueStatistics {
    pub fn from_records(records: &[BookRecord]) -> Self {
        let mut stats = Self {
            total: records.len() as u64,
            ..Self::default()
        };

        for record in records {
            if record.availability.eq_ignore_ascii_case("in stock") {
                stats.in_stock += 1;
            }
            if record.image.is_some() {
                stats.with_image += 1;
            }
            match record.star_rating() {
                Some(rating) => *stats.by_rating.entry(rating).or_insert(0) += 1,
                None => stats.unrated += 1,
            }
        }

        stats
    }

    /// Mean number of stars over rated records
    pub fn average_rating(&self) -> Option<f64> {
        let rated: u64 = self.by_rating.values().sum();
        if rated == 0 {
            return None;
        }

        let stars: u64 = self
            .by_rating
            .iter()
            .map(|(rating, count)| rating.stars() as u64 * count)
            .sum();

        Some(stars as f64 / rated as f64)
    }
}

/// Writes statistics in a human-readable format
pub fn write_statistics<W: Write>(out: &mut W, stats: &CatalogueStatistics) -> io::Result<()> {
    writeln!(out, "=== Bookshelf Crawl Statistics ===\n")?;

    writeln!(out, "Overall:")?;
    writeln!(out, "  Books: {}", stats.total)?;
    writeln!(out, "  In stock: {}", stats.in_stock)?;
    writeln!(out, "  With image: {}", stats.with_image)?;

    if let Some(average) = stats.average_rating() {
        writeln!(out, "  Average rating: {:.2}", average)?;
    }

    writeln!(out, "\nBooks by Rating:")?;
    for rating in StarRating::ALL.iter().rev() {
        let count = stats.by_rating.get(rating).copied().unwrap_or(0);
        writeln!(out, "  {:6} {}", rating.as_str(), count)?;
    }
    if stats.unrated > 0 {
        writeln!(out, "  {:6} {}", "None", stats.unrated)?;
    }

    writeln!(out)
}

/// Prints statistics to stderr, keeping stdout for the records themselves
pub fn print_statistics(stats: &CatalogueStatistics) -> io::Result<()> {
    write_statistics(&mut io::stderr().lock(), stats)
}
