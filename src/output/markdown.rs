//! Markdown rendering of a result set

use crate::book::BookRecord;
use crate::output::stats::CatalogueStatistics;

/// Formats records as a Markdown document with a summary and one table row per book
///
/// # Returns
///
/// A formatted markdown string
pub fn format_markdown(records: &[BookRecord]) -> String {
    let stats = CatalogueStatistics::from_records(records);
    let mut md = String::new();

    md.push_str("# Bookshelf Catalogue\n\n");

    md.push_str(&format!("- **Books**: {}\n", stats.total));
    md.push_str(&format!("- **In Stock**: {}\n", stats.in_stock));
    if let Some(average) = stats.average_rating() {
        md.push_str(&format!("- **Average Rating**: {:.2}\n", average));
    }
    md.push('\n');

    if records.is_empty() {
        md.push_str("*No books found.*\n");
        return md;
    }

    md.push_str("| # | Title | Price | Availability | Rating |\n");
    md.push_str("|---|-------|-------|--------------|--------|\n");

    for (index, record) in records.iter().enumerate() {
        md.push_str(&format!(
            "| {} | [{}]({}) | {} | {} | {} |\n",
            index + 1,
            escape_cell(&record.title),
            record.link,
            escape_cell(&record.price),
            escape_cell(&record.availability),
            stars(&record.rating)
        ));
    }

    md
}

/// Pipes and newlines would break the table row
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

fn stars(rating: &str) -> String {
    match rating.parse::<crate::book::StarRating>() {
        Ok(rating) => "★".repeat(rating.stars() as usize),
        Err(()) => "-".to_string(),
    }
}
