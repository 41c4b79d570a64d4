//! Output module for rendering crawl results
//!
//! This module handles:
//! - Rendering records as JSON or a Markdown table
//! - Writing the rendering to a file or stdout
//! - Computing catalogue statistics over a result set

mod markdown;
pub mod stats;

pub use markdown::format_markdown;
pub use stats::{print_statistics, write_statistics, CatalogueStatistics};

use crate::book::BookRecord;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to format output: {0}")]
    Format(String),

    #[error("Unknown output format: {0}")]
    UnknownFormat(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Rendering of a result set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Json,
    Markdown,
}

impl FromStr for OutputFormat {
    type Err = OutputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "markdown" | "md" => Ok(Self::Markdown),
            other => Err(OutputError::UnknownFormat(other.to_string())),
        }
    }
}

/// Renders records as a pretty-printed JSON array
pub fn to_json(records: &[BookRecord]) -> OutputResult<String> {
    serde_json::to_string_pretty(records).map_err(|e| OutputError::Format(e.to_string()))
}

/// Renders records in the given format
pub fn render(records: &[BookRecord], format: OutputFormat) -> OutputResult<String> {
    match format {
        OutputFormat::Json => to_json(records),
        OutputFormat::Markdown => Ok(format_markdown(records)),
    }
}

/// Writes rendered records to `path`, or to stdout when no path is given
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote the output
/// * `Err(OutputError)` - Failed to render or write
pub fn write_output(
    records: &[BookRecord],
    format: OutputFormat,
    path: Option<&Path>,
) -> OutputResult<()> {
    let mut rendered = render(records, format)?;
    if !rendered.ends_with('\n') {
        rendered.push('\n');
    }

    match path {
        Some(path) => std::fs::write(path, rendered)?,
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
            stdout.flush()?;
        }
    }

    Ok(())
}
