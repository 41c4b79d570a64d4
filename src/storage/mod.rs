//! Storage module for the served dataset
//!
//! This module holds the result of the last successful crawl in memory:
//! - The snapshot is replaced wholesale, never merged
//! - Reads are paginated slices of the snapshot
//! - Nothing survives a process restart

use crate::book::BookRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

/// One page of the stored records
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookPage {
    pub page: usize,
    pub limit: usize,
    pub total_items: usize,
    pub total_pages: usize,
    pub data: Vec<BookRecord>,
}

#[derive(Debug, Default)]
struct Snapshot {
    records: Vec<BookRecord>,
    scraped_at: Option<DateTime<Utc>>,
}

/// In-memory store of the records being served
///
/// Owned by whoever serves the records and passed around explicitly.
#[derive(Debug, Default)]
pub struct BookStore {
    snapshot: RwLock<Snapshot>,
}

impl BookStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store already holding `records`
    pub fn with_records(records: Vec<BookRecord>) -> Self {
        Self {
            snapshot: RwLock::new(Snapshot {
                records,
                scraped_at: Some(Utc::now()),
            }),
        }
    }

    /// Swaps in a new result set
    pub async fn replace(&self, records: Vec<BookRecord>) {
        let mut snapshot = self.snapshot.write().await;
        tracing::debug!(
            "Replacing {} stored records with {}",
            snapshot.records.len(),
            records.len()
        );
        *snapshot = Snapshot {
            records,
            scraped_at: Some(Utc::now()),
        };
    }

    /// Returns page `page` (1-based) of `limit` records
    ///
    /// `page` and `limit` are clamped to at least 1. Pages past the end are empty.
    pub async fn page(&self, page: usize, limit: usize) -> BookPage {
        let page = page.max(1);
        let limit = limit.max(1);
        let snapshot = self.snapshot.read().await;

        let total_items = snapshot.records.len();
        let start = (page - 1).saturating_mul(limit).min(total_items);
        let end = start.saturating_add(limit).min(total_items);

        BookPage {
            page,
            limit,
            total_items,
            total_pages: total_items.div_ceil(limit),
            data: snapshot.records[start..end].to_vec(),
        }
    }

    pub async fn len(&self) -> usize {
        self.snapshot.read().await.records.len()
    }

    /// When the current snapshot was stored, if ever
    pub async fn scraped_at(&self) -> Option<DateTime<Utc>> {
        self.snapshot.read().await.scraped_at
    }
}
