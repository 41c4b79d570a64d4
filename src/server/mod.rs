//! HTTP API serving the last crawl result
//!
//! Routes:
//! - `GET /healthz`
//! - `GET /api/books?page=&limit=` pages through the stored records
//! - `GET /api/books/scrape?limit=&page=` crawls and replaces the stored records

mod handlers;

pub use handlers::{ErrorResponse, ListParams, ListResponse, ScrapeParams, ScrapeResponse};

use crate::config::Config;
use crate::crawler::Crawler;
use crate::storage::BookStore;
use crate::BookshelfError;
use axum::routing::get;
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared state of the HTTP layer
#[derive(Clone)]
pub struct AppState {
    crawler: Crawler,
    store: Arc<BookStore>,
    /// Held for the whole of a scrape so only one crawl runs at a time
    scrape_lock: Arc<Mutex<()>>,
    default_page_size: usize,
    default_limit: usize,
}

impl AppState {
    pub fn new(crawler: Crawler, store: Arc<BookStore>, config: &Config) -> Self {
        Self {
            crawler,
            store,
            scrape_lock: Arc::new(Mutex::new(())),
            default_page_size: config.server.default_page_size.max(1),
            default_limit: config.crawler.default_limit.max(1),
        }
    }
}

/// Builds the API router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(|| async { "ok\n" }))
        .route("/api/books", get(handlers::list_books))
        .route("/api/books/scrape", get(handlers::scrape_books))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serves the API on `addr` until Ctrl-C
pub async fn serve(config: &Config, addr: SocketAddr) -> Result<(), BookshelfError> {
    let crawler = Crawler::from_config(config)?;
    tracing::info!("Scrapes will crawl {}", crawler.base_url());
    let state = AppState::new(crawler, Arc::new(BookStore::new()), config);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Server running at http://{}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}
