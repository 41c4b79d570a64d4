use crate::book::BookRecord;
use crate::crawler::CrawlRequest;
use crate::server::AppState;
use crate::storage::BookPage;
use crate::CrawlError;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

/// Query of `GET /api/books`; unusable values fall back to defaults
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// Query of `GET /api/books/scrape`; unusable values are rejected
#[derive(Debug, Default, Deserialize)]
pub struct ScrapeParams {
    pub limit: Option<String>,
    pub page: Option<String>,
}

impl ScrapeParams {
    fn to_request(&self, default_limit: usize) -> Result<CrawlRequest, String> {
        let limit = match &self.limit {
            Some(raw) => positive(raw).ok_or_else(|| format!("invalid limit: {:?}", raw))?,
            None => default_limit,
        };

        let mut request = CrawlRequest::new(limit);
        if let Some(raw) = &self.page {
            let page = positive(raw)
                .and_then(|p| u32::try_from(p).ok())
                .ok_or_else(|| format!("invalid page: {:?}", raw))?;
            request = request.with_target_page(page);
        }

        Ok(request)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ListResponse {
    pub success: bool,
    #[serde(flatten)]
    pub page: BookPage,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeResponse {
    pub success: bool,
    pub message: String,
    pub books_scraped: usize,
    pub data: Vec<BookRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

fn positive(raw: &str) -> Option<usize> {
    raw.trim().parse::<usize>().ok().filter(|n| *n > 0)
}

fn error_response(status: StatusCode, error: String) -> Response {
    (
        status,
        Json(ErrorResponse {
            success: false,
            error,
        }),
    )
        .into_response()
}

pub(crate) async fn list_books(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Json<ListResponse> {
    let page = params.page.as_deref().and_then(positive).unwrap_or(1);
    let limit = params
        .limit
        .as_deref()
        .and_then(positive)
        .unwrap_or(state.default_page_size);

    Json(ListResponse {
        success: true,
        page: state.store.page(page, limit).await,
    })
}

pub(crate) async fn scrape_books(
    State(state): State<AppState>,
    Query(params): Query<ScrapeParams>,
) -> Response {
    let request = match params.to_request(state.default_limit) {
        Ok(request) => request,
        Err(error) => return error_response(StatusCode::BAD_REQUEST, error),
    };

    let _guard = state.scrape_lock.lock().await;

    match state.crawler.crawl(request).await {
        Ok(records) => {
            state.store.replace(records.clone()).await;
            if let Some(scraped_at) = state.store.scraped_at().await {
                tracing::info!(
                    "Stored {} records (scraped at {})",
                    state.store.len().await,
                    scraped_at.to_rfc3339()
                );
            }
            Json(ScrapeResponse {
                success: true,
                message: "Scraping completed successfully".to_string(),
                books_scraped: records.len(),
                data: records,
            })
            .into_response()
        }
        Err(CrawlError::InvalidRequest(error)) => error_response(StatusCode::BAD_REQUEST, error),
        Err(e) => {
            tracing::error!("Scrape failed: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}
