//! HTTP API tests
//!
//! The router is driven in-process with `tower::ServiceExt::oneshot`; crawls go
//! through the in-memory catalogue so no network is involved.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use bookshelf::server::{router, AppState};
use bookshelf::{BookStore, CrawlRequest};
use common::{crawler_over, page_cards, test_config, FakeCatalogue, FakeFailure, Journal};
use http_body_util::BodyExt;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

fn app(catalogue: FakeCatalogue, store: Arc<BookStore>) -> (axum::Router, Arc<Journal>) {
    let (crawler, journal) = crawler_over(catalogue);
    let state = AppState::new(crawler, store, &test_config());
    (router(state), journal)
}

fn catalogue() -> FakeCatalogue {
    FakeCatalogue::with_pages(vec![page_cards(1, 20), page_cards(2, 20), page_cards(3, 20)])
}

async fn get(app: axum::Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

#[tokio::test]
async fn test_healthz() {
    let (app, _) = app(catalogue(), Arc::new(BookStore::new()));

    let response = app
        .oneshot(Request::builder().uri("/healthz").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_list_before_any_scrape_is_empty() {
    let (app, _) = app(catalogue(), Arc::new(BookStore::new()));

    let (status, body) = get(app, "/api/books").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["page"], 1);
    assert_eq!(body["limit"], 10);
    assert_eq!(body["totalItems"], 0);
    assert_eq!(body["totalPages"], 0);
    assert_eq!(body["data"].as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn test_scrape_replaces_store() {
    let store = Arc::new(BookStore::new());
    let (app, journal) = app(catalogue(), store.clone());

    let (status, body) = get(app, "/api/books/scrape?limit=25").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Scraping completed successfully");
    assert_eq!(body["booksScraped"], 25);
    assert_eq!(body["data"].as_array().map(Vec::len), Some(25));
    assert_eq!(body["data"][0]["author"], "Unknown");
    assert_eq!(body["data"][0]["genres"][0], "General");

    assert_eq!(store.len().await, 25);
    assert!(store.scraped_at().await.is_some());
    assert_eq!(journal.closed(), 1);
}

#[tokio::test]
async fn test_scrape_then_list_pages() {
    let store = Arc::new(BookStore::new());
    let (app, _) = app(catalogue(), store.clone());

    let (status, _) = get(app.clone(), "/api/books/scrape?limit=25").await;
    assert_eq!(status, StatusCode::OK);

    let (_, first) = get(app.clone(), "/api/books").await;
    assert_eq!(first["totalItems"], 25);
    assert_eq!(first["totalPages"], 3);
    assert_eq!(first["data"].as_array().map(Vec::len), Some(10));

    let (_, last) = get(app.clone(), "/api/books?page=3&limit=10").await;
    assert_eq!(last["page"], 3);
    assert_eq!(last["data"].as_array().map(Vec::len), Some(5));

    let (_, wide) = get(app, "/api/books?page=1&limit=100").await;
    assert_eq!(wide["totalPages"], 1);
    assert_eq!(wide["data"].as_array().map(Vec::len), Some(25));
}

#[tokio::test]
async fn test_list_falls_back_on_bad_params() {
    let (app, _) = app(catalogue(), Arc::new(BookStore::new()));

    let (status, body) = get(app, "/api/books?page=abc&limit=-3").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["page"], 1);
    assert_eq!(body["limit"], 10);
}

#[tokio::test]
async fn test_scrape_target_page() {
    let (app, journal) = app(catalogue(), Arc::new(BookStore::new()));

    let (status, body) = get(app, "/api/books/scrape?limit=5&page=2").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["booksScraped"], 5);
    assert_eq!(
        journal.visited(),
        vec!["http://books.toscrape.com/catalogue/page-2.html".to_string()]
    );
}

#[tokio::test]
async fn test_scrape_failure_keeps_previous_records() {
    let store = Arc::new(BookStore::new());
    let (healthy, _) = app(catalogue(), store.clone());
    let (status, _) = get(healthy, "/api/books/scrape?limit=15").await;
    assert_eq!(status, StatusCode::OK);

    let failing = catalogue().failing_on(2, FakeFailure::NavigationTimeout);
    let (broken, journal) = app(failing, store.clone());
    let (status, body) = get(broken, "/api/books/scrape?limit=30").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert!(body["error"]
        .as_str()
        .is_some_and(|e| e.contains("page-2.html")));

    assert_eq!(store.len().await, 15);
    assert_eq!(journal.closed(), 1);
}

#[tokio::test]
async fn test_scrape_rejects_bad_limit() {
    let (app, journal) = app(catalogue(), Arc::new(BookStore::new()));

    let (status, body) = get(app.clone(), "/api/books/scrape?limit=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let (status, _) = get(app, "/api/books/scrape?page=zero").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert_eq!(journal.opened(), 0);
}

#[tokio::test]
async fn test_concurrent_scrapes_run_one_at_a_time() {
    let store = Arc::new(BookStore::new());
    let slow = catalogue().with_page_delay(Duration::from_millis(50));
    let (app, journal) = app(slow, store.clone());

    let (a, b) = tokio::join!(
        get(app.clone(), "/api/books/scrape?limit=30"),
        get(app, "/api/books/scrape?limit=45"),
    );

    assert_eq!(a.0, StatusCode::OK);
    assert_eq!(b.0, StatusCode::OK);
    assert_eq!(journal.opened(), 2);
    assert_eq!(journal.closed(), 2);
    assert_eq!(journal.peak_live(), 1, "scrapes overlapped");

    let stored = store.len().await;
    assert!(stored == 30 || stored == 45);
}

#[tokio::test]
async fn test_slow_catalogue_lets_unguarded_crawls_overlap() {
    // The same crawls outside the HTTP layer do overlap, so the peak above
    // comes from the scrape lock and not from the fake
    let slow = catalogue().with_page_delay(Duration::from_millis(50));
    let (crawler, journal) = crawler_over(slow);

    let (a, b) = tokio::join!(
        crawler.crawl(CrawlRequest::new(30)),
        crawler.crawl(CrawlRequest::new(45)),
    );

    assert!(a.is_ok() && b.is_ok());
    assert_eq!(journal.peak_live(), 2);
}
