//! Crawl loop tests against an in-memory catalogue
//!
//! These tests drive the crawler through a fake browsing capability so the
//! pagination, deduplication and termination rules can be checked exactly.

mod common;

use bookshelf::config::CrawlerConfig;
use bookshelf::crawler::{CrawlRequest, RawCard};
use bookshelf::CrawlError;
use common::{card, crawler_over, crawler_over_with, page_cards, FakeCatalogue, FakeFailure};
use std::collections::HashSet;
use url::Url;

fn three_page_catalogue() -> FakeCatalogue {
    FakeCatalogue::with_pages(vec![page_cards(1, 20), page_cards(2, 20), page_cards(3, 20)])
}

#[tokio::test]
async fn test_walks_pages_until_limit() {
    let (crawler, journal) = crawler_over(three_page_catalogue());

    let records = crawler.crawl(CrawlRequest::new(30)).await.expect("Crawl failed");

    assert_eq!(records.len(), 30);
    assert_eq!(
        journal.visited(),
        vec![
            "http://books.toscrape.com/".to_string(),
            "http://books.toscrape.com/catalogue/page-2.html".to_string(),
        ]
    );
    assert_eq!(journal.opened(), 1);
    assert_eq!(journal.closed(), 1);
}

#[tokio::test]
async fn test_result_never_exceeds_limit() {
    for limit in [1, 7, 20, 21, 59, 60, 61, 500] {
        let (crawler, _) = crawler_over(three_page_catalogue());
        let records = crawler.crawl(CrawlRequest::new(limit)).await.unwrap();
        assert!(records.len() <= limit, "limit {} gave {}", limit, records.len());
        assert_eq!(records.len(), limit.min(60));
    }
}

#[tokio::test]
async fn test_limit_one_visits_only_first_page() {
    let (crawler, journal) = crawler_over(three_page_catalogue());

    let records = crawler.crawl(CrawlRequest::new(1)).await.unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].title, "book p1 0_100");
    assert_eq!(journal.visited(), vec!["http://books.toscrape.com/".to_string()]);
}

#[tokio::test]
async fn test_target_page_only() {
    let (crawler, journal) = crawler_over(three_page_catalogue());

    let records = crawler
        .crawl(CrawlRequest::new(5).with_target_page(2))
        .await
        .unwrap();

    assert_eq!(records.len(), 5);
    assert!(records.iter().all(|r| r.title.starts_with("book p2 ")));
    assert_eq!(
        journal.visited(),
        vec!["http://books.toscrape.com/catalogue/page-2.html".to_string()]
    );
}

#[tokio::test]
async fn test_target_page_does_not_follow_next_with_capacity_left() {
    let (crawler, journal) = crawler_over(three_page_catalogue());

    let records = crawler
        .crawl(CrawlRequest::new(50).with_target_page(2))
        .await
        .unwrap();

    assert_eq!(records.len(), 20);
    assert_eq!(journal.visited().len(), 1);
}

#[tokio::test]
async fn test_exhausted_catalogue_returns_fewer() {
    let (crawler, journal) = crawler_over(three_page_catalogue());

    let records = crawler.crawl(CrawlRequest::new(100)).await.unwrap();

    assert_eq!(records.len(), 60);
    assert_eq!(journal.visited().len(), 3);
}

#[tokio::test]
async fn test_ids_unique_across_pages() {
    let catalogue = FakeCatalogue::with_pages(vec![
        vec![card("alpha_1"), card("beta_2"), card("alpha_1")],
        vec![card("beta_2"), card("gamma_3")],
    ]);
    let (crawler, _) = crawler_over(catalogue);

    let records = crawler.crawl(CrawlRequest::new(10)).await.unwrap();

    let ids: Vec<_> = records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(
        ids,
        vec!["alpha_1/index.html", "beta_2/index.html", "gamma_3/index.html"]
    );
    let unique: HashSet<_> = ids.iter().collect();
    assert_eq!(unique.len(), ids.len());
}

#[tokio::test]
async fn test_urls_are_absolute() {
    let (crawler, _) = crawler_over(three_page_catalogue());

    let records = crawler.crawl(CrawlRequest::new(60)).await.unwrap();

    for record in &records {
        let link = Url::parse(&record.link).expect("link must be absolute");
        assert_eq!(link.host_str(), Some("books.toscrape.com"));

        let image = record.image.as_deref().expect("fixture cards carry images");
        let image = Url::parse(image).expect("image must be absolute");
        assert!(image.path().starts_with("/media/cache/"));
    }

    assert_eq!(
        records[20].link,
        "http://books.toscrape.com/catalogue/book-p2-0_200/index.html"
    );
}

#[tokio::test]
async fn test_identity_stable_across_crawls() {
    let (first, _) = crawler_over(three_page_catalogue());
    let (second, _) = crawler_over(three_page_catalogue());

    let a: Vec<_> = first
        .crawl(CrawlRequest::new(45))
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.id)
        .collect();
    let b: Vec<_> = second
        .crawl(CrawlRequest::new(45))
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.id)
        .collect();

    assert_eq!(a, b);
}

#[tokio::test]
async fn test_failure_on_page_two_discards_batch_and_closes_session() {
    let catalogue = three_page_catalogue().failing_on(2, FakeFailure::NavigationTimeout);
    let (crawler, journal) = crawler_over(catalogue);

    let result = crawler.crawl(CrawlRequest::new(50)).await;

    match result {
        Err(CrawlError::PageLoad { url, message }) => {
            assert_eq!(url, "http://books.toscrape.com/catalogue/page-2.html");
            assert!(message.contains("timed out"));
        }
        other => panic!("Expected page load error, got {:?}", other),
    }
    assert_eq!(journal.visited().len(), 2);
    assert_eq!(journal.closed(), 1);
}

#[tokio::test]
async fn test_missing_listing_is_page_load_error() {
    let catalogue = three_page_catalogue().failing_on(1, FakeFailure::MissingListing);
    let (crawler, journal) = crawler_over(catalogue);

    let result = crawler.crawl(CrawlRequest::new(5)).await;

    assert!(matches!(result, Err(CrawlError::PageLoad { .. })));
    assert_eq!(journal.closed(), 1);
}

#[tokio::test]
async fn test_session_failure() {
    let (crawler, journal) = crawler_over(three_page_catalogue().failing_to_open());

    let result = crawler.crawl(CrawlRequest::new(5)).await;

    assert!(matches!(result, Err(CrawlError::Session(_))));
    assert!(journal.visited().is_empty());
}

#[tokio::test]
async fn test_invalid_request_opens_no_session() {
    let (crawler, journal) = crawler_over(three_page_catalogue());

    let zero_limit = crawler.crawl(CrawlRequest::new(0)).await;
    let zero_page = crawler.crawl(CrawlRequest::new(5).with_target_page(0)).await;

    assert!(matches!(zero_limit, Err(CrawlError::InvalidRequest(_))));
    assert!(matches!(zero_page, Err(CrawlError::InvalidRequest(_))));
    assert_eq!(journal.opened(), 0);
}

#[tokio::test]
async fn test_max_pages_caps_the_walk() {
    let config = CrawlerConfig {
        max_pages: 2,
        ..CrawlerConfig::default()
    };
    let (crawler, journal) = crawler_over_with(three_page_catalogue(), config);

    let records = crawler.crawl(CrawlRequest::new(100)).await.unwrap();

    assert_eq!(records.len(), 40);
    assert_eq!(journal.visited().len(), 2);
}

#[tokio::test]
async fn test_duplicate_only_page_keeps_walking() {
    let catalogue = FakeCatalogue::with_pages(vec![
        vec![card("alpha_1")],
        vec![card("alpha_1")],
        vec![card("beta_2")],
    ]);
    let (crawler, journal) = crawler_over(catalogue);

    let records = crawler.crawl(CrawlRequest::new(2)).await.unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(journal.visited().len(), 3);
}

#[tokio::test]
async fn test_missing_fields_defaulted() {
    let catalogue = FakeCatalogue::with_pages(vec![vec![
        RawCard {
            href: Some("bare_1/index.html".to_string()),
            ..RawCard::default()
        },
        card("rated_2"),
    ]]);
    let (crawler, _) = crawler_over(catalogue);

    let records = crawler.crawl(CrawlRequest::new(10)).await.unwrap();

    let bare = &records[0];
    assert_eq!(bare.title, "Untitled");
    assert_eq!(bare.author, "Unknown");
    assert_eq!(bare.rating, "");
    assert_eq!(bare.price, "");
    assert_eq!(bare.availability, "");
    assert!(bare.image.is_none());
    assert_eq!(bare.link, "http://books.toscrape.com/bare_1/index.html");
}

#[tokio::test]
async fn test_degenerate_links_collapse_to_one_record() {
    let catalogue = FakeCatalogue::with_pages(vec![vec![RawCard::default(), RawCard::default()]]);
    let (crawler, _) = crawler_over(catalogue);

    let records = crawler.crawl(CrawlRequest::new(10)).await.unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].link, "http://books.toscrape.com/");
}
