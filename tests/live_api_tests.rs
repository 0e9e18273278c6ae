//! Tests against a running library backend
//!
//! Run with: `ELIBRARY_API_URL=http://localhost:8080 cargo test -- --ignored`

use std::sync::Arc;

use elibrary_client::{
    config::AppConfig, services::catalog, FetchError, FetchResult, Filters, HttpTransport,
    LibraryClient, TokenSession,
};

fn client(token: Option<&str>) -> LibraryClient {
    let mut config = AppConfig::default();
    if let Ok(url) = std::env::var("ELIBRARY_API_URL") {
        config.api.base_url = url;
    }
    let transport = HttpTransport::new(&config.api).expect("Failed to build transport");
    LibraryClient::new(
        Arc::new(transport),
        Arc::new(TokenSession::from_token(token)),
        &config,
    )
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_list_books() {
    let client = client(None);
    let controller = client.controller(catalog::books());

    controller
        .request_page_as(0, &Filters::new(), client.session())
        .await;

    match controller.current_result() {
        FetchResult::Loaded(page) => assert!(page.len() <= page.page_size() as usize),
        other => panic!("Expected a page of books, got {:?}", other),
    }
}

#[tokio::test]
#[ignore]
async fn test_search_books_by_title() {
    let client = client(None);
    let controller = client.controller(catalog::books_by_title());
    let mut filters = Filters::new();
    filters.insert("title".to_string(), "a".to_string());

    controller
        .request_page_as(0, &filters, client.session())
        .await;

    assert!(controller.current_result().page().is_some());
}

#[tokio::test]
#[ignore]
async fn test_open_messages_without_token() {
    let client = client(None);
    let controller = client.controller(catalog::open_messages());

    controller
        .request_page_as(0, &Filters::new(), client.session())
        .await;

    assert_eq!(
        controller.current_result(),
        FetchResult::Failed(FetchError::Unauthenticated)
    );
}

#[tokio::test]
#[ignore]
async fn test_open_messages_with_rejected_token() {
    let client = client(Some("not-a-real-token"));
    let controller = client.controller(catalog::open_messages());

    controller
        .request_page_as(0, &Filters::new(), client.session())
        .await;

    let result = controller.current_result();
    assert!(matches!(
        result.error(),
        Some(FetchError::Unauthorized(_)) | Some(FetchError::Rejected(_))
    ));
}
