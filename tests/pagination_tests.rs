//! Integration tests for cursor pagination.
//!
//! These tests verify that the paginator passes each page's `after` cursor
//! to the next request, stops when no cursor is returned, and makes no
//! further requests once exhausted.

use gocardless_api::clients::{HttpError, RequestContext, RequestOptions};
use gocardless_api::rest::resources::{Customer, CustomerListParams};
use gocardless_api::rest::PaginatorState;
use gocardless_api::{AccessToken, BaseUrl, GoCardlessConfig, RestClient};
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn create_client(server: &MockServer) -> RestClient {
    let config = GoCardlessConfig::builder()
        .access_token(AccessToken::new("test-token").unwrap())
        .base_url(BaseUrl::new(server.uri()).unwrap())
        .max_attempts(2)
        .build()
        .unwrap();
    RestClient::new(&config).unwrap()
}

fn page_body(ids: &[&str], after: Option<&str>) -> Value {
    let customers: Vec<Value> = ids.iter().map(|id| json!({ "id": id })).collect();
    json!({
        "customers": customers,
        "meta": { "cursors": { "before": null, "after": after }, "limit": 2 }
    })
}

/// Mounts a three-page collection: CU1 CU2 | CU3 CU4 | CU5.
async fn mount_three_pages(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/customers"))
        .and(query_param_is_missing("after"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(page_body(&["CU1", "CU2"], Some("CU2"))),
        )
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/customers"))
        .and(query_param("after", "CU2"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(page_body(&["CU3", "CU4"], Some("CU4"))),
        )
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/customers"))
        .and(query_param("after", "CU4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(&["CU5"], None)))
        .expect(1)
        .mount(server)
        .await;
}

fn ids(customers: &[Customer]) -> Vec<&str> {
    customers.iter().map(|c| c.id.as_str()).collect()
}

// ============================================================================
// Cursor Handling
// ============================================================================

#[tokio::test]
async fn test_paginator_walks_every_page_in_order() {
    let server = MockServer::start().await;
    mount_three_pages(&server).await;

    let client = create_client(&server);
    let ctx = RequestContext::background();
    let params = CustomerListParams {
        limit: Some(2),
        ..Default::default()
    };
    let mut pages = client.paginate::<Customer>(params, RequestOptions::new());

    assert_eq!(pages.state(), &PaginatorState::NotStarted);

    let first = pages.fetch_next(&ctx).await.unwrap();
    assert_eq!(ids(&first), vec!["CU1", "CU2"]);
    assert_eq!(pages.state(), &PaginatorState::HasMore("CU2".to_string()));

    let second = pages.fetch_next(&ctx).await.unwrap();
    assert_eq!(ids(&second), vec!["CU3", "CU4"]);

    let third = pages.fetch_next(&ctx).await.unwrap();
    assert_eq!(ids(&third), vec!["CU5"]);
    assert_eq!(pages.state(), &PaginatorState::Exhausted);
    assert!(!pages.has_next());

    let requests = server.received_requests().await.unwrap();
    assert!(requests
        .iter()
        .all(|r| r.url.query_pairs().any(|(k, v)| k == "limit" && v == "2")));
}

#[tokio::test]
async fn test_exhausted_paginator_makes_no_more_requests() {
    let server = MockServer::start().await;
    mount_three_pages(&server).await;

    let client = create_client(&server);
    let ctx = RequestContext::background();
    let mut pages = client.paginate::<Customer>(CustomerListParams::default(), RequestOptions::new());

    while pages.has_next() {
        pages.fetch_next(&ctx).await.unwrap();
    }

    // Repeated fetches return the last page without touching the network
    for _ in 0..3 {
        let page = pages.fetch_next(&ctx).await.unwrap();
        assert_eq!(ids(&page), vec!["CU5"]);
    }

    assert_eq!(server.received_requests().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_collect_all_gathers_every_item() {
    let server = MockServer::start().await;
    mount_three_pages(&server).await;

    let client = create_client(&server);
    let customers = client
        .paginate::<Customer>(CustomerListParams::default(), RequestOptions::new())
        .collect_all(&RequestContext::background())
        .await
        .unwrap();

    assert_eq!(ids(&customers), vec!["CU1", "CU2", "CU3", "CU4", "CU5"]);
}

#[tokio::test]
async fn test_empty_after_cursor_ends_pagination() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/customers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(&["CU1"], Some(""))))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let mut pages = client.paginate::<Customer>(CustomerListParams::default(), RequestOptions::new());

    pages.fetch_next(&RequestContext::background()).await.unwrap();
    assert_eq!(pages.state(), &PaginatorState::Exhausted);
}

// ============================================================================
// Failures
// ============================================================================

#[tokio::test]
async fn test_failed_page_keeps_cursor_for_retry() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/customers"))
        .and(query_param_is_missing("after"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(page_body(&["CU1", "CU2"], Some("CU2"))),
        )
        .mount(&server)
        .await;

    // Second page fails on both attempts of the first fetch, then succeeds
    Mock::given(method("GET"))
        .and(path("/customers"))
        .and(query_param("after", "CU2"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/customers"))
        .and(query_param("after", "CU2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(&["CU3"], None)))
        .mount(&server)
        .await;

    let client = create_client(&server);
    let ctx = RequestContext::background();
    let mut pages = client.paginate::<Customer>(CustomerListParams::default(), RequestOptions::new());

    pages.fetch_next(&ctx).await.unwrap();

    let error = pages.fetch_next(&ctx).await.unwrap_err();
    assert!(matches!(error, HttpError::MaxRetries(_)));
    assert_eq!(pages.state(), &PaginatorState::HasMore("CU2".to_string()));

    let page = pages.fetch_next(&ctx).await.unwrap();
    assert_eq!(ids(&page), vec!["CU3"]);
    assert!(!pages.has_next());
}
