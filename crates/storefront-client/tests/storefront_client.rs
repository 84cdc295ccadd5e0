//! Integration tests for `StorefrontClient` against a `wiremock` store.
//!
//! Each test stands up its own `MockServer`; no real network traffic is made.

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use storefront_client::{CartUpdate, ClientError, StorefrontClient};

fn test_client(server: &MockServer) -> StorefrontClient {
    StorefrontClient::new(&server.uri(), "storefront-test/0.1", None)
        .expect("failed to build test StorefrontClient")
}

fn cart_json(item_count: u32) -> serde_json::Value {
    json!({
        "token": "c1-test",
        "item_count": item_count,
        "items": [{
            "id": 101,
            "variant_id": 101,
            "key": "101:abc",
            "quantity": item_count,
            "price": 1000,
            "line_price": 1000 * i64::from(item_count),
            "final_line_price": 1000 * i64::from(item_count),
            "product_title": "Shirt",
            "variant_title": "Red"
        }],
        "items_subtotal_price": 1000 * i64::from(item_count),
        "total_price": 1000 * i64::from(item_count),
        "total_tax": 0,
        "tax_lines": [],
        "currency": "USD"
    })
}

// ---------------------------------------------------------------------------
// fetch_cart
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fetch_cart_parses_snapshot() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cart.js"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(cart_json(2)))
        .expect(1)
        .mount(&server)
        .await;

    let cart = test_client(&server).fetch_cart().await.unwrap();
    assert_eq!(cart.item_count, 2);
    assert_eq!(cart.items[0].product_title, "Shirt");
    assert_eq!(cart.items_subtotal_price, 2000);
}

#[tokio::test]
async fn fetch_cart_reports_malformed_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cart.js"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let err = test_client(&server).fetch_cart().await.unwrap_err();
    assert!(
        matches!(err, ClientError::Deserialize { ref context, .. } if context.starts_with("cart from")),
        "got: {err:?}"
    );
}

#[tokio::test]
async fn rate_limit_is_reported_without_retry() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cart.js"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "12"))
        .expect(1)
        .mount(&server)
        .await;

    let err = test_client(&server).fetch_cart().await.unwrap_err();
    match err {
        ClientError::RateLimited {
            retry_after_secs, ..
        } => assert_eq!(retry_after_secs, 12),
        other => panic!("expected RateLimited, got: {other:?}"),
    }
}

#[tokio::test]
async fn rate_limit_without_header_defaults_to_60s() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cart.js"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let err = test_client(&server).fetch_cart().await.unwrap_err();
    assert!(matches!(
        err,
        ClientError::RateLimited {
            retry_after_secs: 60,
            ..
        }
    ));
}

#[tokio::test]
async fn server_error_is_unexpected_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cart.js"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let err = test_client(&server).fetch_cart().await.unwrap_err();
    assert!(matches!(
        err,
        ClientError::UnexpectedStatus { status: 503, .. }
    ));
}

// ---------------------------------------------------------------------------
// add_item
// ---------------------------------------------------------------------------

#[tokio::test]
async fn add_item_posts_id_and_quantity() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/cart/add.js"))
        .and(body_json(json!({"id": 101, "quantity": 2})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 101, "quantity": 2})))
        .expect(1)
        .mount(&server)
        .await;

    test_client(&server).add_item(101, 2).await.unwrap();
}

#[tokio::test]
async fn add_item_surfaces_platform_rejection() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/cart/add.js"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "status": 422,
            "message": "Cart Error",
            "description": "The product 'Shirt - Blue' is already sold out."
        })))
        .mount(&server)
        .await;

    let err = test_client(&server).add_item(102, 1).await.unwrap_err();
    match err {
        ClientError::Rejected {
            status,
            description,
        } => {
            assert_eq!(status, 422);
            assert!(description.contains("sold out"));
        }
        other => panic!("expected Rejected, got: {other:?}"),
    }
}

#[tokio::test]
async fn rejection_without_json_body_uses_status_reason() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/cart/add.js"))
        .respond_with(ResponseTemplate::new(400).set_body_string("bad"))
        .mount(&server)
        .await;

    let err = test_client(&server).add_item(1, 1).await.unwrap_err();
    assert!(matches!(
        err,
        ClientError::Rejected { status: 400, ref description } if description == "Bad Request"
    ));
}

// ---------------------------------------------------------------------------
// change_line / update_cart
// ---------------------------------------------------------------------------

#[tokio::test]
async fn change_line_posts_one_based_line() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/cart/change.js"))
        .and(body_json(json!({"line": 2, "quantity": 0})))
        .respond_with(ResponseTemplate::new(200).set_body_json(cart_json(1)))
        .expect(1)
        .mount(&server)
        .await;

    let cart = test_client(&server).change_line(2, 0).await.unwrap();
    assert_eq!(cart.item_count, 1);
}

#[tokio::test]
async fn update_cart_posts_note_and_attributes() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/cart/update.js"))
        .and(body_json(json!({
            "note": "ring twice",
            "attributes": {"gift_wrap": "yes"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "item_count": 0,
            "note": "ring twice",
            "attributes": {"gift_wrap": "yes"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let update = CartUpdate::note("ring twice").attribute("gift_wrap", "yes");
    let cart = test_client(&server).update_cart(&update).await.unwrap();
    assert_eq!(cart.note.as_deref(), Some("ring twice"));
}

// ---------------------------------------------------------------------------
// sections
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fetch_section_returns_html() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .and(query_param("section_id", "cart"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<div id=\"cart-items\"></div>"))
        .expect(1)
        .mount(&server)
        .await;

    let html = test_client(&server).fetch_section("cart").await.unwrap();
    assert!(html.contains("cart-items"));
}

#[tokio::test]
async fn fetch_section_missing_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = test_client(&server)
        .fetch_section("nope")
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::NotFound { .. }));
}

#[tokio::test]
async fn fetch_sections_returns_map_with_nulls() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/collections/all"))
        .and(query_param("filter.p.vendor", "Acme"))
        .and(query_param(
            "sections",
            "main-collection-filters,main-collection-product-grid",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "main-collection-filters": "<form id=\"CollectionFiltersForm\"></form>",
            "main-collection-product-grid": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    let params = vec![("filter.p.vendor".to_string(), "Acme".to_string())];
    let sections = test_client(&server)
        .fetch_sections(
            "/collections/all",
            &params,
            &["main-collection-filters", "main-collection-product-grid"],
        )
        .await
        .unwrap();

    assert!(sections["main-collection-filters"]
        .as_deref()
        .is_some_and(|html| html.contains("CollectionFiltersForm")));
    assert!(sections["main-collection-product-grid"].is_none());
}
