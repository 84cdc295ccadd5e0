use super::*;

fn client(store_url: &str) -> StorefrontClient {
    StorefrontClient::new(store_url, "storefront-test/0.1", None).unwrap()
}

#[test]
fn origin_strips_path_and_query() {
    let c = client("https://shop.example.com/collections/all?page=2");
    assert_eq!(c.origin().as_str(), "https://shop.example.com/");
}

#[test]
fn origin_keeps_non_default_port() {
    let c = client("http://127.0.0.1:8080/products/shirt");
    assert_eq!(c.origin().as_str(), "http://127.0.0.1:8080/");
}

#[test]
fn rejects_relative_store_url() {
    let result = StorefrontClient::new("shop.example.com", "ua", None);
    assert!(
        matches!(result, Err(ClientError::InvalidStoreUrl { .. })),
        "expected InvalidStoreUrl"
    );
}

#[test]
fn rejects_non_http_scheme() {
    let result = StorefrontClient::new("ftp://shop.example.com", "ua", None);
    assert!(matches!(result, Err(ClientError::InvalidStoreUrl { ref reason, .. }) if reason.contains("ftp")));
}

#[test]
fn endpoints_resolve_against_origin() {
    let c = client("https://shop.example.com/collections/all");
    assert_eq!(
        c.endpoint(CART_CHANGE_PATH).unwrap().as_str(),
        "https://shop.example.com/cart/change.js"
    );
}

#[test]
fn checkout_url_encodes_items_json() {
    let c = client("https://shop.example.com");
    let url = c.checkout_url(42, 3);
    assert_eq!(url.path(), "/cart/checkout");
    let items: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    assert_eq!(
        items,
        vec![("items".to_string(), r#"[{"id":42,"quantity":3}]"#.to_string())]
    );
}

#[test]
fn section_url_uses_section_id_param() {
    let c = client("https://shop.example.com/cart");
    assert_eq!(
        c.section_url("cart-notification").as_str(),
        "https://shop.example.com/?section_id=cart-notification"
    );
}

#[test]
fn sections_url_appends_params_then_sections() {
    let c = client("https://shop.example.com");
    let params = vec![
        ("filter.v.availability".to_string(), "1".to_string()),
        ("sort_by".to_string(), "price-ascending".to_string()),
    ];
    let url = c
        .sections_url(
            "/collections/shirts",
            &params,
            &["main-collection-filters"],
        )
        .unwrap();
    assert_eq!(
        url.as_str(),
        "https://shop.example.com/collections/shirts?filter.v.availability=1&sort_by=price-ascending&sections=main-collection-filters"
    );
}

#[test]
fn sections_url_drops_query_embedded_in_path() {
    let c = client("https://shop.example.com");
    let url = c
        .sections_url("/collections/all?stale=1", &[], &["a", "b"])
        .unwrap();
    assert_eq!(
        url.as_str(),
        "https://shop.example.com/collections/all?sections=a%2Cb"
    );
}
