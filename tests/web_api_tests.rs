//! HTTP API tests driven through the router without binding a socket.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Body;
use axum::extract::ConnectInfo;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use sticker_solver::pricing::table::TablePriceResolver;
use sticker_solver::web::server::{api_routes, create_router};
use sticker_solver::{NameGenerator, StickerCatalog};

fn generator() -> NameGenerator {
    let catalog = StickerCatalog::from_labels([
        "Sticker | Ab | Test 2024",
        "Sticker | Abc (Holo) | Test 2024",
        "Sticker | Cd | Test 2024",
    ]);
    let prices: HashMap<String, f64> = [
        ("Sticker | Ab | Test 2024", 2.0),
        ("Sticker | Abc (Holo) | Test 2024", 0.5),
        ("Sticker | Cd | Test 2024", 1.0),
    ]
    .into_iter()
    .map(|(label, price)| (label.to_string(), price))
    .collect();

    NameGenerator::new(Arc::new(catalog), Arc::new(TablePriceResolver::new(prices)))
}

fn app() -> Router {
    api_routes(generator())
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn totals(body: &Value) -> Vec<f64> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|c| c["total_price"].as_f64().unwrap())
        .collect()
}

#[tokio::test]
async fn test_generate_sorted_ascending_by_default() {
    let (status, body) = send(app(), post_json("/api/stickers/generate", r#"{"name":"ABCD"}"#)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(totals(&body), vec![1.5, 3.0]);

    let cheapest = &body[0];
    assert_eq!(cheapest["segments"], serde_json::json!(["ab", "cd"]));
    assert_eq!(cheapest["stickers"][0]["full_name"], "Sticker | Abc (Holo) | Test 2024");
    assert_eq!(cheapest["prices"][0]["amount"], 0.5);
    assert_eq!(cheapest["prices"][1]["amount"], 1.0);
}

#[tokio::test]
async fn test_generate_sort_orders() {
    let (_, desc) = send(
        app(),
        post_json("/api/stickers/generate", r#"{"name":"abcd","sortOrder":"DESC"}"#),
    )
    .await;
    assert_eq!(totals(&desc), vec![3.0, 1.5]);

    let (_, none) = send(
        app(),
        post_json("/api/stickers/generate", r#"{"name":"abcd","sort_order":"none"}"#),
    )
    .await;
    assert_eq!(totals(&none), vec![3.0, 1.5]);

    let (_, unknown) = send(
        app(),
        post_json("/api/stickers/generate", r#"{"name":"abcd","sortOrder":"sideways"}"#),
    )
    .await;
    assert_eq!(totals(&unknown), vec![1.5, 3.0]);
}

#[tokio::test]
async fn test_search_query_matches_generate() {
    let (status, body) = send(app(), get("/api/stickers/search?name=abcd&sortOrder=desc")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(totals(&body), vec![3.0, 1.5]);
}

#[tokio::test]
async fn test_search_without_name_is_json_error() {
    let (status, body) = send(app(), get("/api/stickers/search?sort_order=desc")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_type"], "invalid_request");
    assert!(body["error"].is_string());
    assert!(body["details"].as_str().unwrap().contains("name"));

    let (status, body) = send(app(), get("/api/stickers/search?name=%20")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_type"], "empty_name");
}

#[tokio::test]
async fn test_generate_without_combinations_is_empty_list() {
    let (status, body) = send(app(), post_json("/api/stickers/generate", r#"{"name":"zzz"}"#)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!([]));
}

#[tokio::test]
async fn test_debug_returns_unpriced_combinations() {
    let (status, body) = send(app(), get("/api/stickers/debug/abcd")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["input_name"], "abcd");
    assert_eq!(body["combinations_count"], 2);
    assert!(body.get("inputName").is_none() && body.get("combinationsCount").is_none());
    let combos = body["combinations"].as_array().unwrap();
    assert_eq!(combos.len(), 2);
    assert!(combos.iter().all(|c| c.get("prices").is_none()));
    assert_eq!(combos[0]["segments"], serde_json::json!(["ab", "cd"]));
}

#[tokio::test]
async fn test_invalid_names_rejected() {
    let (status, body) = send(app(), post_json("/api/stickers/generate", r#"{"name":"   "}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_type"], "empty_name");
    assert!(body["error"].is_string());

    let (status, body) = send(
        app(),
        post_json(
            "/api/stickers/generate",
            r#"{"name":"abcdefghijklmnopqrstu"}"#,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_type"], "name_too_long");

    let (status, body) = send(app(), get("/api/stickers/debug/abcdefghijklmnopqrstu")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_type"], "name_too_long");
}

#[tokio::test]
async fn test_malformed_body_rejected() {
    let (status, body) = send(app(), post_json("/api/stickers/generate", "{not json")).await;
    assert!(status.is_client_error());
    assert_eq!(body["error_type"], "invalid_request");

    let (status, body) = send(app(), post_json("/api/stickers/generate", r#"{"sortOrder":"asc"}"#)).await;
    assert!(status.is_client_error());
    assert_eq!(body["error_type"], "invalid_request");
}

#[tokio::test]
async fn test_catalog_listing() {
    let (status, body) = send(app(), get("/api/catalog")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 3);
    assert_eq!(body["stickers"][1]["extracted_name"], "Abc");
    assert_eq!(body["stickers"][1]["rarity"], "holo");
}

#[tokio::test]
async fn test_price_cache_endpoints() {
    let (status, body) = send(app(), get("/api/prices/cache")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["size"], 0);

    let request = Request::builder()
        .method(Method::DELETE)
        .uri("/api/prices/cache")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(app(), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["size"], 0);
}

#[tokio::test]
async fn test_full_router_sets_security_headers() {
    let app = create_router(generator()).unwrap();

    let mut request = get("/api/catalog");
    request
        .extensions_mut()
        .insert(ConnectInfo(SocketAddr::from(([127, 0, 0, 1], 40_000))));

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("x-content-type-options").unwrap(),
        "nosniff"
    );
    assert_eq!(response.headers().get("x-frame-options").unwrap(), "DENY");
}
