mod common;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use axum_test::TestServer;
use serde_json::json;

use snaplink::api::handlers::{shorten_handler, stats_handler};
use snaplink::infrastructure::cache::NullCache;

fn server(state: snaplink::AppState) -> TestServer {
    let app = Router::new()
        .route("/api/shorten", post(shorten_handler))
        .route("/api/stats/{code}", get(stats_handler))
        .with_state(state);

    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_stats_for_fresh_mapping() {
    let ctx = common::create_test_state(Arc::new(NullCache));
    let server = server(ctx.state);

    server
        .post("/api/shorten")
        .json(&json!({ "url": "https://example.com/tracked" }))
        .await
        .assert_status(axum::http::StatusCode::CREATED);

    let response = server.get("/api/stats/b").await;
    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["short_code"], "b");
    assert_eq!(json["original_url"], "https://example.com/tracked");
    assert_eq!(json["click_count"], 0);
    assert_eq!(json["is_active"], true);
    assert!(json["created_at"].is_string());
}

#[tokio::test]
async fn test_stats_reflect_click_count() {
    let ctx = common::create_test_state(Arc::new(NullCache));
    use snaplink::domain::repositories::UrlRepository;

    let mapping = ctx.urls.seed("https://example.com/", None);
    // Increment through the repository the way redirects do.
    for _ in 0..7 {
        ctx.urls.increment_click_count(mapping.id).await.unwrap();
    }
    let server = server(ctx.state);

    let response = server.get("/api/stats/b").await;
    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["click_count"], 7);
}

#[tokio::test]
async fn test_stats_by_custom_alias() {
    let ctx = common::create_test_state(Arc::new(NullCache));
    ctx.urls.seed("https://example.com/aliased", Some("my-link"));
    let server = server(ctx.state);

    let response = server.get("/api/stats/my-link").await;
    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["short_code"], "my-link");
}

#[tokio::test]
async fn test_stats_unknown_code_returns_404() {
    let ctx = common::create_test_state(Arc::new(NullCache));
    let server = server(ctx.state);

    let response = server.get("/api/stats/zzzz").await;

    response.assert_status(axum::http::StatusCode::NOT_FOUND);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "not_found");
}

#[tokio::test]
async fn test_stats_deactivated_code_returns_404() {
    let ctx = common::create_test_state(Arc::new(NullCache));
    ctx.urls.seed_inactive("https://example.com/gone");
    let server = server(ctx.state);

    let response = server.get("/api/stats/b").await;

    response.assert_status(axum::http::StatusCode::NOT_FOUND);
}
