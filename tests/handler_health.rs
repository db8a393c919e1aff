mod common;

use axum::{Router, routing::get};
use axum_test::TestServer;
use shorturl::api::handlers::health_handler;
use sqlx::PgPool;
use std::sync::Arc;

#[sqlx::test]
async fn test_health_endpoint_success(pool: PgPool) {
    common::insert_mapping(&pool, 1, "https://www.example.com").await;
    let state = common::create_test_state(pool);
    let app = Router::new()
        .route("/health", get(health_handler))
        .with_state(state);

    let server = TestServer::new(app).unwrap();

    let response = server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(json["checks"]["database"]["status"], "ok");
    assert_eq!(
        json["checks"]["database"]["message"],
        "Connected, 1 mappings stored"
    );
    assert_eq!(json["checks"]["cache"]["status"], "ok");
    assert_eq!(json["checks"]["cache"]["message"], "Backend: disabled");
}

#[sqlx::test]
async fn test_health_reports_degraded_cache(pool: PgPool) {
    let state = common::create_test_state_with_cache(pool, Arc::new(common::BrokenCache));
    let app = Router::new()
        .route("/health", get(health_handler))
        .with_state(state);

    let server = TestServer::new(app).unwrap();

    let response = server.get("/health").await;

    assert_eq!(response.status_code(), 503);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["checks"]["database"]["status"], "ok");
    assert_eq!(json["checks"]["cache"]["status"], "error");
}
