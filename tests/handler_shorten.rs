mod common;

use axum::Router;
use axum_test::TestServer;
use serde_json::json;
use shorturl::api::routes::api_routes;
use sqlx::PgPool;

fn test_server(pool: PgPool) -> TestServer {
    let state = common::create_test_state(pool);
    let app = Router::new().nest("/api", api_routes()).with_state(state);

    TestServer::new(app).unwrap()
}

#[sqlx::test]
async fn test_first_url_gets_id_one(pool: PgPool) {
    let server = test_server(pool);

    let response = server
        .post("/api/shorturl")
        .json(&json!({ "url": "https://www.example.com" }))
        .await;

    response.assert_status_ok();
    response.assert_json(&json!({
        "original_url": "https://www.example.com",
        "short_url": 1
    }));
}

#[sqlx::test]
async fn test_ids_are_sequential_and_deduplicated(pool: PgPool) {
    let server = test_server(pool.clone());

    let first = server
        .post("/api/shorturl")
        .json(&json!({ "url": "https://www.example.com" }))
        .await;
    assert_eq!(first.json::<serde_json::Value>()["short_url"], 1);

    let second = server
        .post("/api/shorturl")
        .json(&json!({ "url": "https://www.rust-lang.org" }))
        .await;
    assert_eq!(second.json::<serde_json::Value>()["short_url"], 2);

    let again = server
        .post("/api/shorturl")
        .json(&json!({ "url": "https://www.example.com" }))
        .await;
    again.assert_json(&json!({
        "original_url": "https://www.example.com",
        "short_url": 1
    }));

    assert_eq!(common::count_mappings(&pool).await, 2);
}

#[sqlx::test]
async fn test_next_id_follows_highest_stored(pool: PgPool) {
    common::insert_mapping(&pool, 41, "https://a.example.com").await;
    let server = test_server(pool);

    let response = server
        .post("/api/shorturl")
        .json(&json!({ "url": "https://b.example.com" }))
        .await;

    assert_eq!(response.json::<serde_json::Value>()["short_url"], 42);
}

#[sqlx::test]
async fn test_url_is_stored_verbatim(pool: PgPool) {
    let server = test_server(pool);

    server
        .post("/api/shorturl")
        .json(&json!({ "url": "https://www.example.com" }))
        .await;

    // A trailing slash makes a different string and therefore a new mapping.
    let response = server
        .post("/api/shorturl")
        .json(&json!({ "url": "https://www.example.com/" }))
        .await;

    response.assert_json(&json!({
        "original_url": "https://www.example.com/",
        "short_url": 2
    }));
}

#[sqlx::test]
async fn test_form_encoded_body(pool: PgPool) {
    let server = test_server(pool);

    let response = server
        .post("/api/shorturl")
        .form(&[("url", "https://www.example.com/path?q=1")])
        .await;

    response.assert_status_ok();
    response.assert_json(&json!({
        "original_url": "https://www.example.com/path?q=1",
        "short_url": 1
    }));
}

#[sqlx::test]
async fn test_ip_literal_host_is_accepted(pool: PgPool) {
    let server = test_server(pool);

    let response = server
        .post("/api/shorturl")
        .json(&json!({ "url": "http://127.0.0.1:8080/admin" }))
        .await;

    assert_eq!(response.json::<serde_json::Value>()["short_url"], 1);
}

#[sqlx::test]
async fn test_invalid_inputs_answer_in_body(pool: PgPool) {
    let server = test_server(pool.clone());

    let rejected = [
        "",
        "example.com",
        "not a url",
        "ftp://files.example.com/readme.txt",
        "javascript:alert(1)",
        "https://no-such-host.invalid/page",
    ];

    for url in rejected {
        let response = server
            .post("/api/shorturl")
            .json(&json!({ "url": url }))
            .await;

        response.assert_status_ok();
        response.assert_json(&json!({ "error": "invalid url" }));
    }

    assert_eq!(common::count_mappings(&pool).await, 0);
}

#[sqlx::test]
async fn test_missing_url_field(pool: PgPool) {
    let server = test_server(pool);

    let response = server.post("/api/shorturl").json(&json!({})).await;

    response.assert_status_ok();
    response.assert_json(&json!({ "error": "invalid url" }));
}

#[sqlx::test]
async fn test_malformed_json_body(pool: PgPool) {
    let server = test_server(pool);

    let response = server
        .post("/api/shorturl")
        .content_type("application/json")
        .bytes("{\"url\": ".into())
        .await;

    response.assert_status_ok();
    response.assert_json(&json!({ "error": "invalid url" }));
}

#[sqlx::test]
async fn test_rejection_does_not_consume_an_id(pool: PgPool) {
    let server = test_server(pool);

    server
        .post("/api/shorturl")
        .json(&json!({ "url": "https://no-such-host.invalid" }))
        .await;

    let response = server
        .post("/api/shorturl")
        .json(&json!({ "url": "https://www.example.com" }))
        .await;

    assert_eq!(response.json::<serde_json::Value>()["short_url"], 1);
}
