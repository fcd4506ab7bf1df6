mod common;

use std::sync::Arc;

use aoa_client::models::Decision;
use aoa_client::transport::HttpTransport;
use common::{build_client, test_config};
use mockito::{Matcher, Server};
use serde_json::json;

#[tokio::test]
async fn integration_http_login_then_create() {
    let dir = tempfile::tempdir().unwrap();
    let mut server = Server::new_async().await;

    let login = server
        .mock("POST", "/api/auth/login")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({"username": "kim", "password": "pw"})))
        .with_status(200)
        .with_body(r#"{"token":"tok-9","username":"Kim"}"#)
        .create_async()
        .await;
    let create = server
        .mock("POST", "/api/requests")
        .match_header("authorization", "Bearer tok-9")
        .match_header("x-actor", "Kim")
        .match_body(Matcher::Json(json!({"title": "Onboard", "inputText": "new hire"})))
        .with_status(200)
        .with_body(r#"{"id":41}"#)
        .create_async()
        .await;
    let approve = server
        .mock("POST", "/api/requests/41/approve")
        .match_body(Matcher::Json(json!({"decision": "APPROVE"})))
        .with_status(200)
        .with_body(r#"{"id":41,"status":"APPROVED"}"#)
        .create_async()
        .await;

    let config = test_config(dir.path(), &server.url());
    let transport = Arc::new(HttpTransport::new(&config.api).unwrap());
    let client = build_client(config, transport);

    client.api.login("kim", "pw").await.unwrap();
    let created = client.api.create_request("Onboard", "new hire").await.unwrap();
    let decided = client.api.decide(created.id, Decision::Approve, None).await.unwrap();

    login.assert_async().await;
    create.assert_async().await;
    approve.assert_async().await;
    assert_eq!(created.id, 41);
    assert_eq!(decided.status, "APPROVED");
}

#[tokio::test]
async fn integration_http_error_messages() {
    let dir = tempfile::tempdir().unwrap();
    let mut server = Server::new_async().await;

    let missing = server
        .mock("GET", "/api/requests/404")
        .with_status(404)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message":"not found"}"#)
        .create_async()
        .await;
    let broken = server
        .mock("GET", "/api/ops/stats")
        .with_status(500)
        .create_async()
        .await;
    let health = server
        .mock("GET", "/api/health")
        .with_status(200)
        .with_body("plain text")
        .create_async()
        .await;

    let config = test_config(dir.path(), &server.url());
    let transport = Arc::new(HttpTransport::new(&config.api).unwrap());
    let client = build_client(config, transport);

    let err = client.api.request_detail(404).await.unwrap_err();
    assert_eq!(err.message(), "not found");

    let err = client.api.stats().await.unwrap_err();
    assert_eq!(err.message(), "HTTP 500");

    let value = client.api.health().await.unwrap();
    assert_eq!(value, json!("plain text"));

    missing.assert_async().await;
    broken.assert_async().await;
    health.assert_async().await;
}
