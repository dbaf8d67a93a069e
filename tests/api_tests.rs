//! API integration tests
//!
//! These run against a live server: `cargo run`, then
//! `cargo test -- --ignored`.

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";

#[tokio::test]
#[ignore]
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_login() {
    let client = Client::new();

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "username": "admin",
            "password": "admin"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["username"], "admin");
    assert_eq!(body["role"], "admin");
}

#[tokio::test]
#[ignore]
async fn test_login_invalid_credentials() {
    let client = Client::new();

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "username": "admin",
            "password": "wrong"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_circulation_round_trip() {
    let client = Client::new();

    // Create an item with one copy.
    let response = client
        .post(format!("{}/items", BASE_URL))
        .json(&json!({
            "title": "Integration Test Book",
            "author": "Nobody",
            "category": "Test",
            "quantity": 1
        }))
        .send()
        .await
        .expect("Failed to create item");
    assert_eq!(response.status(), 201);
    let item: Value = response.json().await.expect("Failed to parse item");
    let item_id = item["id"].as_str().expect("No item id").to_string();

    // Check it out.
    let response = client
        .post(format!("{}/loans", BASE_URL))
        .json(&json!({ "item_id": item_id, "holder": "admin" }))
        .send()
        .await
        .expect("Failed to check out");
    assert_eq!(response.status(), 201);
    let loan: Value = response.json().await.expect("Failed to parse loan");
    assert!(loan["closed_at"].is_null());

    // The shelf is now empty.
    let response = client
        .post(format!("{}/loans", BASE_URL))
        .json(&json!({ "item_id": item_id, "holder": "someone-else" }))
        .send()
        .await
        .expect("Failed to send second check-out");
    assert_eq!(response.status(), 422);

    // Check it back in and clean up.
    let response = client
        .post(format!("{}/loans/return", BASE_URL))
        .json(&json!({ "item_id": item_id, "holder": "admin" }))
        .send()
        .await
        .expect("Failed to check in");
    assert!(response.status().is_success());

    let response = client
        .delete(format!("{}/items/{}", BASE_URL, item_id))
        .send()
        .await
        .expect("Failed to delete item");
    assert_eq!(response.status(), 204);
}

#[tokio::test]
#[ignore]
async fn test_csv_export_has_header() {
    let client = Client::new();

    let response = client
        .get(format!("{}/items/export", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body = response.text().await.expect("Failed to read body");
    assert!(body.starts_with("ID,Title,Author,Category,Quantity,Description"));
}
