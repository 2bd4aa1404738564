//! HTTP tests for the webhook client against a local mock server.

use std::time::Duration;

use httpmock::prelude::*;
use serde_json::json;
use slack_webhook::{WebhookClient, WebhookConfig, WebhookError};

#[tokio::test]
async fn test_post_sends_json_body() {
    let server = MockServer::start_async().await;
    let body = json!({"blocks": [{"type": "divider"}]});
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/services/T000/B000/XXXX")
                .header("content-type", "application/json")
                .json_body(json!({"blocks": [{"type": "divider"}]}));
            then.status(200).body("ok");
        })
        .await;

    let client = WebhookClient::new(WebhookConfig::new(server.url("/services/T000/B000/XXXX"))).unwrap();
    let response = client.post(&body).await.unwrap();

    mock.assert_async().await;
    assert_eq!(response.status, 200);
    assert_eq!(response.body, "ok");
    assert!(response.is_success());
}

#[tokio::test]
async fn test_error_status_is_returned_not_raised() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/hook");
            then.status(400).body("invalid_blocks");
        })
        .await;

    let client = WebhookClient::new(WebhookConfig::new(server.url("/hook"))).unwrap();
    let response = client.post(&json!({"blocks": []})).await.unwrap();

    assert_eq!(response.status, 400);
    assert_eq!(response.body, "invalid_blocks");
    assert!(!response.is_success());
}

#[tokio::test]
async fn test_timeout_is_a_transport_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/slow");
            then.status(200).delay(Duration::from_millis(500));
        })
        .await;

    let config = WebhookConfig::new(server.url("/slow")).with_timeout(Duration::from_millis(50));
    let client = WebhookClient::new(config).unwrap();
    let err = client.post(&json!({})).await.unwrap_err();

    assert!(matches!(err, WebhookError::Http(_)));
}

#[test]
fn test_invalid_url_is_rejected() {
    let err = WebhookClient::new(WebhookConfig::new("")).unwrap_err();
    assert!(matches!(err, WebhookError::Config(_)));
}
