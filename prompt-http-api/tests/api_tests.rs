//! Integration tests for the prompt proxy.
//!
//! Drives the real axum router with `oneshot`, using wiremock as the
//! upstream backend.

use std::sync::Arc;

use axum::body::Body;
use http_body_util::BodyExt;
use hyper::Request;
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

use prompt_http_api::{PromptApiState, ProxyConfig, build_router};

const HAIKU_BODY: &str = r#"{"requestId": 42, "result": "Celo shines at dusk / ...", "prompt": "write a haiku about Celo", "cost_dict": {}, "metadata": {"model": "gpt-x", "tool": "haiku-tool"}}"#;

fn test_state(upstream: &str) -> Arc<PromptApiState> {
    let config = ProxyConfig {
        upstream_base_url: upstream.to_string(),
        ..ProxyConfig::default()
    };
    Arc::new(PromptApiState::from_config(&config))
}

async fn get(app: axum::Router, uri: &str) -> (u16, Vec<u8>, Option<String>) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status().as_u16();
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, body.to_vec(), content_type)
}

#[tokio::test]
async fn test_health() {
    let mock = MockServer::start().await;
    let app = build_router(test_state(&mock.uri()));

    let (status, body, _) = get(app, "/health").await;

    assert_eq!(status, 200);
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["upstream"], mock.uri());
}

#[tokio::test]
async fn test_haiku_relayed_unchanged() {
    let mock = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/get-prompt"))
        .and(query_param("prompt", "write a haiku about Celo"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(HAIKU_BODY, "application/json"))
        .expect(1)
        .mount(&mock)
        .await;

    let app = build_router(test_state(&mock.uri()));
    let (status, body, content_type) =
        get(app, "/api/get-prompt?prompt=write%20a%20haiku%20about%20Celo").await;

    assert_eq!(status, 200);
    assert_eq!(body, HAIKU_BODY.as_bytes());
    assert_eq!(content_type.as_deref(), Some("application/json"));
}

#[tokio::test]
async fn test_special_characters_forwarded() {
    let mock = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/get-prompt"))
        .and(query_param("prompt", "a&b=c ? 100%"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"result": "ok"})))
        .expect(1)
        .mount(&mock)
        .await;

    let app = build_router(test_state(&mock.uri()));
    let (status, _, _) = get(app, "/api/get-prompt?prompt=a%26b%3Dc%20%3F%20100%25").await;

    assert_eq!(status, 200);
}

#[tokio::test]
async fn test_missing_prompt_still_calls_upstream() {
    let mock = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/get-prompt"))
        .and(query_param_is_missing("prompt"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "result": "Hackathons hum / web3 dreams compile at dawn / gas fees fade away"
        })))
        .expect(1)
        .mount(&mock)
        .await;

    let app = build_router(test_state(&mock.uri()));
    let (status, body, _) = get(app, "/api/get-prompt").await;

    assert_eq!(status, 200);
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert!(json["result"].as_str().unwrap().starts_with("Hackathons"));
}

#[tokio::test]
async fn test_repeated_prompt_joined_and_forwarded() {
    let mock = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/get-prompt"))
        .and(query_param("prompt", "a,b"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"result": "joined"})))
        .expect(1)
        .mount(&mock)
        .await;

    let app = build_router(test_state(&mock.uri()));
    let (status, body, _) = get(app, "/api/get-prompt?prompt=a&prompt=b").await;

    assert_eq!(status, 200);
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["result"], "joined");
}

#[tokio::test]
async fn test_empty_prompt_forwarded_as_is() {
    let mock = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/get-prompt"))
        .and(query_param("prompt", ""))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(1)
        .mount(&mock)
        .await;

    let app = build_router(test_state(&mock.uri()));
    let (status, body, _) = get(app, "/api/get-prompt?prompt=").await;

    assert_eq!(status, 200);
    assert_eq!(body, b"{}");
}

#[tokio::test]
async fn test_upstream_error_status_becomes_500() {
    let mock = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/get-prompt"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .expect(1)
        .mount(&mock)
        .await;

    let app = build_router(test_state(&mock.uri()));
    let (status, body, _) = get(app, "/api/get-prompt?prompt=hi").await;

    assert_eq!(status, 500);
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["message"], "Request failed with status code 502");
}

#[tokio::test]
async fn test_upstream_non_json_becomes_500() {
    let mock = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/get-prompt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&mock)
        .await;

    let app = build_router(test_state(&mock.uri()));
    let (status, body, _) = get(app, "/api/get-prompt?prompt=hi").await;

    assert_eq!(status, 500);
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert!(json["message"].as_str().unwrap().starts_with("Malformed response body"));
}

#[tokio::test]
async fn test_upstream_unreachable_becomes_500() {
    // Bind then drop a listener to get a port nothing is serving on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let app = build_router(test_state(&format!("http://{addr}")));
    let (status, body, _) = get(app, "/api/get-prompt?prompt=hi").await;

    assert_eq!(status, 500);
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    let message = json["message"].as_str().unwrap();
    assert!(message.starts_with("HTTP error"), "unexpected message: {message}");
}

#[tokio::test]
async fn test_no_retry_on_failure() {
    let mock = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/get-prompt"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock)
        .await;

    let app = build_router(test_state(&mock.uri()));
    let (status, _, _) = get(app, "/api/get-prompt?prompt=once").await;

    assert_eq!(status, 500);
}
