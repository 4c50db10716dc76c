//! # Integration Tests for keygate-api
//!
//! Drives the assembled router end to end: health probes, the OpenAPI
//! document, authenticated routes, and the scenario table for key
//! validation.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use keygate_api::config::{AppConfig, Overrides};
use keygate_api::state::AppState;

const KEY: &str = "secret123";

/// Helper: build the app from a YAML config string.
fn app_from_yaml(yaml: &str) -> axum::Router {
    let config = AppConfig::from_yaml_str(yaml, Overrides::default()).unwrap();
    keygate_api::app(AppState::from_config(&config).unwrap())
}

/// Helper: build the app with the default extraction settings.
fn test_app() -> axum::Router {
    app_from_yaml(&format!("authentication:\n  api_key: {KEY}\n"))
}

/// Helper: GET a path, optionally with the default API key header.
fn get(uri: &str, key: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(key) = key {
        builder = builder.header("X-API-Key", key);
    }
    builder.body(Body::empty()).unwrap()
}

/// Helper: read response body as JSON.
async fn body_json(response: axum::http::Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Helper: read response body as string.
async fn body_string(response: axum::http::Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

// -- Unauthenticated routes ---------------------------------------------------

#[tokio::test]
async fn test_liveness_probe_needs_no_key() {
    let response = test_app()
        .oneshot(get("/health/liveness", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "ok");
}

#[tokio::test]
async fn test_readiness_probe_needs_no_key() {
    let response = test_app()
        .oneshot(get("/health/readiness", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "ready");
}

#[tokio::test]
async fn test_openapi_document_needs_no_key() {
    let response = test_app()
        .oneshot(get("/openapi.json", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let doc = body_json(response).await;
    assert_eq!(doc["info"]["title"], "keygate");
    assert_eq!(
        doc["components"]["securitySchemes"]["api_key"]["name"],
        "x-api-key"
    );
}

// -- Scenario table -----------------------------------------------------------

#[tokio::test]
async fn test_configured_key_accepted() {
    let response = test_app()
        .oneshot(get("/v1/whoami", Some("secret123")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["scheme"], "ApiKey");
    assert_eq!(body["label"], "authenticated");
}

#[tokio::test]
async fn test_near_miss_key_rejected() {
    let response = test_app()
        .oneshot(get("/v1/whoami", Some("secret124")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
        "ApiKey"
    );
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_no_key_rejected() {
    let response = test_app().oneshot(get("/v1/whoami", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");
    // The rejection reason is not exposed.
    let message = body["error"]["message"].as_str().unwrap();
    assert!(!message.contains("missing_credential"));
}

#[tokio::test]
async fn test_key_in_query_accepted() {
    let response = test_app()
        .oneshot(get("/v1/whoami?api_key=secret123", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

// -- Configured extraction ----------------------------------------------------

#[tokio::test]
async fn test_custom_header_name() {
    let app = app_from_yaml(
        "authentication:\n  api_key: secret123\n  header_name: X-Custom-Key\n",
    );

    let default_header = app
        .clone()
        .oneshot(get("/v1/whoami", Some(KEY)))
        .await
        .unwrap();
    assert_eq!(default_header.status(), StatusCode::UNAUTHORIZED);

    let custom_header = app
        .oneshot(
            Request::builder()
                .uri("/v1/whoami")
                .header("x-custom-key", KEY)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(custom_header.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_query_extraction_disabled() {
    let app = app_from_yaml("authentication:\n  api_key: secret123\n  query_param: null\n");
    let response = app
        .oneshot(get("/v1/whoami?api_key=secret123", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// -- Metrics ------------------------------------------------------------------

#[tokio::test]
async fn test_metrics_count_verdicts() {
    let app = test_app();
    app.clone()
        .oneshot(get("/v1/whoami", Some("wrong")))
        .await
        .unwrap();
    app.clone().oneshot(get("/v1/whoami", None)).await.unwrap();

    let response = app
        .oneshot(get("/v1/metrics", Some(KEY)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let snap = body_json(response).await;
    assert_eq!(snap["requests"], 3);
    assert_eq!(snap["accepted"], 1);
    assert_eq!(snap["rejected"], 2);
    assert_eq!(snap["missing_credential"], 1);
    assert_eq!(snap["key_mismatch"], 1);
}

#[tokio::test]
async fn test_metrics_require_key() {
    let response = test_app().oneshot(get("/v1/metrics", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// -- Unknown paths ------------------------------------------------------------

#[tokio::test]
async fn test_unknown_path_is_structured_404() {
    let response = test_app()
        .oneshot(get("/v1/nope", Some(KEY)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "NOT_FOUND");
    assert_eq!(body["error"]["message"], "not found: /v1/nope");
}

#[tokio::test]
async fn test_unknown_path_without_key_is_404() {
    let response = test_app().oneshot(get("/v1/nope", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(response.headers().get(header::WWW_AUTHENTICATE).is_none());
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

// -- Concurrency --------------------------------------------------------------

#[tokio::test]
async fn test_concurrent_requests_are_independent() {
    let app = test_app();
    let mut handles = Vec::new();
    for i in 0..32 {
        let app = app.clone();
        handles.push(tokio::spawn(async move {
            let key = if i % 2 == 0 { KEY } else { "wrong" };
            let response = app.oneshot(get("/v1/whoami", Some(key))).await.unwrap();
            (i, response.status())
        }));
    }
    for handle in handles {
        let (i, status) = handle.await.unwrap();
        let expected = if i % 2 == 0 {
            StatusCode::OK
        } else {
            StatusCode::UNAUTHORIZED
        };
        assert_eq!(status, expected);
    }
}
