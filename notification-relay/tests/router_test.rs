mod common;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use common::{test_config, SECRET};
use notification_relay::config::FcmConfig;
use notification_relay::handlers::SECRET_HEADER;
use notification_relay::services::{FcmProvider, MockPushProvider, PushProvider};
use notification_relay::startup::{build_router, AppState};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::util::ServiceExt;

fn router_with(provider: Arc<dyn PushProvider>) -> Router {
    build_router(AppState::new(test_config(Some(SECRET)), provider))
}

fn router() -> Router {
    router_with(Arc::new(MockPushProvider::new()))
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_check_works() {
    let response = router()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "notification-relay");
}

#[tokio::test]
async fn readiness_reports_mock_provider_ready() {
    let response = router()
        .oneshot(Request::builder().uri("/ready").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["provider"], "mock");
}

#[tokio::test]
async fn readiness_fails_for_unconfigured_fcm() {
    let provider = Arc::new(FcmProvider::new(FcmConfig {
        enabled: true,
        ..FcmConfig::default()
    }));

    let response = router_with(provider)
        .oneshot(Request::builder().uri("/ready").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn malformed_json_after_auth_is_bad_request() {
    let response = router()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/send")
                .header(header::CONTENT_TYPE, "application/json")
                .header(SECRET_HEADER, SECRET)
                .body(Body::from("{\"title\": \"Storm\""))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response).await,
        json!({"error": "invalid request body"})
    );
}

#[tokio::test]
async fn empty_body_with_valid_header_needs_title_and_body() {
    let response = router()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/send")
                .header(SECRET_HEADER, SECRET)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response).await,
        json!({"error": "title and body required"})
    );
}

#[tokio::test]
async fn authentication_precedes_payload_parsing() {
    let provider = Arc::new(MockPushProvider::new());

    let response = router_with(provider.clone())
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/send")
                .header(SECRET_HEADER, "wrong")
                .body(Body::from("not json at all"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(provider.send_count(), 0);
}

#[tokio::test]
async fn cors_reflects_request_origin() {
    let response = router()
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/send")
                .header(header::ORIGIN, "https://weather.example.com")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                .header(header::ACCESS_CONTROL_REQUEST_HEADERS, SECRET_HEADER)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "https://weather.example.com"
    );
}

#[tokio::test]
async fn responses_carry_request_id() {
    let response = router()
        .oneshot(
            Request::builder()
                .uri("/health")
                .header("x-request-id", "req-42")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.headers()["x-request-id"], "req-42");
}
