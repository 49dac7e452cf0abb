//! Integration tests for the waitlist API surface.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use mailer_client::MailerClient;
use signup_store::{Store, Waitlist};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;
use waitlist_server::{
    api::{create_router_with_rate_limit, AppState, RateLimitState},
    config::MailConfig,
    Notifier,
};

/// Create a test app state with memory-only storage and no notification
/// recipients.
fn create_test_state() -> AppState {
    let waitlist = Waitlist::new();
    let store = Store::memory();
    // Use a non-existent URL since we won't actually deliver mail in tests
    let mailer = MailerClient::new("http://localhost:9999", Duration::from_secs(1)).unwrap();
    let notifier = Notifier::new(Arc::new(mailer.clone()), MailConfig::default());
    AppState::new(waitlist, store, mailer, notifier)
}

fn signup_body(email: &str, phone: &str) -> Body {
    Body::from(
        serde_json::json!({
            "first_name": "John",
            "last_name": "Doe",
            "email": email,
            "phone": phone,
        })
        .to_string(),
    )
}

fn post_signup(email: &str, phone: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/v1/signups")
        .header("content-type", "application/json")
        .body(signup_body(email, phone))
        .unwrap()
}

#[tokio::test]
async fn test_health_endpoint() {
    let state = create_test_state();
    let app = create_router_with_rate_limit(state, RateLimitState::permissive());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json["status"], "ok");
    assert_eq!(json["signup_count"], 0);
    // No relay is listening in tests
    assert_eq!(json["mail_relay_healthy"], false);
}

#[tokio::test]
async fn test_list_signups_empty() {
    let state = create_test_state();
    let app = create_router_with_rate_limit(state, RateLimitState::permissive());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/v1/signups")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json["total"], 0);
    assert!(json["signups"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_get_signup_not_found() {
    let state = create_test_state();
    let app = create_router_with_rate_limit(state, RateLimitState::permissive());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/v1/signups/5f0c6c9e-7a2e-4f81-b2d4-6a4f0c21a111")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_signup_invalid_id() {
    let state = create_test_state();
    let app = create_router_with_rate_limit(state, RateLimitState::permissive());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/v1/signups/not-a-uuid")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_token_generation_unknown_signup() {
    let state = create_test_state();
    let app = create_router_with_rate_limit(state, RateLimitState::permissive());

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/v1/signups/5f0c6c9e-7a2e-4f81-b2d4-6a4f0c21a111/verification-token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_rate_limiting() {
    let state = create_test_state();
    // One submission per hour
    let rate_limit = RateLimitState::new(1);
    let app = create_router_with_rate_limit(state, rate_limit);

    // First submission passes the limiter (and fails validation)
    let response = app
        .clone()
        .oneshot(post_signup("not-an-email", "123"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    // Second submission from the same address is rate limited
    let response = app
        .clone()
        .oneshot(post_signup("not-an-email", "123"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

    // Reads are not rate limited
    let response = app
        .oneshot(
            Request::builder()
                .uri("/v1/signups")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_rate_limiting_is_per_ip() {
    let state = create_test_state();
    let rate_limit = RateLimitState::new(1);
    let app = create_router_with_rate_limit(state, rate_limit);

    let post_from = |ip: &str| {
        Request::builder()
            .method("POST")
            .uri("/v1/signups")
            .header("content-type", "application/json")
            .header("x-forwarded-for", ip)
            .body(signup_body("not-an-email", "123"))
            .unwrap()
    };

    let response = app.clone().oneshot(post_from("203.0.113.1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let response = app.clone().oneshot(post_from("203.0.113.1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

    // A different originating address has its own quota
    let response = app.oneshot(post_from("203.0.113.2")).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_rate_limited_rejection_is_uniform() {
    // A rate-limited request is rejected the same way whether or not its
    // payload would have validated.
    let state = create_test_state();
    let rate_limit = RateLimitState::new(1);
    let app = create_router_with_rate_limit(state, rate_limit);

    let response = app
        .clone()
        .oneshot(post_signup("john@example.com", "1234567890"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .oneshot(post_signup("jane@example.com", "9876543210"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["code"], "RATE_LIMIT_EXCEEDED");
}
