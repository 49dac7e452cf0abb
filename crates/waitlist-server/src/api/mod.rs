//! HTTP API for the waitlist service.

mod handlers;
mod middleware;
mod types;

pub use handlers::*;
pub use middleware::{logging_middleware, rate_limit_middleware, RateLimitState};
pub use types::*;

use crate::notify::Notifier;
use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use mailer_client::MailerClient;
use signup_store::{Store, Waitlist};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// The waitlist itself
    pub waitlist: Arc<RwLock<Waitlist>>,
    /// Persistence backend
    pub store: Arc<Store>,
    /// Mail relay client
    pub mailer: Arc<MailerClient>,
    /// Background lead notifier
    pub notifier: Notifier,
}

impl AppState {
    /// Create new application state.
    pub fn new(waitlist: Waitlist, store: Store, mailer: MailerClient, notifier: Notifier) -> Self {
        Self {
            waitlist: Arc::new(RwLock::new(waitlist)),
            store: Arc::new(store),
            mailer: Arc::new(mailer),
            notifier,
        }
    }
}

/// Create the API router with the default rate limit.
pub fn create_router(state: AppState) -> Router {
    create_router_with_rate_limit(state, RateLimitState::new(5))
}

/// Create the API router with custom rate limiting.
pub fn create_router_with_rate_limit(state: AppState, rate_limit: RateLimitState) -> Router {
    Router::new()
        // Health check (not rate limited)
        .route("/health", get(handlers::health))
        // Signup submission (rate limited) and administrative listing
        .route(
            "/v1/signups",
            post(handlers::create_signup).get(handlers::list_signups),
        )
        .route("/v1/signups/:id", get(handlers::get_signup))
        .route(
            "/v1/signups/:id/verification-token",
            post(handlers::generate_verification_token),
        )
        .layer(axum_middleware::from_fn_with_state(
            rate_limit.clone(),
            rate_limit_middleware,
        ))
        .layer(axum_middleware::from_fn(logging_middleware))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
