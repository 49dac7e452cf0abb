//! Rate limiting and other middleware.

use crate::error::ApiError;
use axum::{
    extract::{ConnectInfo, Request, State},
    http::Method,
    middleware::Next,
    response::Response,
};
use governor::{
    clock::DefaultClock,
    state::keyed::DefaultKeyedStateStore,
    Quota, RateLimiter,
};
use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    num::NonZeroU32,
    sync::Arc,
};
use tracing::{debug, warn};

/// Per-IP rate limiter.
pub type IpLimiter = RateLimiter<IpAddr, DefaultKeyedStateStore<IpAddr>, DefaultClock>;

/// Rate limiter state shared across requests.
#[derive(Clone)]
pub struct RateLimitState {
    /// Signup submissions allowed per IP per hour
    pub submissions: Arc<IpLimiter>,
}

impl RateLimitState {
    /// Create a new rate limit state with the specified per-hour limit.
    pub fn new(submissions_per_hour: u32) -> Self {
        let quota = Quota::per_hour(
            NonZeroU32::new(submissions_per_hour).unwrap_or(NonZeroU32::new(5).unwrap()),
        );

        Self {
            submissions: Arc::new(RateLimiter::keyed(quota)),
        }
    }

    /// Create a permissive rate limiter for testing.
    pub fn permissive() -> Self {
        Self::new(1000)
    }
}

/// Rate limiting middleware.
///
/// Only signup submissions count against the limit; reads and health
/// checks pass through. Returns 429 Too Many Requests when an IP
/// exceeds its hourly quota.
pub async fn rate_limit_middleware(
    State(rate_limit): State<RateLimitState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if request.method() == Method::POST && request.uri().path() == "/v1/signups" {
        let ip = client_ip(&request);

        if rate_limit.submissions.check_key(&ip).is_err() {
            warn!(client_ip = %ip, "Submission rate limit exceeded");
            return Err(ApiError::RateLimitExceeded);
        }

        debug!(client_ip = %ip, "Rate limit check passed");
    }

    Ok(next.run(request).await)
}

/// Originating address for rate-limit keying.
///
/// Prefers the first X-Forwarded-For entry (the service normally sits
/// behind a reverse proxy), then the peer address. Falls back to
/// localhost when neither is present, e.g. when the router is called
/// directly in tests.
fn client_ip(request: &Request) -> IpAddr {
    if let Some(forwarded) = request
        .headers()
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .and_then(|value| value.trim().parse().ok())
    {
        return forwarded;
    }

    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0.ip())
        .unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST))
}

/// Logging middleware for requests.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = std::time::Instant::now();

    debug!(%method, %uri, "Request started");

    let response = next.run(request).await;

    let duration = start.elapsed();
    let status = response.status();

    if status.is_success() {
        debug!(%method, %uri, %status, ?duration, "Request completed");
    } else {
        warn!(%method, %uri, %status, ?duration, "Request failed");
    }

    response
}
