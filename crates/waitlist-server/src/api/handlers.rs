//! HTTP request handlers.

use super::types::{
    HealthResponse, SignupInfo, SignupRequest, SignupResponse, SignupsResponse, TokenResponse,
};
use super::AppState;
use crate::error::ApiError;
use crate::validate::validate_signup;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;
use uuid::Uuid;

/// Health check endpoint.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let waitlist = state.waitlist.read().await;
    let relay_healthy = state.mailer.health_check().await;

    Json(HealthResponse {
        status: "ok".to_string(),
        signup_count: waitlist.count(),
        mail_relay_healthy: relay_healthy,
    })
}

/// Accept a waitlist signup submission.
pub async fn create_signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> Result<(StatusCode, Json<SignupResponse>), ApiError> {
    // Validate against current state. The duplicate checks here are
    // early rejections; the commit below is authoritative.
    let draft = {
        let waitlist = state.waitlist.read().await;
        validate_signup(&request, &waitlist).map_err(ApiError::Validation)?
    };
    info!(email = %draft.email, "Signup passed validation");

    let (record, signup_count) = {
        let mut waitlist = state.waitlist.write().await;

        // Uniqueness is re-checked under the write lock, so the loser of
        // a concurrent-submission race gets the same duplicate violation
        // the validator would have produced.
        let record = waitlist.create(draft)?;

        // Roll the insert back if the snapshot can't be written; a failed
        // submission must not leave a record behind.
        if let Err(e) = state.store.save(&waitlist).await {
            waitlist.remove(record.id);
            return Err(e.into());
        }

        let count = waitlist.count();
        (record, count)
    };

    // Lead notification runs detached; the response never waits on it.
    state.notifier.notify(record.clone());

    info!(email = %record.email, signup_count, "Signup created");

    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            id: record.id,
            signup_count,
            message: "Thank you! You're on the list. We'll notify you when we launch!"
                .to_string(),
        }),
    ))
}

/// List all signups, newest first.
pub async fn list_signups(State(state): State<AppState>) -> Json<SignupsResponse> {
    let waitlist = state.waitlist.read().await;
    let signups: Vec<SignupInfo> = waitlist.list_all().into_iter().map(SignupInfo::from).collect();

    let total = signups.len();
    Json(SignupsResponse { signups, total })
}

/// Get a single signup by id.
pub async fn get_signup(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SignupInfo>, ApiError> {
    let waitlist = state.waitlist.read().await;
    let record = waitlist.get(id).ok_or(ApiError::NotFound(id))?;

    Ok(Json(SignupInfo::from(record)))
}

/// Generate a fresh email verification token for a signup.
pub async fn generate_verification_token(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<TokenResponse>, ApiError> {
    let token = {
        let mut waitlist = state.waitlist.write().await;
        let token = waitlist.generate_token(id)?;
        state.store.save(&waitlist).await?;
        token
    };

    info!(signup_id = %id, "Verification token generated");

    Ok(Json(TokenResponse {
        id,
        verification_token: token,
    }))
}
