//! API request and response types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use signup_store::SignupRecord;
use uuid::Uuid;

/// A raw signup submission.
#[derive(Debug, Clone, Deserialize)]
pub struct SignupRequest {
    pub first_name: String,

    pub last_name: String,

    pub email: String,

    pub phone: String,

    /// Checkbox-style: absent means no consent.
    #[serde(default)]
    pub marketing_consent: bool,

    /// Honeypot. Hidden from real users; any non-empty value flags the
    /// submission as automated.
    #[serde(default)]
    pub website: String,
}

/// Response after an accepted signup.
#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub id: Uuid,

    /// Running total of signups, for display only.
    pub signup_count: usize,

    pub message: String,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub signup_count: usize,
    pub mail_relay_healthy: bool,
}

/// Signup info for the administrative listing.
#[derive(Debug, Serialize)]
pub struct SignupInfo {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub marketing_consent: bool,
    pub email_verified: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&SignupRecord> for SignupInfo {
    fn from(record: &SignupRecord) -> Self {
        Self {
            id: record.id,
            first_name: record.first_name.clone(),
            last_name: record.last_name.clone(),
            email: record.email.clone(),
            phone: record.phone.clone(),
            marketing_consent: record.marketing_consent,
            email_verified: record.email_verified,
            created_at: record.created_at,
        }
    }
}

/// List of signups, newest first.
#[derive(Debug, Serialize)]
pub struct SignupsResponse {
    pub signups: Vec<SignupInfo>,
    pub total: usize,
}

/// Response after generating a verification token.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub id: Uuid,
    pub verification_token: String,
}
