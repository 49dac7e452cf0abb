//! Signup record types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A validated, normalized signup awaiting persistence.
///
/// Produced by the validation pipeline; the waitlist assigns `id` and
/// `created_at` when the draft is committed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupDraft {
    pub first_name: String,
    pub last_name: String,
    /// Lowercased, syntactically valid email address.
    pub email: String,
    /// Canonical `ddd-ddd-dddd` phone number.
    pub phone: String,
    pub marketing_consent: bool,
}

/// A persisted waitlist signup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupRecord {
    /// Unique identifier, assigned at creation.
    pub id: Uuid,

    pub first_name: String,
    pub last_name: String,

    /// Lowercased email address, unique across the waitlist.
    pub email: String,

    /// Phone number in `ddd-ddd-dddd` format, unique across the waitlist.
    pub phone: String,

    /// Whether the signup agreed to receive marketing email.
    pub marketing_consent: bool,

    /// Set by the external email verification flow, never by this service.
    pub email_verified: bool,

    /// Empty until a token is generated; each generation replaces the
    /// previous value.
    pub verification_token: String,

    /// Submission time, set once at creation.
    pub created_at: DateTime<Utc>,
}

impl SignupRecord {
    /// Materialize a draft into a record with a fresh id and timestamp.
    pub fn from_draft(draft: SignupDraft) -> Self {
        Self {
            id: Uuid::new_v4(),
            first_name: draft.first_name,
            last_name: draft.last_name,
            email: draft.email,
            phone: draft.phone,
            marketing_consent: draft.marketing_consent,
            email_verified: false,
            verification_token: String::new(),
            created_at: Utc::now(),
        }
    }

    /// Full name for operator-facing summaries.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> SignupDraft {
        SignupDraft {
            first_name: "John".into(),
            last_name: "Doe".into(),
            email: "john@example.com".into(),
            phone: "123-456-7890".into(),
            marketing_consent: false,
        }
    }

    #[test]
    fn test_from_draft_defaults() {
        let record = SignupRecord::from_draft(draft());

        assert!(!record.email_verified);
        assert!(record.verification_token.is_empty());
        assert_eq!(record.email, "john@example.com");
        assert_eq!(record.phone, "123-456-7890");
    }

    #[test]
    fn test_from_draft_assigns_distinct_ids() {
        let a = SignupRecord::from_draft(draft());
        let b = SignupRecord::from_draft(draft());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_full_name() {
        let record = SignupRecord::from_draft(draft());
        assert_eq!(record.full_name(), "John Doe");
    }
}
