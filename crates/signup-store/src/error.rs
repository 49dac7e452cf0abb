//! Signup storage errors.
//!
//! Duplicate conflicts are distinct variants so callers can surface them
//! as "already registered" rather than a generic storage failure.

use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Email already registered: {0}")]
    DuplicateEmail(String),

    #[error("Phone number already registered: {0}")]
    DuplicatePhone(String),

    #[error("Signup already exists for this email and phone number")]
    DuplicatePair,

    #[error("Signup not found: {0}")]
    NotFound(Uuid),

    #[error("Storage error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StoreError {
    /// Whether this error is a uniqueness conflict rather than a failure.
    pub fn is_duplicate(&self) -> bool {
        matches!(
            self,
            StoreError::DuplicateEmail(_) | StoreError::DuplicatePhone(_) | StoreError::DuplicatePair
        )
    }
}
