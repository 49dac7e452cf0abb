//! In-memory waitlist collection.

use crate::error::StoreError;
use crate::types::{SignupDraft, SignupRecord};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The waitlist: every accepted signup, in submission order.
///
/// All mutation goes through [`Waitlist::create`] and
/// [`Waitlist::generate_token`]; records are never edited or deleted by
/// the service itself.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Waitlist {
    records: Vec<SignupRecord>,
}

impl Waitlist {
    /// Create a new empty waitlist.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Commit a validated draft, enforcing uniqueness at write time.
    ///
    /// Read-side duplicate checks are advisory only; two concurrent
    /// submissions with the same email can both pass them. This re-check
    /// under the caller's write lock is the authoritative one.
    pub fn create(&mut self, draft: SignupDraft) -> Result<SignupRecord, StoreError> {
        if self.email_exists(&draft.email) {
            return Err(StoreError::DuplicateEmail(draft.email));
        }
        if self.phone_exists(&draft.phone) {
            return Err(StoreError::DuplicatePhone(draft.phone));
        }
        // Subsumed by the two checks above while both single-field
        // constraints hold; kept so relaxing either one later does not
        // silently drop the pair constraint.
        if self.pair_exists(&draft.email, &draft.phone) {
            return Err(StoreError::DuplicatePair);
        }

        let record = SignupRecord::from_draft(draft);
        self.records.push(record.clone());
        Ok(record)
    }

    /// Whether a signup with this email exists. Expects the lowercased
    /// form; stored emails are already lowercased, so comparison is exact.
    pub fn email_exists(&self, email: &str) -> bool {
        self.records.iter().any(|r| r.email == email)
    }

    /// Whether a signup with this normalized phone number exists.
    pub fn phone_exists(&self, phone: &str) -> bool {
        self.records.iter().any(|r| r.phone == phone)
    }

    /// Whether a signup matches both email and phone simultaneously.
    pub fn pair_exists(&self, email: &str, phone: &str) -> bool {
        self.records
            .iter()
            .any(|r| r.email == email && r.phone == phone)
    }

    /// Get a record by id.
    pub fn get(&self, id: Uuid) -> Option<&SignupRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// All records, newest first.
    pub fn list_all(&self) -> Vec<&SignupRecord> {
        self.records.iter().rev().collect()
    }

    /// Total number of signups.
    pub fn count(&self) -> usize {
        self.records.len()
    }

    /// Replace the verification token with a fresh one and return it.
    ///
    /// Every call produces a new token; the previous value is never
    /// reused.
    pub fn generate_token(&mut self, id: Uuid) -> Result<String, StoreError> {
        let record = self
            .records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(StoreError::NotFound(id))?;

        let token = Uuid::new_v4().to_string();
        record.verification_token = token.clone();
        Ok(token)
    }

    /// Remove a record by id, returning it if present.
    ///
    /// Only used to roll back an insert whose persistence failed; there
    /// is no user-facing deletion path.
    pub fn remove(&mut self, id: Uuid) -> Option<SignupRecord> {
        let index = self.records.iter().position(|r| r.id == id)?;
        Some(self.records.remove(index))
    }
}
