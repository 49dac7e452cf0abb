//! Waitlist signup records with file-backed persistence.
//!
//! Uniqueness of email, phone, and the (email, phone) pair is enforced at
//! the single mutation path ([`Waitlist::create`]), so concurrent
//! submissions that both pass an earlier read-side duplicate check are
//! still resolved correctly at commit time.

mod error;
mod persist;
mod types;
mod waitlist;

pub use error::StoreError;
pub use persist::{FileStore, MemoryStore, Store};
pub use types::{SignupDraft, SignupRecord};
pub use waitlist::Waitlist;
