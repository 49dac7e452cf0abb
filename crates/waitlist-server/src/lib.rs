//! Waitlist signup service.
//!
//! HTTP API that captures signups for the pre-launch marketing site:
//! - validates and normalizes submissions (honeypot, disposable email
//!   domains, 10-digit phone format)
//! - rejects duplicate email/phone signups, with uniqueness re-enforced
//!   at the storage layer
//! - notifies operators of each new lead from a detached background task

pub mod api;
pub mod config;
pub mod error;
pub mod notify;
pub mod validate;

pub use config::Config;
pub use error::ApiError;
pub use notify::Notifier;
pub use validate::{validate_signup, FieldErrors};
