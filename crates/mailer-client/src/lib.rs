//! HTTP mail-relay client.
//!
//! Thin client for the operations this service needs from the mail relay:
//! submitting an outbound message and checking relay health. Delivery
//! itself (SMTP, retries, bounces) is the relay's problem.

mod client;
mod error;
mod types;

pub use client::MailerClient;
pub use error::MailerError;
pub use types::OutboundMessage;
