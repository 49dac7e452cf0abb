//! Mail-relay client errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MailerError {
    #[error("Mail relay error: {status} - {body}")]
    Api { status: u16, body: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}
