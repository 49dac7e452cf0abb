//! Mail-relay message types.

use serde::{Deserialize, Serialize};

/// A plain-text message submitted to the relay for delivery.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutboundMessage {
    /// Sender address.
    pub from: String,

    /// Recipient addresses.
    pub to: Vec<String>,

    pub subject: String,

    /// Plain-text body.
    pub body: String,
}
