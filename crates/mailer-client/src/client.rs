//! Mail-relay REST API client.

use crate::error::MailerError;
use crate::types::OutboundMessage;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Client for an HTTP mail relay's message-submission API.
#[derive(Clone)]
pub struct MailerClient {
    client: Client,
    base_url: String,
}

impl MailerClient {
    /// Create a new mail-relay client.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, MailerError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| MailerError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Check if the mail relay is healthy.
    pub async fn health_check(&self) -> bool {
        self.client
            .get(format!("{}/v1/health", self.base_url))
            .send()
            .await
            .map(|r| r.status().is_success())
            .unwrap_or(false)
    }

    /// Submit a message to the relay for delivery.
    #[instrument(skip(self, message), fields(subject = %message.subject))]
    pub async fn send(&self, message: &OutboundMessage) -> Result<(), MailerError> {
        let url = format!("{}/v1/messages", self.base_url);

        debug!(url = %url, recipients = message.to.len(), "Submitting message to relay");

        let response = self.client.post(&url).json(message).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %body, "Mail relay rejected message");

            return Err(MailerError::Api {
                status: status.as_u16(),
                body,
            });
        }

        debug!("Message accepted by relay");
        Ok(())
    }
}
