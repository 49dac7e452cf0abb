//! Background lead notification.
//!
//! Delivery is strictly best-effort: the signup response never waits on
//! the mail relay, and a delivery failure is logged and dropped.

use crate::config::MailConfig;
use mailer_client::{MailerClient, MailerError, OutboundMessage};
use signup_store::SignupRecord;
use std::sync::Arc;
use tracing::{debug, warn};

/// Composes and dispatches operator notifications for new leads.
#[derive(Clone)]
pub struct Notifier {
    mailer: Arc<MailerClient>,
    config: MailConfig,
}

impl Notifier {
    /// Create a new notifier.
    pub fn new(mailer: Arc<MailerClient>, config: MailConfig) -> Self {
        Self { mailer, config }
    }

    /// Compose the operator-facing lead summary for a signup.
    pub fn lead_message(&self, record: &SignupRecord) -> OutboundMessage {
        let consent = if record.marketing_consent { "Yes" } else { "No" };
        let submitted = record.created_at.format("%B %d, %Y at %I:%M %p");
        let admin_url = format!(
            "{}/signups/{}",
            self.config.admin_base_url.trim_end_matches('/'),
            record.id
        );

        let body = format!(
            "New signup received from the waitlist!\n\
             \n\
             Contact Details:\n\
             Name: {name}\n\
             Email: {email}\n\
             Phone: {phone}\n\
             Marketing Consent: {consent}\n\
             Submitted: {submitted}\n\
             \n\
             View in admin panel:\n\
             {admin_url}\n",
            name = record.full_name(),
            email = record.email,
            phone = record.phone,
        );

        OutboundMessage {
            from: self.config.from_address.clone(),
            to: self.config.recipients.clone(),
            subject: format!("New Lead: {}", record.full_name()),
            body,
        }
    }

    /// Deliver the lead summary to the configured recipients.
    pub async fn send_lead(&self, record: &SignupRecord) -> Result<(), MailerError> {
        let message = self.lead_message(record);
        self.mailer.send(&message).await
    }

    /// Dispatch a lead notification in the background.
    ///
    /// Returns immediately; the spawned task runs to completion or fails
    /// silently, independent of the request that triggered it.
    pub fn notify(&self, record: SignupRecord) {
        if self.config.recipients.is_empty() {
            debug!("No notification recipients configured, skipping lead notification");
            return;
        }

        let notifier = self.clone();
        tokio::spawn(async move {
            if let Err(e) = notifier.send_lead(&record).await {
                warn!(error = %e, email = %record.email, "Lead notification failed");
            }
        });
    }
}
