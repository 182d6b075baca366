//! Webhook delivery for cycle messages

use super::report::Message;

/// Notifier for sending rendered messages to a chat webhook
pub struct Notifier {
    client: reqwest::Client,
    webhook_url: String,
}

impl Notifier {
    /// Create a notifier for the given webhook URL
    pub fn new(webhook_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            webhook_url: webhook_url.into(),
        }
    }

    /// Send a message to the webhook.
    ///
    /// Fire-and-forget from the cycle's perspective: the caller logs
    /// failures and never retries or rolls back state because of one.
    pub async fn send(&self, message: &Message) -> Result<(), NotifierError> {
        let payload = serde_json::json!({ "text": message.render() });

        let response = self
            .client
            .post(&self.webhook_url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| NotifierError::Webhook(format!("Failed to send webhook: {}", e)))?;

        if !response.status().is_success() {
            return Err(NotifierError::Webhook(format!(
                "Webhook returned status {}",
                response.status()
            )));
        }

        tracing::debug!(kind = message.kind(), "Webhook notification sent");

        Ok(())
    }
}

/// Notifier errors
#[derive(Debug, thiserror::Error)]
pub enum NotifierError {
    #[error("Webhook error: {0}")]
    Webhook(String),
}
