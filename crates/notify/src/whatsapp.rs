//! WhatsApp Cloud API client for new-quote messages.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, instrument};

use crate::error::NotifyError;
use crate::message::QuoteNotification;
use crate::notifier::Notifier;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhatsAppConfig {
    /// e.g. `https://graph.facebook.com/v19.0`
    pub base_url: String,
    pub phone_number_id: String,
    pub access_token: String,
    /// Sales team number, digits with country code.
    pub recipient: String,
    pub timeout_seconds: u64,
}

/// Sends a text message per quote through the Cloud API `messages` endpoint.
#[derive(Debug, Clone)]
pub struct WhatsAppNotifier {
    client: Client,
    config: WhatsAppConfig,
}

impl WhatsAppNotifier {
    pub fn new(client: Client, config: WhatsAppConfig) -> Self {
        Self { client, config }
    }

    fn messages_url(&self) -> String {
        format!(
            "{}/{}/messages",
            self.config.base_url.trim_end_matches('/'),
            self.config.phone_number_id
        )
    }

    fn payload(&self, notification: &QuoteNotification) -> serde_json::Value {
        json!({
            "messaging_product": "whatsapp",
            "to": self.config.recipient,
            "type": "text",
            "text": {
                "preview_url": false,
                "body": notification.render(),
            },
        })
    }
}

#[async_trait]
impl Notifier for WhatsAppNotifier {
    #[instrument(skip_all, fields(city = %notification.city))]
    async fn notify(&self, notification: &QuoteNotification) -> Result<(), NotifyError> {
        let response = self
            .client
            .post(self.messages_url())
            .bearer_auth(&self.config.access_token)
            .timeout(Duration::from_secs(self.config.timeout_seconds))
            .json(&self.payload(notification))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(NotifyError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        debug!(status = status.as_u16(), "whatsapp message accepted");
        Ok(())
    }
}
