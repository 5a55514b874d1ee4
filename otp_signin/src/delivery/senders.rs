use async_trait::async_trait;
use serde::Serialize;

use super::config::OTP_DELIVERY_WEBHOOK_URL;
use super::errors::DeliveryError;
use super::types::CodeSender;

/// Development sender that writes the passcode to the log instead of
/// delivering it anywhere
pub struct TracingSender;

#[async_trait]
impl CodeSender for TracingSender {
    async fn send_code(&self, destination: &str, passcode: &str) -> Result<(), DeliveryError> {
        tracing::info!("Your secret code: {} (for {})", passcode, destination);
        Ok(())
    }
}

#[derive(Serialize)]
struct WebhookPayload<'a> {
    destination: &'a str,
    message: String,
}

/// Sender that POSTs the passcode message to an external delivery gateway,
/// e.g. an SMS or email relay
pub struct WebhookSender {
    client: reqwest::Client,
    url: String,
}

impl WebhookSender {
    pub fn new() -> Result<Self, DeliveryError> {
        let url = OTP_DELIVERY_WEBHOOK_URL.clone().ok_or_else(|| {
            DeliveryError::NotConfigured("OTP_DELIVERY_WEBHOOK_URL must be set".to_string())
        })?;
        let url = url::Url::parse(&url)
            .map_err(|e| DeliveryError::NotConfigured(format!("Invalid webhook URL: {e}")))?
            .to_string();
        Ok(Self {
            client: reqwest::Client::builder()
                .build()
                .map_err(|e| DeliveryError::Delivery(e.to_string()))?,
            url,
        })
    }
}

#[async_trait]
impl CodeSender for WebhookSender {
    async fn send_code(&self, destination: &str, passcode: &str) -> Result<(), DeliveryError> {
        let payload = WebhookPayload {
            destination,
            message: format!("Your secret code: {passcode}"),
        };

        let response = self.client.post(&self.url).json(&payload).send().await?;
        if !response.status().is_success() {
            return Err(DeliveryError::Delivery(format!(
                "Delivery gateway returned {}",
                response.status()
            )));
        }
        tracing::info!("Passcode sent to {}", destination);
        Ok(())
    }
}
