use thiserror::Error;

/// Errors raised while handing a passcode to a delivery channel
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("Delivery error: {0}")]
    Delivery(String),

    #[error("Delivery channel is not configured: {0}")]
    NotConfigured(String),
}

impl From<reqwest::Error> for DeliveryError {
    fn from(err: reqwest::Error) -> Self {
        Self::Delivery(err.to_string())
    }
}
