use async_trait::async_trait;

use super::errors::DeliveryError;

/// Channel that carries a freshly generated passcode to the user.
///
/// Implementations receive the destination recorded on the user account,
/// either a phone number or an email address.
#[async_trait]
pub trait CodeSender: Send + Sync + 'static {
    async fn send_code(&self, destination: &str, passcode: &str) -> Result<(), DeliveryError>;
}
