use std::sync::{Arc, LazyLock};

use super::senders::{TracingSender, WebhookSender};
use super::types::CodeSender;

pub(super) static OTP_SENDER_TYPE: LazyLock<String> = LazyLock::new(|| {
    std::env::var("OTP_SENDER_TYPE").unwrap_or_else(|_| "tracing".to_string())
});

pub(super) static OTP_DELIVERY_WEBHOOK_URL: LazyLock<Option<String>> =
    LazyLock::new(|| std::env::var("OTP_DELIVERY_WEBHOOK_URL").ok());

/// Process-wide passcode delivery channel, selected by OTP_SENDER_TYPE
pub(crate) static CODE_SENDER: LazyLock<Arc<dyn CodeSender>> = LazyLock::new(|| {
    tracing::info!("Using code sender: {}", *OTP_SENDER_TYPE);
    match OTP_SENDER_TYPE.as_str() {
        "webhook" => Arc::new(
            WebhookSender::new().expect("Failed to initialize the webhook code sender"),
        ),
        "tracing" => Arc::new(TracingSender),
        t => panic!("Unsupported code sender type: {t}"),
    }
});
