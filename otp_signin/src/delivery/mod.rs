//! Passcode delivery channels.

mod config;
mod errors;
mod senders;
mod types;

pub use errors::DeliveryError;
pub use senders::{TracingSender, WebhookSender};
pub use types::CodeSender;

pub(crate) use config::CODE_SENDER;
