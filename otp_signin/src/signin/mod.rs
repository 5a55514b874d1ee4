//! Two-step one-time passcode sign-in flow.

mod classify;
mod errors;
mod flow;
mod verify;

pub use classify::{IdentifierKind, classify_identifier};
pub use errors::SignInError;
pub use flow::{SignInFlow, SignInStep};
pub use verify::verify_code;

pub(crate) use classify::attributes_for;
