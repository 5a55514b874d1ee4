use thiserror::Error;

use crate::identity::IdentityError;

/// Errors reported by the sign-in flow
#[derive(Debug, Error)]
pub enum SignInError {
    /// The operation does not apply to the flow's current step
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// The provider answered the initial request with something other
    /// than the custom challenge
    #[error("Unexpected challenge")]
    UnexpectedChallenge,

    #[error(transparent)]
    Identity(#[from] IdentityError),
}
