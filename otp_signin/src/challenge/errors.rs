use thiserror::Error;

use crate::utils::UtilError;

/// Errors raised while running the custom challenge round trips
#[derive(Debug, Error)]
pub enum ChallengeError {
    /// Sign-in was initiated for an identifier with no matching user
    #[error("User does not exist")]
    UserNotFound,

    /// The allowed number of wrong answers has been used up
    #[error("Invalid OTP")]
    TooManyAttempts,

    /// A transcript entry did not carry the expected passcode metadata
    #[error("Challenge metadata error: {0}")]
    Metadata(String),

    #[error(transparent)]
    Utils(#[from] UtilError),
}
