use thiserror::Error;

use crate::utils::UtilError;

/// Errors reported by an identity provider.
///
/// This is a closed taxonomy: callers match it exhaustively instead of
/// string-comparing provider error codes. The remote protocol mapper folds
/// the service's `__type` codes into these variants; codes with no mapping
/// are carried in [`IdentityError::Service`].
#[derive(Debug, Error)]
pub enum IdentityError {
    /// The sign-in identifier is not a registered user
    #[error("User not found")]
    UserNotFound,

    /// Registration attempted for an identifier that already exists
    #[error("User already exists")]
    UserExists,

    /// The submitted one-time code did not match
    #[error("Code mismatch")]
    CodeMismatch,

    /// The challenge session has expired and must be restarted
    #[error("Session expired")]
    SessionExpired,

    /// Authentication failed and the session is closed (e.g. attempt limit)
    #[error("Not authorized: {0}")]
    NotAuthorized(String),

    /// The provider is throttling requests
    #[error("Too many requests")]
    TooManyRequests,

    /// A request parameter was rejected by the provider
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Transport-level failure reaching the provider
    #[error("Network error: {0}")]
    Network(String),

    /// A service error code with no dedicated variant
    #[error("Service error {code}: {message}")]
    Service { code: String, message: String },

    /// Error converting between data formats
    #[error("Json conversion(Serde) error: {0}")]
    Serde(String),

    /// Error from utility operations
    #[error("Utils error: {0}")]
    Utils(#[from] UtilError),
}

impl From<reqwest::Error> for IdentityError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

impl From<serde_json::Error> for IdentityError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

impl From<crate::challenge::ChallengeError> for IdentityError {
    fn from(err: crate::challenge::ChallengeError) -> Self {
        use crate::challenge::ChallengeError;
        match err {
            ChallengeError::UserNotFound => Self::UserNotFound,
            ChallengeError::TooManyAttempts => Self::NotAuthorized(err.to_string()),
            ChallengeError::Metadata(msg) => Self::Service {
                code: "ChallengeError".to_string(),
                message: msg,
            },
            ChallengeError::Utils(e) => Self::Utils(e),
        }
    }
}

impl From<crate::userdb::UserError> for IdentityError {
    fn from(err: crate::userdb::UserError) -> Self {
        Self::Service {
            code: "UserStoreError".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<crate::delivery::DeliveryError> for IdentityError {
    fn from(err: crate::delivery::DeliveryError) -> Self {
        Self::Service {
            code: "DeliveryError".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<crate::token::TokenError> for IdentityError {
    fn from(err: crate::token::TokenError) -> Self {
        Self::Service {
            code: "TokenError".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<crate::storage::StorageError> for IdentityError {
    fn from(err: crate::storage::StorageError) -> Self {
        Self::Service {
            code: "StorageError".to_string(),
            message: err.to_string(),
        }
    }
}
