//! Error types for sign-in coordination

use thiserror::Error;

use crate::session::SessionError;
use crate::signin::SignInError;
use crate::userdb::UserError;

/// Errors that can occur while coordinating the sign-in endpoints
#[derive(Error, Debug)]
pub enum CoordinationError {
    /// General coordination error
    #[error("Coordination error: {0}")]
    Coordination(String),

    /// Unauthorized access error
    #[error("Unauthorized access")]
    Unauthorized,

    /// No content error
    #[error("No content")]
    NoContent,

    /// Resource not found with context
    #[error("Resource not found: {resource_type} {resource_id}")]
    ResourceNotFound {
        resource_type: String,
        resource_id: String,
    },

    /// Storage error
    #[error("Storage error: {0}")]
    Storage(String),

    /// Error from the sign-in flow
    #[error("Sign-in error: {0}")]
    SignIn(SignInError),

    /// Error from session operations
    #[error("Session error: {0}")]
    Session(SessionError),

    /// Error from the user database operations
    #[error("User error: {0}")]
    User(UserError),
}

impl CoordinationError {
    /// Log the error and return self, for method chaining at the point
    /// where the error is raised
    pub fn log(self) -> Self {
        match &self {
            Self::Coordination(msg) => tracing::error!("Coordination error: {}", msg),
            Self::Unauthorized => tracing::error!("Unauthorized access"),
            Self::NoContent => tracing::debug!("No content"),
            Self::ResourceNotFound {
                resource_type,
                resource_id,
            } => tracing::error!("Resource not found: {} {}", resource_type, resource_id),
            Self::Storage(msg) => tracing::error!("Storage error: {}", msg),
            Self::SignIn(err) => tracing::error!("Sign-in error: {}", err),
            Self::Session(err) => tracing::error!("Session error: {}", err),
            Self::User(err) => tracing::error!("User error: {}", err),
        }
        self
    }
}

// From implementations that log at the conversion point

impl From<SignInError> for CoordinationError {
    fn from(err: SignInError) -> Self {
        let error = Self::SignIn(err);
        tracing::error!("{}", error);
        error
    }
}

impl From<SessionError> for CoordinationError {
    fn from(err: SessionError) -> Self {
        let error = Self::Session(err);
        tracing::error!("{}", error);
        error
    }
}

impl From<UserError> for CoordinationError {
    fn from(err: UserError) -> Self {
        let error = Self::User(err);
        tracing::error!("{}", error);
        error
    }
}

impl From<crate::storage::StorageError> for CoordinationError {
    fn from(err: crate::storage::StorageError) -> Self {
        let error = Self::Storage(err.to_string());
        tracing::error!("{}", error);
        error
    }
}

impl From<crate::utils::UtilError> for CoordinationError {
    fn from(err: crate::utils::UtilError) -> Self {
        let error = Self::Coordination(err.to_string());
        tracing::error!("{}", error);
        error
    }
}

impl From<serde_json::Error> for CoordinationError {
    fn from(err: serde_json::Error) -> Self {
        let error = Self::Coordination(err.to_string());
        tracing::error!("{}", error);
        error
    }
}
