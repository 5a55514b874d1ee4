use thiserror::Error;

/// Errors from user database operations
#[derive(Debug, Error)]
pub enum UserError {
    /// Error accessing or modifying stored user data
    #[error("Storage error: {0}")]
    Storage(String),

    /// Error converting between data formats
    #[error("Json conversion(Serde) error: {0}")]
    Serde(String),
}

impl From<sqlx::Error> for UserError {
    fn from(err: sqlx::Error) -> Self {
        Self::Storage(err.to_string())
    }
}
