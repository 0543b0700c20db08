use thiserror::Error;

/// Application-wide error types for Shanyrak.
#[derive(Error, Debug)]
pub enum AppError {
    /// Input failed validation or could not be parsed.
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Missing, malformed, or expired credentials, or caller is not the owner.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The requested resource does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A uniqueness constraint was violated.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Database operation failed.
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Configuration is missing or invalid.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Anything else that is the server's fault (hashing, signing, task join).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns true if the error is caused by the caller rather than the server.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AppError::ValidationError(_)
                | AppError::Unauthorized(_)
                | AppError::NotFound(_)
                | AppError::Conflict(_)
        )
    }
}
