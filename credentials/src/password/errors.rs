use thiserror::Error;

/// Error type for password operations.
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Password could not be encoded for hashing: {0}")]
    Encoding(String),

    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Invalid password hash: {0}")]
    MalformedHash(String),

    #[error("Invalid hasher parameters: {0}")]
    InvalidParams(String),
}
