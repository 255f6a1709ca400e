use thiserror::Error;

/// Rejection produced by the submission rule chain.
///
/// Display strings and location keys are asserted verbatim by consumers;
/// both are frozen contract surface, not presentation detail.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SubmissionError {
    #[error("Missing field")]
    MissingField,

    #[error("Incorrect field type: expected string")]
    NonStringField,

    #[error("Field cannot start or end with whitespace")]
    UntrimmedField,

    #[error("Username needs to be at least 1 character long and Password needs to be at least 8 characters long")]
    FieldTooSmall,
}

impl SubmissionError {
    /// Classification tag shared by every rejection.
    pub const REASON: &'static str = "ValidationError";

    /// Stable machine-readable key naming the rule that failed.
    pub fn location(&self) -> &'static str {
        match self {
            Self::MissingField => "hasFields",
            Self::NonStringField => "stringField",
            Self::UntrimmedField => "trimmedField",
            Self::FieldTooSmall => "tooSmallField",
        }
    }
}

/// Error for UserId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Top-level error for all user-related operations
#[derive(Debug, Clone, Error)]
pub enum UserError {
    #[error("Invalid user ID: {0}")]
    InvalidUserId(#[from] UserIdError),

    #[error("Password error: {0}")]
    Password(#[from] credentials::PasswordError),

    // Domain-level errors
    #[error("User not found: {0}")]
    NotFound(String),

    #[error("Username already exists: {0}")]
    UsernameAlreadyExists(String),

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for UserError {
    fn from(err: anyhow::Error) -> Self {
        UserError::Unknown(err.to_string())
    }
}
