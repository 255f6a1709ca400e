use std::fmt;

use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use crate::user::errors::SubmissionError;
use crate::user::errors::UserIdError;

// Bounds for the sized-field rule. The rejection message is a single
// combined string covering both bounds no matter which one failed; that
// wording is contractual and must not be regenerated per field.
const USERNAME_MIN_CHARS: usize = 1;
const PASSWORD_MIN_CHARS: usize = 8;

/// Raw registration submission as decoded from the request body.
///
/// Fields stay untyped JSON values until the rule chain has inspected
/// them: the type rule must observe arrays, numbers, and objects exactly
/// as submitted, which a typed struct would already have rejected at
/// decode time. An explicit JSON `null` counts as absent.
#[derive(Clone, Default, Deserialize)]
pub struct Submission {
    #[serde(default)]
    pub username: Option<Value>,
    #[serde(default)]
    pub password: Option<Value>,
    #[serde(default)]
    pub fullname: Option<Value>,
    #[serde(default)]
    pub email: Option<Value>,
}

impl Submission {
    /// Run the ordered rule chain over the raw submission.
    ///
    /// Pure and deterministic: no I/O, no mutation, same outcome on every
    /// call. The first failing rule decides the whole outcome; later
    /// rules are not evaluated.
    ///
    /// # Errors
    /// * `MissingField` - `username`, `password`, or `email` absent or null
    /// * `NonStringField` - any present field is not a JSON string
    /// * `UntrimmedField` - `username` or `password` has edge whitespace
    /// * `FieldTooSmall` - `username` or `password` under its minimum length
    pub fn validate(&self) -> Result<(), SubmissionError> {
        self.has_required_fields()?;
        self.string_fields_only()?;
        self.trimmed_fields()?;
        self.sized_fields()?;
        Ok(())
    }

    /// Validate, then extract the typed credential fields.
    ///
    /// # Errors
    /// Same as [`Submission::validate`].
    pub fn try_into_command(self) -> Result<CreateUserCommand, SubmissionError> {
        self.validate()?;

        // The chain established that every present field is a string
        let into_string = |value: Option<Value>| match value {
            Some(Value::String(s)) => Some(s),
            _ => None,
        };

        Ok(CreateUserCommand {
            username: into_string(self.username).unwrap_or_default(),
            password: into_string(self.password).unwrap_or_default(),
            fullname: into_string(self.fullname),
            email: into_string(self.email).unwrap_or_default(),
        })
    }

    fn has_required_fields(&self) -> Result<(), SubmissionError> {
        if self.username.is_none() || self.password.is_none() || self.email.is_none() {
            return Err(SubmissionError::MissingField);
        }
        Ok(())
    }

    fn string_fields_only(&self) -> Result<(), SubmissionError> {
        let fields = [&self.username, &self.password, &self.fullname, &self.email];
        if fields.into_iter().flatten().any(|value| !value.is_string()) {
            return Err(SubmissionError::NonStringField);
        }
        Ok(())
    }

    fn trimmed_fields(&self) -> Result<(), SubmissionError> {
        for value in [&self.username, &self.password].into_iter().flatten() {
            if let Some(s) = value.as_str() {
                if s != s.trim() {
                    return Err(SubmissionError::UntrimmedField);
                }
            }
        }
        Ok(())
    }

    fn sized_fields(&self) -> Result<(), SubmissionError> {
        // Lengths are character counts, not byte lengths
        let chars_of = |value: &Option<Value>| {
            value
                .as_ref()
                .and_then(Value::as_str)
                .map_or(0, |s| s.chars().count())
        };

        if chars_of(&self.username) < USERNAME_MIN_CHARS
            || chars_of(&self.password) < PASSWORD_MIN_CHARS
        {
            return Err(SubmissionError::FieldTooSmall);
        }
        Ok(())
    }
}

impl fmt::Debug for Submission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Submission")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("fullname", &self.fullname)
            .field("email", &self.email)
            .finish()
    }
}

/// Command to create a new user.
///
/// Produced only by a submission that passed the full rule chain. The
/// password is still plaintext here; it is consumed by hashing and must
/// not outlive it.
#[derive(Clone)]
pub struct CreateUserCommand {
    pub username: String,
    pub password: String,
    pub fullname: Option<String>,
    pub email: String,
}

impl fmt::Debug for CreateUserCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreateUserCommand")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("fullname", &self.fullname)
            .field("email", &self.email)
            .finish()
    }
}

/// User record as persisted.
///
/// Holds the hashed password only; the plaintext is gone by the time this
/// type exists. Never mutated after creation.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub password_hash: String,
    pub fullname: Option<String>,
    pub email: String,
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID.
    ///
    /// # Returns
    /// UserId with random UUID v4
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a user ID from string.
    ///
    /// # Arguments
    /// * `s` - UUID string to parse
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        Uuid::parse_str(s)
            .map(UserId)
            .map_err(|e| UserIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn submission(body: serde_json::Value) -> Submission {
        serde_json::from_value(body).expect("Failed to decode submission")
    }

    fn valid_body() -> serde_json::Value {
        json!({
            "username": "exampleUser",
            "password": "examplePass",
            "fullname": "Example User",
            "email": "example@example.com"
        })
    }

    #[test]
    fn test_valid_submission_is_accepted() {
        assert_eq!(submission(valid_body()).validate(), Ok(()));
    }

    #[test]
    fn test_minimal_bounds_are_accepted() {
        let body = json!({
            "username": "a",
            "password": "hello123",
            "email": "a@example.com"
        });
        assert_eq!(submission(body).validate(), Ok(()));
    }

    #[test]
    fn test_missing_username_is_rejected() {
        let mut body = valid_body();
        body.as_object_mut().unwrap().remove("username");

        let err = submission(body).validate().unwrap_err();
        assert_eq!(err, SubmissionError::MissingField);
        assert_eq!(err.to_string(), "Missing field");
        assert_eq!(err.location(), "hasFields");
    }

    #[test]
    fn test_missing_password_is_rejected() {
        let mut body = valid_body();
        body.as_object_mut().unwrap().remove("password");

        let err = submission(body).validate().unwrap_err();
        assert_eq!(err, SubmissionError::MissingField);
    }

    #[test]
    fn test_missing_email_is_rejected() {
        let mut body = valid_body();
        body.as_object_mut().unwrap().remove("email");

        let err = submission(body).validate().unwrap_err();
        assert_eq!(err, SubmissionError::MissingField);
    }

    #[test]
    fn test_null_field_counts_as_missing() {
        let mut body = valid_body();
        body["username"] = json!(null);

        let err = submission(body).validate().unwrap_err();
        assert_eq!(err, SubmissionError::MissingField);
    }

    #[test]
    fn test_missing_fullname_is_accepted() {
        let mut body = valid_body();
        body.as_object_mut().unwrap().remove("fullname");

        assert_eq!(submission(body).validate(), Ok(()));
    }

    #[test]
    fn test_array_password_is_rejected() {
        let mut body = valid_body();
        body["password"] = json!([]);

        let err = submission(body).validate().unwrap_err();
        assert_eq!(err, SubmissionError::NonStringField);
        assert_eq!(err.to_string(), "Incorrect field type: expected string");
        assert_eq!(err.location(), "stringField");
    }

    #[test]
    fn test_numeric_username_is_rejected() {
        let mut body = valid_body();
        body["username"] = json!(42);

        let err = submission(body).validate().unwrap_err();
        assert_eq!(err, SubmissionError::NonStringField);
    }

    #[test]
    fn test_non_string_fullname_is_rejected() {
        // Optional fields are still type-checked when present
        let mut body = valid_body();
        body["fullname"] = json!({ "first": "Example" });

        let err = submission(body).validate().unwrap_err();
        assert_eq!(err, SubmissionError::NonStringField);
    }

    #[test]
    fn test_trailing_whitespace_password_is_rejected() {
        let mut body = valid_body();
        body["password"] = json!("hello123 ");

        let err = submission(body).validate().unwrap_err();
        assert_eq!(err, SubmissionError::UntrimmedField);
        assert_eq!(
            err.to_string(),
            "Field cannot start or end with whitespace"
        );
        assert_eq!(err.location(), "trimmedField");
    }

    #[test]
    fn test_leading_whitespace_username_is_rejected() {
        let mut body = valid_body();
        body["username"] = json!(" exampleUser");

        let err = submission(body).validate().unwrap_err();
        assert_eq!(err, SubmissionError::UntrimmedField);
    }

    #[test]
    fn test_untrimmed_fullname_is_accepted() {
        // Only username and password carry the trim rule
        let mut body = valid_body();
        body["fullname"] = json!(" Example User ");

        assert_eq!(submission(body).validate(), Ok(()));
    }

    #[test]
    fn test_short_password_is_rejected() {
        let mut body = valid_body();
        body["password"] = json!("hello12");

        let err = submission(body).validate().unwrap_err();
        assert_eq!(err, SubmissionError::FieldTooSmall);
        assert_eq!(
            err.to_string(),
            "Username needs to be at least 1 character long and Password needs to be at least 8 characters long"
        );
        assert_eq!(err.location(), "tooSmallField");
    }

    #[test]
    fn test_empty_username_is_rejected() {
        let mut body = valid_body();
        body["username"] = json!("");

        let err = submission(body).validate().unwrap_err();
        assert_eq!(err, SubmissionError::FieldTooSmall);
    }

    #[test]
    fn test_password_length_counts_characters_not_bytes() {
        let mut body = valid_body();
        body["password"] = json!("pässwörd");

        assert_eq!(submission(body).validate(), Ok(()));
    }

    #[test]
    fn test_presence_rule_wins_over_type_rule() {
        let body = json!({
            "username": 42,
            "fullname": "Example User",
            "email": "example@example.com"
        });

        let err = submission(body).validate().unwrap_err();
        assert_eq!(err, SubmissionError::MissingField);
    }

    #[test]
    fn test_type_rule_wins_over_length_rule() {
        let mut body = valid_body();
        body["fullname"] = json!(42);
        body["password"] = json!("hello12");

        let err = submission(body).validate().unwrap_err();
        assert_eq!(err, SubmissionError::NonStringField);
    }

    #[test]
    fn test_trim_rule_wins_over_length_rule() {
        let mut body = valid_body();
        body["password"] = json!("hello1 ");

        let err = submission(body).validate().unwrap_err();
        assert_eq!(err, SubmissionError::UntrimmedField);
    }

    #[test]
    fn test_validate_is_idempotent() {
        let accepted = submission(valid_body());
        assert_eq!(accepted.validate(), accepted.validate());

        let mut body = valid_body();
        body["password"] = json!("hello12");
        let rejected = submission(body);
        assert_eq!(rejected.validate(), rejected.validate());
        assert_eq!(rejected.validate(), Err(SubmissionError::FieldTooSmall));
    }

    #[test]
    fn test_try_into_command_extracts_fields() {
        let command = submission(valid_body())
            .try_into_command()
            .expect("Valid submission rejected");

        assert_eq!(command.username, "exampleUser");
        assert_eq!(command.password, "examplePass");
        assert_eq!(command.fullname.as_deref(), Some("Example User"));
        assert_eq!(command.email, "example@example.com");
    }

    #[test]
    fn test_try_into_command_without_fullname() {
        let body = json!({
            "username": "exampleUser",
            "password": "examplePass",
            "email": "example@example.com"
        });

        let command = submission(body).try_into_command().unwrap();
        assert_eq!(command.fullname, None);
    }

    #[test]
    fn test_try_into_command_rejects_invalid_submission() {
        let mut body = valid_body();
        body["password"] = json!("hello12");

        let err = submission(body).try_into_command().unwrap_err();
        assert_eq!(err, SubmissionError::FieldTooSmall);
    }

    #[test]
    fn test_debug_output_redacts_password() {
        let raw = format!("{:?}", submission(valid_body()));
        assert!(!raw.contains("examplePass"));

        let command = submission(valid_body()).try_into_command().unwrap();
        let rendered = format!("{:?}", command);
        assert!(!rendered.contains("examplePass"));
        assert!(rendered.contains("exampleUser"));
    }

    #[test]
    fn test_user_id_round_trip() {
        let id = UserId::new();
        let parsed = UserId::from_string(&id.to_string()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_user_id_rejects_garbage() {
        let result = UserId::from_string("not-a-uuid");
        assert!(matches!(result, Err(UserIdError::InvalidFormat(_))));
    }
}
