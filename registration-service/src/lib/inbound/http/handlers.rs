use axum::http::header;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::user::errors::SubmissionError;
use crate::user::errors::UserError;

pub mod create_user;
pub mod get_user;

/// Successful API response: status code, optional Location header, body.
#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize> {
    status: StatusCode,
    location: Option<String>,
    body: Json<T>,
}

impl<T: Serialize> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess {
            status,
            location: None,
            body: Json(data),
        }
    }

    pub fn with_location(mut self, location: String) -> Self {
        self.location = Some(location);
        self
    }
}

impl<T: Serialize> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        match self.location {
            Some(location) => {
                (self.status, [(header::LOCATION, location)], self.body).into_response()
            }
            None => (self.status, self.body).into_response(),
        }
    }
}

/// Body of a validation rejection.
///
/// Consumers assert all three values verbatim; this triple is contract
/// surface and is emitted bare, without any response envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectionBody {
    pub reason: &'static str,
    pub message: String,
    pub location: &'static str,
}

impl From<&SubmissionError> for RejectionBody {
    fn from(err: &SubmissionError) -> Self {
        Self {
            reason: SubmissionError::REASON,
            message: err.to_string(),
            location: err.location(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    Validation(SubmissionError),
    BadRequest(String),
    NotFound(String),
    InternalServerError(String),
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        Self::InternalServerError(e.to_string())
    }
}

impl From<SubmissionError> for ApiError {
    fn from(err: SubmissionError) -> Self {
        ApiError::Validation(err)
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(_) => ApiError::NotFound(err.to_string()),
            UserError::InvalidUserId(_) => ApiError::BadRequest(err.to_string()),
            // Duplicate usernames surface exactly like any other store
            // fault: an undifferentiated server error. The distinction
            // stays internal, for the log line only.
            UserError::UsernameAlreadyExists(_)
            | UserError::Password(_)
            | UserError::DatabaseError(_)
            | UserError::Unknown(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(err) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(RejectionBody::from(&err)),
            )
                .into_response(),
            ApiError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, Json(ApiErrorData { message })).into_response()
            }
            ApiError::NotFound(message) => {
                (StatusCode::NOT_FOUND, Json(ApiErrorData { message })).into_response()
            }
            ApiError::InternalServerError(detail) => {
                // Internal detail goes to the log, never to the caller
                tracing::error!(error = %detail, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ApiErrorData {
                        message: "Internal Server Error".to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
}
