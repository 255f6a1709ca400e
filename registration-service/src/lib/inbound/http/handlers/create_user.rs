use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::Submission;
use crate::domain::user::models::User;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;

pub async fn create_user(
    State(state): State<AppState>,
    Json(body): Json<Submission>,
) -> Result<ApiSuccess<CreateUserResponseData>, ApiError> {
    // First failing rule wins; the store is never touched on rejection
    let command = body.try_into_command()?;

    state
        .user_service
        .create_user(command)
        .await
        .map_err(ApiError::from)
        .map(|ref user| {
            ApiSuccess::new(StatusCode::CREATED, user.into())
                .with_location(format!("/api/users/{}", user.id))
        })
}

/// Response body for a created user.
///
/// The password hash never leaves the service; the stored record is
/// reduced to its public fields here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateUserResponseData {
    pub id: String,
    pub username: String,
    pub fullname: Option<String>,
    pub email: String,
}

impl From<&User> for CreateUserResponseData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.clone(),
            fullname: user.fullname.clone(),
            email: user.email.clone(),
        }
    }
}
