//! User collection endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::user::{User, UserId};
use crate::infrastructure::user::{EditUserRequest, RegisterRequest};

/// Request to register a new user
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserApiRequest {
    pub username: String,
    pub password: String,
}

/// Request to edit a user's profile
///
/// The body may repeat the id (legacy client shape); the path id wins.
#[derive(Debug, Clone, Deserialize)]
pub struct EditUserApiRequest {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub birthday: Option<String>,
}

/// User representation returned by every endpoint
///
/// The password is echoed back in plaintext. That mirrors the documented
/// behavior of the system this replaces; it is a defect on record, kept
/// for contract fidelity.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub password: String,
    pub status: String,
    pub token: Option<String>,
    pub birthday: Option<String>,
    pub creation_date: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().value(),
            username: user.username().to_string(),
            password: user.password().to_string(),
            status: if user.is_online() { "ONLINE" } else { "OFFLINE" }.to_string(),
            token: user.token().map(String::from),
            birthday: user.birthday().map(String::from),
            creation_date: user.creation_date().to_string(),
        }
    }
}

/// GET /users
pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    debug!("Listing all users");

    let users = state.user_directory.list().await.map_err(ApiError::from)?;

    Ok(Json(users.iter().map(UserResponse::from).collect()))
}

/// POST /users
pub async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserApiRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    debug!(username = %request.username, "Registering user");

    let user = state
        .user_directory
        .register(RegisterRequest {
            username: request.username,
            password: request.password,
        })
        .await
        .map_err(ApiError::from)?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(&user))))
}

/// GET /users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<UserResponse>, ApiError> {
    debug!(id, "Getting user");

    let user = state
        .user_directory
        .get(UserId::new(id))
        .await
        .map_err(ApiError::from)?;

    Ok(Json(UserResponse::from(&user)))
}

/// PUT /users/{id}
///
/// Applies a partial profile update and returns 204; the updated
/// representation is observable via GET /users/{id}.
pub async fn edit_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<EditUserApiRequest>,
) -> Result<StatusCode, ApiError> {
    debug!(id, "Editing user");

    state
        .user_directory
        .edit(EditUserRequest {
            id: UserId::new(id),
            username: request.username,
            birthday: request.birthday,
        })
        .await
        .map_err(ApiError::from)?;

    Ok(StatusCode::NO_CONTENT)
}
