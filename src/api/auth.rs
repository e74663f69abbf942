//! Session endpoints: login and logout
//!
//! Both are PUT requests mutating session state on the user record and
//! returning the updated representation.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::api::users::UserResponse;
use crate::infrastructure::user::Credentials;

/// Login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Logout request carrying the session token
#[derive(Debug, Deserialize)]
pub struct LogoutRequest {
    pub token: String,
}

/// PUT /login
///
/// Returns 200 with the updated user on success, 401 on bad credentials,
/// and 204 when the user is already logged in - repeating a login is a
/// benign no-op, not a failure.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Response, ApiError> {
    debug!(username = %request.username, "Login attempt");

    let result = state
        .user_directory
        .login(Credentials {
            username: request.username,
            password: request.password,
        })
        .await;

    match result {
        Ok(user) => Ok(Json(UserResponse::from(&user)).into_response()),
        Err(e) if e.is_benign() => Ok(StatusCode::NO_CONTENT.into_response()),
        Err(e) => Err(ApiError::from(e)),
    }
}

/// PUT /logout
pub async fn logout(
    State(state): State<AppState>,
    Json(request): Json<LogoutRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    debug!("Logout attempt");

    let user = state
        .user_directory
        .logout(&request.token)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(UserResponse::from(&user)))
}
