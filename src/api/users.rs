//! User Endpoints
//! Mission: Self-registration plus admin user management

use crate::api::{ApiError, AppState};
use crate::auth::models::{Identity, Role, UserResponse};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    Extension,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::warn;

/// Registration request body
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

/// Register - POST /api/users/register (public)
///
/// Self-registration always yields a Registered account; admins only exist
/// through seeding or by another admin.
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    if payload.password.len() < 8 {
        return Err(ApiError::BadRequest(
            "password must be at least 8 characters".to_string(),
        ));
    }

    if state
        .users
        .get_user_by_email(&payload.email)
        .map_err(ApiError::Database)?
        .is_some()
    {
        return Err(ApiError::BadRequest("user already exists".to_string()));
    }

    let user = state
        .users
        .create_user(
            &payload.email,
            &payload.first_name,
            &payload.last_name,
            &payload.password,
            Role::Registered,
        )
        .map_err(|e| {
            warn!("Failed to create user: {}", e);
            ApiError::Database(e)
        })?;

    Ok((StatusCode::CREATED, Json(UserResponse::from_user(&user))))
}

/// List all users - GET /api/admin/users (admin)
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let users = state.users.list_users()?;
    if users.is_empty() {
        return Err(ApiError::NotFound("no users found".to_string()));
    }

    Ok(Json(users.iter().map(UserResponse::from_user).collect()))
}

/// Lookup by email - GET /api/admin/users/by-email/:email (admin)
pub async fn by_email(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<UserResponse>, ApiError> {
    state
        .users
        .get_user_by_email(&email)?
        .map(|user| Json(UserResponse::from_user(&user)))
        .ok_or(ApiError::NotFound("user not found".to_string()))
}

/// Delete a user - DELETE /api/admin/users/:id (admin)
pub async fn remove(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    if id <= 0 {
        return Err(ApiError::BadRequest("invalid user id".to_string()));
    }

    // Admins cannot remove their own account.
    if id == identity.subject_id {
        return Err(ApiError::BadRequest(
            "cannot delete your own account".to_string(),
        ));
    }

    if state.users.get_user_by_id(id)?.is_none() {
        return Err(ApiError::NotFound("user not found".to_string()));
    }

    state.users.delete_user(id)?;

    Ok(Json(json!({ "message": "user deleted successfully" })))
}
