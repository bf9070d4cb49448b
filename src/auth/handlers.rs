//! Authentication Endpoints
///! Mission: Log users in and out of the cookie session

use crate::auth::{
    cookies::{clear_session, session_cookie, ACCESS_COOKIE, REFRESH_COOKIE},
    models::{Identity, LoginRequest, LoginResponse, UserResponse},
    tokens::TokenService,
};
use crate::store::UserStore;
use axum::{
    extract::State,
    http::{header::SET_COOKIE, StatusCode},
    response::{AppendHeaders, IntoResponse, Response},
    Json,
};
use axum_extra::extract::CookieJar;
use serde_json::json;
use std::sync::Arc;
use tracing::{info, warn};

/// Shared auth state
#[derive(Clone)]
pub struct AuthState {
    pub users: Arc<UserStore>,
    pub tokens: Arc<TokenService>,
    pub login_redirect_url: String,
}

impl AuthState {
    pub fn new(users: Arc<UserStore>, tokens: Arc<TokenService>, login_redirect_url: String) -> Self {
        Self {
            users,
            tokens,
            login_redirect_url,
        }
    }
}

/// Login endpoint - POST /api/auth/login
///
/// On success both session cookies are set: the access token with the short
/// TTL and the refresh token with the long one. The role embedded in the
/// tokens is the one stored for the user at this moment.
pub async fn login(
    State(state): State<AuthState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Response, AuthApiError> {
    let valid = state
        .users
        .verify_password(&payload.email, &payload.password)
        .map_err(|_| AuthApiError::InternalError)?;

    if !valid {
        warn!("Failed login attempt: {}", payload.email);
        return Err(AuthApiError::InvalidCredentials);
    }

    let user = state
        .users
        .get_user_by_email(&payload.email)
        .map_err(|_| AuthApiError::InternalError)?
        .ok_or(AuthApiError::InvalidCredentials)?;

    let identity = Identity {
        subject_id: user.id,
        role: user.role,
    };
    let pair = state
        .tokens
        .issue_pair(&identity)
        .map_err(|_| AuthApiError::InternalError)?;

    info!("Login successful: {} ({})", user.email, user.role.as_str());

    let cookies = AppendHeaders([
        (
            SET_COOKIE,
            session_cookie(
                ACCESS_COOKIE,
                &pair.access_token,
                state.tokens.access_ttl().num_seconds(),
            ),
        ),
        (
            SET_COOKIE,
            session_cookie(
                REFRESH_COOKIE,
                &pair.refresh_token,
                state.tokens.refresh_ttl().num_seconds(),
            ),
        ),
    ]);

    let body = Json(LoginResponse {
        message: "login successful".to_string(),
        user: UserResponse::from_user(&user),
    });

    Ok((cookies, body).into_response())
}

/// Logout endpoint - POST /api/auth/logout
///
/// Clears both session cookies; there is no server-side revocation list, the
/// tokens simply age out.
pub async fn logout(jar: CookieJar) -> impl IntoResponse {
    (clear_session(jar), StatusCode::NO_CONTENT)
}

/// Auth API errors
#[derive(Debug)]
pub enum AuthApiError {
    InvalidCredentials,
    InternalError,
}

impl IntoResponse for AuthApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthApiError::InvalidCredentials => (StatusCode::BAD_REQUEST, "invalid credentials"),
            AuthApiError::InternalError => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_api_error_responses() {
        let bad_creds = AuthApiError::InvalidCredentials.into_response();
        assert_eq!(bad_creds.status(), StatusCode::BAD_REQUEST);

        let internal = AuthApiError::InternalError.into_response();
        assert_eq!(internal.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
