//! Access Gate Middleware
//! Mission: Authenticate requests from cookies and enforce roles

use crate::auth::{
    cookies::{clear_session, session_cookie, ACCESS_COOKIE, REFRESH_COOKIE},
    handlers::AuthState,
    models::{Identity, Role},
};
use axum::{
    extract::{Request, State},
    http::{header::SET_COOKIE, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::CookieJar;
use serde_json::json;
use tracing::debug;

/// Terminal gate outcomes, converted to HTTP at the boundary.
///
/// Verification failures never propagate past the gate as unhandled faults;
/// they always collapse into one of these.
#[derive(Debug)]
pub enum GateError {
    /// No usable credential was offered at all.
    NoCredentials,
    /// Identity missing or its role does not match the gated route.
    Forbidden,
    /// Token minting failed during rotation.
    Internal,
}

impl IntoResponse for GateError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            GateError::NoCredentials => (StatusCode::UNAUTHORIZED, "no token provided"),
            GateError::Forbidden => (StatusCode::FORBIDDEN, "access forbidden"),
            GateError::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "internal server error"),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Per-request authentication gate.
///
/// Reads the access and refresh tokens from the cookie transport, verifies
/// the access token, and attaches the resulting [`Identity`] to the request
/// extensions. An invalid or expired access token escalates through a single
/// refresh attempt; a successful refresh rotates BOTH cookies, a failed one
/// clears them and answers with a redirect signal so the client logs in
/// again. The handler never runs in that case.
pub async fn access_gate(
    State(state): State<AuthState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Response {
    let access = jar.get(ACCESS_COOKIE).map(|c| c.value().to_string());
    let refresh = jar.get(REFRESH_COOKIE).map(|c| c.value().to_string());

    // Hard precondition before any crypto work.
    if access.is_none() && refresh.is_none() {
        return GateError::NoCredentials.into_response();
    }

    if let Some(token) = access.as_deref() {
        match state.tokens.verify(token) {
            Ok(identity) => {
                req.extensions_mut().insert(identity);
                return next.run(req).await;
            }
            Err(e) => {
                // Repairable via the refresh path; not user-visible.
                debug!("Access token rejected: {}", e);
            }
        }
    }

    let Some(refresh_token) = refresh else {
        return GateError::NoCredentials.into_response();
    };

    match state.tokens.refresh(&refresh_token) {
        Ok((access_token, identity)) => {
            // Rotation is mandatory on every refresh: a brand-new refresh
            // token too, so lifetimes keep sliding.
            let new_refresh = match state.tokens.sign_refresh(&identity) {
                Ok(token) => token,
                Err(e) => {
                    debug!("Refresh token rotation failed: {}", e);
                    return GateError::Internal.into_response();
                }
            };

            req.extensions_mut().insert(identity);
            let mut response = next.run(req).await;

            let rotated = [
                session_cookie(
                    ACCESS_COOKIE,
                    &access_token,
                    state.tokens.access_ttl().num_seconds(),
                ),
                session_cookie(
                    REFRESH_COOKIE,
                    &new_refresh,
                    state.tokens.refresh_ttl().num_seconds(),
                ),
            ];
            for cookie in rotated {
                if let Ok(value) = HeaderValue::from_str(&cookie) {
                    response.headers_mut().append(SET_COOKIE, value);
                }
            }

            response
        }
        Err(e) => {
            debug!("Refresh rejected, forcing re-authentication: {}", e);
            // Dead refresh token: clear both cookies so the client cannot
            // loop on it, and signal where to log in again.
            (
                StatusCode::FOUND,
                clear_session(jar),
                Json(json!({ "redirectTo": state.login_redirect_url })),
            )
                .into_response()
        }
    }
}

/// Role enforcement middleware.
///
/// Passes through only if the gate attached an [`Identity`] whose role equals
/// the expected one. A missing identity also answers 403, never a panic.
pub async fn require_role(State(expected): State<Role>, req: Request, next: Next) -> Response {
    match req.extensions().get::<Identity>() {
        Some(identity) if identity.role == expected => next.run(req).await,
        Some(identity) => {
            debug!(
                subject_id = identity.subject_id,
                have = identity.role.as_str(),
                want = expected.as_str(),
                "Role mismatch"
            );
            GateError::Forbidden.into_response()
        }
        None => GateError::Forbidden.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_error_responses() {
        let no_creds = GateError::NoCredentials.into_response();
        assert_eq!(no_creds.status(), StatusCode::UNAUTHORIZED);

        let forbidden = GateError::Forbidden.into_response();
        assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);

        let internal = GateError::Internal.into_response();
        assert_eq!(internal.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
