//! Session cookie transport
//! Mission: Carry the token pair in hardened cookies

use axum_extra::extract::cookie::{Cookie, CookieJar};

/// Cookie carrying the short-lived access token.
pub const ACCESS_COOKIE: &str = "token";
/// Cookie carrying the long-lived refresh token.
pub const REFRESH_COOKIE: &str = "refreshToken";

/// Build a `Set-Cookie` value for a session token.
///
/// `HttpOnly` keeps the token away from scripts, `SameSite=Strict` blocks
/// cross-site sends, and `Secure` restricts transport to HTTPS.
pub fn session_cookie(name: &str, token: &str, max_age_secs: i64) -> String {
    format!(
        "{}={}; Path=/; HttpOnly; SameSite=Strict; Secure; Max-Age={}",
        name, token, max_age_secs
    )
}

/// Remove both session cookies from the jar.
pub fn clear_session(jar: CookieJar) -> CookieJar {
    jar.remove(Cookie::build(ACCESS_COOKIE).path("/"))
        .remove(Cookie::build(REFRESH_COOKIE).path("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_cookie_attributes() {
        let value = session_cookie(ACCESS_COOKIE, "abc123", 900);
        assert!(value.starts_with("token=abc123;"));
        assert!(value.contains("HttpOnly"));
        assert!(value.contains("SameSite=Strict"));
        assert!(value.contains("Secure"));
        assert!(value.contains("Max-Age=900"));
        assert!(value.contains("Path=/"));
    }

    #[test]
    fn test_clear_session_drops_both_cookies() {
        let jar = CookieJar::new()
            .add(Cookie::new(ACCESS_COOKIE, "a"))
            .add(Cookie::new(REFRESH_COOKIE, "r"));

        let cleared = clear_session(jar);

        assert!(cleared.get(ACCESS_COOKIE).is_none());
        assert!(cleared.get(REFRESH_COOKIE).is_none());
    }
}
