//! JWT Token Service
//! Mission: Issue, verify, and rotate signed session tokens

use crate::auth::models::{Claims, Identity};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use tracing::debug;

/// Default access token lifetime: 15 minutes.
pub const ACCESS_TTL_SECS: i64 = 15 * 60;
/// Default refresh token lifetime: 1 day.
pub const REFRESH_TTL_SECS: i64 = 24 * 60 * 60;

/// Token verification and refresh errors.
///
/// All variants are terminal for the current request; none trigger retries.
#[derive(Debug, PartialEq, Eq)]
pub enum TokenError {
    /// Signature does not verify against the configured secret.
    InvalidSignature,
    /// Signature verifies but the token is past its expiry.
    Expired,
    /// Token is not a decodable JWT at all.
    Malformed,
    /// Refresh token failed verification; the client must log in again.
    MustReauthenticate,
    /// Token could not be encoded (key material problem).
    Creation,
}

impl std::fmt::Display for TokenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenError::InvalidSignature => write!(f, "Invalid token signature"),
            TokenError::Expired => write!(f, "Token expired"),
            TokenError::Malformed => write!(f, "Malformed token"),
            TokenError::MustReauthenticate => write!(f, "Refresh token rejected, log in again"),
            TokenError::Creation => write!(f, "Failed to create token"),
        }
    }
}

impl std::error::Error for TokenError {}

/// A freshly issued access/refresh token pair.
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Issues and verifies signed session tokens.
///
/// Pure function of the configured secret plus the payload; holds no state
/// beyond the key material and the default expirations, so it can be swapped
/// per test with a different secret.
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenService {
    /// Create a token service with the default 15m/1d lifetimes.
    pub fn new(secret: &str) -> Self {
        Self::with_ttls(
            secret,
            Duration::seconds(ACCESS_TTL_SECS),
            Duration::seconds(REFRESH_TTL_SECS),
        )
    }

    /// Create a token service with explicit lifetimes.
    pub fn with_ttls(secret: &str, access_ttl: Duration, refresh_ttl: Duration) -> Self {
        let mut validation = Validation::default();
        // Expiry is exact; no clock leeway.
        validation.leeway = 0;

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            access_ttl,
            refresh_ttl,
        }
    }

    pub fn access_ttl(&self) -> Duration {
        self.access_ttl
    }

    pub fn refresh_ttl(&self) -> Duration {
        self.refresh_ttl
    }

    /// Sign a token carrying `identity`, expiring after `ttl`.
    pub fn sign(&self, identity: &Identity, ttl: Duration) -> Result<String, TokenError> {
        let exp = (Utc::now() + ttl).timestamp();
        let claims = Claims {
            sub: identity.subject_id,
            role: identity.role,
            exp: exp.max(0) as usize,
        };

        encode(&Header::default(), &claims, &self.encoding).map_err(|e| {
            debug!("Failed to encode token: {}", e);
            TokenError::Creation
        })
    }

    /// Sign a short-lived access token for `identity`.
    pub fn sign_access(&self, identity: &Identity) -> Result<String, TokenError> {
        self.sign(identity, self.access_ttl)
    }

    /// Sign a long-lived refresh token for `identity`.
    pub fn sign_refresh(&self, identity: &Identity) -> Result<String, TokenError> {
        self.sign(identity, self.refresh_ttl)
    }

    /// Issue a brand-new access/refresh pair for `identity`.
    pub fn issue_pair(&self, identity: &Identity) -> Result<TokenPair, TokenError> {
        Ok(TokenPair {
            access_token: self.sign_access(identity)?,
            refresh_token: self.sign_refresh(identity)?,
        })
    }

    /// Decode a token and check signature plus expiry.
    pub fn verify(&self, token: &str) -> Result<Identity, TokenError> {
        let decoded =
            decode::<Claims>(token, &self.decoding, &self.validation).map_err(|e| {
                debug!("Token verification failed: {}", e);
                match e.kind() {
                    ErrorKind::ExpiredSignature => TokenError::Expired,
                    ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                    _ => TokenError::Malformed,
                }
            })?;

        Ok(decoded.claims.identity())
    }

    /// Mint a new access token from a refresh token.
    ///
    /// Any verification failure of the refresh token maps to
    /// `MustReauthenticate`: the caller must force a fresh login, there is
    /// nothing left to retry.
    pub fn refresh(&self, refresh_token: &str) -> Result<(String, Identity), TokenError> {
        let identity = self
            .verify(refresh_token)
            .map_err(|_| TokenError::MustReauthenticate)?;

        let access_token = self.sign_access(&identity)?;
        debug!(subject_id = identity.subject_id, "Access token refreshed");

        Ok((access_token, identity))
    }
}
