//! Authentication Models
//! Mission: Define the identity and credential data structures

use serde::{Deserialize, Serialize};

/// User roles for RBAC
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Role {
    #[serde(rename = "anonymous")]
    Anonymous, // Public listing access only
    #[serde(rename = "registered")]
    Registered, // Own properties + favorites
    #[serde(rename = "admin")]
    Admin, // Full access to all users and properties
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::Anonymous => "anonymous",
            Role::Registered => "registered",
            Role::Admin => "admin",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "anonymous" => Some(Role::Anonymous),
            "registered" => Some(Role::Registered),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }
}

/// Authenticated identity carried inside signed tokens.
///
/// Never persisted outside the token itself; the role is fixed at issuance
/// and trusted as embedded (no live re-check against the user record).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Identity {
    pub subject_id: i64,
    pub role: Role,
}

/// JWT Claims payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i64, // subject (user id)
    pub role: Role,
    pub exp: usize, // expiration timestamp
}

impl Claims {
    pub fn identity(&self) -> Identity {
        Identity {
            subject_id: self.sub,
            role: self.role,
        }
    }
}

/// Login request body
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response (tokens travel in cookies, not in the body)
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub user: UserResponse,
}

/// User response (sanitized)
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
}

impl UserResponse {
    pub fn from_user(user: &crate::models::User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            role: user.role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serialization() {
        let admin = Role::Admin;
        let json = serde_json::to_string(&admin).unwrap();
        assert_eq!(json, r#""admin""#);

        let registered: Role = serde_json::from_str(r#""registered""#).unwrap();
        assert_eq!(registered, Role::Registered);
    }

    #[test]
    fn test_role_string_conversion() {
        assert_eq!(Role::Admin.as_str(), "admin");
        assert_eq!(Role::Registered.as_str(), "registered");
        assert_eq!(Role::Anonymous.as_str(), "anonymous");

        assert_eq!(Role::from_str("admin"), Some(Role::Admin));
        assert_eq!(Role::from_str("REGISTERED"), Some(Role::Registered));
        assert_eq!(Role::from_str("invalid"), None);
    }

    #[test]
    fn test_claims_identity() {
        let claims = Claims {
            sub: 42,
            role: Role::Registered,
            exp: 1234567890,
        };
        let identity = claims.identity();
        assert_eq!(identity.subject_id, 42);
        assert_eq!(identity.role, Role::Registered);
    }
}
