use crate::auth::models::Role;
use serde::{Deserialize, Serialize};

/// A user account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing)]
    pub password_hash: String, // bcrypt hash - never serialize
    pub role: Role,
}

/// A property listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Property {
    pub id: i64,
    pub owner_id: i64,
    pub street: String,
    pub number: String,
    pub floor: Option<String>,
    pub postal_code: String,
    pub town: String,
    pub description: Option<String>,
    pub price: f64,
    pub image: Option<String>,
}

/// Payload for creating a property; the owner comes from the token, never
/// from the body.
#[derive(Debug, Clone, Deserialize)]
pub struct NewProperty {
    pub street: String,
    pub number: String,
    pub floor: Option<String>,
    pub postal_code: String,
    pub town: String,
    pub description: Option<String>,
    pub price: f64,
    pub image: Option<String>,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub database_path: String,
    pub port: u16,
    pub jwt_secret: String,
    pub login_redirect_url: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();

        let database_path =
            std::env::var("DATABASE_PATH").unwrap_or_else(|_| "./solaria.db".to_string());

        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "3333".to_string())
            .parse()
            .unwrap_or(3333);

        let jwt_secret = std::env::var("JWT_SECRET")
            .unwrap_or_else(|_| "solaria-dev-secret-change-in-production".to_string());

        let login_redirect_url = std::env::var("LOGIN_REDIRECT_URL")
            .unwrap_or_else(|_| "http://solaria.website".to_string());

        Ok(Self {
            database_path,
            port,
            jwt_secret,
            login_redirect_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_password_hash_not_serialized() {
        let user = User {
            id: 1,
            email: "ana@example.com".to_string(),
            first_name: "Ana".to_string(),
            last_name: "Serra".to_string(),
            password_hash: "$2b$12$secret".to_string(),
            role: Role::Registered,
        };

        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("password_hash"));
        assert!(!json.contains("$2b$12$secret"));
        assert!(json.contains("ana@example.com"));
    }
}
