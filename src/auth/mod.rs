//! Authentication Module
//! Mission: Cookie-borne JWT sessions with refresh rotation and RBAC

pub mod cookies;
pub mod gate;
pub mod handlers;
pub mod models;
pub mod tokens;

pub use gate::{access_gate, require_role};
pub use handlers::AuthState;
pub use models::{Identity, Role};
pub use tokens::{TokenError, TokenService};
