//! Solaria Backend Library
//!
//! Real-estate listing backend: cookie-borne JWT sessions with refresh
//! rotation, role-gated CRUD over properties and users, favorites, and a
//! mortgage quote endpoint. Exposed as a library so integration tests can
//! drive the router directly.

pub mod api;
pub mod auth;
pub mod middleware;
pub mod models;
pub mod sanitize;
pub mod store;
