//! Router assembly: public, registered, and admin surfaces.

use crate::api::{favorites, mortgage, properties, users};
use crate::auth::{access_gate, handlers as auth_handlers, require_role, AuthState, Role};
use crate::store::{FavoriteStore, PropertyStore, UserStore};
use axum::{
    middleware,
    response::Json,
    routing::{delete, get, post},
    Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<UserStore>,
    pub properties: Arc<PropertyStore>,
    pub favorites: Arc<FavoriteStore>,
}

/// Create the API router.
///
/// Three surfaces: public listing/auth endpoints, registered-only routes
/// behind the access gate plus a Registered role check, and admin routes
/// behind the gate plus an Admin role check. The gate layer sits outside the
/// role layer so the identity is attached before the role is inspected.
pub fn create_router(app_state: AppState, auth_state: AuthState) -> Router {
    let public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/api/properties", get(properties::list_all))
        .route("/api/properties/postal-code/:code", get(properties::by_postal_code))
        .route("/api/properties/town/:town", get(properties::by_town))
        .route("/api/users/register", post(users::register))
        .route("/api/mortgage/quote", post(mortgage::quote))
        .with_state(app_state.clone());

    let auth_routes = Router::new()
        .route("/api/auth/login", post(auth_handlers::login))
        .route("/api/auth/logout", post(auth_handlers::logout))
        .with_state(auth_state.clone());

    let registered_routes = Router::new()
        .route("/api/properties/mine", get(properties::mine))
        .route("/api/properties", post(properties::add))
        .route("/api/properties/:id", delete(properties::remove))
        .route("/api/favorites", get(favorites::list))
        .route("/api/favorites/toggle", post(favorites::toggle))
        .route_layer(middleware::from_fn_with_state(
            Role::Registered,
            require_role,
        ))
        .route_layer(middleware::from_fn_with_state(
            auth_state.clone(),
            access_gate,
        ))
        .with_state(app_state.clone());

    let admin_routes = Router::new()
        .route("/api/admin/users", get(users::list))
        .route("/api/admin/users/by-email/:email", get(users::by_email))
        .route("/api/admin/users/:id", delete(users::remove))
        .route(
            "/api/admin/properties/by-owner/:email",
            get(properties::by_owner_email),
        )
        .route("/api/admin/properties/:id", delete(properties::admin_remove))
        .route_layer(middleware::from_fn_with_state(Role::Admin, require_role))
        .route_layer(middleware::from_fn_with_state(auth_state, access_gate))
        .with_state(app_state);

    Router::new()
        .merge(public_routes)
        .merge(auth_routes)
        .merge(registered_routes)
        .merge(admin_routes)
        .layer(CorsLayer::permissive())
}

// ===== Route Handlers =====

/// Health check endpoint
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}
