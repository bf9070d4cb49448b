//! Solaria - Real-estate listing backend
//! Mission: Serve property listings with cookie-based JWT sessions

use anyhow::{Context, Result};
use axum::middleware;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use solaria_backend::{
    api::{create_router, AppState},
    auth::{AuthState, TokenService},
    middleware::request_logging,
    models::Config,
    store::{FavoriteStore, PropertyStore, UserStore},
};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config = Config::from_env()?;

    let users = Arc::new(UserStore::new(&config.database_path).context("Failed to open user store")?);
    let properties = Arc::new(
        PropertyStore::new(&config.database_path).context("Failed to open property store")?,
    );
    let favorites = Arc::new(
        FavoriteStore::new(&config.database_path).context("Failed to open favorites store")?,
    );

    let tokens = Arc::new(TokenService::new(&config.jwt_secret));
    let auth_state = AuthState::new(users.clone(), tokens, config.login_redirect_url.clone());
    let app_state = AppState {
        users,
        properties,
        favorites,
    };

    let app = create_router(app_state, auth_state).layer(middleware::from_fn(request_logging));

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("API server listening on {}", addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

/// Initialize tracing from `RUST_LOG`, defaulting to debug for this crate.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "solaria_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
