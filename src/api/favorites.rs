//! Favorites Endpoints
//! Mission: Let registered users keep a list of favorite properties

use crate::api::{ApiError, AppState};
use crate::auth::models::Identity;
use crate::models::Property;
use crate::store::Toggle;
use axum::{extract::State, response::Json, Extension};
use serde::Deserialize;
use serde_json::{json, Value};

/// List favorites - GET /api/favorites (registered)
pub async fn list(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<Vec<Property>>, ApiError> {
    let properties = state.favorites.list_for_user(identity.subject_id)?;
    if properties.is_empty() {
        return Err(ApiError::NotFound("no results found".to_string()));
    }

    Ok(Json(properties))
}

#[derive(Debug, Deserialize)]
pub struct ToggleRequest {
    pub property_id: i64,
}

/// Toggle a favorite - POST /api/favorites/toggle (registered)
///
/// Adds the property when it is not a favorite yet, removes it otherwise.
pub async fn toggle(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(payload): Json<ToggleRequest>,
) -> Result<Json<Value>, ApiError> {
    if payload.property_id <= 0 {
        return Err(ApiError::BadRequest("invalid property id".to_string()));
    }

    let message = match state
        .favorites
        .toggle(identity.subject_id, payload.property_id)?
    {
        Toggle::Added => "property added to favorites",
        Toggle::Removed => "property removed from favorites",
    };

    Ok(Json(json!({ "message": message })))
}
