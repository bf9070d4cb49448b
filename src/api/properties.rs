//! Property Endpoints
//! Mission: Public listings plus owner-scoped and admin CRUD

use crate::api::{ApiError, AppState};
use crate::auth::models::Identity;
use crate::models::{NewProperty, Property};
use crate::sanitize;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    Extension,
};
use serde_json::{json, Value};

fn not_empty(properties: Vec<Property>, msg: &str) -> Result<Json<Vec<Property>>, ApiError> {
    if properties.is_empty() {
        return Err(ApiError::NotFound(msg.to_string()));
    }
    Ok(Json(properties))
}

/// List all properties - GET /api/properties (public)
pub async fn list_all(State(state): State<AppState>) -> Result<Json<Vec<Property>>, ApiError> {
    not_empty(state.properties.list_all()?, "no results found")
}

/// List by postal code - GET /api/properties/postal-code/:code (public)
pub async fn by_postal_code(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<Vec<Property>>, ApiError> {
    not_empty(
        state.properties.list_by_postal_code(&code)?,
        "no results found",
    )
}

/// List by town - GET /api/properties/town/:town (public)
pub async fn by_town(
    State(state): State<AppState>,
    Path(town): Path<String>,
) -> Result<Json<Vec<Property>>, ApiError> {
    not_empty(state.properties.list_by_town(&town)?, "no results found")
}

/// Own listings - GET /api/properties/mine (registered)
pub async fn mine(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<Vec<Property>>, ApiError> {
    not_empty(
        state.properties.list_by_owner(identity.subject_id)?,
        "no properties found for this user",
    )
}

/// Add a listing - POST /api/properties (registered)
///
/// The owner always comes from the token; free-text fields are cleaned
/// before they hit the database.
pub async fn add(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(payload): Json<NewProperty>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    if payload.price <= 0.0 {
        return Err(ApiError::BadRequest("invalid price".to_string()));
    }

    let property = NewProperty {
        street: sanitize::clean(&payload.street),
        number: sanitize::clean(&payload.number),
        floor: sanitize::clean_opt(payload.floor.as_deref()),
        postal_code: sanitize::clean(&payload.postal_code),
        town: sanitize::clean(&payload.town),
        description: sanitize::clean_opt(payload.description.as_deref()),
        price: payload.price,
        image: sanitize::clean_opt(payload.image.as_deref()),
    };

    let id = state.properties.insert(identity.subject_id, &property)?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "property added successfully", "id": id })),
    ))
}

/// Delete an own listing - DELETE /api/properties/:id (registered)
pub async fn remove(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    if id <= 0 {
        return Err(ApiError::BadRequest("invalid property id".to_string()));
    }

    if !state.properties.is_owned_by(id, identity.subject_id)? {
        return Err(ApiError::NotFound(
            "no property with this id for this user".to_string(),
        ));
    }

    state.properties.delete(id)?;

    Ok(Json(json!({ "message": "property deleted successfully" })))
}

/// Listings of one owner - GET /api/admin/properties/by-owner/:email (admin)
pub async fn by_owner_email(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<Vec<Property>>, ApiError> {
    not_empty(
        state.properties.list_by_owner_email(&email)?,
        "no properties found for this user",
    )
}

/// Delete any listing - DELETE /api/admin/properties/:id (admin)
pub async fn admin_remove(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    if id <= 0 {
        return Err(ApiError::BadRequest("invalid property id".to_string()));
    }

    if !state.properties.delete(id)? {
        return Err(ApiError::NotFound("property not found".to_string()));
    }

    Ok(Json(json!({ "message": "property deleted successfully" })))
}
