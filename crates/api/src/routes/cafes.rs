//! Cafe directory handlers.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use tracing::instrument;

use cafeconnect_core::{Cafe, NewCafeRequest};

use crate::error::Result;
use crate::state::AppState;

/// List every cafe.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Cafe>>> {
    Ok(Json(state.catalog().list_cafes().await?))
}

/// Cafes with a nearby college containing `college`, ignoring case.
///
/// A blank query yields an empty list without touching the store.
#[instrument(skip(state))]
pub async fn search(
    State(state): State<AppState>,
    Path(college): Path<String>,
) -> Result<Json<Vec<Cafe>>> {
    if college.trim().is_empty() {
        return Ok(Json(Vec::new()));
    }
    let cafes = state.catalog().search_cafes(&college).await?;
    tracing::debug!(matches = cafes.len(), "College search");
    Ok(Json(cafes))
}

/// Create a cafe.
#[instrument(skip(state, payload))]
pub async fn create(
    State(state): State<AppState>,
    payload: std::result::Result<Json<NewCafeRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Cafe>)> {
    let Json(request) = payload?;
    let cafe = state.catalog().insert_cafe(request.validate()?).await?;
    tracing::info!(cafe_id = %cafe.id, name = %cafe.name, "Cafe created");
    Ok((StatusCode::CREATED, Json(cafe)))
}
