//! API handlers

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::api::{ApiError, AppState};
use crate::types::{Cab, CabDraft};

/// Health check with store status
pub async fn health(State(state): State<AppState>) -> Result<Json<HealthResponse>, ApiError> {
    let cabs = state.store.count().await?;

    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        cabs,
    }))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub cabs: usize,
}

/// List every cab
pub async fn list_cabs(State(state): State<AppState>) -> Result<Json<Vec<Cab>>, ApiError> {
    let cabs = state.store.find_all().await?;
    Ok(Json(cabs))
}

/// Fetch a single cab
pub async fn get_cab(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Cab>, ApiError> {
    state
        .store
        .find_by_id(&id)
        .await?
        .map(Json)
        .ok_or_else(ApiError::not_found)
}

/// Create a cab
///
/// Field validation is left to the store; the handler only reports what it
/// received before writing.
pub async fn create_cab(
    State(state): State<AppState>,
    payload: Result<Json<CabDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<Cab>), ApiError> {
    let Json(draft) = payload?;

    state
        .diagnostics
        .registration_submitted(draft.registration_number.as_deref());
    state.diagnostics.model_submitted(draft.model.as_deref());

    let cab = state.store.create(draft).await?;
    Ok((StatusCode::CREATED, Json(cab)))
}

/// Update a cab
pub async fn update_cab(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<CabDraft>, JsonRejection>,
) -> Result<Json<Cab>, ApiError> {
    let Json(draft) = payload?;

    state
        .store
        .update_by_id(&id, draft)
        .await?
        .map(Json)
        .ok_or_else(ApiError::not_found)
}

/// Delete a cab
pub async fn delete_cab(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    match state.store.delete_by_id(&id).await? {
        Some(_) => Ok(Json(DeleteResponse {
            message: "Cab deleted successfully".to_string(),
        })),
        None => Err(ApiError::not_found()),
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub message: String,
}
