use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::{Value, json};

use crate::{
    error::AppError,
    models::{NewWorkout, Workout, WorkoutPatch},
    state::AppState,
    utils::{is_valid_id, parse_payload, validate_fields},
};

pub async fn welcome_handler() -> Json<Value> {
    Json(json!({ "mssg": "welcome to the app" }))
}

/// GET /api/workouts, every workout newest first.
pub async fn list_workouts_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Workout>>, AppError> {
    let workouts = state.store.find_all().await?;

    Ok(Json(workouts))
}

/// GET /api/workouts/{id}
pub async fn get_workout_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Workout>, AppError> {
    if !is_valid_id(&id) {
        return Err(AppError::InvalidId);
    }

    let workout = state
        .store
        .find_by_id(&id)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(workout))
}

/// POST /api/workouts. Validates the payload, then persists. Responds 200
/// on success with the stored workout, id and timestamps included.
pub async fn create_workout_handler(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> Result<Json<Workout>, AppError> {
    let payload: NewWorkout = parse_payload(body)?;
    let fields = validate_fields(payload)?;

    let workout = state
        .store
        .insert(fields)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    Ok(Json(workout))
}

/// DELETE /api/workouts/{id}. Hard delete; responds with the removed
/// workout's last state.
pub async fn delete_workout_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Workout>, AppError> {
    if !is_valid_id(&id) {
        return Err(AppError::InvalidId);
    }

    let workout = state
        .store
        .delete_by_id(&id)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(workout))
}

/// PATCH /api/workouts/{id}. Merges the supplied fields into the stored
/// workout without re-validating them, and responds with the pre-update
/// state. Empty values are accepted here; only creation validates.
pub async fn update_workout_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<Workout>, AppError> {
    if !is_valid_id(&id) {
        return Err(AppError::InvalidId);
    }

    let patch: WorkoutPatch = parse_payload(body)?;

    let workout = state
        .store
        .update_by_id(&id, patch)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(workout))
}
