use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use super::{parse_id, removed, AppError};
use crate::models::{Driver, DriverPatch};
use crate::services::AppState;

const NOT_FOUND: &str = "Driver not found";

pub async fn list_drivers(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Driver>>, AppError> {
    Ok(Json(state.store.drivers.find_all().await?))
}

pub async fn create_driver(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<DriverPatch>, JsonRejection>,
) -> Result<(StatusCode, Json<Driver>), AppError> {
    let Json(body) = payload?;

    let (Some(name), Some(hours), Some(history)) =
        (body.name, body.current_shift_hours, body.past_7_day_hours)
    else {
        return Err(AppError::BadRequest("All fields are required".to_string()));
    };
    if name.trim().is_empty() {
        return Err(AppError::BadRequest("All fields are required".to_string()));
    }

    let driver = Driver::new(&name, hours, history);
    state.store.drivers.insert(&driver).await?;

    Ok((StatusCode::CREATED, Json(driver)))
}

pub async fn update_driver(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<DriverPatch>, JsonRejection>,
) -> Result<Json<Driver>, AppError> {
    let id = parse_id(&id, NOT_FOUND)?;
    let Json(patch) = payload?;

    let mut driver = state
        .store
        .drivers
        .find_by_id(id)
        .await?
        .ok_or(AppError::NotFound(NOT_FOUND))?;

    driver.apply(patch);
    if !state.store.drivers.replace(&driver).await? {
        return Err(AppError::NotFound(NOT_FOUND));
    }

    Ok(Json(driver))
}

pub async fn delete_driver(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let id = parse_id(&id, NOT_FOUND)?;

    if !state.store.drivers.delete(id).await? {
        return Err(AppError::NotFound(NOT_FOUND));
    }

    Ok(removed("Driver removed"))
}
