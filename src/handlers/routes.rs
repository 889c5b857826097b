use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use super::{parse_id, removed, AppError};
use crate::models::{Route, RoutePatch};
use crate::services::AppState;

const NOT_FOUND: &str = "Route not found";

pub async fn list_routes(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Route>>, AppError> {
    Ok(Json(state.store.routes.find_all().await?))
}

pub async fn create_route(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RoutePatch>, JsonRejection>,
) -> Result<(StatusCode, Json<Route>), AppError> {
    let Json(body) = payload?;

    let route = match (body.route_id, body.distance, body.traffic_level, body.base_time) {
        (Some(route_id), Some(distance), Some(level), Some(base_time))
            if !route_id.trim().is_empty() =>
        {
            Route::new(&route_id, distance, level, base_time)
        }
        _ => return Err(AppError::BadRequest("All fields are required".to_string())),
    };

    state.store.routes.insert(&route).await?;
    Ok((StatusCode::CREATED, Json(route)))
}

pub async fn update_route(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<RoutePatch>, JsonRejection>,
) -> Result<Json<Route>, AppError> {
    let id = parse_id(&id, NOT_FOUND)?;
    let Json(patch) = payload?;

    let mut route = state
        .store
        .routes
        .find_by_id(id)
        .await?
        .ok_or(AppError::NotFound(NOT_FOUND))?;

    route.apply(patch);
    if !state.store.routes.replace(&route).await? {
        return Err(AppError::NotFound(NOT_FOUND));
    }

    Ok(Json(route))
}

pub async fn delete_route(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let id = parse_id(&id, NOT_FOUND)?;

    if !state.store.routes.delete(id).await? {
        return Err(AppError::NotFound(NOT_FOUND));
    }

    Ok(removed("Route removed"))
}
