use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use super::{parse_id, removed, AppError};
use crate::models::{Order, OrderPatch};
use crate::services::AppState;

const NOT_FOUND: &str = "Order not found";

pub async fn list_orders(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Order>>, AppError> {
    Ok(Json(state.store.orders.find_all().await?))
}

pub async fn create_order(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<OrderPatch>, JsonRejection>,
) -> Result<(StatusCode, Json<Order>), AppError> {
    let Json(body) = payload?;

    let order = match (
        body.order_id,
        body.value_rs,
        body.assigned_route,
        body.delivery_timestamp,
    ) {
        (Some(order_id), Some(value), Some(route), Some(ts))
            if !order_id.trim().is_empty() && !route.trim().is_empty() =>
        {
            Order::new(&order_id, value, &route, ts)
        }
        _ => return Err(AppError::BadRequest("All fields are required".to_string())),
    };

    state.store.orders.insert(&order).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

pub async fn update_order(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<OrderPatch>, JsonRejection>,
) -> Result<Json<Order>, AppError> {
    let id = parse_id(&id, NOT_FOUND)?;
    let Json(patch) = payload?;

    let mut order = state
        .store
        .orders
        .find_by_id(id)
        .await?
        .ok_or(AppError::NotFound(NOT_FOUND))?;

    order.apply(patch);
    if !state.store.orders.replace(&order).await? {
        return Err(AppError::NotFound(NOT_FOUND));
    }

    Ok(Json(order))
}

pub async fn delete_order(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let id = parse_id(&id, NOT_FOUND)?;

    if !state.store.orders.delete(id).await? {
        return Err(AppError::NotFound(NOT_FOUND));
    }

    Ok(removed("Order removed"))
}
