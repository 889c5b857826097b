use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use std::sync::Arc;

use super::AppError;
use crate::models::SimulationRecord;
use crate::services::simulation::{SimulationRequest, SimulationResponse};
use crate::services::AppState;

pub async fn run_simulation(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SimulationRequest>, JsonRejection>,
) -> Result<Json<SimulationResponse>, AppError> {
    let Json(request) = payload?;
    Ok(Json(state.simulation.run(&request).await?))
}

pub async fn simulation_history(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<SimulationRecord>>, AppError> {
    Ok(Json(state.simulation.history().await?))
}
