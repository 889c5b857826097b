pub mod auth;
pub mod drivers;
pub mod health;
pub mod orders;
pub mod routes;
pub mod simulation;

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

use crate::repository::StoreError;
use crate::services::auth::AuthError;
use crate::services::simulation::SimulationError;

pub const NOT_AUTHORIZED: &str = "Not authorized";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(&'static str),

    #[error("{0}")]
    NotFound(&'static str),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Request failed");
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "message": "Internal server error" })),
                )
                    .into_response();
            }
        };

        (status, Json(json!({ "message": self.to_string() }))).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::Internal(err.into())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<SimulationError> for AppError {
    fn from(err: SimulationError) -> Self {
        match err {
            SimulationError::InvalidInput(_) | SimulationError::InsufficientData => {
                AppError::BadRequest(err.to_string())
            }
            SimulationError::Store(e) => e.into(),
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingField | AuthError::EmailTaken => AppError::BadRequest(err.to_string()),
            AuthError::InvalidCredentials => AppError::Unauthorized("Invalid email or password"),
            AuthError::Token(_) => AppError::Unauthorized(NOT_AUTHORIZED),
            AuthError::Hashing(msg) => AppError::Internal(anyhow::anyhow!(msg)),
            AuthError::Store(e) => e.into(),
        }
    }
}

/// Path ids that are not UUIDs cannot name a document.
pub(crate) fn parse_id(raw: &str, not_found: &'static str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::NotFound(not_found))
}

pub(crate) fn removed(message: &'static str) -> Json<serde_json::Value> {
    Json(json!({ "message": message }))
}
