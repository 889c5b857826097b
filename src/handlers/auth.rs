use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use super::AppError;
use crate::models::User;
use crate::services::AppState;

#[derive(Deserialize)]
pub struct CredentialsRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Serialize)]
pub struct UserView {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub email: String,
}

#[derive(Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserView,
}

impl AuthResponse {
    fn new(user: User, token: String) -> Self {
        Self {
            token,
            user: UserView {
                id: user.id,
                email: user.email,
            },
        }
    }
}

pub async fn register(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    let Json(body) = payload?;
    let (user, token) = state.auth.register(&body.email, &body.password).await?;
    Ok((StatusCode::CREATED, Json(AuthResponse::new(user, token))))
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<Json<AuthResponse>, AppError> {
    let Json(body) = payload?;
    let (user, token) = state.auth.login(&body.email, &body.password).await?;
    Ok(Json(AuthResponse::new(user, token)))
}
