#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

use deliverydesk::config::Config;
use deliverydesk::create_router;
use deliverydesk::repository::Store;
use deliverydesk::services::AppState;

pub fn test_config() -> Config {
    Config {
        port: 0,
        database_url: None,
        jwt_secret: "integration-secret".to_string(),
        jwt_expiry_hours: 1,
        frontend_url: None,
    }
}

pub fn test_app() -> (Router, Store) {
    let store = Store::in_memory();
    let state = Arc::new(AppState::new(store.clone(), test_config()));
    (create_router(state), store)
}

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };
    (status, value)
}

/// Registers a manager account and returns its bearer token.
pub async fn login_token(app: &Router) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(serde_json::json!({ "email": "manager@example.com", "password": "s3cret" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "registration must succeed: {}", body);
    body["token"].as_str().unwrap().to_string()
}
