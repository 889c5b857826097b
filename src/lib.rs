pub mod config;
pub mod handlers;
pub mod logger;
pub mod middleware;
pub mod models;
pub mod repository;
pub mod services;

use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::services::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    let protected = Router::new()
        // Drivers
        .route(
            "/api/drivers",
            get(handlers::drivers::list_drivers).post(handlers::drivers::create_driver),
        )
        .route(
            "/api/drivers/:id",
            put(handlers::drivers::update_driver).delete(handlers::drivers::delete_driver),
        )
        // Routes
        .route(
            "/api/routes",
            get(handlers::routes::list_routes).post(handlers::routes::create_route),
        )
        .route(
            "/api/routes/:id",
            put(handlers::routes::update_route).delete(handlers::routes::delete_route),
        )
        // Orders
        .route(
            "/api/orders",
            get(handlers::orders::list_orders).post(handlers::orders::create_order),
        )
        .route(
            "/api/orders/:id",
            put(handlers::orders::update_order).delete(handlers::orders::delete_order),
        )
        // Simulation
        .route("/api/simulation", post(handlers::simulation::run_simulation))
        .route(
            "/api/simulation/history",
            get(handlers::simulation::simulation_history),
        )
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_auth,
        ));

    Router::new()
        .route("/", get(handlers::health::banner))
        .route("/health", get(handlers::health::health_check))
        // Auth
        .route("/api/auth/register", post(handlers::auth::register))
        .route("/api/auth/login", post(handlers::auth::login))
        .merge(protected)
        .layer(middleware::cors_layer(&state.config))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
