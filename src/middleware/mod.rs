pub mod auth;

use axum::http::{header, HeaderValue, Method};
use tower_http::cors::CorsLayer;

use crate::config::Config;

/// Browser access policy. Credentials are only allowed for a named origin.
pub fn cors_layer(config: &Config) -> CorsLayer {
    let Some(url) = config.frontend_url.as_deref() else {
        return CorsLayer::permissive();
    };

    match HeaderValue::from_str(url) {
        Ok(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_credentials(true)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]),
        Err(_) => {
            tracing::warn!(frontend_url = %url, "FRONTEND_URL is not a valid origin, allowing any");
            CorsLayer::permissive()
        }
    }
}
