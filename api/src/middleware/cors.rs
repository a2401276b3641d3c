//! CORS middleware configuration for cross-origin requests.
//!
//! `*` in the allowed origins (the development default) allows any origin;
//! otherwise only the listed origins are accepted.

use actix_cors::Cors;
use actix_web::http::{header, Method};

use sn_shared::config::CorsConfig;

pub fn create_cors(config: &CorsConfig) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::HeaderName::from_static("x-request-id"),
        ])
        .expose_headers(vec![header::HeaderName::from_static("x-request-id")])
        .max_age(config.max_age);

    if config.allows_any_origin() {
        tracing::info!("Configuring permissive CORS");
        return cors.allow_any_origin();
    }

    tracing::info!(origins = ?config.allowed_origins, "Configuring restricted CORS");
    config
        .allowed_origins
        .iter()
        .fold(cors, |cors, origin| cors.allowed_origin(origin))
}
