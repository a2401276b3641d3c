use actix_web::{web, HttpResponse};
use serde_json::json;

use sn_core::repositories::UserDirectory;
use sn_core::services::otp::CredentialStore;

use crate::app::AppState;

/// GET /health
///
/// 200 while both the credential store and the user directory answer,
/// 503 otherwise.
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let cache = match state.store.ping().await {
        Ok(()) => "up",
        Err(e) => {
            tracing::warn!(event = "health_degraded", "Credential store unreachable: {}", e);
            "down"
        }
    };
    let database = match state.users.ping().await {
        Ok(()) => "up",
        Err(e) => {
            tracing::warn!(event = "health_degraded", "User directory unreachable: {}", e);
            "down"
        }
    };
    let healthy = cache == "up" && database == "up";

    let body = json!({
        "status": if healthy { "healthy" } else { "degraded" },
        "service": "social-network-api",
        "version": env!("CARGO_PKG_VERSION"),
        "checks": { "cache": cache, "database": database },
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    if healthy {
        HttpResponse::Ok().json(body)
    } else {
        HttpResponse::ServiceUnavailable().json(body)
    }
}
