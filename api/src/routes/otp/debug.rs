use actix_web::{web, HttpResponse};
use validator::Validate;

use sn_core::services::otp::OtpEngine;
use sn_shared::ApiResponse;

use crate::app::AppState;
use crate::dto::{DebugValueResponse, KeyQuery};
use crate::handlers::ApiError;

/// Handler for GET /api/v1/otp/debug?key=...
///
/// Returns the raw stored value. Only routed in development.
pub async fn debug_value(
    state: web::Data<AppState>,
    query: web::Query<KeyQuery>,
) -> Result<HttpResponse, ApiError> {
    query.validate()?;

    let value = state.otp.get_raw(&query.key).await?;
    tracing::warn!(event = "otp_debug_peek", key = %query.key, "Raw challenge read");

    Ok(HttpResponse::Ok().json(ApiResponse::success(DebugValueResponse {
        key: query.into_inner().key,
        value,
    })))
}
