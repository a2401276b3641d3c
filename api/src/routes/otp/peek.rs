use actix_web::{web, HttpResponse};
use validator::Validate;

use sn_core::services::otp::OtpEngine;
use sn_shared::ApiResponse;

use crate::app::AppState;
use crate::dto::{KeyQuery, PeekResponse};
use crate::handlers::ApiError;

/// Handler for GET /api/v1/otp/peek?key=...
pub async fn peek_identifier(
    state: web::Data<AppState>,
    query: web::Query<KeyQuery>,
) -> Result<HttpResponse, ApiError> {
    query.validate()?;

    let identifier = state.otp.peek_identifier_by_key(&query.key).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(PeekResponse { identifier })))
}
