use actix_web::{web, HttpResponse};
use validator::Validate;

use sn_core::domain::value_objects::{Channel, Purpose};
use sn_core::services::otp::OtpEngine;
use sn_shared::ApiResponse;

use crate::app::AppState;
use crate::dto::{VerifyOtpRequest, VerifyOtpResponse};
use crate::handlers::ApiError;

/// Handler for POST /api/v1/otp/verify
///
/// Consumes the challenge on success; wrong, expired and already-used
/// codes all answer `INVALID_OR_EXPIRED_CODE`.
pub async fn verify_otp(
    state: web::Data<AppState>,
    request: web::Json<VerifyOtpRequest>,
) -> Result<HttpResponse, ApiError> {
    request.validate()?;

    let channel: Channel = request.channel.parse()?;
    let purpose = Purpose::parse(&request.purpose)?;

    let verified = state
        .otp
        .verify(&request.identifier, channel, &purpose, request.otp.trim())
        .await?;

    Ok(HttpResponse::Ok().json(
        ApiResponse::success(VerifyOtpResponse::from(verified)).with_message("OTP verified"),
    ))
}
