use actix_web::{web, HttpResponse};
use validator::Validate;

use sn_shared::ApiResponse;

use crate::app::AppState;
use crate::dto::{ForgotPasswordRequest, SendOtpResponse};
use crate::handlers::ApiError;

/// Handler for POST /api/v1/otp/forgot-password
///
/// The address must belong to an account; the code is redeemed through
/// `/otp/verify` with purpose `forgot_password`.
pub async fn forgot_password(
    state: web::Data<AppState>,
    request: web::Json<ForgotPasswordRequest>,
) -> Result<HttpResponse, ApiError> {
    request.validate()?;

    let issued = state
        .password_reset
        .send_forgot_password_otp(&request.email)
        .await?;

    Ok(HttpResponse::Ok()
        .json(ApiResponse::success(SendOtpResponse::from(&issued)).with_message("OTP sent")))
}
