use actix_web::{web, HttpResponse};
use validator::Validate;

use sn_core::domain::value_objects::{Channel, Purpose};
use sn_core::services::otp::OtpEngine;
use sn_shared::ApiResponse;

use crate::app::AppState;
use crate::dto::{SendOtpRequest, SendOtpResponse};
use crate::handlers::ApiError;

/// Handler for POST /api/v1/otp/send
///
/// # Request Body
///
/// ```json
/// { "identifier": "0912345678", "channel": "phone", "purpose": "verify" }
/// ```
///
/// A non-blank `custom_key` stores the challenge under that key, to be
/// read back with `/otp/peek`.
pub async fn send_otp(
    state: web::Data<AppState>,
    request: web::Json<SendOtpRequest>,
) -> Result<HttpResponse, ApiError> {
    request.validate()?;

    let channel: Channel = request.channel.parse()?;
    let purpose = Purpose::parse(&request.purpose)?;

    let issued = match request.custom_key.as_deref() {
        Some(key) if !key.trim().is_empty() => {
            state
                .otp
                .send_with_custom_key(&request.identifier, channel, &purpose, key)
                .await?
        }
        _ => state.otp.issue(&request.identifier, channel, &purpose).await?,
    };

    Ok(HttpResponse::Ok()
        .json(ApiResponse::success(SendOtpResponse::from(&issued)).with_message("OTP sent")))
}
