use actix_web::{web, HttpResponse};
use uuid::Uuid;
use validator::Validate;

use sn_shared::ApiResponse;

use crate::app::AppState;
use crate::dto::{ChangeEmailRequest, ConfirmEmailChangeRequest, EmailChangedResponse, SendOtpResponse};
use crate::handlers::ApiError;

/// Handler for POST /api/v1/users/{user_id}/email/change
///
/// Sends a code to `new_email`; the address is swapped only once the code
/// comes back through `/email/verify`.
pub async fn request_email_change(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    request: web::Json<ChangeEmailRequest>,
) -> Result<HttpResponse, ApiError> {
    request.validate()?;
    let user_id = path.into_inner();

    let issued = state
        .email_change
        .request_email_change(user_id, &request.old_email, &request.new_email)
        .await?;

    Ok(HttpResponse::Ok().json(
        ApiResponse::success(SendOtpResponse::from(&issued))
            .with_message("Verification code sent to the new address"),
    ))
}

/// Handler for POST /api/v1/users/{user_id}/email/verify
pub async fn confirm_email_change(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    request: web::Json<ConfirmEmailChangeRequest>,
) -> Result<HttpResponse, ApiError> {
    request.validate()?;
    let user_id = path.into_inner();

    let email = state
        .email_change
        .confirm_email_change(user_id, request.otp.trim())
        .await?;

    Ok(HttpResponse::Ok().json(
        ApiResponse::success(EmailChangedResponse { email }).with_message("Email updated"),
    ))
}
