//! Mapping of domain failures to HTTP responses
//!
//! Every failure leaves as an `ErrorResponse`. Rejected codes share one
//! message regardless of why they were rejected.

use std::fmt;

use actix_web::{
    error::{JsonPayloadError, QueryPayloadError},
    http::StatusCode,
    HttpRequest, HttpResponse, ResponseError,
};
use validator::ValidationErrors;

use sn_core::errors::{AccountError, DomainError, OtpError};
use sn_shared::{error_codes, ErrorResponse};

/// Error returned by every handler
#[derive(Debug)]
pub enum ApiError {
    Domain(DomainError),
    Validation(ValidationErrors),
}

impl From<DomainError> for ApiError {
    fn from(error: DomainError) -> Self {
        ApiError::Domain(error)
    }
}

impl From<OtpError> for ApiError {
    fn from(error: OtpError) -> Self {
        ApiError::Domain(DomainError::Otp(error))
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError::Validation(errors)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Domain(error) => write!(f, "{}", error),
            ApiError::Validation(errors) => write!(f, "{}", errors),
        }
    }
}

fn map_otp_error(error: &OtpError) -> (StatusCode, ErrorResponse) {
    let status = match error {
        e if e.is_validation() => StatusCode::BAD_REQUEST,
        e if e.is_rejected_code() => StatusCode::BAD_REQUEST,
        OtpError::DispatchFailed { .. } | OtpError::StoreUnavailable(_) => {
            StatusCode::SERVICE_UNAVAILABLE
        }
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, ErrorResponse::new(error.code(), error.public_message()))
}

fn map_account_error(error: &AccountError) -> (StatusCode, ErrorResponse) {
    let status = match error {
        AccountError::UserNotFound => StatusCode::NOT_FOUND,
        AccountError::EmailMismatch => StatusCode::BAD_REQUEST,
        AccountError::EmailAlreadyInUse => StatusCode::CONFLICT,
    };
    (status, ErrorResponse::new(error.code(), error.to_string()))
}

/// Status and body for a domain error
pub fn map_domain_error(error: &DomainError) -> (StatusCode, ErrorResponse) {
    match error {
        DomainError::Otp(e) => map_otp_error(e),
        DomainError::Account(e) => map_account_error(e),
        DomainError::Validation { message } => (
            StatusCode::BAD_REQUEST,
            ErrorResponse::new(error_codes::VALIDATION_ERROR, message.clone()),
        ),
        DomainError::NotFound { resource } => (
            StatusCode::NOT_FOUND,
            ErrorResponse::new(error_codes::NOT_FOUND, format!("{} not found", resource)),
        ),
        DomainError::Conflict { message } => (
            StatusCode::CONFLICT,
            ErrorResponse::new(error_codes::CONFLICT, message.clone()),
        ),
        DomainError::Internal { .. } | DomainError::Database(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorResponse::new(error_codes::INTERNAL_ERROR, "An internal error occurred"),
        ),
    }
}

fn validation_response(errors: &ValidationErrors) -> ErrorResponse {
    errors.field_errors().into_iter().fold(
        ErrorResponse::new(error_codes::VALIDATION_ERROR, "Invalid request data"),
        |response, (field, errs)| {
            let messages: Vec<String> = errs
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                })
                .collect();
            response.add_detail(field, messages)
        },
    )
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Domain(error) => map_domain_error(error).0,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let (status, body) = match self {
            ApiError::Domain(error) => map_domain_error(error),
            ApiError::Validation(errors) => (StatusCode::BAD_REQUEST, validation_response(errors)),
        };

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self, "Request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %self, "Request rejected");
        }

        HttpResponse::build(status).json(body)
    }
}

/// Malformed JSON bodies become a `BAD_REQUEST` error response
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let response = HttpResponse::BadRequest().json(ErrorResponse::new(
        error_codes::BAD_REQUEST,
        format!("Invalid JSON body: {}", err),
    ));
    actix_web::error::InternalError::from_response(err, response).into()
}

/// Missing or malformed query strings become a `BAD_REQUEST` error response
pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let response = HttpResponse::BadRequest().json(ErrorResponse::new(
        error_codes::BAD_REQUEST,
        format!("Invalid query string: {}", err),
    ));
    actix_web::error::InternalError::from_response(err, response).into()
}
