//! Passcode endpoints
//!
//! - `POST /otp/send` and `POST /otp/verify`
//! - `GET /otp/peek` for custom-key challenges
//! - `POST /otp/forgot-password`
//! - `GET /otp/debug` (development only)

pub mod debug;
pub mod forgot_password;
pub mod peek;
pub mod send;
pub mod verify;

use actix_web::{web, Scope};

use sn_shared::config::Environment;

pub fn scope(environment: Environment) -> Scope {
    let scope = web::scope("/otp")
        .route("/send", web::post().to(send::send_otp))
        .route("/verify", web::post().to(verify::verify_otp))
        .route("/peek", web::get().to(peek::peek_identifier))
        .route("/forgot-password", web::post().to(forgot_password::forgot_password));

    if environment.is_development() {
        scope.route("/debug", web::get().to(debug::debug_value))
    } else {
        scope
    }
}
