//! Account endpoints that go through a passcode

pub mod email;

use actix_web::{web, Scope};

pub fn scope() -> Scope {
    web::scope("/users/{user_id}")
        .route("/email/change", web::post().to(email::request_email_change))
        .route("/email/verify", web::post().to(email::confirm_email_change))
}
