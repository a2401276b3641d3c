//! HTTP API for the social network backend's passcode flows
//!
//! Exposes the passcode engine and the account flows built on it
//! (password reset, email change) over actix-web.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod telemetry;

pub use app::{configure_routes, create_app, AppState};
