//! Route handlers

pub mod health;
pub mod otp;
pub mod users;
