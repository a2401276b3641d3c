//! Request and response bodies

pub mod account;
pub mod otp;

pub use account::*;
pub use otp::*;
