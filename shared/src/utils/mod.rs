//! Identifier utilities

pub mod email;
pub mod phone;
