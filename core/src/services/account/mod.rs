//! Account flows built on the passcode engine's raw operations:
//! changing the account email and requesting a password reset code.

mod email_change;
mod password_reset;

#[cfg(test)]
mod tests;

pub use email_change::{EmailChangeService, EMAIL_CHANGE_SUBJECT};
pub use password_reset::PasswordResetService;
