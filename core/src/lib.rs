//! # Social Network Core
//!
//! Core business logic for the social network backend: domain entities,
//! the one-time passcode engine and the account flows built on it,
//! the ports infrastructure implements, and error types.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::UserDirectory;
pub use services::*;

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    #[test]
    fn test_root_reexports_resolve() {
        let user = crate::user::User::new(Some("user@example.com".to_string()), None);
        assert_eq!(user.email.as_deref(), Some("user@example.com"));
        fn takes_directory(_: Option<Arc<dyn crate::UserDirectory>>) {}
        takes_directory(None);
    }
}
