//! MySQL repository implementations

pub mod user_directory;

pub use user_directory::MySqlUserDirectory;
