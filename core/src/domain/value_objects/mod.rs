//! Value objects representing immutable domain concepts.

pub mod challenge_key;
pub mod channel;
pub mod purpose;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use challenge_key::ChallengeKey;
pub use channel::Channel;
pub use purpose::Purpose;
