//! Types for passcode service results

use uuid::Uuid;

use crate::domain::entities::challenge::Challenge;
use crate::domain::value_objects::{ChallengeKey, Purpose};

/// Result of issuing a code
#[derive(Debug, Clone)]
pub struct IssuedChallenge {
    /// The challenge that is now live in the store
    pub challenge: Challenge,
    /// Message id reported by the transport
    pub message_id: String,
}

/// Result of a successful verification
#[derive(Debug, Clone)]
pub struct VerifiedChallenge {
    /// Key of the consumed challenge
    pub key: ChallengeKey,
    /// Normalized identifier the code was bound to
    pub identifier: String,
    pub purpose: Purpose,
    /// Account whose verification flag was set, for `verify` purposes
    pub verified_user: Option<Uuid>,
}
