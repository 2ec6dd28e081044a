// crates/huddle-core/src/error.rs

use thiserror::Error;

use crate::identity::GroupId;

/// Error types shared by every Huddle crate.
///
/// Structural problems (bad group id, empty or singleton group, oversized
/// group, provider faults) surface here. Numeric degeneracies such as
/// zero-variance rating vectors are absorbed by the algorithms and never
/// become errors.
#[derive(Debug, Error)]
pub enum HuddleError {
    /// Group id missing, blank, or unknown to the provider.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The provider resolved the group but it has no members with preferences.
    #[error("Group {0} has no members")]
    EmptyGroup(GroupId),

    /// Trust, similarity, and the N-1 normalization need at least two members.
    #[error("Group {group_id} has {members} member(s); at least 2 are required")]
    InsufficientGroupSize { group_id: GroupId, members: usize },

    /// Group exceeds the configured size bound.
    #[error("Group {group_id} has {members} members; the limit is {max}")]
    GroupTooLarge {
        group_id: GroupId,
        members: usize,
        max: usize,
    },

    /// Fetching the rating table exceeded the configured wall-clock bound.
    #[error("Timed out: {0}")]
    Timeout(String),

    /// Provider data failed validation (negative rating, ragged row, unknown column).
    #[error("Malformed data: {0}")]
    MalformedData(String),

    /// Backend failure inside a provider (I/O, lock poisoning).
    #[error("Provider error: {0}")]
    Provider(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl HuddleError {
    /// Whether the failure was caused by the caller's request rather than
    /// by the data or the service. Callers map these to a 400-class response
    /// and everything else to a 500-class response.
    pub fn is_client_error(&self) -> bool {
        matches!(self, HuddleError::InvalidInput(_))
    }
}

impl From<serde_json::Error> for HuddleError {
    fn from(e: serde_json::Error) -> Self {
        HuddleError::Serialization(e.to_string())
    }
}

impl From<std::io::Error> for HuddleError {
    fn from(e: std::io::Error) -> Self {
        HuddleError::Provider(e.to_string())
    }
}
