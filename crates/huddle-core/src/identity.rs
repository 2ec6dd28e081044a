// crates/huddle-core/src/identity.rs

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::HuddleError;

/// Opaque identifier of a group member (a chat-room participant).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(String);

impl MemberId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MemberId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Identifier of a group (a chat room) whose members' ratings are combined.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupId(String);

impl GroupId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Parse a caller-supplied group id.
    ///
    /// Surrounding whitespace is trimmed. A blank id is rejected with
    /// `InvalidInput` before any provider is consulted.
    pub fn parse(raw: &str) -> Result<Self, HuddleError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(HuddleError::InvalidInput(
                "group id must not be empty".to_string(),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_trims_whitespace() {
        let id = GroupId::parse("  room-42 ").unwrap();
        assert_eq!(id.as_str(), "room-42");
    }

    #[test]
    fn parse_rejects_blank_ids() {
        assert!(matches!(GroupId::parse(""), Err(HuddleError::InvalidInput(_))));
        assert!(matches!(GroupId::parse("   "), Err(HuddleError::InvalidInput(_))));
    }

    #[test]
    fn member_id_serializes_as_plain_string() {
        let json = serde_json::to_string(&MemberId::new("u-1")).unwrap();
        assert_eq!(json, "\"u-1\"");
    }
}
