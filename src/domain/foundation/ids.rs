//! Strongly-typed identifier value objects.
//!
//! User and session identifiers arrive from external systems (the auth
//! provider and the conversational front end), so they are validated
//! strings rather than locally minted UUIDs.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

const MAX_ID_LEN: usize = 128;

/// Unique identifier for a user account.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Creates a UserId, rejecting empty or oversized values.
    pub fn try_new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::empty_field("userID"));
        }
        if value.len() > MAX_ID_LEN {
            return Err(ValidationError::invalid_format(
                "userID",
                format!("exceeds {} characters", MAX_ID_LEN),
            ));
        }
        Ok(Self(value))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_new(s)
    }
}

/// Unique identifier for a conversational session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Creates a SessionId, rejecting empty or oversized values.
    pub fn try_new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::empty_field("sessionId"));
        }
        if value.len() > MAX_ID_LEN {
            return Err(ValidationError::invalid_format(
                "sessionId",
                format!("exceeds {} characters", MAX_ID_LEN),
            ));
        }
        Ok(Self(value))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SessionId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_id_accepts_plain_strings() {
        let id = UserId::try_new("user-42").unwrap();
        assert_eq!(id.as_str(), "user-42");
        assert_eq!(format!("{}", id), "user-42");
    }

    #[test]
    fn user_id_rejects_empty() {
        assert!(UserId::try_new("").is_err());
        assert!(UserId::try_new("   ").is_err());
    }

    #[test]
    fn session_id_accepts_short_external_ids() {
        let id = SessionId::try_new("s1").unwrap();
        assert_eq!(id.as_str(), "s1");
    }

    #[test]
    fn session_id_rejects_oversized() {
        let long = "x".repeat(129);
        assert!(SessionId::try_new(long).is_err());
    }

    #[test]
    fn ids_parse_from_str() {
        let id: SessionId = "abc".parse().unwrap();
        assert_eq!(id.as_str(), "abc");
        assert!("".parse::<UserId>().is_err());
    }

    #[test]
    fn ids_serialize_transparently() {
        let id = UserId::try_new("u1").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"u1\"");
    }
}
