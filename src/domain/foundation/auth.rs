//! Authentication types for the domain layer.
//!
//! An authenticated user as extracted from a validated access token. The
//! types carry no provider dependencies; any auth provider can populate
//! them through the `SessionValidator` port.

use thiserror::Error;

use super::UserId;

/// Authenticated user extracted from a validated access token.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// The unique user identifier from the auth provider.
    pub id: UserId,

    /// Display name if the provider supplied one.
    pub display_name: Option<String>,
}

impl AuthenticatedUser {
    pub fn new(id: UserId, display_name: Option<String>) -> Self {
        Self { id, display_name }
    }
}

/// Authentication errors surfaced during token validation.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("Missing bearer token")]
    MissingToken,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    #[error("Auth provider unavailable: {0}")]
    ServiceUnavailable(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_error_messages_contain_no_internals() {
        assert_eq!(format!("{}", AuthError::InvalidToken), "Invalid token");
        assert_eq!(format!("{}", AuthError::MissingToken), "Missing bearer token");
    }

    #[test]
    fn authenticated_user_carries_id() {
        let user = AuthenticatedUser::new(UserId::try_new("u1").unwrap(), None);
        assert_eq!(user.id.as_str(), "u1");
    }
}
