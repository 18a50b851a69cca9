//! Session validation port for bearer token validation.
//!
//! Provider-agnostic: the HTTP middleware validates tokens through this
//! port, so swapping the auth provider never touches the handlers.

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser};

/// Validates access tokens and extracts user identity.
#[async_trait]
pub trait SessionValidator: Send + Sync {
    /// Validates a bearer token (without the "Bearer " prefix).
    ///
    /// # Errors
    ///
    /// - `AuthError::InvalidToken` for malformed or bad-signature tokens
    /// - `AuthError::TokenExpired` for expired tokens
    /// - `AuthError::ServiceUnavailable` for transient provider errors
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}
