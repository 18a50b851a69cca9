//! Mock session validator for tests and local development.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser, UserId};
use crate::ports::SessionValidator;

/// Validator backed by a token-to-user table.
///
/// With `accept_any_token`, every non-empty token authenticates as a user
/// whose id equals the token - convenient for wiring tests.
pub struct MockSessionValidator {
    tokens: Mutex<HashMap<String, AuthenticatedUser>>,
    accept_any_token: bool,
}

impl MockSessionValidator {
    pub fn new() -> Self {
        Self {
            tokens: Mutex::new(HashMap::new()),
            accept_any_token: false,
        }
    }

    /// Treats every non-empty token as a valid user id.
    pub fn accepting_any_token() -> Self {
        Self {
            tokens: Mutex::new(HashMap::new()),
            accept_any_token: true,
        }
    }

    /// Registers a token as valid for the given user.
    pub fn register(&self, token: impl Into<String>, user: AuthenticatedUser) {
        self.tokens.lock().unwrap().insert(token.into(), user);
    }
}

impl Default for MockSessionValidator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionValidator for MockSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        if let Some(user) = self.tokens.lock().unwrap().get(token) {
            return Ok(user.clone());
        }
        if self.accept_any_token && !token.is_empty() {
            let id = UserId::try_new(token).map_err(|_| AuthError::InvalidToken)?;
            return Ok(AuthenticatedUser::new(id, None));
        }
        Err(AuthError::InvalidToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unregistered_token_is_rejected() {
        let validator = MockSessionValidator::new();
        assert!(validator.validate("nope").await.is_err());
    }

    #[tokio::test]
    async fn registered_token_authenticates() {
        let validator = MockSessionValidator::new();
        validator.register(
            "tok",
            AuthenticatedUser::new(UserId::try_new("u1").unwrap(), None),
        );
        let user = validator.validate("tok").await.unwrap();
        assert_eq!(user.id.as_str(), "u1");
    }

    #[tokio::test]
    async fn accept_any_mode_maps_token_to_user_id() {
        let validator = MockSessionValidator::accepting_any_token();
        let user = validator.validate("alice").await.unwrap();
        assert_eq!(user.id.as_str(), "alice");
        assert!(validator.validate("").await.is_err());
    }
}
