//! In-memory consent store.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::consent::ConsentProfile;
use crate::domain::foundation::{DomainError, UserId};
use crate::ports::ConsentReader;

/// In-memory `ConsentReader` implementation with a write-side for tests.
pub struct InMemoryConsentStore {
    profiles: Mutex<HashMap<UserId, ConsentProfile>>,
}

impl InMemoryConsentStore {
    pub fn new() -> Self {
        Self {
            profiles: Mutex::new(HashMap::new()),
        }
    }

    /// Stores a profile for the user, replacing any existing one.
    pub fn put(&self, user_id: UserId, profile: ConsentProfile) {
        self.profiles.lock().unwrap().insert(user_id, profile);
    }
}

impl Default for InMemoryConsentStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConsentReader for InMemoryConsentStore {
    async fn find_profile(
        &self,
        user_id: &UserId,
    ) -> Result<Option<ConsentProfile>, DomainError> {
        Ok(self.profiles.lock().unwrap().get(user_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_profile_reads_as_none() {
        let store = InMemoryConsentStore::new();
        let found = store
            .find_profile(&UserId::try_new("ghost").unwrap())
            .await
            .unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn put_then_find_round_trips() {
        let store = InMemoryConsentStore::new();
        let uid = UserId::try_new("u1").unwrap();
        store.put(uid.clone(), ConsentProfile::onboarding_default());
        let found = store.find_profile(&uid).await.unwrap().unwrap();
        assert!(found.consent_data_processing);
    }
}
