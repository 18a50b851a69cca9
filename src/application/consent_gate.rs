//! Consent gate - evaluated before any state-changing or data-access
//! operation on a user's data.

use std::sync::Arc;

use crate::domain::consent::Permission;
use crate::domain::foundation::UserId;
use crate::ports::ConsentReader;

/// Read-only permission check over the consent store.
///
/// Absence means "not granted": a missing profile denies everything except
/// `consentDataProcessing`, which is written as an explicit default at
/// profile creation. The gate never errors; a store read failure denies
/// the permission (fail closed) and logs a warning.
#[derive(Clone)]
pub struct ConsentGate {
    reader: Arc<dyn ConsentReader>,
}

impl ConsentGate {
    pub fn new(reader: Arc<dyn ConsentReader>) -> Self {
        Self { reader }
    }

    /// Returns whether the user granted the named permission.
    pub async fn has_permission(&self, user_id: &UserId, permission: &str) -> bool {
        let parsed = Permission::parse(permission);
        match self.reader.find_profile(user_id).await {
            Ok(Some(profile)) => profile.is_granted(&parsed),
            Ok(None) => false,
            Err(err) => {
                tracing::warn!(
                    user_id = %user_id,
                    permission = permission,
                    error = %err,
                    "consent read failed; denying permission"
                );
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::consent::{ConsentProfile, ALLOW_SOMATIC_PROMPTS, CONSENT_DATA_PROCESSING};
    use crate::domain::foundation::{DomainError, ErrorCode};
    use async_trait::async_trait;

    struct FixedReader {
        profile: Option<ConsentProfile>,
        fail: bool,
    }

    #[async_trait]
    impl ConsentReader for FixedReader {
        async fn find_profile(
            &self,
            _user_id: &UserId,
        ) -> Result<Option<ConsentProfile>, DomainError> {
            if self.fail {
                return Err(DomainError::new(ErrorCode::GraphStoreError, "down"));
            }
            Ok(self.profile.clone())
        }
    }

    fn uid() -> UserId {
        UserId::try_new("u1").unwrap()
    }

    #[tokio::test]
    async fn fresh_profile_grants_data_processing_only() {
        let gate = ConsentGate::new(Arc::new(FixedReader {
            profile: Some(ConsentProfile::onboarding_default()),
            fail: false,
        }));
        assert!(gate.has_permission(&uid(), CONSENT_DATA_PROCESSING).await);
        assert!(!gate.has_permission(&uid(), ALLOW_SOMATIC_PROMPTS).await);
    }

    #[tokio::test]
    async fn missing_profile_denies_everything() {
        let gate = ConsentGate::new(Arc::new(FixedReader {
            profile: None,
            fail: false,
        }));
        assert!(!gate.has_permission(&uid(), CONSENT_DATA_PROCESSING).await);
        assert!(!gate.has_permission(&uid(), "CAN_USE_FEATURE_insights").await);
    }

    #[tokio::test]
    async fn store_failure_denies_rather_than_erroring() {
        let gate = ConsentGate::new(Arc::new(FixedReader {
            profile: None,
            fail: true,
        }));
        assert!(!gate.has_permission(&uid(), CONSENT_DATA_PROCESSING).await);
    }

    #[tokio::test]
    async fn map_backed_permissions_resolve() {
        let mut profile = ConsentProfile::onboarding_default();
        profile
            .data_source_consents
            .insert("calendar".to_string(), true);
        let gate = ConsentGate::new(Arc::new(FixedReader {
            profile: Some(profile),
            fail: false,
        }));
        assert!(gate.has_permission(&uid(), "CAN_ACCESS_SOURCE_calendar").await);
        assert!(!gate.has_permission(&uid(), "CAN_ACCESS_SOURCE_email").await);
    }
}
