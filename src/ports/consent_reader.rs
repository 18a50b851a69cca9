//! Consent profile lookup port.

use async_trait::async_trait;

use crate::domain::consent::ConsentProfile;
use crate::domain::foundation::{DomainError, UserId};

/// Read side of the consent store, consumed by the consent gate on every
/// gated operation.
#[async_trait]
pub trait ConsentReader: Send + Sync {
    /// Finds the user's consent profile, `None` if never created.
    async fn find_profile(&self, user_id: &UserId)
        -> Result<Option<ConsentProfile>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consent_reader_is_object_safe() {
        fn _accepts_dyn(_reader: &dyn ConsentReader) {}
    }
}
