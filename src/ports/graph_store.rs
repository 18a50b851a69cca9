//! Graph state store port (users, attachments, information events).
//!
//! The backing engine is external; this contract is deliberately narrow.
//! Every operation is a single atomic transaction: multi-entity mutations
//! either fully succeed or leave prior state intact.

use async_trait::async_trait;

use crate::domain::attachment::{Attachment, UserNode};
use crate::domain::foundation::{DomainError, UserId};
use crate::domain::information::InformationEvent;

/// Persistence port for the user graph.
#[async_trait]
pub trait GraphStateStore: Send + Sync {
    /// Finds a user node, `None` if absent.
    async fn find_user(&self, user_id: &UserId) -> Result<Option<UserNode>, DomainError>;

    /// Creates the user node at signup. Idempotent on the id.
    async fn create_user(&self, user_id: &UserId) -> Result<(), DomainError>;

    /// Sets the bootstrap progress flag on the user node.
    ///
    /// # Errors
    ///
    /// - `UserNotFound` if the node is absent
    async fn set_bootstrapped(&self, user_id: &UserId, complete: bool)
        -> Result<(), DomainError>;

    /// Inserts or replaces an attachment held by the user, matched by name.
    async fn upsert_attachment(
        &self,
        user_id: &UserId,
        attachment: &Attachment,
    ) -> Result<(), DomainError>;

    /// Lists every attachment the user holds.
    async fn list_attachments(&self, user_id: &UserId) -> Result<Vec<Attachment>, DomainError>;

    /// Removes every HOLDS edge and attachment node for the user in one
    /// transaction. Partial deletion is a defect; the store must fully
    /// succeed or leave prior state intact.
    async fn delete_all_attachments(&self, user_id: &UserId) -> Result<(), DomainError>;

    /// Bootstrap reset: sets `bootstrapping_complete = false` and removes
    /// every attachment for the user in one transaction. Safe to call
    /// repeatedly; a failure leaves prior state intact.
    async fn reset_user_graph(&self, user_id: &UserId) -> Result<(), DomainError>;

    /// Appends an immutable information event.
    async fn append_information_event(
        &self,
        user_id: &UserId,
        event: &InformationEvent,
    ) -> Result<(), DomainError>;

    /// Lists events by recency with offset/limit pagination.
    ///
    /// Ordering is recency then event identity, so advancing offsets never
    /// skip or duplicate entries under concurrent appends.
    async fn list_recent_information_events(
        &self,
        user_id: &UserId,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<InformationEvent>, DomainError>;
}
