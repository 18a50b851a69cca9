//! In-memory graph store.
//!
//! Mutations take the single lock for their whole body, which gives each
//! operation the same all-or-nothing behavior the contract demands.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::attachment::{Attachment, UserNode};
use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::information::InformationEvent;
use crate::ports::GraphStateStore;

#[derive(Default)]
struct UserRecord {
    bootstrapping_complete: bool,
    attachments: Vec<Attachment>,
    events: Vec<InformationEvent>,
}

/// In-memory `GraphStateStore` implementation.
pub struct InMemoryGraphStore {
    users: Mutex<HashMap<UserId, UserRecord>>,
}

impl InMemoryGraphStore {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(HashMap::new()),
        }
    }

    fn not_found(user_id: &UserId) -> DomainError {
        DomainError::new(
            ErrorCode::UserNotFound,
            format!("User '{}' not found", user_id),
        )
    }
}

impl Default for InMemoryGraphStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GraphStateStore for InMemoryGraphStore {
    async fn find_user(&self, user_id: &UserId) -> Result<Option<UserNode>, DomainError> {
        Ok(self.users.lock().unwrap().get(user_id).map(|record| UserNode {
            user_id: user_id.clone(),
            bootstrapping_complete: record.bootstrapping_complete,
        }))
    }

    async fn create_user(&self, user_id: &UserId) -> Result<(), DomainError> {
        self.users
            .lock()
            .unwrap()
            .entry(user_id.clone())
            .or_default();
        Ok(())
    }

    async fn set_bootstrapped(
        &self,
        user_id: &UserId,
        complete: bool,
    ) -> Result<(), DomainError> {
        let mut users = self.users.lock().unwrap();
        let record = users.get_mut(user_id).ok_or_else(|| Self::not_found(user_id))?;
        record.bootstrapping_complete = complete;
        Ok(())
    }

    async fn upsert_attachment(
        &self,
        user_id: &UserId,
        attachment: &Attachment,
    ) -> Result<(), DomainError> {
        let mut users = self.users.lock().unwrap();
        let record = users.get_mut(user_id).ok_or_else(|| Self::not_found(user_id))?;
        match record
            .attachments
            .iter_mut()
            .find(|existing| existing.name() == attachment.name())
        {
            Some(existing) => *existing = attachment.clone(),
            None => record.attachments.push(attachment.clone()),
        }
        Ok(())
    }

    async fn list_attachments(&self, user_id: &UserId) -> Result<Vec<Attachment>, DomainError> {
        let users = self.users.lock().unwrap();
        let record = users.get(user_id).ok_or_else(|| Self::not_found(user_id))?;
        Ok(record.attachments.clone())
    }

    async fn delete_all_attachments(&self, user_id: &UserId) -> Result<(), DomainError> {
        let mut users = self.users.lock().unwrap();
        let record = users.get_mut(user_id).ok_or_else(|| Self::not_found(user_id))?;
        record.attachments.clear();
        Ok(())
    }

    async fn reset_user_graph(&self, user_id: &UserId) -> Result<(), DomainError> {
        let mut users = self.users.lock().unwrap();
        let record = users.get_mut(user_id).ok_or_else(|| Self::not_found(user_id))?;
        record.bootstrapping_complete = false;
        record.attachments.clear();
        Ok(())
    }

    async fn append_information_event(
        &self,
        user_id: &UserId,
        event: &InformationEvent,
    ) -> Result<(), DomainError> {
        let mut users = self.users.lock().unwrap();
        let record = users.get_mut(user_id).ok_or_else(|| Self::not_found(user_id))?;
        record.events.push(event.clone());
        Ok(())
    }

    async fn list_recent_information_events(
        &self,
        user_id: &UserId,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<InformationEvent>, DomainError> {
        let users = self.users.lock().unwrap();
        let record = users.get(user_id).ok_or_else(|| Self::not_found(user_id))?;
        let mut events = record.events.clone();
        // Recency first, then identity, so pagination stays stable under
        // concurrent appends.
        events.sort_by(|a, b| {
            b.occurred_at
                .cmp(&a.occurred_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(events
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }
}
