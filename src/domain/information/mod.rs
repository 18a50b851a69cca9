//! Information events appended by external ingestion (e.g. calendar sync).
//!
//! Events are immutable once written and queryable by recency with
//! offset/limit pagination.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::foundation::{Timestamp, ValidationError};

/// Identifier for an information event, minted at append time.
///
/// Also serves as the stable secondary sort key for pagination, so two
/// events with the same `occurred_at` always list in the same order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InformationEventId(Uuid);

impl InformationEventId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for InformationEventId {
    fn default() -> Self {
        Self::new()
    }
}

/// An append-only record of externally ingested information.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InformationEvent {
    pub id: InformationEventId,
    pub source: String,
    pub occurred_at: Timestamp,
    /// Opaque reference to the ingested payload; never interpreted here.
    pub payload_ref: String,
}

impl InformationEvent {
    /// Creates an event with a fresh identifier.
    pub fn new(
        source: impl Into<String>,
        occurred_at: Timestamp,
        payload_ref: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let source = source.into();
        if source.trim().is_empty() {
            return Err(ValidationError::empty_field("source"));
        }
        Ok(Self {
            id: InformationEventId::new(),
            source,
            occurred_at,
            payload_ref: payload_ref.into(),
        })
    }
}
