//! Attachment entities - the values and goals a user holds.
//!
//! An attachment is owned by exactly one user through a HOLDS relationship
//! in the graph store. Power and valence are range-enforced at construction;
//! out-of-range writes are rejected, never silently clamped.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{UserId, ValidationError};

/// Whether an attachment models a held value or a pursued goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentKind {
    Value,
    Goal,
}

impl fmt::Display for AttachmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttachmentKind::Value => write!(f, "value"),
            AttachmentKind::Goal => write!(f, "goal"),
        }
    }
}

/// Strength of an attachment, in [0, 10].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PowerLevel(f64);

impl PowerLevel {
    /// Creates a PowerLevel, rejecting values outside [0, 10].
    pub fn try_new(value: f64) -> Result<Self, ValidationError> {
        if !value.is_finite() || !(0.0..=10.0).contains(&value) {
            return Err(ValidationError::out_of_range("powerLevel", 0.0, 10.0, value));
        }
        Ok(Self(value))
    }

    /// Returns the inner value.
    pub fn value(&self) -> f64 {
        self.0
    }
}

/// Polarity of an attachment, in [-10, 10].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Valence(f64);

impl Valence {
    /// Creates a Valence, rejecting values outside [-10, 10].
    pub fn try_new(value: f64) -> Result<Self, ValidationError> {
        if !value.is_finite() || !(-10.0..=10.0).contains(&value) {
            return Err(ValidationError::out_of_range("valence", -10.0, 10.0, value));
        }
        Ok(Self(value))
    }

    /// Returns the inner value.
    pub fn value(&self) -> f64 {
        self.0
    }
}

/// A value or goal held by a user, with strength and polarity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    name: String,
    kind: AttachmentKind,
    power_level: PowerLevel,
    valence: Valence,
}

impl Attachment {
    /// Creates an attachment, validating the name and ranges.
    pub fn new(
        name: impl Into<String>,
        kind: AttachmentKind,
        power_level: PowerLevel,
        valence: Valence,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        Ok(Self {
            name,
            kind,
            power_level,
            valence,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> AttachmentKind {
        self.kind
    }

    pub fn power_level(&self) -> PowerLevel {
        self.power_level
    }

    pub fn valence(&self) -> Valence {
        self.valence
    }
}

/// A user together with the bootstrap progress flag on their graph node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserNode {
    pub user_id: UserId,
    pub bootstrapping_complete: bool,
}
