//! Consent profile - the per-user permission record read before every
//! gated operation.
//!
//! The profile carries named boolean permissions plus two open-ended maps
//! for data-source and feature grants. Maps are typed `String -> bool`,
//! validated at the boundary, never raw JSON blobs.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::foundation::Timestamp;

/// Well-known permission names for the fixed profile fields.
pub const CONSENT_DATA_PROCESSING: &str = "consentDataProcessing";
pub const ALLOW_SOMATIC_PROMPTS: &str = "allowSomaticPrompts";
pub const ALLOW_DISTRESS_CHECK_INS: &str = "allowDistressCheckIns";
pub const ALLOW_AGGREGATION: &str = "allowAggregation";
pub const ALLOW_PATTERN_TRAINING: &str = "allowPatternTraining";

/// A parsed permission request.
///
/// Namespaced strings of the form `CAN_ACCESS_SOURCE_<source>` and
/// `CAN_USE_FEATURE_<feature>` resolve against the profile's open maps;
/// anything else resolves against the named fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Permission {
    Named(String),
    DataSource(String),
    Feature(String),
}

impl Permission {
    /// Parses a permission string into its namespace.
    pub fn parse(raw: &str) -> Self {
        if let Some(source) = raw.strip_prefix("CAN_ACCESS_SOURCE_") {
            Permission::DataSource(source.to_string())
        } else if let Some(feature) = raw.strip_prefix("CAN_USE_FEATURE_") {
            Permission::Feature(feature.to_string())
        } else {
            Permission::Named(raw.to_string())
        }
    }
}

/// Per-user consent record.
///
/// `consent_data_processing` defaults true at profile creation (an explicit
/// stored default from onboarding, not inferred at read time); every other
/// permission defaults false.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsentProfile {
    pub consent_data_processing: bool,
    pub allow_somatic_prompts: bool,
    pub allow_distress_check_ins: bool,
    pub allow_aggregation: bool,
    pub allow_pattern_training: bool,
    #[serde(default)]
    pub data_source_consents: HashMap<String, bool>,
    #[serde(default)]
    pub feature_consents: HashMap<String, bool>,
    pub consent_version: u32,
    pub last_consent_update: Timestamp,
}

impl ConsentProfile {
    /// Creates the profile written at onboarding.
    pub fn onboarding_default() -> Self {
        Self {
            consent_data_processing: true,
            allow_somatic_prompts: false,
            allow_distress_check_ins: false,
            allow_aggregation: false,
            allow_pattern_training: false,
            data_source_consents: HashMap::new(),
            feature_consents: HashMap::new(),
            consent_version: 1,
            last_consent_update: Timestamp::now(),
        }
    }

    /// Resolves a permission against this profile. Absent keys mean
    /// "not granted" - never an error.
    pub fn is_granted(&self, permission: &Permission) -> bool {
        match permission {
            Permission::Named(name) => match name.as_str() {
                CONSENT_DATA_PROCESSING => self.consent_data_processing,
                ALLOW_SOMATIC_PROMPTS => self.allow_somatic_prompts,
                ALLOW_DISTRESS_CHECK_INS => self.allow_distress_check_ins,
                ALLOW_AGGREGATION => self.allow_aggregation,
                ALLOW_PATTERN_TRAINING => self.allow_pattern_training,
                _ => false,
            },
            Permission::DataSource(source) => {
                self.data_source_consents.get(source).copied().unwrap_or(false)
            }
            Permission::Feature(feature) => {
                self.feature_consents.get(feature).copied().unwrap_or(false)
            }
        }
    }

    /// Records a grant or revocation, bumping the version.
    pub fn set_permission(&mut self, permission: &Permission, granted: bool) {
        match permission {
            Permission::Named(name) => match name.as_str() {
                CONSENT_DATA_PROCESSING => self.consent_data_processing = granted,
                ALLOW_SOMATIC_PROMPTS => self.allow_somatic_prompts = granted,
                ALLOW_DISTRESS_CHECK_INS => self.allow_distress_check_ins = granted,
                ALLOW_AGGREGATION => self.allow_aggregation = granted,
                ALLOW_PATTERN_TRAINING => self.allow_pattern_training = granted,
                _ => return,
            },
            Permission::DataSource(source) => {
                self.data_source_consents.insert(source.clone(), granted);
            }
            Permission::Feature(feature) => {
                self.feature_consents.insert(feature.clone(), granted);
            }
        }
        self.consent_version += 1;
        self.last_consent_update = Timestamp::now();
    }
}
