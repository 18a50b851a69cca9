//! Safety pipeline configuration.
//!
//! The appraisal parameter table, somatic trigger thresholds, and the
//! session flag TTL window live here so the curves stay tunable without
//! code changes.

use serde::Deserialize;

use crate::domain::appraisal::AppraisalParams;
use crate::domain::safety::SomaticTriggerPolicy;

use super::error::ValidationError;

/// Safety pipeline configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SafetyConfig {
    /// Appraisal curve parameters
    #[serde(default)]
    pub appraisal: AppraisalParams,

    /// Somatic trigger thresholds and cooldown
    #[serde(default)]
    pub somatic: SomaticTriggerPolicy,

    /// TTL window for session flags, in seconds
    #[serde(default = "default_flag_ttl_secs")]
    pub flag_ttl_secs: u64,
}

fn default_flag_ttl_secs() -> u64 {
    86_400
}

impl Default for SafetyConfig {
    fn default() -> Self {
        Self {
            appraisal: AppraisalParams::default(),
            somatic: SomaticTriggerPolicy::default(),
            flag_ttl_secs: default_flag_ttl_secs(),
        }
    }
}

impl SafetyConfig {
    /// Validate safety configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(0.0..=1.0).contains(&self.somatic.arousal_threshold)
            || !(0.0..=1.0).contains(&self.somatic.power_threshold)
        {
            return Err(ValidationError::InvalidTriggerThreshold);
        }
        if self.flag_ttl_secs == 0 {
            return Err(ValidationError::InvalidFlagTtl);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = SafetyConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.flag_ttl_secs, 86_400);
    }

    #[test]
    fn out_of_range_threshold_is_rejected() {
        let mut config = SafetyConfig::default();
        config.somatic.arousal_threshold = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_ttl_is_rejected() {
        let config = SafetyConfig {
            flag_ttl_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
