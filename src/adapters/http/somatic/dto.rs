//! Data transfer objects for somatic HTTP endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::appraisal::VadEstimate;
use crate::domain::foundation::{UnitInterval, SignedUnit, ValidationError};

/// Inline VAD body: `{ v, a, d }` with an optional affect-model confidence.
#[derive(Debug, Clone, Deserialize)]
pub struct VadBody {
    pub v: f64,
    pub a: f64,
    pub d: f64,
    #[serde(default = "default_confidence")]
    pub confidence: f64,
}

fn default_confidence() -> f64 {
    1.0
}

impl VadBody {
    /// Validates the ranges; out-of-range input is rejected, not clamped.
    pub fn try_into_estimate(self) -> Result<VadEstimate, ValidationError> {
        Ok(VadEstimate {
            valence: SignedUnit::try_new(self.v)?,
            arousal: UnitInterval::try_new(self.a)?,
            dominance: UnitInterval::try_new(self.d)?,
            confidence: UnitInterval::try_new(self.confidence)?,
        })
    }
}

/// POST /somatic/trigger-test request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerTestRequest {
    pub user_id: String,
    pub session_id: String,
    pub vad: VadBody,
    pub user_message: String,
    pub current_turn: u64,
}

/// POST /somatic/trigger-test response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerTestResponse {
    pub should_trigger: bool,
    pub prompt: Option<String>,
}

/// Probe request for awaiting-test and reset-test.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SomaticProbeRequest {
    pub user_id: String,
    pub session_id: String,
}

/// POST /somatic/awaiting-test response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AwaitingResponse {
    pub is_awaiting: bool,
}

/// POST /somatic/reset-test response.
#[derive(Debug, Clone, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vad_body_rejects_out_of_range_valence() {
        let body = VadBody {
            v: -1.5,
            a: 0.5,
            d: 0.5,
            confidence: 1.0,
        };
        assert!(body.try_into_estimate().is_err());
    }

    #[test]
    fn trigger_request_deserializes_nested_vad() {
        let req: TriggerTestRequest = serde_json::from_str(
            r#"{"userId":"u1","sessionId":"s1","vad":{"v":-0.8,"a":0.9,"d":0.1},
                "userMessage":"rough day","currentTurn":4}"#,
        )
        .unwrap();
        assert_eq!(req.vad.confidence, 1.0);
        assert_eq!(req.current_turn, 4);
    }
}
