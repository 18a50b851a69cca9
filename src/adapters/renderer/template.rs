//! Local template-based prompt renderer.
//!
//! Deterministic stand-in for the external LLM-templated renderer: picks
//! a template by appraisal intensity. The user's message is never echoed
//! back into the prompt.

use async_trait::async_trait;

use crate::domain::appraisal::Appraisal;
use crate::domain::foundation::DomainError;
use crate::ports::SomaticPromptRenderer;

const HIGH_INTENSITY: &str =
    "That sounds intense. Before we go on, take a slow breath - where in your body do you feel this most strongly right now?";

const MODERATE_INTENSITY: &str =
    "Let's pause for a moment. As you sit with this, what do you notice happening in your body?";

const LOW_INTENSITY: &str =
    "Taking a brief check-in: is there anywhere in your body that's holding on to this?";

/// Renders prompts from a fixed template table keyed by appraisal power.
pub struct TemplatePromptRenderer;

impl TemplatePromptRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TemplatePromptRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SomaticPromptRenderer for TemplatePromptRenderer {
    async fn render(
        &self,
        _user_message: &str,
        appraisal: &Appraisal,
    ) -> Result<String, DomainError> {
        let power = appraisal.power_level.value();
        let prompt = if power >= 0.8 {
            HIGH_INTENSITY
        } else if power >= 0.6 {
            MODERATE_INTENSITY
        } else {
            LOW_INTENSITY
        };
        Ok(prompt.to_string())
    }
}
