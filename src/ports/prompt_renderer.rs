//! Somatic prompt rendering port.
//!
//! Prompt text is rendered externally (LLM-templated). A rendering
//! failure or timeout degrades to the static fallback prompt; it never
//! suppresses a trigger that should fire.

use async_trait::async_trait;

use crate::domain::appraisal::Appraisal;
use crate::domain::foundation::DomainError;

/// Renders the body-awareness prompt for a fired trigger.
#[async_trait]
pub trait SomaticPromptRenderer: Send + Sync {
    /// Renders a prompt for the user's current turn.
    async fn render(
        &self,
        user_message: &str,
        appraisal: &Appraisal,
    ) -> Result<String, DomainError>;
}
