//! Somatic prompt renderer adapters.

mod template;

pub use template::TemplatePromptRenderer;
