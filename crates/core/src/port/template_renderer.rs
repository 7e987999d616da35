// Template Renderer Port (Interface)
// Rendering is external; the core only sees render(template, data) -> text

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Unknown template: {0}")]
    UnknownTemplate(String),

    #[error("Render failed: {0}")]
    Render(String),
}

/// Template renderer trait
///
/// Rendering is synchronous and cheap; the delivery worker retries it
/// alongside the send.
pub trait TemplateRenderer: Send + Sync {
    fn render(&self, template_name: &str, data: &serde_json::Value) -> Result<String, RenderError>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;

    /// Renders "<template>:<data>" without any template engine
    pub struct StaticRenderer;

    impl TemplateRenderer for StaticRenderer {
        fn render(
            &self,
            template_name: &str,
            data: &serde_json::Value,
        ) -> Result<String, RenderError> {
            Ok(format!("{}:{}", template_name, data))
        }
    }

    /// Always fails with UnknownTemplate
    pub struct FailingRenderer;

    impl TemplateRenderer for FailingRenderer {
        fn render(
            &self,
            template_name: &str,
            _data: &serde_json::Value,
        ) -> Result<String, RenderError> {
            Err(RenderError::UnknownTemplate(template_name.to_string()))
        }
    }
}
