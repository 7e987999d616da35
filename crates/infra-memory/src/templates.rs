// Handlebars template renderer
//
// Built-in templates are registered at construction; an unknown template name
// is a RenderError, not a panic.

use courier_core::port::{RenderError, TemplateRenderer};
use handlebars::Handlebars;

const WELCOME_TEMPLATE: &str = "\
Hi {{name}},

Welcome aboard! Your account is ready to use.

The Courier Team
";

const PASSWORD_RESET_TEMPLATE: &str = "\
Hi {{name}},

We received a request to reset your password. Use the token below within the
next hour:

    {{reset_token}}

If you did not request this, you can ignore this message.
";

const TASK_ASSIGNED_TEMPLATE: &str = "\
Hi {{name}},

A new task was assigned to you: {{task_title}}

Log in to see the details.
";

pub struct HandlebarsRenderer {
    handlebars: Handlebars<'static>,
}

impl HandlebarsRenderer {
    pub fn new() -> Result<Self, RenderError> {
        let mut handlebars = Handlebars::new();

        for (name, template) in [
            ("welcome", WELCOME_TEMPLATE),
            ("password_reset", PASSWORD_RESET_TEMPLATE),
            ("task_assigned", TASK_ASSIGNED_TEMPLATE),
        ] {
            handlebars
                .register_template_string(name, template)
                .map_err(|e| {
                    RenderError::Render(format!("failed to register {}: {}", name, e))
                })?;
        }

        Ok(Self { handlebars })
    }
}

impl TemplateRenderer for HandlebarsRenderer {
    fn render(&self, template_name: &str, data: &serde_json::Value) -> Result<String, RenderError> {
        if !self.handlebars.has_template(template_name) {
            return Err(RenderError::UnknownTemplate(template_name.to_string()));
        }
        self.handlebars
            .render(template_name, data)
            .map_err(|e| RenderError::Render(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_renders_welcome_with_data() {
        let renderer = HandlebarsRenderer::new().unwrap();
        let body = renderer
            .render("welcome", &json!({"name": "Alice"}))
            .unwrap();
        assert!(body.contains("Hi Alice,"));
    }

    #[test]
    fn test_unknown_template_is_an_error() {
        let renderer = HandlebarsRenderer::new().unwrap();
        let err = renderer.render("nonexistent", &json!({})).unwrap_err();
        assert!(matches!(err, RenderError::UnknownTemplate(_)));
    }

    #[test]
    fn test_renders_password_reset_token() {
        let renderer = HandlebarsRenderer::new().unwrap();
        let body = renderer
            .render(
                "password_reset",
                &json!({"name": "Bob", "reset_token": "tok-123"}),
            )
            .unwrap();
        assert!(body.contains("tok-123"));
    }
}
