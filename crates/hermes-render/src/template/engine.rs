//! Template engine abstraction.
//!
//! This module defines the [`TemplateEngine`] trait, the seam between the
//! rendering pipeline and a template backend. The default implementation is
//! [`MiniJinjaEngine`].

use minijinja::{AutoEscape, Environment, UndefinedBehavior, Value};
use thiserror::Error;

use super::functions::register_functions;

/// Error raised while rendering a template, classified by cause.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    /// The template could not be parsed, or it names a function, filter,
    /// test or method that does not exist.
    #[error("{0}")]
    Syntax(String),

    /// The template parsed but failed while running, for example by
    /// referencing a field the data does not have.
    #[error("{0}")]
    Execution(String),
}

impl From<minijinja::Error> for TemplateError {
    fn from(err: minijinja::Error) -> Self {
        use minijinja::ErrorKind;

        let message = err.to_string();
        match err.kind() {
            ErrorKind::SyntaxError
            | ErrorKind::BadEscape
            | ErrorKind::UnknownTest
            | ErrorKind::UnknownFunction
            | ErrorKind::UnknownFilter
            | ErrorKind::UnknownMethod => TemplateError::Syntax(message),
            _ => TemplateError::Execution(message),
        }
    }
}

/// A template engine that renders one template source against data.
///
/// Engines are shared by every render call of a configured engine, possibly
/// from many threads, and must not keep per-call state.
pub trait TemplateEngine: Send + Sync {
    /// Compiles and renders `template` with `data`.
    ///
    /// `name` identifies the template in error messages.
    fn render_template(
        &self,
        name: &str,
        template: &str,
        data: &serde_json::Value,
    ) -> Result<String, TemplateError>;
}

/// MiniJinja-based template engine.
///
/// Configured for email output:
/// - HTML auto-escaping for every template, whatever its name
/// - strict undefined handling, so a misspelled field is an error rather than
///   silently empty output
/// - the `safe` and `url` helper functions
///
/// # Example
///
/// ```rust
/// use hermes_render::template::{MiniJinjaEngine, TemplateEngine};
/// use serde_json::json;
///
/// let engine = MiniJinjaEngine::new();
/// let output = engine
///     .render_template("greeting", "<p>{{ name }}</p>", &json!({"name": "<Jon>"}))
///     .unwrap();
/// assert_eq!(output, "<p>&lt;Jon&gt;</p>");
/// ```
#[derive(Debug)]
pub struct MiniJinjaEngine {
    env: Environment<'static>,
}

impl MiniJinjaEngine {
    /// Creates a new MiniJinja engine with the helper functions registered.
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| AutoEscape::Html);
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        register_functions(&mut env);
        Self { env }
    }

    /// Returns a reference to the underlying MiniJinja environment.
    pub fn environment(&self) -> &Environment<'static> {
        &self.env
    }

    /// Returns a mutable reference to the underlying MiniJinja environment.
    ///
    /// This allows themes to rely on additional filters or functions.
    pub fn environment_mut(&mut self) -> &mut Environment<'static> {
        &mut self.env
    }
}

impl Default for MiniJinjaEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateEngine for MiniJinjaEngine {
    fn render_template(
        &self,
        name: &str,
        template: &str,
        data: &serde_json::Value,
    ) -> Result<String, TemplateError> {
        let value = Value::from_serialize(data);
        Ok(self.env.render_named_str(name, template, value)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(template: &str, data: serde_json::Value) -> Result<String, TemplateError> {
        MiniJinjaEngine::new().render_template("test", template, &data)
    }

    #[test]
    fn test_simple_interpolation() {
        let output = render("Hello, {{ name }}!", json!({"name": "World"})).unwrap();
        assert_eq!(output, "Hello, World!");
    }

    #[test]
    fn test_loop_and_conditional() {
        let output = render(
            "{% for item in items %}{% if item %}{{ item }},{% endif %}{% endfor %}",
            json!({"items": ["a", "", "c"]}),
        )
        .unwrap();
        assert_eq!(output, "a,c,");
    }

    #[test]
    fn test_auto_escape_is_always_on() {
        let output = render("{{ v }}", json!({"v": "<b>&</b>"})).unwrap();
        assert_eq!(output, "&lt;b&gt;&amp;&lt;&#x2f;b&gt;");
    }

    #[test]
    fn test_builtin_replace_filter() {
        let output = render(
            "{{ text | replace('{ACTION}', label) }}",
            json!({"text": "Click '{ACTION}'", "label": "Go"}),
        )
        .unwrap();
        assert_eq!(output, "Click &#x27;Go&#x27;");
    }

    #[test]
    fn test_unclosed_tag_is_syntax_error() {
        let err = render("{{ unclosed", json!({})).unwrap_err();
        assert!(matches!(err, TemplateError::Syntax(_)));
    }

    #[test]
    fn test_unknown_function_is_syntax_error() {
        let err = render("{{ nonexistent_helper() }}", json!({})).unwrap_err();
        assert!(matches!(err, TemplateError::Syntax(_)));
    }

    #[test]
    fn test_unknown_filter_is_syntax_error() {
        let err = render("{{ v | shout }}", json!({"v": "x"})).unwrap_err();
        assert!(matches!(err, TemplateError::Syntax(_)));
    }

    #[test]
    fn test_undefined_field_is_execution_error() {
        let err = render("{{ email.body.nonexistent }}", json!({"email": {"body": {}}})).unwrap_err();
        assert!(matches!(err, TemplateError::Execution(_)));
    }

    #[test]
    fn test_error_message_names_template() {
        let err = MiniJinjaEngine::new()
            .render_template("theme.html", "{{ missing }}", &json!({}))
            .unwrap_err();
        assert!(err.to_string().contains("theme.html"), "{err}");
    }

    #[test]
    fn test_engine_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MiniJinjaEngine>();
    }
}
