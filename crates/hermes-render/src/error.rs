//! Error types for email rendering.
//!
//! [`RenderError`] is returned by every generation entry point. It names the
//! stage that failed; no stage leaves partial output behind.

use std::fmt;

use thiserror::Error;

use crate::inline::InlineError;
use crate::template::TemplateError;

/// Which of a theme's two templates was being rendered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TemplateKind {
    Html,
    PlainText,
}

impl TemplateKind {
    /// Name under which the template is registered, e.g. `default.html`.
    pub fn template_name(self, theme: &str) -> String {
        match self {
            TemplateKind::Html => format!("{theme}.html"),
            TemplateKind::PlainText => format!("{theme}.plain"),
        }
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateKind::Html => f.write_str("HTML"),
            TemplateKind::PlainText => f.write_str("plain-text"),
        }
    }
}

/// Error type for email generation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// The theme template does not parse, or it calls an unknown helper.
    #[error("syntax error in {template} template of theme '{theme}': {message}")]
    TemplateSyntax {
        theme: String,
        template: TemplateKind,
        message: String,
    },

    /// The theme template failed while running.
    #[error("error executing {template} template of theme '{theme}': {message}")]
    TemplateExecution {
        theme: String,
        template: TemplateKind,
        message: String,
    },

    /// The rendered HTML could not be CSS-inlined.
    #[error("CSS inlining failed: {0}")]
    CssInlining(#[from] InlineError),

    /// The rendered plain-text skeleton could not be converted.
    #[error("plain-text conversion failed: {0}")]
    TextConversion(#[from] hermes_text::TextError),
}

impl RenderError {
    pub(crate) fn from_template(theme: &str, template: TemplateKind, err: TemplateError) -> Self {
        let theme = theme.to_string();
        match err {
            TemplateError::Syntax(message) => RenderError::TemplateSyntax {
                theme,
                template,
                message,
            },
            TemplateError::Execution(message) => RenderError::TemplateExecution {
                theme,
                template,
                message,
            },
        }
    }

    /// Whether the error comes from the theme rather than from the content.
    pub fn is_template_error(&self) -> bool {
        matches!(
            self,
            RenderError::TemplateSyntax { .. } | RenderError::TemplateExecution { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_errors_keep_stage_context() {
        let err = RenderError::from_template(
            "flat",
            TemplateKind::PlainText,
            TemplateError::Syntax("unexpected end of input".into()),
        );
        assert_eq!(
            err,
            RenderError::TemplateSyntax {
                theme: "flat".into(),
                template: TemplateKind::PlainText,
                message: "unexpected end of input".into(),
            }
        );
        assert_eq!(
            err.to_string(),
            "syntax error in plain-text template of theme 'flat': unexpected end of input"
        );
        assert!(err.is_template_error());
    }

    #[test]
    fn test_execution_error_display() {
        let err = RenderError::from_template(
            "default",
            TemplateKind::Html,
            TemplateError::Execution("undefined value".into()),
        );
        assert!(matches!(err, RenderError::TemplateExecution { .. }));
        assert!(err.to_string().starts_with("error executing HTML template"));
    }

    #[test]
    fn test_stage_errors_convert() {
        let err: RenderError = InlineError::NestingTooDeep { limit: 512 }.into();
        assert!(matches!(err, RenderError::CssInlining(_)));
        assert!(!err.is_template_error());

        let err: RenderError = hermes_text::TextError::Conversion {
            message: "Output width not wide enough.".into(),
        }
        .into();
        assert!(matches!(err, RenderError::TextConversion(_)));
    }

    #[test]
    fn test_template_names() {
        assert_eq!(TemplateKind::Html.template_name("default"), "default.html");
        assert_eq!(TemplateKind::PlainText.template_name("flat"), "flat.plain");
    }
}
