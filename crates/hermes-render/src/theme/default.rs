//! The built-in theme.

use super::Theme;

const HTML_TEMPLATE: &str = include_str!("templates/default.html.jinja");
const PLAIN_TEXT_TEMPLATE: &str = include_str!("templates/default.plain.jinja");

/// The theme used when an engine has none configured.
///
/// A centered single-column layout with a masthead, a white content card and
/// a footer, in the style of the classic Postmark transactional templates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DefaultTheme;

impl Theme for DefaultTheme {
    fn name(&self) -> &str {
        "default"
    }

    fn html_template(&self) -> &str {
        HTML_TEMPLATE
    }

    fn plain_text_template(&self) -> &str {
        PLAIN_TEXT_TEMPLATE
    }
}
