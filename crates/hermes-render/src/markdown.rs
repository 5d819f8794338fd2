//! Markdown to HTML conversion.
//!
//! Free-form markdown is converted before template execution so the theme can
//! embed the result with the `safe` helper without escaping it twice.
//!
//! The dialect is CommonMark plus the GitHub extensions email authors
//! actually reach for: tables, strikethrough and task lists. Conversion never
//! fails; markup that does not parse as markdown is rendered as text.
//!
//! Raw HTML embedded in the markdown is escaped and shows up as text. The
//! result is embedded without escaping, so only markup the converter itself
//! produced reaches the email.

use pulldown_cmark::{html, Event, Options, Parser};

fn options() -> Options {
    Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS
}

/// Converts markdown to an HTML fragment.
///
/// ```rust
/// use hermes_render::markdown::markdown_to_html;
///
/// assert_eq!(
///     markdown_to_html("Hello **world**"),
///     "<p>Hello <strong>world</strong></p>\n"
/// );
/// ```
#[must_use]
pub fn markdown_to_html(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, options()).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });
    let mut buf = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut buf, parser);
    buf
}
