//! HTML to plain-text conversion for email bodies.
//!
//! Email clients that cannot display HTML fall back to the `text/plain`
//! alternative. This crate produces that alternative from an HTML document
//! with [`html2text`], keeping the structure a reader needs and dropping the
//! markup:
//!
//! - paragraphs and other blocks are separated by blank lines
//! - emphasis and other inline tags disappear, their text stays
//! - links become `text (url)`, or just the URL when the text already is it
//! - lists get `* ` or `1. ` markers, blockquotes get `> `
//! - tables are laid out as aligned, bordered columns
//! - preformatted blocks are kept as written
//!
//! # Example
//!
//! ```rust
//! let html = r#"
//!     <p>Hi <strong>Jon</strong>, read the <a href="https://example.com/docs">docs</a>.</p>
//!     <table>
//!       <tr><th>Item</th><th>Price</th></tr>
//!       <tr><td>Golang</td><td>$10.99</td></tr>
//!     </table>
//! "#;
//!
//! let text = hermes_text::from_html(html).unwrap();
//! assert!(text.starts_with("Hi Jon, read the docs (https://example.com/docs)."));
//! assert!(text.lines().any(|line| line.contains("Golang") && line.contains("$10.99")));
//! ```

mod error;
mod links;

pub use error::TextError;

/// Conversion settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Lay tables out as aligned, bordered columns. When `false`, each cell
    /// is written as a block of its own.
    pub pretty_tables: bool,
    /// Column at which text wraps. `<hr>` is drawn this wide.
    pub width: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            pretty_tables: true,
            width: 80,
        }
    }
}

/// Converts an HTML document or fragment to plain text with default [`Options`].
pub fn from_html(html: &str) -> Result<String, TextError> {
    from_html_with(html, &Options::default())
}

/// Converts an HTML document or fragment to plain text.
///
/// Leading and trailing blank lines are removed.
///
/// # Errors
///
/// Returns [`TextError::Conversion`] when the document cannot be laid out,
/// for example when a table does not fit in [`Options::width`]. Malformed
/// markup is repaired by the HTML parser, never rejected.
pub fn from_html_with(html: &str, options: &Options) -> Result<String, TextError> {
    let lines = html2text::config::rich()
        .raw_mode(!options.pretty_tables)
        .lines_from_read(html.as_bytes(), options.width)?;
    let text = links::render_lines(&lines);
    Ok(text.trim_matches('\n').to_string())
}
