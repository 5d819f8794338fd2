//! CSS inlining.
//!
//! Many email clients ignore `<style>` blocks, so the rendered HTML has its
//! stylesheet rules copied into the `style` attribute of every element they
//! match.
//!
//! ## Cascade
//!
//! For each element the matching declarations are applied in this order,
//! later ones replacing earlier ones for the same property:
//!
//! 1. stylesheet declarations, by specificity and then source order
//! 2. the element's own `style` attribute
//! 3. `!important` stylesheet declarations
//! 4. `!important` declarations of the `style` attribute
//!
//! ## What stays in a stylesheet
//!
//! Rules that cannot be expressed inline, namely pseudo-class and
//! pseudo-element selectors and every at-rule, are collected into a single
//! `<style>` block at the end of `<head>`. Responsive `@media` rules therefore
//! keep working in clients that honor them.
//!
//! ## Serialization
//!
//! The document is parsed and written back out, so text and element structure
//! are kept but the markup is normalized. Attributes come out in name order,
//! as the HTML parser stores them, not in source order. A computed `style`
//! attribute takes the place of an existing one, or is written last.
//!
//! ```rust
//! use hermes_render::inline::{inline_css, InlineOptions};
//!
//! let html = r#"<html><head><style>p.note { color: red }</style></head>
//! <body><p class="note">Hi</p></body></html>"#;
//! let out = inline_css(html, &InlineOptions::default()).unwrap();
//! assert!(out.contains(r#"style="color: red;""#));
//! assert!(!out.contains("<style"));
//! ```

mod serialize;
mod specificity;
mod stylesheet;

use scraper::{ElementRef, Html, Node};
use thiserror::Error;
use tracing::trace;

pub use specificity::Specificity;

use serialize::Serializer;
use stylesheet::Stylesheet;

/// Deepest element nesting the inliner will descend into.
pub const MAX_DEPTH: usize = 512;

/// Error raised when a document's stylesheet or structure cannot be inlined.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InlineError {
    #[error("invalid selector `{selector}`: {message}")]
    InvalidSelector { selector: String, message: String },

    #[error("invalid stylesheet at line {line}, column {column}: {message}")]
    InvalidStylesheet {
        line: u32,
        column: u32,
        message: String,
    },

    #[error("unterminated rule `{rule}`")]
    UnterminatedRule { rule: String },

    #[error("document nesting exceeds {limit} levels")]
    NestingTooDeep { limit: usize },
}

/// Inliner switches.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InlineOptions {
    /// Mirror `background-color` and `text-align` into the `bgcolor` and
    /// `align` attributes of tables and cells, for clients that ignore CSS
    /// on tables. Existing attributes are never replaced.
    pub css_to_attributes: bool,
    /// Drop `class` attributes once their rules are inlined.
    pub remove_classes: bool,
    /// Keep `!important` in the written `style` attributes.
    pub keep_bang_important: bool,
}

impl Default for InlineOptions {
    fn default() -> Self {
        Self {
            css_to_attributes: true,
            remove_classes: false,
            keep_bang_important: false,
        }
    }
}

/// Moves the rules of every `<style>` block into `style` attributes.
///
/// # Errors
///
/// Returns [`InlineError`] if a stylesheet contains a selector that cannot be
/// parsed or a rule that is not terminated, or if elements nest deeper than
/// [`MAX_DEPTH`].
pub fn inline_css(html: &str, options: &InlineOptions) -> Result<String, InlineError> {
    let document = Html::parse_document(html);

    let mut sheet = Stylesheet::default();
    let mut blocks = 0;
    for node in document.root_element().descendants() {
        if let Node::Element(element) = node.value() {
            if element.name() != "style" {
                continue;
            }
            if let Some(style) = ElementRef::wrap(node) {
                let css: String = style.text().collect();
                sheet.add(&css)?;
                blocks += 1;
            }
        }
    }
    trace!(
        blocks,
        rules = sheet.rules.len(),
        residual = sheet.residual.len(),
        "parsed stylesheets"
    );

    Serializer::new(&sheet, options).serialize(&document)
}
