//! Themes: named pairs of templates.
//!
//! A theme decides what an email looks like. It provides two templates:
//!
//! - an HTML template, rendered and then CSS-inlined into the `text/html` part
//! - a plain-text template, which is itself a small HTML skeleton; its output
//!   is converted to text for the `text/plain` part
//!
//! The engine never looks inside a template, it only hands it to the template
//! renderer. Any type implementing [`Theme`] can therefore be plugged in.
//!
//! ## Built-in and Custom Themes
//!
//! [`DefaultTheme`] is compiled into the crate and is what an engine uses when
//! no theme is configured. [`CustomTheme`] holds templates provided at runtime,
//! either as strings or loaded from a directory:
//!
//! ```rust
//! use hermes_render::{CustomTheme, Theme};
//!
//! let theme = CustomTheme::new(
//!     "minimal",
//!     "<p>{{ email.body.greeting }} {{ email.body.name }}</p>",
//!     "{{ email.body.greeting }} {{ email.body.name }}",
//! );
//! assert_eq!(theme.name(), "minimal");
//! ```
//!
//! ## Template Vocabulary
//!
//! Templates are rendered against two top-level values, `engine_config` and
//! `email`. See [`crate::context`] for the full list of fields.

mod custom;
mod default;

use std::fmt::Debug;

pub use custom::{CustomTheme, ThemeLoadError, HTML_TEMPLATE_FILES, PLAIN_TEXT_TEMPLATE_FILES};
pub use default::DefaultTheme;

/// A named pair of templates.
///
/// Themes must be shareable across threads: a single configured engine may
/// render emails from many threads at once.
pub trait Theme: Debug + Send + Sync {
    /// The name of the theme.
    fn name(&self) -> &str;

    /// Template producing the HTML body.
    fn html_template(&self) -> &str;

    /// Template producing the HTML skeleton converted to the plain-text body.
    fn plain_text_template(&self) -> &str;
}
