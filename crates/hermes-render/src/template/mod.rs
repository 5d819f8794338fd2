//! Template rendering.
//!
//! Themes are Jinja2-compatible templates executed by [`MiniJinjaEngine`]
//! against a [`RenderContext`](crate::context::RenderContext). The pipeline
//! only depends on the [`TemplateEngine`] trait, so another backend can be
//! plugged into [`Hermes`](crate::Hermes).
//!
//! ## Helpers
//!
//! On top of MiniJinja's built-in filters (`replace`, `length`, `upper`, ...)
//! every template can call:
//!
//! | Function | Purpose |
//! |----------|---------|
//! | `safe(html)` | embed engine-produced HTML without escaping |
//! | `url(link)` | attribute-safe link, script schemes replaced by `#` |
//!
//! ## Errors
//!
//! Templates are compiled on every render, so a broken template is reported
//! when the first email is rendered with it. Unparseable templates and
//! unknown functions, filters, tests or methods are
//! [`TemplateError::Syntax`]; everything raised while running is
//! [`TemplateError::Execution`].

mod engine;
mod functions;

pub use engine::{MiniJinjaEngine, TemplateEngine, TemplateError};
pub use functions::register_functions;
