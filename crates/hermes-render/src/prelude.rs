//! Prelude for convenient imports.
//!
//! ```rust
//! use hermes_render::prelude::*;
//!
//! let email = Email::new(Body {
//!     name: Some("Jon Snow".into()),
//!     ..Body::default()
//! });
//! let text = generate_plain_text(&EngineConfig::default(), &email)?;
//! assert!(text.contains("Hi Jon Snow,"));
//! # Ok::<(), RenderError>(())
//! ```

pub use crate::{
    generate_html, generate_plain_text, Action, Body, Branding, Button, CustomTheme,
    DefaultTheme, Email, EngineConfig, Entry, Hermes, Markdown, RenderError, RenderedEmail,
    Table, TextDirection, Theme,
};
