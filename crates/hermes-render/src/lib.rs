//! # Hermes Render - themeable transactional emails
//!
//! `hermes-render` turns an abstract description of an email (a greeting,
//! intro and outro sentences, a dictionary, a table, call-to-action buttons or
//! free-form markdown) into the two bodies every transactional email needs:
//!
//! - an HTML body with its CSS inlined, ready for webmail and desktop clients
//! - a plain-text body for clients that cannot, or will not, display HTML
//!
//! What an email *says* lives in an [`Email`]; how it *looks* lives in a
//! [`Theme`]; who sends it lives in an [`EngineConfig`].
//!
//! ## Quick Start
//!
//! ```rust
//! use hermes_render::{Action, Body, Button, EngineConfig, Email, Hermes};
//!
//! let hermes = Hermes::new(EngineConfig::default());
//!
//! let email = Email::new(Body {
//!     name: Some("Jon Snow".into()),
//!     intros: vec!["Welcome to Hermes! We're very excited to have you on board.".into()],
//!     actions: vec![Action {
//!         instructions: "To get started with Hermes, please click here:".into(),
//!         button: Some(Button::new("Confirm your account", "https://hermes-example.com/confirm")),
//!         ..Action::default()
//!     }],
//!     ..Body::default()
//! });
//!
//! let rendered = hermes.generate(&email).unwrap();
//! assert!(rendered.html.contains("Confirm your account"));
//! assert!(rendered.plain_text.contains("https://hermes-example.com/confirm"));
//! ```
//!
//! ## Pipeline
//!
//! 1. **Defaults**: unset fields of the config and the email are filled in
//!    (greeting `"Hi"`, signature `"Yours truly"`, brand `"Hermes"`, ...).
//! 2. **Template**: the theme's template runs against `engine_config` and
//!    `email` (see [`context`]); free markdown is converted first.
//! 3. **HTML**: `<style>` rules are moved into `style` attributes (see
//!    [`inline`]), unless [`EngineConfig::disable_css_inlining`] is set.
//! 4. **Text**: the plain-text template's HTML skeleton is converted with
//!    [`hermes_text`].
//!
//! Every failure is a [`RenderError`] naming the stage that failed.
//!
//! ## Logging
//!
//! Each generation runs in a `debug` span carrying the theme name, with
//! events for the template, inlining and text stages. The crate never
//! installs a subscriber.

mod config;
pub mod context;
mod email;
mod engine;
mod error;
pub mod inline;
pub mod markdown;
pub mod prelude;
pub mod template;
pub mod theme;

// Configuration
pub use config::{
    Branding, ConfigError, EngineConfig, TextDirection, DEFAULT_BRAND_NAME, DEFAULT_COPYRIGHT,
    DEFAULT_TROUBLE_TEXT,
};

// Content model
pub use email::{
    Action, Align, Body, Button, Columns, Email, Entry, Markdown, Table, DEFAULT_GREETING,
    DEFAULT_SIGNATURE,
};

// Generation
pub use engine::{generate_html, generate_plain_text, Hermes, RenderedEmail};

// Errors
pub use error::{RenderError, TemplateKind};
pub use inline::{InlineError, InlineOptions};

// Themes and templates
pub use template::{MiniJinjaEngine, TemplateEngine, TemplateError};
pub use theme::{CustomTheme, DefaultTheme, Theme, ThemeLoadError};

// Plain-text conversion
pub use hermes_text::{Options as TextOptions, TextError};
