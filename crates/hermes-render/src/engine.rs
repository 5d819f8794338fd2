//! The generation pipeline.
//!
//! ```text
//! Email ─► merge defaults ─► theme template ─┬─► CSS inlining ───► HTML
//!                                           └─► text conversion ─► plain text
//! ```
//!
//! The free functions [`generate_html`] and [`generate_plain_text`] run the
//! pipeline with the default template engine and options. [`Hermes`] keeps a
//! configuration together with a template engine and per-stage options for
//! repeated use.

use std::fmt;

use tracing::{debug, field, instrument, trace, Span};

use crate::config::EngineConfig;
use crate::context::RenderContext;
use crate::email::Email;
use crate::error::{RenderError, TemplateKind};
use crate::inline::{inline_css, InlineOptions};
use crate::template::{MiniJinjaEngine, TemplateEngine};

/// Both bodies of one email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEmail {
    /// The `text/html` part.
    pub html: String,
    /// The `text/plain` part.
    pub plain_text: String,
}

/// Renders the HTML body of `email`.
///
/// Defaults are merged into private copies of `config` and `email`; neither
/// argument is modified.
///
/// # Errors
///
/// Returns [`RenderError`] if the theme's HTML template fails to parse or run,
/// or if the rendered document cannot be CSS-inlined.
///
/// # Example
///
/// ```rust
/// use hermes_render::{generate_html, Body, EngineConfig, Email};
///
/// let email = Email::new(Body {
///     name: Some("Jon Snow".into()),
///     intros: vec!["Welcome to Hermes!".into()],
///     ..Body::default()
/// });
/// let html = generate_html(&EngineConfig::default(), &email).unwrap();
/// assert!(html.contains("Hi Jon Snow"));
/// ```
pub fn generate_html(config: &EngineConfig, email: &Email) -> Result<String, RenderError> {
    render_html(
        &MiniJinjaEngine::new(),
        &InlineOptions::default(),
        config,
        email,
    )
}

/// Renders the plain-text body of `email`.
///
/// # Errors
///
/// Returns [`RenderError`] if the theme's plain-text template fails to parse
/// or run, or if its output cannot be converted to text.
pub fn generate_plain_text(config: &EngineConfig, email: &Email) -> Result<String, RenderError> {
    render_plain_text(
        &MiniJinjaEngine::new(),
        &hermes_text::Options::default(),
        config,
        email,
    )
}

/// A configured email generator.
///
/// Holds an [`EngineConfig`], the [`TemplateEngine`] that executes themes and
/// the options of the inlining and text stages. A `Hermes` is `Send + Sync`
/// and may render from many threads at once.
///
/// # Example
///
/// ```rust
/// use hermes_render::{Body, Branding, EngineConfig, Email, Hermes};
///
/// let hermes = Hermes::new(EngineConfig::default().with_brand(Branding {
///     name: Some("Acme".into()),
///     link: Some("https://acme.test/".into()),
///     ..Branding::default()
/// }));
///
/// let email = Email::new(Body {
///     name: Some("Jon Snow".into()),
///     ..Body::default()
/// });
/// let rendered = hermes.generate(&email).unwrap();
/// assert!(rendered.html.contains("Acme"));
/// assert!(rendered.plain_text.contains("Acme - https://acme.test/"));
/// ```
pub struct Hermes {
    config: EngineConfig,
    engine: Box<dyn TemplateEngine>,
    inline_options: InlineOptions,
    text_options: hermes_text::Options,
}

impl Hermes {
    /// Creates a generator using [`MiniJinjaEngine`].
    pub fn new(config: EngineConfig) -> Self {
        Self::with_engine(config, MiniJinjaEngine::new())
    }

    /// Creates a generator using a custom template engine.
    pub fn with_engine<E: TemplateEngine + 'static>(config: EngineConfig, engine: E) -> Self {
        Self {
            config,
            engine: Box::new(engine),
            inline_options: InlineOptions::default(),
            text_options: hermes_text::Options::default(),
        }
    }

    /// Sets the CSS inlining options, returning `self` for chaining.
    pub fn inline_options(mut self, options: InlineOptions) -> Self {
        self.inline_options = options;
        self
    }

    /// Sets the plain-text conversion options, returning `self` for chaining.
    pub fn text_options(mut self, options: hermes_text::Options) -> Self {
        self.text_options = options;
        self
    }

    /// The configuration every email is rendered with.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Renders the HTML body of `email`. See [`generate_html`].
    pub fn generate_html(&self, email: &Email) -> Result<String, RenderError> {
        render_html(&*self.engine, &self.inline_options, &self.config, email)
    }

    /// Renders the plain-text body of `email`. See [`generate_plain_text`].
    pub fn generate_plain_text(&self, email: &Email) -> Result<String, RenderError> {
        render_plain_text(&*self.engine, &self.text_options, &self.config, email)
    }

    /// Renders both bodies of `email`.
    pub fn generate(&self, email: &Email) -> Result<RenderedEmail, RenderError> {
        Ok(RenderedEmail {
            html: self.generate_html(email)?,
            plain_text: self.generate_plain_text(email)?,
        })
    }
}

impl Default for Hermes {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl fmt::Debug for Hermes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hermes")
            .field("config", &self.config)
            .field("inline_options", &self.inline_options)
            .field("text_options", &self.text_options)
            .finish_non_exhaustive()
    }
}

#[instrument(level = "debug", name = "generate_html", skip_all, fields(theme = field::Empty))]
fn render_html(
    engine: &dyn TemplateEngine,
    options: &InlineOptions,
    config: &EngineConfig,
    email: &Email,
) -> Result<String, RenderError> {
    let config = config.with_defaults();
    let html = render_template(engine, &config, email, TemplateKind::Html)?;

    if config.disable_css_inlining {
        debug!("css inlining disabled");
        return Ok(html);
    }

    let inlined = inline_css(&html, options)?;
    debug!(bytes = inlined.len(), "css inlined");
    Ok(inlined)
}

#[instrument(level = "debug", name = "generate_plain_text", skip_all, fields(theme = field::Empty))]
fn render_plain_text(
    engine: &dyn TemplateEngine,
    options: &hermes_text::Options,
    config: &EngineConfig,
    email: &Email,
) -> Result<String, RenderError> {
    let config = config.with_defaults();
    let skeleton = render_template(engine, &config, email, TemplateKind::PlainText)?;

    let text = hermes_text::from_html_with(&skeleton, options)?;
    debug!(bytes = text.len(), "converted to plain text");
    Ok(text)
}

/// Runs one of the theme's templates. `config` must have defaults merged.
fn render_template(
    engine: &dyn TemplateEngine,
    config: &EngineConfig,
    email: &Email,
    kind: TemplateKind,
) -> Result<String, RenderError> {
    let email = email.clone().with_defaults();
    let theme = config.theme();
    Span::current().record("theme", theme.name());

    let source = match kind {
        TemplateKind::Html => theme.html_template(),
        TemplateKind::PlainText => theme.plain_text_template(),
    };
    let context = RenderContext::new(config, theme.name(), &email);
    let data = serde_json::to_value(&context).map_err(|e| RenderError::TemplateExecution {
        theme: theme.name().to_string(),
        template: kind,
        message: e.to_string(),
    })?;

    let name = kind.template_name(theme.name());
    let output = engine
        .render_template(&name, source, &data)
        .map_err(|e| RenderError::from_template(theme.name(), kind, e))?;
    trace!(template = %name, bytes = output.len(), "template rendered");
    Ok(output)
}
