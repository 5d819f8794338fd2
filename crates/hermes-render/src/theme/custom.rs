//! Themes whose templates are supplied at runtime.

use std::path::{Path, PathBuf};

use thiserror::Error;

use super::Theme;

/// Candidate file names for the HTML template, in priority order.
pub const HTML_TEMPLATE_FILES: &[&str] = &["html.jinja", "html.jinja2", "html.j2", "html.html"];

/// Candidate file names for the plain-text template, in priority order.
pub const PLAIN_TEXT_TEMPLATE_FILES: &[&str] =
    &["plain.jinja", "plain.jinja2", "plain.j2", "plain.txt"];

/// Error returned when a theme directory cannot be loaded.
#[derive(Debug, Error)]
pub enum ThemeLoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no {kind} template in {dir} (looked for {candidates})")]
    MissingTemplate {
        dir: PathBuf,
        kind: &'static str,
        candidates: String,
    },
}

/// A theme built from template strings.
///
/// Templates are not parsed here. A syntax error surfaces when an email is
/// rendered with the theme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomTheme {
    name: String,
    html: String,
    plain_text: String,
}

impl CustomTheme {
    /// Creates a theme from template sources.
    pub fn new(
        name: impl Into<String>,
        html_template: impl Into<String>,
        plain_text_template: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            html: html_template.into(),
            plain_text: plain_text_template.into(),
        }
    }

    /// Loads a theme from a directory.
    ///
    /// The directory must contain one of [`HTML_TEMPLATE_FILES`] and one of
    /// [`PLAIN_TEXT_TEMPLATE_FILES`]. The theme is named after the directory.
    ///
    /// ```text
    /// themes/flat/
    /// ├── html.jinja
    /// └── plain.jinja
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`ThemeLoadError`] if a template is missing or unreadable.
    pub fn from_dir<P: AsRef<Path>>(dir: P) -> Result<Self, ThemeLoadError> {
        let dir = dir.as_ref();
        let name = dir
            .file_name()
            .and_then(|s| s.to_str())
            .map(str::to_string)
            .unwrap_or_else(|| "custom".to_string());

        let html = read_first(dir, "HTML", HTML_TEMPLATE_FILES)?;
        let plain_text = read_first(dir, "plain-text", PLAIN_TEXT_TEMPLATE_FILES)?;

        Ok(Self {
            name,
            html,
            plain_text,
        })
    }
}

fn read_first(
    dir: &Path,
    kind: &'static str,
    candidates: &[&str],
) -> Result<String, ThemeLoadError> {
    for candidate in candidates {
        let path = dir.join(candidate);
        if path.is_file() {
            return std::fs::read_to_string(&path)
                .map_err(|source| ThemeLoadError::Io { path, source });
        }
    }
    Err(ThemeLoadError::MissingTemplate {
        dir: dir.to_path_buf(),
        kind,
        candidates: candidates.join(", "),
    })
}

impl Theme for CustomTheme {
    fn name(&self) -> &str {
        &self.name
    }

    fn html_template(&self) -> &str {
        &self.html
    }

    fn plain_text_template(&self) -> &str {
        &self.plain_text
    }
}
