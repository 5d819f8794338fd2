//! Engine configuration: theme, branding and rendering switches.
//!
//! An [`EngineConfig`] is built once and reused for every email. Unset
//! fields are filled from the defaults on each render, on a private copy, so
//! the caller's value is never modified.
//!
//! Configurations can be written by hand or loaded from YAML:
//!
//! ```yaml
//! theme: default            # or a directory holding html.jinja + plain.jinja
//! text_direction: rtl
//! disable_css_inlining: false
//! brand:
//!   name: Acme
//!   link: https://acme.test
//!   logo: https://acme.test/logo.png
//! ```
//!
//! A theme directory given as a relative path is resolved against the
//! directory of the configuration file when loaded with
//! [`EngineConfig::from_file`], and against the working directory otherwise.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::theme::{CustomTheme, DefaultTheme, Theme, ThemeLoadError};

/// Brand name used when none is configured.
pub const DEFAULT_BRAND_NAME: &str = "Hermes";
/// Copyright line used when none is configured.
pub const DEFAULT_COPYRIGHT: &str = "Copyright © 2024 Hermes. All rights reserved.";
/// Trouble text used when none is configured. `{ACTION}` is replaced by the
/// button label.
pub const DEFAULT_TROUBLE_TEXT: &str = "If you’re having trouble with the button '{ACTION}', copy and paste the URL below into your web browser.";

/// Name that selects the built-in theme in a configuration file.
const DEFAULT_THEME_NAME: &str = "default";

/// Error returned when a configuration file cannot be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration{}: {message}", location(.path))]
    Parse {
        path: Option<PathBuf>,
        message: String,
    },

    #[error(transparent)]
    Theme(#[from] ThemeLoadError),
}

fn location(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" in {}", p.display()))
        .unwrap_or_default()
}

/// Direction of the text in the HTML email.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextDirection {
    #[default]
    Ltr,
    Rtl,
}

impl TextDirection {
    /// The HTML `dir` attribute value.
    pub fn as_str(self) -> &'static str {
        match self {
            TextDirection::Ltr => "ltr",
            TextDirection::Rtl => "rtl",
        }
    }
}

impl fmt::Display for TextDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity shown in the header and footer of every email.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Branding {
    pub name: Option<String>,
    /// e.g. `https://example.com`
    pub link: Option<String>,
    /// e.g. `https://example.com/img/logo.png`
    pub logo: Option<String>,
    pub copyright: Option<String>,
    /// Sentence shown under the signature for readers whose client cannot
    /// follow the button. `{ACTION}` is replaced by the button label.
    pub trouble_text: Option<String>,
}

impl Branding {
    /// Fills the unset name, copyright and trouble text from the defaults.
    pub fn merge_defaults(&mut self) {
        self.name
            .get_or_insert_with(|| DEFAULT_BRAND_NAME.to_string());
        self.copyright
            .get_or_insert_with(|| DEFAULT_COPYRIGHT.to_string());
        self.trouble_text
            .get_or_insert_with(|| DEFAULT_TROUBLE_TEXT.to_string());
    }
}

/// Configuration shared by every email an engine renders.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// The theme; [`DefaultTheme`] when unset.
    #[serde(skip)]
    pub theme: Option<Arc<dyn Theme>>,
    pub brand: Branding,
    /// [`TextDirection::Ltr`] when unset.
    pub text_direction: Option<TextDirection>,
    /// Return the rendered HTML without moving `<style>` rules inline.
    pub disable_css_inlining: bool,
}

impl EngineConfig {
    /// Creates an empty configuration; every field takes its default at render time.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the theme, returning `self` for chaining.
    pub fn with_theme<T: Theme + 'static>(mut self, theme: T) -> Self {
        self.theme = Some(Arc::new(theme));
        self
    }

    /// Sets the brand, returning `self` for chaining.
    pub fn with_brand(mut self, brand: Branding) -> Self {
        self.brand = brand;
        self
    }

    /// Returns the configured theme, or the built-in one.
    pub fn theme(&self) -> Arc<dyn Theme> {
        match &self.theme {
            Some(theme) => Arc::clone(theme),
            None => Arc::new(DefaultTheme),
        }
    }

    /// Returns the configured direction, or left-to-right.
    pub fn text_direction(&self) -> TextDirection {
        self.text_direction.unwrap_or_default()
    }

    /// Fills unset fields from the defaults. Set fields are left untouched.
    pub fn merge_defaults(&mut self) {
        if self.theme.is_none() {
            self.theme = Some(Arc::new(DefaultTheme));
        }
        self.text_direction.get_or_insert(TextDirection::Ltr);
        self.brand.merge_defaults();
    }

    /// Returns a copy with defaults merged in.
    pub fn with_defaults(&self) -> Self {
        let mut merged = self.clone();
        merged.merge_defaults();
        merged
    }

    /// Parses a configuration from YAML.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed YAML and
    /// [`ConfigError::Theme`] if the named theme directory cannot be loaded.
    ///
    /// # Example
    ///
    /// ```rust
    /// use hermes_render::{EngineConfig, TextDirection};
    ///
    /// let config = EngineConfig::from_yaml(r#"
    /// text_direction: rtl
    /// brand:
    ///   name: Acme
    /// "#).unwrap();
    /// assert_eq!(config.brand.name.as_deref(), Some("Acme"));
    /// assert_eq!(config.text_direction(), TextDirection::Rtl);
    /// ```
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Self::parse(yaml, None)
    }

    /// Loads a configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the file cannot be read or parsed, or if
    /// its theme cannot be loaded.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content, Some(path))
    }

    fn parse(yaml: &str, path: Option<&Path>) -> Result<Self, ConfigError> {
        let file: ConfigFile = serde_yaml::from_str(yaml).map_err(|e| ConfigError::Parse {
            path: path.map(Path::to_path_buf),
            message: e.to_string(),
        })?;

        let theme: Option<Arc<dyn Theme>> = match file.theme.as_deref() {
            None | Some(DEFAULT_THEME_NAME) => None,
            Some(dir) => {
                let dir = match path.and_then(Path::parent) {
                    Some(base) => base.join(dir),
                    None => PathBuf::from(dir),
                };
                Some(Arc::new(CustomTheme::from_dir(dir)?))
            }
        };

        Ok(Self {
            theme,
            brand: file.brand,
            text_direction: file.text_direction,
            disable_css_inlining: file.disable_css_inlining,
        })
    }
}

/// On-disk shape of a configuration. The theme is referenced by name.
#[derive(Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    theme: Option<String>,
    brand: Branding,
    text_direction: Option<TextDirection>,
    disable_css_inlining: bool,
}

impl fmt::Debug for EngineConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineConfig")
            .field("theme", &self.theme.as_ref().map(|t| t.name().to_string()))
            .field("brand", &self.brand)
            .field("text_direction", &self.text_direction)
            .field("disable_css_inlining", &self.disable_css_inlining)
            .finish()
    }
}

/// Themes compare by name.
impl PartialEq for EngineConfig {
    fn eq(&self, other: &Self) -> bool {
        self.theme.as_ref().map(|t| t.name()) == other.theme.as_ref().map(|t| t.name())
            && self.brand == other.brand
            && self.text_direction == other.text_direction
            && self.disable_css_inlining == other.disable_css_inlining
    }
}
