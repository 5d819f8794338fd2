//! The structured content model of one email.
//!
//! An [`Email`] describes *what* to say, never how it looks: the active theme
//! decides where the greeting, the intro sentences, the dictionary, the table
//! and the call-to-action buttons end up. Every field is optional; an empty
//! [`Body`] still renders a valid email (greeting, signature and footer come
//! from the defaults).
//!
//! ```rust
//! use hermes_render::{Action, Body, Button, Email};
//!
//! let email = Email::new(Body {
//!     name: Some("Jon Snow".into()),
//!     intros: vec!["Welcome to Hermes! We're very excited to have you on board.".into()],
//!     actions: vec![Action {
//!         instructions: "To get started with Hermes, please click here:".into(),
//!         button: Some(Button::new("Confirm your account", "https://hermes-example.com/confirm")),
//!         ..Action::default()
//!     }],
//!     outros: vec!["Need help, or have questions? Just reply to this email.".into()],
//!     ..Body::default()
//! });
//! assert_eq!(email.with_defaults().body.greeting.as_deref(), Some("Hi"));
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::markdown::markdown_to_html;

/// Greeting used when the body does not set one.
pub const DEFAULT_GREETING: &str = "Hi";
/// Signature used when the body does not set one.
pub const DEFAULT_SIGNATURE: &str = "Yours truly";

/// An email: currently just its body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Email {
    pub body: Body,
}

impl Email {
    /// Wraps a body.
    pub fn new(body: Body) -> Self {
        Self { body }
    }

    /// Fills unset fields from the defaults. Set fields are left untouched.
    pub fn merge_defaults(&mut self) {
        self.body.merge_defaults();
    }

    /// Returns a copy with defaults merged in.
    pub fn with_defaults(mut self) -> Self {
        self.merge_defaults();
        self
    }
}

/// The content of an email, in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Body {
    /// Name of the recipient.
    pub name: Option<String>,
    /// Sentences shown first.
    pub intros: Vec<String>,
    /// Ordered key/value pairs (parameters, settings, personal info).
    pub dictionary: Vec<Entry>,
    /// Tabular data such as a receipt or a pricing grid.
    pub table: Table,
    /// Calls to action: buttons and/or invite codes.
    pub actions: Vec<Action>,
    /// Sentences shown last.
    pub outros: Vec<String>,
    /// Greeting placed before the name. Defaults to `"Hi"`.
    pub greeting: Option<String>,
    /// Closing line. Defaults to `"Yours truly"`.
    pub signature: Option<String>,
    /// Replaces the greeting and name when set.
    pub title: Option<String>,
    /// Free-form content that replaces every structured field above except
    /// the greeting, title and signature.
    pub free_markdown: Option<Markdown>,
}

impl Body {
    /// Fills unset fields from the defaults. Set fields, including explicitly
    /// empty strings, are left untouched.
    pub fn merge_defaults(&mut self) {
        self.greeting
            .get_or_insert_with(|| DEFAULT_GREETING.to_string());
        self.signature
            .get_or_insert_with(|| DEFAULT_SIGNATURE.to_string());
    }
}

/// A key/value pair. A `Vec<Entry>` keeps insertion order, which a map would not.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub key: String,
    pub value: String,
}

impl Entry {
    /// Creates an entry from a key and a value.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Rows of key/value cells. The keys of the first row are the column headers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Table {
    pub data: Vec<Vec<Entry>>,
    pub columns: Columns,
}

impl Table {
    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Display metadata for table columns, keyed by column header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Columns {
    /// CSS widths such as `"20%"` or `"120px"`.
    pub custom_width: BTreeMap<String, String>,
    pub custom_alignment: BTreeMap<String, Align>,
}

/// Horizontal alignment of a table column.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    #[default]
    Left,
    Right,
    Center,
}

/// Something the reader can act on. A theme may show the button, the invite
/// code, or both.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Action {
    pub instructions: String,
    pub button: Option<Button>,
    /// Displayed verbatim, typically in a monospace box.
    pub invite_code: Option<String>,
}

/// A call-to-action button.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Button {
    /// Background color; the theme picks one when unset.
    pub color: Option<String>,
    /// Label color; the theme picks one when unset.
    pub text_color: Option<String>,
    pub text: String,
    pub link: String,
}

impl Button {
    /// Creates a button with theme colors.
    pub fn new(text: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            link: link.into(),
            ..Self::default()
        }
    }

    /// Sets the background color, e.g. `"#22BC66"`.
    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Sets the label color.
    pub fn text_color(mut self, color: impl Into<String>) -> Self {
        self.text_color = Some(color.into());
        self
    }
}

/// Markdown source text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Markdown(pub String);

impl Markdown {
    /// Wraps markdown source text.
    pub fn new(source: impl Into<String>) -> Self {
        Self(source.into())
    }

    /// The markdown source.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Converts to an HTML fragment.
    pub fn to_html(&self) -> String {
        markdown_to_html(&self.0)
    }
}

impl From<&str> for Markdown {
    fn from(source: &str) -> Self {
        Self::new(source)
    }
}

impl From<String> for Markdown {
    fn from(source: String) -> Self {
        Self(source)
    }
}
