//! The data a theme template is rendered against.
//!
//! A [`RenderContext`] borrows a merged [`EngineConfig`] and a merged
//! [`Email`] for the duration of one render call. It exposes two top-level
//! values to templates:
//!
//! | Path | Value |
//! |------|-------|
//! | `engine_config.theme` | theme name |
//! | `engine_config.text_direction` | `"ltr"` or `"rtl"` |
//! | `engine_config.brand.{name,link,logo,copyright,trouble_text}` | strings |
//! | `email.body.{name,greeting,signature,title}` | strings |
//! | `email.body.{intros,outros}` | lists of strings |
//! | `email.body.dictionary` | list of `{key, value}` |
//! | `email.body.table.data` | list of rows, each a list of `{key, value}` |
//! | `email.body.table.columns.{custom_width,custom_alignment}` | maps keyed by column |
//! | `email.body.actions` | list of `{instructions, button, invite_code}` |
//! | `email.body.actions[].button` | `{color, text_color, text, link}` or none |
//! | `email.body.has_free_markdown` | whether free markdown replaces the structured blocks |
//! | `email.body.free_markdown_html` | HTML converted from the free markdown |
//!
//! Unset optional strings are exposed as `""`, so `{% if email.body.title %}`
//! works and `{{ email.body.title }}` prints nothing. A path outside this
//! table is an error at render time.

use serde::Serialize;

use crate::config::EngineConfig;
use crate::email::{Action, Body, Button, Email, Entry, Table};

/// Template data for one render call.
#[derive(Debug, Serialize)]
pub struct RenderContext<'a> {
    pub engine_config: ConfigView<'a>,
    pub email: EmailView<'a>,
}

impl<'a> RenderContext<'a> {
    /// Builds the context. Both values are expected to have their defaults
    /// merged already; unset fields render as empty.
    pub fn new(config: &'a EngineConfig, theme_name: &'a str, email: &'a Email) -> Self {
        Self {
            engine_config: ConfigView::new(config, theme_name),
            email: EmailView {
                body: BodyView::new(&email.body),
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ConfigView<'a> {
    pub theme: &'a str,
    pub text_direction: &'static str,
    pub brand: BrandView<'a>,
}

impl<'a> ConfigView<'a> {
    fn new(config: &'a EngineConfig, theme_name: &'a str) -> Self {
        let brand = &config.brand;
        Self {
            theme: theme_name,
            text_direction: config.text_direction().as_str(),
            brand: BrandView {
                name: text(&brand.name),
                link: text(&brand.link),
                logo: text(&brand.logo),
                copyright: text(&brand.copyright),
                trouble_text: text(&brand.trouble_text),
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BrandView<'a> {
    pub name: &'a str,
    pub link: &'a str,
    pub logo: &'a str,
    pub copyright: &'a str,
    pub trouble_text: &'a str,
}

#[derive(Debug, Serialize)]
pub struct EmailView<'a> {
    pub body: BodyView<'a>,
}

#[derive(Debug, Serialize)]
pub struct BodyView<'a> {
    pub name: &'a str,
    pub intros: &'a [String],
    pub dictionary: &'a [Entry],
    pub table: &'a Table,
    pub actions: Vec<ActionView<'a>>,
    pub outros: &'a [String],
    pub greeting: &'a str,
    pub signature: &'a str,
    pub title: &'a str,
    /// Set whenever the body carries free markdown, even blank markdown.
    pub has_free_markdown: bool,
    pub free_markdown_html: String,
}

impl<'a> BodyView<'a> {
    fn new(body: &'a Body) -> Self {
        Self {
            name: text(&body.name),
            intros: &body.intros,
            dictionary: &body.dictionary,
            table: &body.table,
            actions: body.actions.iter().map(ActionView::new).collect(),
            outros: &body.outros,
            greeting: text(&body.greeting),
            signature: text(&body.signature),
            title: text(&body.title),
            has_free_markdown: body.free_markdown.is_some(),
            free_markdown_html: body
                .free_markdown
                .as_ref()
                .map(|md| md.to_html())
                .unwrap_or_default(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ActionView<'a> {
    pub instructions: &'a str,
    pub button: Option<ButtonView<'a>>,
    pub invite_code: &'a str,
}

impl<'a> ActionView<'a> {
    fn new(action: &'a Action) -> Self {
        Self {
            instructions: &action.instructions,
            button: action.button.as_ref().map(ButtonView::new),
            invite_code: text(&action.invite_code),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ButtonView<'a> {
    pub color: &'a str,
    pub text_color: &'a str,
    pub text: &'a str,
    pub link: &'a str,
}

impl<'a> ButtonView<'a> {
    fn new(button: &'a Button) -> Self {
        Self {
            color: text(&button.color),
            text_color: text(&button.text_color),
            text: &button.text,
            link: &button.link,
        }
    }
}

fn text(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::email::Markdown;
    use serde_json::json;

    #[test]
    fn test_unset_fields_serialize_as_empty_strings() {
        let config = EngineConfig::default().with_defaults();
        let email = Email::default().with_defaults();
        let ctx = RenderContext::new(&config, "default", &email);
        let value = serde_json::to_value(&ctx).unwrap();

        assert_eq!(value["engine_config"]["brand"]["name"], json!("Hermes"));
        assert_eq!(value["engine_config"]["brand"]["logo"], json!(""));
        assert_eq!(value["engine_config"]["text_direction"], json!("ltr"));
        assert_eq!(value["engine_config"]["theme"], json!("default"));
        assert_eq!(value["email"]["body"]["greeting"], json!("Hi"));
        assert_eq!(value["email"]["body"]["title"], json!(""));
        assert_eq!(value["email"]["body"]["intros"], json!([]));
        assert_eq!(value["email"]["body"]["free_markdown_html"], json!(""));
        assert_eq!(value["email"]["body"]["has_free_markdown"], json!(false));
    }

    #[test]
    fn test_actions_expose_button_or_none() {
        let email = Email::new(Body {
            actions: vec![
                Action {
                    instructions: "Click:".into(),
                    button: Some(Button::new("Go", "https://x.test")),
                    invite_code: None,
                },
                Action {
                    instructions: "Copy:".into(),
                    button: None,
                    invite_code: Some("123456".into()),
                },
            ],
            ..Body::default()
        });
        let config = EngineConfig::default();
        let ctx = RenderContext::new(&config, "default", &email);
        let value = serde_json::to_value(&ctx).unwrap();
        let actions = &value["email"]["body"]["actions"];

        assert_eq!(actions[0]["button"]["text"], json!("Go"));
        assert_eq!(actions[0]["button"]["color"], json!(""));
        assert_eq!(actions[0]["invite_code"], json!(""));
        assert_eq!(actions[1]["button"], json!(null));
        assert_eq!(actions[1]["invite_code"], json!("123456"));
    }

    #[test]
    fn test_free_markdown_is_converted() {
        let email = Email::new(Body {
            free_markdown: Some(Markdown::from("**hi**")),
            ..Body::default()
        });
        let config = EngineConfig::default();
        let ctx = RenderContext::new(&config, "default", &email);
        assert_eq!(
            ctx.email.body.free_markdown_html,
            "<p><strong>hi</strong></p>\n"
        );
        assert!(ctx.email.body.has_free_markdown);
    }

    #[test]
    fn test_blank_free_markdown_is_still_present() {
        let email = Email::new(Body {
            free_markdown: Some(Markdown::from("   \n")),
            ..Body::default()
        });
        let config = EngineConfig::default();
        let ctx = RenderContext::new(&config, "default", &email);
        assert!(ctx.email.body.has_free_markdown);
        assert_eq!(ctx.email.body.free_markdown_html, "");
    }

    #[test]
    fn test_table_keeps_row_and_cell_order() {
        let email = Email::new(Body {
            table: Table {
                data: vec![
                    vec![Entry::new("Item", "Golang"), Entry::new("Price", "$10.99")],
                    vec![Entry::new("Item", "Hermes"), Entry::new("Price", "$1.99")],
                ],
                ..Table::default()
            },
            ..Body::default()
        });
        let config = EngineConfig::default();
        let ctx = RenderContext::new(&config, "default", &email);
        let value = serde_json::to_value(&ctx).unwrap();
        let data = &value["email"]["body"]["table"]["data"];

        assert_eq!(data[0][0]["value"], json!("Golang"));
        assert_eq!(data[1][1]["value"], json!("$1.99"));
    }
}
