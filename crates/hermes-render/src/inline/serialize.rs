//! Writes the document back out with computed `style` attributes.

use std::fmt::Write as _;

use scraper::{ElementRef, Html, Node};

use super::stylesheet::{Declaration, Stylesheet};
use super::specificity::Specificity;
use super::{InlineError, InlineOptions, MAX_DEPTH};

/// Elements whose end tag is never written.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// Elements whose text content is written without escaping.
const RAW_TEXT_ELEMENTS: &[&str] = &[
    "style", "script", "xmp", "iframe", "noembed", "noframes", "plaintext",
];

/// Elements that receive `bgcolor` and `align` attributes.
const LEGACY_ATTRIBUTE_ELEMENTS: &[&str] = &["table", "td", "th"];

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Origin {
    Stylesheet,
    Attribute,
}

/// Cascade position of a declaration; later sorts win.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct Precedence {
    important: bool,
    origin: Origin,
    specificity: Specificity,
    order: usize,
    index: usize,
}

pub(crate) struct Serializer<'a> {
    sheet: &'a Stylesheet,
    options: &'a InlineOptions,
    out: String,
}

impl<'a> Serializer<'a> {
    pub(crate) fn new(sheet: &'a Stylesheet, options: &'a InlineOptions) -> Self {
        Self {
            sheet,
            options,
            out: String::new(),
        }
    }

    pub(crate) fn serialize(mut self, document: &Html) -> Result<String, InlineError> {
        for child in document.tree.root().children() {
            match child.value() {
                Node::Doctype(doctype) => {
                    self.out.push_str("<!DOCTYPE ");
                    self.out.push_str(doctype.name());
                    if !doctype.public_id().is_empty() {
                        let _ = write!(self.out, " PUBLIC \"{}\"", doctype.public_id());
                    }
                    if !doctype.system_id().is_empty() {
                        let _ = write!(self.out, " \"{}\"", doctype.system_id());
                    }
                    self.out.push('>');
                }
                Node::Comment(comment) => self.comment(comment),
                Node::Element(_) => {
                    if let Some(element) = ElementRef::wrap(child) {
                        self.element(element, 1)?;
                    }
                }
                _ => {}
            }
        }
        Ok(self.out)
    }

    fn comment(&mut self, text: &str) {
        self.out.push_str("<!--");
        self.out.push_str(text);
        self.out.push_str("-->");
    }

    fn element(&mut self, element: ElementRef<'_>, depth: usize) -> Result<(), InlineError> {
        if depth > MAX_DEPTH {
            return Err(InlineError::NestingTooDeep { limit: MAX_DEPTH });
        }

        let name = element.value().name();
        // Stylesheets are re-emitted once, at the end of <head>.
        if name == "style" {
            return Ok(());
        }

        let declarations = self.computed_style(element);
        self.start_tag(element, declarations.as_deref());

        if VOID_ELEMENTS.contains(&name) {
            return Ok(());
        }

        let raw_text = RAW_TEXT_ELEMENTS.contains(&name);
        for child in element.children() {
            match child.value() {
                Node::Text(text) if raw_text => self.out.push_str(text),
                Node::Text(text) => escape_text(&mut self.out, text),
                Node::Comment(comment) => self.comment(comment),
                Node::Element(_) => {
                    if let Some(child) = ElementRef::wrap(child) {
                        self.element(child, depth + 1)?;
                    }
                }
                _ => {}
            }
        }

        if name == "head" && !self.sheet.residual.is_empty() {
            self.out.push_str("<style type=\"text/css\">\n");
            for rule in &self.sheet.residual {
                self.out.push_str(rule);
                self.out.push('\n');
            }
            self.out.push_str("</style>");
        }

        let _ = write!(self.out, "</{name}>");
        Ok(())
    }

    fn start_tag(&mut self, element: ElementRef<'_>, declarations: Option<&[(String, String, bool)]>) {
        let value = element.value();
        let name = value.name();
        let _ = write!(self.out, "<{name}");

        let mut wrote_style = false;
        for (attr, attr_value) in value.attrs() {
            if attr == "class" && self.options.remove_classes {
                continue;
            }
            if attr == "style" {
                if let Some(declarations) = declarations {
                    self.style_attr(declarations);
                    wrote_style = true;
                    continue;
                }
            }
            write_attr(&mut self.out, attr, attr_value);
        }
        if let Some(declarations) = declarations {
            if !wrote_style {
                self.style_attr(declarations);
            }
            if self.options.css_to_attributes && LEGACY_ATTRIBUTE_ELEMENTS.contains(&name) {
                self.legacy_attributes(element, declarations);
            }
        }
        self.out.push('>');
    }

    fn style_attr(&mut self, declarations: &[(String, String, bool)]) {
        let mut style = String::new();
        for (property, value, important) in declarations {
            if !style.is_empty() {
                style.push(' ');
            }
            let _ = write!(style, "{property}: {value}");
            if *important && self.options.keep_bang_important {
                style.push_str(" !important");
            }
            style.push(';');
        }
        write_attr(&mut self.out, "style", &style);
    }

    fn legacy_attributes(&mut self, element: ElementRef<'_>, declarations: &[(String, String, bool)]) {
        for (property, attr) in [("background-color", "bgcolor"), ("text-align", "align")] {
            if element.value().attr(attr).is_some() {
                continue;
            }
            if let Some((_, value, _)) = declarations.iter().find(|(p, _, _)| p == property) {
                write_attr(&mut self.out, attr, value);
            }
        }
    }

    /// Resolves the cascade for one element. `None` when no stylesheet rule
    /// matches, in which case the element is written unchanged.
    fn computed_style(&self, element: ElementRef<'_>) -> Option<Vec<(String, String, bool)>> {
        let mut cascade: Vec<(Precedence, &Declaration)> = Vec::new();
        for rule in &self.sheet.rules {
            if !rule.selector.matches(&element) {
                continue;
            }
            for (index, declaration) in rule.declarations.iter().enumerate() {
                cascade.push((
                    Precedence {
                        important: declaration.important,
                        origin: Origin::Stylesheet,
                        specificity: rule.specificity,
                        order: rule.order,
                        index,
                    },
                    declaration,
                ));
            }
        }
        if cascade.is_empty() {
            return None;
        }

        let inline = element
            .value()
            .attr("style")
            .map(Stylesheet::parse_inline)
            .unwrap_or_default();
        for (index, declaration) in inline.iter().enumerate() {
            cascade.push((
                Precedence {
                    important: declaration.important,
                    origin: Origin::Attribute,
                    specificity: Specificity::default(),
                    order: 0,
                    index,
                },
                declaration,
            ));
        }

        cascade.sort_by_key(|(precedence, _)| *precedence);

        let mut resolved: Vec<(String, String, bool)> = Vec::with_capacity(cascade.len());
        for (_, declaration) in cascade {
            resolved.retain(|(property, _, _)| property != &declaration.property);
            resolved.push((
                declaration.property.clone(),
                declaration.value.clone(),
                declaration.important,
            ));
        }
        Some(resolved)
    }
}

fn write_attr(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            c => out.push(c),
        }
    }
    out.push('"');
}

fn escape_text(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            c => out.push(c),
        }
    }
}
