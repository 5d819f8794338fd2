//! Parsing `<style>` blocks into inlinable rules and a residual stylesheet.
//!
//! Built on `cssparser`. Every selector of a selector list becomes its own
//! [`Rule`] with its specificity and source order. Anything that cannot be
//! written into a `style` attribute is kept as source text:
//!
//! - rules whose selector has a pseudo-class or pseudo-element
//!   (`a:hover`, `p::first-line`)
//! - every at-rule (`@media`, `@font-face`, `@import`, ...)

use cssparser::{
    AtRuleParser, CowRcStr, DeclarationParser, ParseError, ParseErrorKind, Parser, ParserInput,
    ParserState, QualifiedRuleParser, RuleBodyItemParser, RuleBodyParser, Token,
};
use scraper::Selector;

use super::specificity::{analyze, Specificity};
use super::InlineError;

/// A single `property: value` pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Declaration {
    /// Lowercased property name.
    pub property: String,
    pub value: String,
    pub important: bool,
}

/// One selector with the declarations of the rule it came from.
#[derive(Debug)]
pub(crate) struct Rule {
    pub selector: Selector,
    pub specificity: Specificity,
    /// Position among all selectors of all `<style>` blocks.
    pub order: usize,
    pub declarations: Vec<Declaration>,
}

/// Rules collected from every `<style>` block of a document.
#[derive(Debug, Default)]
pub(crate) struct Stylesheet {
    pub rules: Vec<Rule>,
    /// Source text of the rules that stay in a `<style>` block.
    pub residual: Vec<String>,
}

impl Stylesheet {
    /// Parses one `<style>` block and appends its rules.
    pub(crate) fn add(&mut self, css: &str) -> Result<(), InlineError> {
        let mut input = ParserInput::new(css);
        let mut parser = Parser::new(&mut input);
        let mut sheet = SheetParser { sheet: self };

        let mut rules = cssparser::StyleSheetParser::new(&mut parser, &mut sheet);
        loop {
            let start = rules.input.position();
            let Some(result) = rules.next() else { break };
            let kind = result.map_err(|(err, _)| convert_error(err))?;

            let source = rules.input.slice_from(start).trim();
            let terminated = match kind {
                RuleKind::Block => source.ends_with('}'),
                RuleKind::Statement => source.ends_with(';'),
            };
            if !terminated {
                return Err(InlineError::UnterminatedRule {
                    rule: truncate(source),
                });
            }
        }
        Ok(())
    }

    /// Parses the declarations of a `style` attribute. Invalid declarations
    /// are skipped.
    pub(crate) fn parse_inline(style: &str) -> Vec<Declaration> {
        let mut input = ParserInput::new(style);
        let mut parser = Parser::new(&mut input);
        parse_declarations(&mut parser)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum RuleKind {
    /// A rule with a `{ ... }` block.
    Block,
    /// An at-rule ending in `;`.
    Statement,
}

#[derive(Debug)]
enum SheetError {
    InvalidSelector { selector: String, message: String },
}

fn convert_error(err: ParseError<'_, SheetError>) -> InlineError {
    match err.kind {
        ParseErrorKind::Custom(SheetError::InvalidSelector { selector, message }) => {
            InlineError::InvalidSelector { selector, message }
        }
        ParseErrorKind::Basic(kind) => InlineError::InvalidStylesheet {
            line: err.location.line + 1,
            column: err.location.column,
            message: format!("{kind:?}"),
        },
    }
}

fn truncate(source: &str) -> String {
    const MAX: usize = 60;
    match source.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &source[..idx]),
        None => source.to_string(),
    }
}

/// Consumes tokens up to the next top-level comma, or to the end when
/// `split_on_comma` is false, and returns their source text without comments.
/// The flag is true when a comma was consumed.
fn take_component(input: &mut Parser<'_, '_>, split_on_comma: bool) -> (String, bool) {
    let mut text = String::new();
    loop {
        let before = input.position();
        let token = match input.next_including_whitespace_and_comments() {
            Ok(token) => token.clone(),
            Err(_) => return (text, false),
        };
        match token {
            Token::Comma if split_on_comma => return (text, true),
            Token::Comment(_) => {
                text.push(' ');
                continue;
            }
            Token::Function(_)
            | Token::ParenthesisBlock
            | Token::SquareBracketBlock
            | Token::CurlyBracketBlock => {
                let _ = input.parse_nested_block(skip_block);
            }
            _ => {}
        }
        text.push_str(input.slice(before..input.position()));
    }
}

fn skip_block<'i>(block: &mut Parser<'i, '_>) -> Result<(), ParseError<'i, ()>> {
    while block.next_including_whitespace_and_comments().is_ok() {}
    Ok(())
}

/// Consumes the rest of `input` and returns its source text.
fn consume_raw<'i>(input: &mut Parser<'i, '_>) -> &'i str {
    let start = input.position();
    while input.next_including_whitespace_and_comments().is_ok() {}
    input.slice_from(start).trim()
}

fn block_source(prelude: &str, body: &str) -> String {
    if prelude.is_empty() {
        format!("{{ {body} }}")
    } else {
        format!("{prelude} {{ {body} }}")
    }
}

struct SheetParser<'s> {
    sheet: &'s mut Stylesheet,
}

impl<'i> QualifiedRuleParser<'i> for SheetParser<'_> {
    type Prelude = Vec<String>;
    type QualifiedRule = RuleKind;
    type Error = SheetError;

    fn parse_prelude<'t>(
        &mut self,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Prelude, ParseError<'i, Self::Error>> {
        let mut selectors = Vec::new();
        loop {
            let (selector, more) = take_component(input, true);
            selectors.push(selector.trim().to_string());
            if !more {
                break;
            }
        }

        if selectors.iter().any(String::is_empty) {
            return Err(input.new_custom_error(SheetError::InvalidSelector {
                selector: selectors.join(", "),
                message: "empty selector in selector list".to_string(),
            }));
        }
        Ok(selectors)
    }

    fn parse_block<'t>(
        &mut self,
        selectors: Self::Prelude,
        _start: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::QualifiedRule, ParseError<'i, Self::Error>> {
        let state = input.state();
        let body = consume_raw(input);
        input.reset(&state);
        let declarations = parse_declarations(input);

        for selector in selectors {
            let info = analyze(&selector);
            if info.has_pseudo {
                self.sheet.residual.push(block_source(&selector, body));
                continue;
            }
            let parsed = match Selector::parse(&selector).map_err(|e| e.to_string()) {
                Ok(parsed) => parsed,
                Err(message) => {
                    return Err(input.new_custom_error(SheetError::InvalidSelector {
                        selector,
                        message,
                    }));
                }
            };
            let order = self.sheet.rules.len();
            self.sheet.rules.push(Rule {
                selector: parsed,
                specificity: info.specificity,
                order,
                declarations: declarations.clone(),
            });
        }
        Ok(RuleKind::Block)
    }
}

impl<'i> AtRuleParser<'i> for SheetParser<'_> {
    type Prelude = (String, String);
    type AtRule = RuleKind;
    type Error = SheetError;

    fn parse_prelude<'t>(
        &mut self,
        name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Prelude, ParseError<'i, Self::Error>> {
        let prelude = consume_raw(input);
        Ok((format!("@{}", name.as_ref()), prelude.to_string()))
    }

    fn rule_without_block(
        &mut self,
        (name, prelude): Self::Prelude,
        _start: &ParserState,
    ) -> Result<Self::AtRule, ()> {
        self.sheet.residual.push(format!("{name} {prelude};"));
        Ok(RuleKind::Statement)
    }

    fn parse_block<'t>(
        &mut self,
        (name, prelude): Self::Prelude,
        _start: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::AtRule, ParseError<'i, Self::Error>> {
        let body = consume_raw(input);
        let head = if prelude.is_empty() {
            name
        } else {
            format!("{name} {prelude}")
        };
        self.sheet.residual.push(block_source(&head, body));
        Ok(RuleKind::Block)
    }
}

fn parse_declarations(input: &mut Parser<'_, '_>) -> Vec<Declaration> {
    let mut decl_parser = DeclarationListParser;
    RuleBodyParser::new(input, &mut decl_parser)
        .flatten()
        .collect()
}

struct DeclarationListParser;

impl<'i> DeclarationParser<'i> for DeclarationListParser {
    type Declaration = Declaration;
    type Error = ();

    fn parse_value<'t>(
        &mut self,
        name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Declaration, ParseError<'i, Self::Error>> {
        let (raw, _) = take_component(input, false);
        let (value, important) = split_important(raw.trim());
        if value.is_empty() {
            return Err(input.new_custom_error(()));
        }
        Ok(Declaration {
            property: name.as_ref().to_ascii_lowercase(),
            value: value.to_string(),
            important,
        })
    }
}

impl<'i> AtRuleParser<'i> for DeclarationListParser {
    type Prelude = ();
    type AtRule = Declaration;
    type Error = ();
}

impl<'i> QualifiedRuleParser<'i> for DeclarationListParser {
    type Prelude = ();
    type QualifiedRule = Declaration;
    type Error = ();
}

impl<'i> RuleBodyItemParser<'i, Declaration, ()> for DeclarationListParser {
    fn parse_declarations(&self) -> bool {
        true
    }

    fn parse_qualified(&self) -> bool {
        false
    }
}

/// Splits a trailing `!important` off a declaration value.
fn split_important(value: &str) -> (&str, bool) {
    let trimmed = value.trim_end();
    let lower = trimmed.to_ascii_lowercase();
    if let Some(rest) = lower.strip_suffix("important") {
        if let Some(rest) = rest.trim_end().strip_suffix('!') {
            return (trimmed[..rest.len()].trim_end(), true);
        }
    }
    (trimmed, false)
}
