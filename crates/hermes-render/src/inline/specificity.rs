//! Selector specificity.

use cssparser::{Parser, ParserInput, Token};

/// Specificity as `(ids, classes, types)`, compared lexicographically.
///
/// Attribute selectors and pseudo-classes count as classes; pseudo-elements
/// count as types.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Specificity(pub u32, pub u32, pub u32);

/// What the tokenizer learned about a single selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct SelectorInfo {
    pub specificity: Specificity,
    /// The selector uses a pseudo-class or pseudo-element and so cannot be
    /// expressed as an inline style.
    pub has_pseudo: bool,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Prev {
    Dot,
    Colon,
    DoubleColon,
    Other,
}

pub(crate) fn analyze(selector: &str) -> SelectorInfo {
    let mut input = ParserInput::new(selector);
    let mut parser = Parser::new(&mut input);

    let (mut ids, mut classes, mut types) = (0u32, 0u32, 0u32);
    let mut has_pseudo = false;
    let mut prev = Prev::Other;

    while let Ok(token) = parser.next_including_whitespace_and_comments() {
        prev = match (prev, token) {
            (_, Token::IDHash(_)) => {
                ids += 1;
                Prev::Other
            }
            (Prev::Colon, Token::Colon) => Prev::DoubleColon,
            (_, Token::Colon) => {
                has_pseudo = true;
                Prev::Colon
            }
            (_, Token::Delim('.')) => {
                classes += 1;
                Prev::Dot
            }
            (_, Token::SquareBracketBlock) => {
                classes += 1;
                Prev::Other
            }
            (Prev::Dot, Token::Ident(_)) => Prev::Other,
            (Prev::Colon, Token::Ident(_) | Token::Function(_)) => {
                classes += 1;
                Prev::Other
            }
            (Prev::DoubleColon, Token::Ident(_) | Token::Function(_)) => {
                types += 1;
                Prev::Other
            }
            (_, Token::Ident(_)) => {
                types += 1;
                Prev::Other
            }
            _ => Prev::Other,
        };
    }

    SelectorInfo {
        specificity: Specificity(ids, classes, types),
        has_pseudo,
    }
}
