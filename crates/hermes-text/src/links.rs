//! Joins annotated output lines, writing link targets after their text.
//!
//! The rich renderer reports links as annotations instead of footnotes. A
//! link's URL is written once, in parentheses, where its text ends, even when
//! the text wraps over several lines.

use html2text::render::text_renderer::{RichAnnotation, TaggedLine};

struct OpenLink<'a> {
    url: &'a str,
    text: String,
}

pub(crate) fn render_lines(lines: &[TaggedLine<Vec<RichAnnotation>>]) -> String {
    let mut out = String::new();
    let mut open: Option<OpenLink<'_>> = None;

    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            let first = line
                .tagged_strings()
                .next()
                .and_then(|piece| link_target(&piece.tag));
            if open.as_ref().map(|link| link.url) != first {
                close(&mut out, &mut open);
            }
            out.push('\n');
        }

        for piece in line.tagged_strings() {
            let target = link_target(&piece.tag);
            if open.as_ref().map(|link| link.url) != target {
                close(&mut out, &mut open);
            }
            if let Some(url) = target {
                open.get_or_insert_with(|| OpenLink {
                    url,
                    text: String::new(),
                })
                .text
                .push_str(&piece.s);
            }
            out.push_str(&piece.s);
        }
    }
    close(&mut out, &mut open);
    out
}

fn link_target(tags: &[RichAnnotation]) -> Option<&str> {
    tags.iter().find_map(|tag| match tag {
        RichAnnotation::Link(url) => Some(url.as_str()),
        _ => None,
    })
}

fn close(out: &mut String, open: &mut Option<OpenLink<'_>>) {
    let Some(link) = open.take() else {
        return;
    };
    if !names_target(link.text.trim(), link.url) {
        out.push_str(" (");
        out.push_str(link.url);
        out.push(')');
    }
}

/// Whether the visible text already is the link target.
fn names_target(text: &str, url: &str) -> bool {
    text == url || url.strip_prefix("mailto:") == Some(text)
}
