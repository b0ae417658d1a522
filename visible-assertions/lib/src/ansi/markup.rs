//! Inline style markup.
//!
//! A styled span is written `@|codes text|@`, where `codes` is a comma
//! separated list of [`Style`] names and is followed by a single space.
//! Everything outside a span is plain text. Multiple codes nest left to
//! right, so `@|white,bold hi|@` is `white(bold("hi"))` and renders exactly
//! like the procedural form.
//!
//! ```
//! use visible_assertions::ansi::markup;
//!
//! assert_eq!(markup::render("say @|red hi|@!", false).unwrap(), "say hi!");
//! assert_eq!(
//!     markup::render("@|red hi|@", true).unwrap(),
//!     "\x1b[31mhi\x1b[0m"
//! );
//! ```

use std::sync::LazyLock;

use regex::Regex;

use super::segment::{Segment, render_all};
use super::style::Style;

static SPAN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)@\|([A-Za-z0-9_,\-]+) (.*?)\|@").expect("Invalid markup span regex")
});

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MarkupError {
    /// A span names a style which is not in the palette.
    #[error("unknown style `{name}` at byte {offset}")]
    UnknownStyle { name: String, offset: usize },
    /// A span was opened but never closed.
    #[error("unterminated style span starting at byte {offset}")]
    Unterminated { offset: usize },
}

/// Parse markup into sibling segments.
pub fn parse(source: &str) -> Result<Vec<Segment>, MarkupError> {
    let mut segments = Vec::new();
    let mut cursor = 0;

    for caps in SPAN_RE.captures_iter(source) {
        let (Some(whole), Some(codes), Some(text)) = (caps.get(0), caps.get(1), caps.get(2)) else {
            continue;
        };

        push_text(&mut segments, source, cursor, whole.start())?;

        let mut styles = Vec::new();
        for name in codes.as_str().split(',').filter(|n| !n.is_empty()) {
            let style = name.parse::<Style>().map_err(|_| MarkupError::UnknownStyle {
                name: name.to_string(),
                offset: codes.start(),
            })?;
            styles.push(style);
        }

        let inner = styles
            .into_iter()
            .rev()
            .fold(Segment::text(text.as_str()), |acc, style| {
                Segment::styled(style, acc)
            });
        segments.push(inner);
        cursor = whole.end();
    }

    push_text(&mut segments, source, cursor, source.len())?;
    Ok(segments)
}

/// Parse and render in one step.
pub fn render(source: &str, ansi: bool) -> Result<String, MarkupError> {
    Ok(render_all(&parse(source)?, ansi))
}

fn push_text(
    segments: &mut Vec<Segment>,
    source: &str,
    start: usize,
    end: usize,
) -> Result<(), MarkupError> {
    let text = &source[start..end];
    if text.is_empty() {
        return Ok(());
    }
    if let Some(offset) = text.find("@|") {
        return Err(MarkupError::Unterminated {
            offset: start + offset,
        });
    }
    segments.push(Segment::text(text));
    Ok(())
}
