//! Pass/fail/info/warn/context lines.
//!
//! Every report is a single styled line (plus an optional hint line for
//! failures) written to the context's sink. A failure is always printed
//! before its [`AssertionError`] is handed back.

use std::sync::Arc;

use crate::ansi::segment::{bold, dim, green, red, white, yellow};
use crate::context::RenderingContext;
use crate::error::{AssertionError, Result};
use crate::utils::escape_codes::visual_width;

pub const TICK_MARK: &str = "\u{2714}";
pub const CROSS_MARK: &str = "\u{2718}";
pub const INFO_MARK: &str = "\u{2139}\u{fe0e}";
pub const WARN_MARK: &str = "\u{26a0}\u{fe0e}";
pub const CONTEXT_MARK: char = '\u{2508}';

const LINE_INDENT: &str = "        ";
const HINT_INDENT: &str = "            ";
const CONTEXT_LEAD: usize = 4;

/// What an assertion concluded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Pass,
    Fail { hint: Option<String> },
}

impl Outcome {
    pub fn from_bool(passed: bool) -> Self {
        if passed {
            Outcome::Pass
        } else {
            Outcome::Fail { hint: None }
        }
    }

    pub fn fail_with<H: Into<String>>(hint: H) -> Self {
        Outcome::Fail {
            hint: Some(hint.into()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Reporter {
    ctx: Arc<RenderingContext>,
}

impl Reporter {
    pub fn new(ctx: Arc<RenderingContext>) -> Self {
        Self { ctx }
    }

    pub fn rendering_context(&self) -> &Arc<RenderingContext> {
        &self.ctx
    }

    /// Print the outcome; a failure is returned as the error after printing.
    pub fn report(&self, message: &str, outcome: Outcome) -> Result {
        match outcome {
            Outcome::Pass => {
                self.pass(message);
                Ok(())
            }
            Outcome::Fail { hint } => Err(self.fail(message, hint)),
        }
    }

    pub fn pass(&self, message: &str) {
        let line = green(format!("{TICK_MARK} {message}"));
        self.ctx
            .write_line(&format!("{LINE_INDENT}{}", self.ctx.render(&line)));
    }

    /// Print a failure (and its hint) and build the matching error.
    pub fn fail(&self, message: &str, hint: Option<String>) -> AssertionError {
        let ansi = self.ctx.ansi_enabled();
        let mut lines = vec![format!(
            "{LINE_INDENT}{}",
            red(format!("{CROSS_MARK} {message}")).render(ansi)
        )];
        if let Some(hint) = &hint {
            lines.push(format!("{HINT_INDENT}{}", yellow(hint).render(ansi)));
        }
        self.ctx.write_lines(&lines);

        tracing::debug!(assertion = message, hint = hint.as_deref(), "Assertion failed");
        AssertionError::new(message, hint)
    }

    pub fn info(&self, message: &str) {
        let line = white(bold(format!("{INFO_MARK} {message}")));
        self.ctx
            .write_line(&format!("{LINE_INDENT}{}", self.ctx.render(&line)));
    }

    pub fn warn(&self, message: &str) {
        let line = yellow(bold(format!("{WARN_MARK} {message}")));
        self.ctx
            .write_line(&format!("{LINE_INDENT}{}", self.ctx.render(&line)));
    }

    /// A dim horizontal rule naming a new context.
    pub fn context(&self, label: &str) {
        self.context_indented(label, 0);
    }

    pub fn context_indented(&self, label: &str, indent: usize) {
        let rule = context_rule(label, indent, usize::from(self.ctx.terminal_width()));
        self.ctx.write_line(&self.ctx.render(&dim(rule)));
    }
}

/// Build the unstyled context rule: `indent` spaces, four markers, the
/// label, then markers up to `width` columns. Escape codes inside the
/// label take no columns.
///
/// ```
/// use visible_assertions::report::context_rule;
///
/// assert_eq!(context_rule("db", 2, 14), "  ┈┈┈┈ db ┈┈┈┈");
/// ```
pub fn context_rule(label: &str, indent: usize, width: usize) -> String {
    let mut rule = " ".repeat(indent);
    rule.extend(std::iter::repeat_n(CONTEXT_MARK, CONTEXT_LEAD));
    rule.push(' ');
    rule.push_str(label);
    rule.push(' ');

    let used = visual_width(&rule);
    if used < width {
        rule.extend(std::iter::repeat_n(CONTEXT_MARK, width - used));
    }
    rule
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::CaptureBuffer;

    fn reporter(ansi: bool) -> (Reporter, CaptureBuffer) {
        let capture = CaptureBuffer::new();
        let ctx = RenderingContext::builder()
            .ansi(ansi)
            .width(80)
            .sink(capture.sink())
            .build();
        (Reporter::new(Arc::new(ctx)), capture)
    }

    #[test]
    fn test_pass_line() {
        let (r, out) = reporter(false);
        assert!(r.report("it should be true", Outcome::Pass).is_ok());
        assert_eq!(out.contents(), "        ✔ it should be true\n");
    }

    #[test]
    fn test_fail_without_hint() {
        let (r, out) = reporter(false);
        let err = r.report("it should be true", Outcome::from_bool(false)).unwrap_err();
        assert_eq!(err.to_string(), "it should be true");
        assert_eq!(out.contents(), "        ✘ it should be true\n");
    }

    #[test]
    fn test_fail_with_hint_prints_hint_line() {
        let (r, out) = reporter(false);
        let err = r
            .report("it should be equal", Outcome::fail_with("'A' does not equal expected 'B'"))
            .unwrap_err();
        assert_eq!(err.to_string(), "it should be equal: 'A' does not equal expected 'B'");
        assert_eq!(
            out.contents(),
            "        ✘ it should be equal\n            'A' does not equal expected 'B'\n"
        );
    }

    #[test]
    fn test_ansi_styles() {
        let (r, out) = reporter(true);
        r.pass("ok");
        let _ = r.fail("bad", Some("why".into()));
        r.info("note");
        r.warn("careful");
        assert_eq!(
            out.contents(),
            concat!(
                "        \x1b[32m✔ ok\x1b[0m\n",
                "        \x1b[31m✘ bad\x1b[0m\n",
                "            \x1b[33mwhy\x1b[0m\n",
                "        \x1b[37m\x1b[1mℹ\u{fe0e} note\x1b[0m\x1b[0m\n",
                "        \x1b[33m\x1b[1m⚠\u{fe0e} careful\x1b[0m\x1b[0m\n",
            )
        );
    }

    #[test]
    fn test_info_and_warn_glyphs() {
        let (r, out) = reporter(false);
        r.info("This is an informational message");
        r.warn("This is a warning message");
        let text = out.contents();
        assert!(text.contains("\u{2139}\u{fe0e} This is an informational message"));
        assert!(text.contains("\u{26a0}\u{fe0e} This is a warning message"));
    }

    #[test]
    fn test_context_pads_to_width() {
        let (r, out) = reporter(false);
        r.context("This is the name of a new context");
        r.context_indented("This is the name of an indented context", 2);
        let text = out.contents();
        assert!(text.contains("┈┈┈┈ This is the name of a new context ┈┈┈┈"));
        assert!(text.contains("  ┈┈┈┈ This is the name of an indented context ┈┈┈┈┈"));
        for line in text.lines() {
            assert_eq!(visual_width(line), 80, "{line}");
        }
    }

    #[test]
    fn test_context_rule_starts_with_indent() {
        let rule = context_rule("label", 2, 80);
        assert!(rule.starts_with("  ┈┈┈┈ label ┈"));
        assert!(!rule.starts_with("   "));
        assert_eq!(visual_width(&rule), 80);
    }

    #[test]
    fn test_context_rule_with_long_label_has_no_padding() {
        let label = "x".repeat(100);
        let rule = context_rule(&label, 0, 80);
        assert_eq!(rule, format!("┈┈┈┈ {label} "));
    }

    #[test]
    fn test_context_rule_ignores_styled_label_codes() {
        let rule = context_rule("\x1b[1mdb\x1b[0m", 0, 12);
        assert_eq!(visual_width(&rule), 12);
        assert!(rule.ends_with(" \u{2508}\u{2508}\u{2508}\u{2508}"));
    }

    #[test]
    fn test_context_is_dim() {
        let (r, out) = reporter(true);
        r.context("c");
        let text = out.contents();
        assert!(text.starts_with("\x1b[2m┈┈┈┈ c ┈"));
        assert!(text.ends_with("\x1b[0m\n"));
    }
}
