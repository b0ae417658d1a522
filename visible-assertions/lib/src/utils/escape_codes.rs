use std::sync::LazyLock;

use regex::Regex;
use unicode_width::UnicodeWidthStr;

/// CSI, OSC and other single-character escape sequences.
static ANSI_ESCAPE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"\x1b\[[\x30-\x3f]*[\x20-\x2f]*[\x40-\x7e]", // CSI sequences
        r"|\x1b\].*?(?:\x07|\x1b\\)",                  // OSC sequences (BEL or ST terminator)
        r"|\x1b[\x20-\x2f]*[\x40-\x5f]",               // Other escape sequences (Fe)
    ))
    .expect("Invalid ANSI escape regex")
});

/// Strips **all** escape codes out of the passed in string.
pub fn strip_escape_codes<T: AsRef<str>>(content: T) -> String {
    ANSI_ESCAPE_RE.replace_all(content.as_ref(), "").into_owned()
}

/// Display width in terminal columns, ignoring escape codes.
///
/// ```
/// use visible_assertions::utils::escape_codes::visual_width;
///
/// assert_eq!(visual_width("\x1b[31mred\x1b[0m"), 3);
/// assert_eq!(visual_width("┈┈"), 2);
/// ```
pub fn visual_width<T: AsRef<str>>(content: T) -> usize {
    strip_escape_codes(content).width()
}
