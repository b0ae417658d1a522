//! Recursive styled text.
//!
//! A [`Segment`] is either plain text or a style applied to an ordered list
//! of child segments. When rendered with ANSI enabled every direct child of a
//! styled node is wrapped on its own:
//!
//! ```text
//! green("Hello ", underline("world"), " again")
//!   => GREEN "Hello " RESET
//!      GREEN UNDERLINE "world" RESET RESET
//!      GREEN " again" RESET
//! ```
//!
//! A nested style never resumes its parent after its own reset; the parent
//! code is re-opened in front of each child instead.
//!
//! ## Examples
//!
//! ```
//! use visible_assertions::ansi::segment::{green, underline};
//!
//! let text = green(["Hello ".into(), underline("world"), " again".into()]);
//! assert_eq!(text.render(false), "Hello world again");
//! assert_eq!(
//!     text.render(true),
//!     "\x1b[32mHello \x1b[0m\x1b[32m\x1b[4mworld\x1b[0m\x1b[0m\x1b[32m again\x1b[0m"
//! );
//! ```

use super::style::{RESET, Style};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Text(String),
    Styled { style: Style, children: Vec<Segment> },
}

/// The ordered children of a styled segment.
///
/// Exists so the style constructors accept a single value or a list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Children(pub Vec<Segment>);

impl Segment {
    pub fn text<T: Into<String>>(content: T) -> Segment {
        Segment::Text(content.into())
    }

    pub fn styled<C: Into<Children>>(style: Style, children: C) -> Segment {
        Segment::Styled {
            style,
            children: children.into().0,
        }
    }

    /// Render to a string, with escape sequences when `ansi` is true.
    pub fn render(&self, ansi: bool) -> String {
        let mut out = String::new();
        self.render_into(&mut out, ansi);
        out
    }

    /// The leaf text only, depth first.
    pub fn plain_text(&self) -> String {
        self.render(false)
    }

    fn render_into(&self, out: &mut String, ansi: bool) {
        match self {
            Segment::Text(text) => out.push_str(text),
            Segment::Styled { style, children } => {
                for child in children {
                    if ansi {
                        out.push_str(style.code());
                        child.render_into(out, ansi);
                        out.push_str(RESET);
                    } else {
                        child.render_into(out, ansi);
                    }
                }
            }
        }
    }
}

/// Render a sequence of sibling segments (e.g. the output of a markup parse).
pub fn render_all(segments: &[Segment], ansi: bool) -> String {
    let mut out = String::new();
    for segment in segments {
        segment.render_into(&mut out, ansi);
    }
    out
}

impl From<&str> for Segment {
    fn from(value: &str) -> Self {
        Segment::Text(value.to_string())
    }
}

impl From<String> for Segment {
    fn from(value: String) -> Self {
        Segment::Text(value)
    }
}

impl From<&String> for Segment {
    fn from(value: &String) -> Self {
        Segment::Text(value.clone())
    }
}

impl From<Segment> for Children {
    fn from(value: Segment) -> Self {
        Children(vec![value])
    }
}

impl From<&str> for Children {
    fn from(value: &str) -> Self {
        Children(vec![value.into()])
    }
}

impl From<String> for Children {
    fn from(value: String) -> Self {
        Children(vec![value.into()])
    }
}

impl From<&String> for Children {
    fn from(value: &String) -> Self {
        Children(vec![value.into()])
    }
}

impl From<Vec<Segment>> for Children {
    fn from(value: Vec<Segment>) -> Self {
        Children(value)
    }
}

impl<T: Into<Segment>, const N: usize> From<[T; N]> for Children {
    fn from(value: [T; N]) -> Self {
        Children(value.into_iter().map(Into::into).collect())
    }
}

macro_rules! style_constructors {
    ($($(#[$meta:meta])* $name:ident => $style:ident),* $(,)?) => {
        $(
            $(#[$meta])*
            pub fn $name<C: Into<Children>>(children: C) -> Segment {
                Segment::styled(Style::$style, children)
            }
        )*
    };
}

style_constructors! {
    black => Black,
    red => Red,
    green => Green,
    yellow => Yellow,
    blue => Blue,
    magenta => Magenta,
    cyan => Cyan,
    white => White,
    bg_black => BgBlack,
    bg_red => BgRed,
    bg_green => BgGreen,
    bg_yellow => BgYellow,
    bg_blue => BgBlue,
    bg_magenta => BgMagenta,
    bg_cyan => BgCyan,
    bg_white => BgWhite,
    /// high intensity
    bold => Bold,
    /// low intensity
    dim => Dim,
    underline => Underline,
    /// reverse video
    reverse => Reverse,
}
