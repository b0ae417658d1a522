use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Resets every attribute and color.
pub const RESET: &str = "\x1b[0m";

/// The fixed palette: 8 foreground colors, their background variants and
/// four text attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Style {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BgBlack,
    BgRed,
    BgGreen,
    BgYellow,
    BgBlue,
    BgMagenta,
    BgCyan,
    BgWhite,
    /// high intensity
    Bold,
    /// low intensity
    Dim,
    Underline,
    /// reverse video
    Reverse,
}

impl Style {
    pub const ALL: [Style; 20] = [
        Style::Black,
        Style::Red,
        Style::Green,
        Style::Yellow,
        Style::Blue,
        Style::Magenta,
        Style::Cyan,
        Style::White,
        Style::BgBlack,
        Style::BgRed,
        Style::BgGreen,
        Style::BgYellow,
        Style::BgBlue,
        Style::BgMagenta,
        Style::BgCyan,
        Style::BgWhite,
        Style::Bold,
        Style::Dim,
        Style::Underline,
        Style::Reverse,
    ];

    /// The escape sequence which turns this style on.
    pub fn code(self) -> &'static str {
        match self {
            Style::Black => "\x1b[30m",
            Style::Red => "\x1b[31m",
            Style::Green => "\x1b[32m",
            Style::Yellow => "\x1b[33m",
            Style::Blue => "\x1b[34m",
            Style::Magenta => "\x1b[35m",
            Style::Cyan => "\x1b[36m",
            Style::White => "\x1b[37m",
            Style::BgBlack => "\x1b[40m",
            Style::BgRed => "\x1b[41m",
            Style::BgGreen => "\x1b[42m",
            Style::BgYellow => "\x1b[43m",
            Style::BgBlue => "\x1b[44m",
            Style::BgMagenta => "\x1b[45m",
            Style::BgCyan => "\x1b[46m",
            Style::BgWhite => "\x1b[47m",
            Style::Bold => "\x1b[1m",
            Style::Dim => "\x1b[2m",
            Style::Underline => "\x1b[4m",
            Style::Reverse => "\x1b[7m",
        }
    }

    /// Canonical markup name (`bg_red`, `bold`, ...)
    pub fn name(self) -> &'static str {
        match self {
            Style::Black => "black",
            Style::Red => "red",
            Style::Green => "green",
            Style::Yellow => "yellow",
            Style::Blue => "blue",
            Style::Magenta => "magenta",
            Style::Cyan => "cyan",
            Style::White => "white",
            Style::BgBlack => "bg_black",
            Style::BgRed => "bg_red",
            Style::BgGreen => "bg_green",
            Style::BgYellow => "bg_yellow",
            Style::BgBlue => "bg_blue",
            Style::BgMagenta => "bg_magenta",
            Style::BgCyan => "bg_cyan",
            Style::BgWhite => "bg_white",
            Style::Bold => "bold",
            Style::Dim => "dim",
            Style::Underline => "underline",
            Style::Reverse => "reverse",
        }
    }

    pub fn is_background(self) -> bool {
        matches!(
            self,
            Style::BgBlack
                | Style::BgRed
                | Style::BgGreen
                | Style::BgYellow
                | Style::BgBlue
                | Style::BgMagenta
                | Style::BgCyan
                | Style::BgWhite
        )
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a style name is not part of the palette.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown style `{0}`")]
pub struct UnknownStyle(pub String);

impl FromStr for Style {
    type Err = UnknownStyle;

    /// Accepts the canonical names plus the aliases used by other markup
    /// dialects (`bright`, `faint`, `negative`, `bg-red`, ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        let style = match normalized.as_str() {
            "bright" | "intensity_bold" => Style::Bold,
            "faint" | "intensity_faint" => Style::Dim,
            "negative" | "reverse_video" => Style::Reverse,
            "underscore" => Style::Underline,
            other => {
                let other = other.strip_prefix("background_").map(|c| format!("bg_{c}"));
                let key = other.as_deref().unwrap_or(normalized.as_str());
                return Style::ALL
                    .into_iter()
                    .find(|style| style.name() == key)
                    .ok_or_else(|| UnknownStyle(s.to_string()));
            }
        };
        Ok(style)
    }
}
