//! Explicit ANSI overrides sourced from the environment.
//!
//! Overrides always outrank the heuristics in
//! [`detection`](crate::discovery::detection); see
//! [`should_emit_ansi`](crate::ansi::policy::should_emit_ansi) for the order
//! in which they apply.

use serde::{Deserialize, Serialize};

use super::detection::EnvSnapshot;

/// Absolute enable/disable switch. When present it decides on its own.
pub const ANSI_ENABLED_KEY: &str = "VISIBLE_ASSERTIONS_ANSI_ENABLED";
/// Strip switch (truthy value disables styling).
pub const ANSI_STRIP_KEY: &str = "VISIBLE_ASSERTIONS_ANSI_STRIP";
/// <https://no-color.org>: any non-empty value disables styling.
pub const NO_COLOR_KEY: &str = "NO_COLOR";
/// Equivalent keys which force styling on.
pub const PASSTHROUGH_KEYS: &[&str] = &[
    "VISIBLE_ASSERTIONS_ANSI_PASSTHROUGH",
    "VISIBLE_ASSERTIONS_ANSI_FORCE",
    "CLICOLOR_FORCE",
];

/// Tri-state override values; `None` means "not configured".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverrideFlags {
    /// absolute switch: `Some(true)` forces styling on, `Some(false)` off
    pub ansi_enabled: Option<bool>,
    pub strip: Option<bool>,
    pub passthrough: Option<bool>,
}

impl OverrideFlags {
    /// No override configured; heuristics decide.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn force_enabled() -> Self {
        Self {
            ansi_enabled: Some(true),
            ..Self::default()
        }
    }

    pub fn force_disabled() -> Self {
        Self {
            ansi_enabled: Some(false),
            ..Self::default()
        }
    }

    /// Read the override keys from the current process environment.
    pub fn from_env() -> Self {
        Self::from_snapshot(&EnvSnapshot::capture())
    }

    /// Read the override keys from an explicit environment.
    pub fn from_snapshot(env: &EnvSnapshot) -> Self {
        let ansi_enabled = env.get(ANSI_ENABLED_KEY).map(is_truthy);

        let strip_key = env.get(ANSI_STRIP_KEY).map(is_truthy);
        let no_color = env.get(NO_COLOR_KEY).map(|v| !v.is_empty());
        let strip = match (strip_key, no_color) {
            (None, None) => None,
            (a, b) => Some(a.unwrap_or(false) || b.unwrap_or(false)),
        };

        let passthrough = PASSTHROUGH_KEYS
            .iter()
            .filter_map(|key| env.get(key).map(is_truthy))
            .reduce(|acc, v| acc || v);

        Self {
            ansi_enabled,
            strip,
            passthrough,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.ansi_enabled.is_none() && self.strip.is_none() && self.passthrough.is_none()
    }
}

/// `1`, `true`, `yes` and `on` (any case) are truthy; everything else is not.
pub fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
