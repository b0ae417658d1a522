use std::env;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use terminal_size::{terminal_size, Height, Width};

/// Width assumed when the terminal cannot be queried (not a tty, piped, etc.)
pub const DEFAULT_WIDTH: u16 = 80;
/// Height assumed when the terminal cannot be queried
pub const DEFAULT_HEIGHT: u16 = 24;

/// The three independent facts about the hosting environment which
/// decide whether styled output is worth emitting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilitySignal {
    /// stdout is attached to an interactive terminal
    pub is_interactive_terminal: bool,
    /// the process was launched by a known build tool / test harness
    pub is_under_build_tool: bool,
    /// the process was launched from a known IDE
    pub is_under_ide: bool,
}

impl CapabilitySignal {
    /// Whether any single signal is positive.
    pub fn any(&self) -> bool {
        self.is_under_ide || self.is_under_build_tool || self.is_interactive_terminal
    }
}

/// The environment markers used by the build-tool and IDE heuristics.
///
/// Every field can be replaced through configuration so a CI system (or a
/// different toolchain) can be recognized without touching the policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionMarkers {
    /// Variables whose mere presence means "running under a build tool".
    pub build_tool_vars: Vec<String>,
    /// Variables a build tool sets to the path of its own executable.
    pub launcher_vars: Vec<String>,
    /// Executable name (without extension) a launcher variable must point at.
    pub launcher_marker: String,
    /// Variable holding the IDE's runner configuration string.
    pub ide_config_var: String,
    /// Substring identifying the IDE inside `ide_config_var`.
    pub ide_config_marker: String,
    /// Key prefix of the variables an IDE exports to child processes.
    pub ide_key_prefix: String,
    /// Substring an IDE variable's value must contain.
    pub ide_value_marker: String,
}

impl Default for DetectionMarkers {
    fn default() -> Self {
        Self {
            build_tool_vars: vec!["NEXTEST_RUN_ID".to_string(), "CARGO_MAKE_TASK".to_string()],
            launcher_vars: vec!["CARGO".to_string()],
            launcher_marker: "cargo".to_string(),
            ide_config_var: "TERMINAL_EMULATOR".to_string(),
            ide_config_marker: "JetBrains".to_string(),
            ide_key_prefix: "VSCODE_".to_string(),
            ide_value_marker: "vscode".to_string(),
        }
    }
}

/// A point-in-time copy of the process environment.
///
/// Non-unicode entries are skipped rather than treated as errors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSnapshot {
    vars: Vec<(String, String)>,
}

impl EnvSnapshot {
    /// Capture the current process environment.
    pub fn capture() -> Self {
        let vars = env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect();
        Self { vars }
    }

    /// Build a snapshot from explicit key/value pairs.
    ///
    /// ```
    /// use visible_assertions::discovery::detection::EnvSnapshot;
    ///
    /// let env = EnvSnapshot::from_pairs([("NO_COLOR", "1")]);
    /// assert_eq!(env.get("NO_COLOR"), Some("1"));
    /// ```
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// The narrow seam between the decision policy and the heuristics.
///
/// Implementations must never panic; anything that goes wrong answers `false`.
pub trait CapabilityProbe: fmt::Debug + Send + Sync {
    fn is_interactive_terminal(&self) -> bool;
    fn is_under_build_tool(&self) -> bool;
    fn is_under_ide(&self) -> bool;

    fn signal(&self) -> CapabilitySignal {
        CapabilitySignal {
            is_interactive_terminal: self.is_interactive_terminal(),
            is_under_build_tool: self.is_under_build_tool(),
            is_under_ide: self.is_under_ide(),
        }
    }
}

/// Probe backed by the real process environment and stdout.
#[derive(Debug, Clone, Default)]
pub struct EnvironmentProbe {
    markers: DetectionMarkers,
}

impl EnvironmentProbe {
    pub fn new(markers: DetectionMarkers) -> Self {
        Self { markers }
    }

    pub fn markers(&self) -> &DetectionMarkers {
        &self.markers
    }
}

impl CapabilityProbe for EnvironmentProbe {
    fn is_interactive_terminal(&self) -> bool {
        is_tty()
    }

    fn is_under_build_tool(&self) -> bool {
        build_tool_detected(&self.markers, &EnvSnapshot::capture())
    }

    fn is_under_ide(&self) -> bool {
        ide_detected(&self.markers, &EnvSnapshot::capture())
    }

    fn signal(&self) -> CapabilitySignal {
        let env = EnvSnapshot::capture();
        CapabilitySignal {
            is_interactive_terminal: is_tty(),
            is_under_build_tool: build_tool_detected(&self.markers, &env),
            is_under_ide: ide_detected(&self.markers, &env),
        }
    }
}

/// Probe which answers with a fixed signal, e.g. one injected by CI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StaticProbe(pub CapabilitySignal);

impl CapabilityProbe for StaticProbe {
    fn is_interactive_terminal(&self) -> bool {
        self.0.is_interactive_terminal
    }

    fn is_under_build_tool(&self) -> bool {
        self.0.is_under_build_tool
    }

    fn is_under_ide(&self) -> bool {
        self.0.is_under_ide
    }

    fn signal(&self) -> CapabilitySignal {
        self.0
    }
}

/// Whether stdout is an interactive terminal.
///
/// Windows is not queried at all; its console has no reliable equivalent
/// of `isatty` for our purposes.
#[cfg(unix)]
pub fn is_tty() -> bool {
    // SAFETY: isatty only inspects the descriptor; failures are reported as 0.
    let result = unsafe { libc::isatty(libc::STDOUT_FILENO) };
    tracing::debug!(result, source = "isatty", "Queried stdout for a terminal");
    result != 0
}

#[cfg(windows)]
pub fn is_tty() -> bool {
    false
}

#[cfg(not(any(unix, windows)))]
pub fn is_tty() -> bool {
    use std::io::IsTerminal;

    std::io::stdout().is_terminal()
}

/// Whether the current process runs under a known build tool, using the
/// default markers.
pub fn is_under_build_tool() -> bool {
    build_tool_detected(&DetectionMarkers::default(), &EnvSnapshot::capture())
}

/// Whether the current process runs under a known IDE, using the default
/// markers.
pub fn is_under_ide() -> bool {
    ide_detected(&DetectionMarkers::default(), &EnvSnapshot::capture())
}

/// Build-tool heuristic over an explicit environment.
///
/// Each marker variable is resolved by name in order; the first one found
/// wins. Failing that, a launcher variable counts when its value is a path
/// to the launcher executable (`CARGO=/home/me/.cargo/bin/cargo`).
pub fn build_tool_detected(markers: &DetectionMarkers, env: &EnvSnapshot) -> bool {
    for var in &markers.build_tool_vars {
        if env.contains(var) {
            tracing::debug!(marker = %var, "Detected build tool from marker variable");
            return true;
        }
    }

    if markers.launcher_marker.is_empty() {
        return false;
    }

    let found = markers.launcher_vars.iter().find(|var| {
        env.get(var)
            .and_then(|value| Path::new(value).file_stem())
            .is_some_and(|stem| stem == markers.launcher_marker.as_str())
    });

    match found {
        Some(var) => {
            tracing::debug!(key = %var, "Detected build tool from launcher variable");
            true
        }
        None => false,
    }
}

/// IDE heuristic over an explicit environment.
pub fn ide_detected(markers: &DetectionMarkers, env: &EnvSnapshot) -> bool {
    if !markers.ide_config_marker.is_empty() {
        if let Some(config) = env.get(&markers.ide_config_var) {
            if config.contains(&markers.ide_config_marker) {
                tracing::debug!(var = %markers.ide_config_var, "Detected IDE from runner configuration");
                return true;
            }
        }
    }

    if markers.ide_key_prefix.is_empty() || markers.ide_value_marker.is_empty() {
        return false;
    }

    env.iter().any(|(key, value)| {
        key.starts_with(&markers.ide_key_prefix) && value.contains(&markers.ide_value_marker)
    })
}

/// The width of the terminal (in characters)
pub fn terminal_width() -> u16 {
    dimensions().0
}

/// The height of the terminal (in characters)
pub fn terminal_height() -> u16 {
    dimensions().1
}

/// the terminal's dimensions (width, height)
pub fn dimensions() -> (u16, u16) {
    size_or_default(terminal_size())
}

/// Falls back to 80x24 when the size is unknown or degenerate.
fn size_or_default(size: Option<(Width, Height)>) -> (u16, u16) {
    size.map(|(Width(w), Height(h))| (w, h))
        .filter(|(w, h)| *w > 0 && *h > 0)
        .unwrap_or((DEFAULT_WIDTH, DEFAULT_HEIGHT))
}
