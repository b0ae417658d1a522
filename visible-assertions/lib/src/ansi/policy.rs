use serde::Serialize;

use crate::discovery::detection::CapabilitySignal;
use crate::discovery::overrides::OverrideFlags;

/// Which rule settled an ANSI decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionReason {
    /// the absolute enable/disable key was set
    Absolute,
    /// a strip key was truthy
    Strip,
    /// a passthrough / force key was truthy
    Passthrough,
    /// at least one capability signal was positive
    Detected,
    /// nothing enabled styling
    NotDetected,
}

impl DecisionReason {
    pub fn name(self) -> &'static str {
        match self {
            DecisionReason::Absolute => "absolute",
            DecisionReason::Strip => "strip",
            DecisionReason::Passthrough => "passthrough",
            DecisionReason::Detected => "detected",
            DecisionReason::NotDetected => "not_detected",
        }
    }
}

/// Decide whether ANSI escape sequences should be emitted.
///
/// First match wins:
///
/// 1. the absolute `ansi_enabled` override, whatever its value
/// 2. `strip == Some(true)` disables
/// 3. `passthrough == Some(true)` enables
/// 4. any positive capability signal enables
///
/// ## Examples
///
/// ```
/// use visible_assertions::ansi::policy::should_emit_ansi;
/// use visible_assertions::discovery::detection::CapabilitySignal;
/// use visible_assertions::discovery::overrides::OverrideFlags;
///
/// let tty = CapabilitySignal { is_interactive_terminal: true, ..Default::default() };
/// assert!(should_emit_ansi(&OverrideFlags::none(), &tty));
/// assert!(!should_emit_ansi(&OverrideFlags::force_disabled(), &tty));
/// ```
pub fn should_emit_ansi(overrides: &OverrideFlags, signal: &CapabilitySignal) -> bool {
    decide(overrides, signal).0
}

/// Like [`should_emit_ansi`] but also reports which rule decided.
pub fn decide(overrides: &OverrideFlags, signal: &CapabilitySignal) -> (bool, DecisionReason) {
    let decision = if let Some(enabled) = overrides.ansi_enabled {
        (enabled, DecisionReason::Absolute)
    } else if overrides.strip == Some(true) {
        (false, DecisionReason::Strip)
    } else if overrides.passthrough == Some(true) {
        (true, DecisionReason::Passthrough)
    } else if signal.any() {
        (true, DecisionReason::Detected)
    } else {
        (false, DecisionReason::NotDetected)
    };

    tracing::trace!(
        enabled = decision.0,
        reason = ?decision.1,
        ?overrides,
        ?signal,
        "ANSI decision"
    );
    decision
}
