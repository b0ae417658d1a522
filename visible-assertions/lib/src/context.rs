//! The rendering context shared by every report call.
//!
//! A context owns the capability probe, the override source, the width
//! source and the output sink. Build one per harness (or per application)
//! and share it; it is `Send + Sync`.
//!
//! ```
//! use visible_assertions::context::RenderingContext;
//! use visible_assertions::ansi::segment::green;
//! use visible_assertions::sink::CaptureBuffer;
//!
//! let capture = CaptureBuffer::new();
//! let ctx = RenderingContext::builder()
//!     .ansi(false)
//!     .sink(capture.sink())
//!     .build();
//!
//! ctx.write_line(&ctx.render(&green("ok")));
//! assert_eq!(capture.contents(), "ok\n");
//! ```

use std::fmt;
use std::io::Write;
use std::sync::{Mutex, OnceLock, PoisonError};

use crate::ansi::markup::{self, MarkupError};
use crate::ansi::policy::{DecisionReason, decide};
use crate::ansi::segment::Segment;
use crate::config::AssertConfig;
use crate::discovery::detection::{
    CapabilityProbe, CapabilitySignal, DetectionMarkers, EnvironmentProbe, StaticProbe,
    terminal_width,
};
use crate::discovery::overrides::OverrideFlags;
use crate::sink::{Sink, stdout_sink};

/// Where override flags come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverrideSource {
    /// Re-read the process environment for every decision.
    Environment,
    /// Use these flags and never look at the environment.
    Fixed(OverrideFlags),
}

pub struct RenderingContext {
    probe: Box<dyn CapabilityProbe>,
    overrides: OverrideSource,
    width: Option<u16>,
    signal: OnceLock<CapabilitySignal>,
    sink: Mutex<Sink>,
}

impl fmt::Debug for RenderingContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderingContext")
            .field("probe", &self.probe)
            .field("overrides", &self.overrides)
            .field("width", &self.width)
            .field("signal", &self.signal.get())
            .finish_non_exhaustive()
    }
}

impl Default for RenderingContext {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl RenderingContext {
    /// Environment probe, environment overrides, detected width, stdout.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> RenderingContextBuilder {
        RenderingContextBuilder::default()
    }

    pub fn from_config(config: &AssertConfig) -> Self {
        let mut builder = Self::builder().markers(config.markers.clone());
        if let Some(overrides) = config.overrides {
            builder = builder.overrides(overrides);
        }
        if let Some(width) = config.terminal_width {
            builder = builder.width(width);
        }
        builder.build()
    }

    /// Probe the environment once; later calls return the same snapshot.
    ///
    /// Safe to call from any number of threads and any number of times.
    pub fn initialize(&self) -> CapabilitySignal {
        *self.signal.get_or_init(|| {
            let signal = self.probe.signal();
            tracing::debug!(
                is_interactive_terminal = signal.is_interactive_terminal,
                is_under_build_tool = signal.is_under_build_tool,
                is_under_ide = signal.is_under_ide,
                "Initialized rendering context"
            );
            signal
        })
    }

    pub fn signal(&self) -> CapabilitySignal {
        self.initialize()
    }

    pub fn override_source(&self) -> OverrideSource {
        self.overrides
    }

    /// The overrides in effect right now.
    pub fn overrides(&self) -> OverrideFlags {
        match self.overrides {
            OverrideSource::Environment => OverrideFlags::from_env(),
            OverrideSource::Fixed(flags) => flags,
        }
    }

    /// Whether escape sequences are emitted, decided fresh on every call.
    pub fn ansi_enabled(&self) -> bool {
        self.decision().0
    }

    pub fn decision(&self) -> (bool, DecisionReason) {
        decide(&self.overrides(), &self.initialize())
    }

    pub fn render(&self, segment: &Segment) -> String {
        segment.render(self.ansi_enabled())
    }

    pub fn render_markup(&self, source: &str) -> Result<String, MarkupError> {
        markup::render(source, self.ansi_enabled())
    }

    /// Configured width, else the detected one (80 when undetectable).
    pub fn terminal_width(&self) -> u16 {
        self.width.unwrap_or_else(terminal_width)
    }

    /// Replace the sink; applies to every subsequent write.
    pub fn set_sink(&self, sink: Sink) {
        *self.sink.lock().unwrap_or_else(PoisonError::into_inner) = sink;
    }

    pub fn write_line(&self, line: &str) {
        self.write_lines(&[line]);
    }

    /// Write several lines while holding the sink, so concurrent reports
    /// never interleave inside one another.
    pub fn write_lines<S: AsRef<str>>(&self, lines: &[S]) {
        let mut sink = self.sink.lock().unwrap_or_else(PoisonError::into_inner);
        for line in lines {
            if let Err(e) = writeln!(sink, "{}", line.as_ref()) {
                tracing::warn!(error = %e, "Failed to write report line");
                return;
            }
        }
        if let Err(e) = sink.flush() {
            tracing::warn!(error = %e, "Failed to flush report sink");
        }
    }
}

/// Builder for [`RenderingContext`].
#[derive(Default)]
pub struct RenderingContextBuilder {
    probe: Option<Box<dyn CapabilityProbe>>,
    markers: Option<DetectionMarkers>,
    overrides: Option<OverrideFlags>,
    width: Option<u16>,
    sink: Option<Sink>,
}

impl RenderingContextBuilder {
    /// Use a custom detection strategy.
    pub fn probe<P: CapabilityProbe + 'static>(mut self, probe: P) -> Self {
        self.probe = Some(Box::new(probe));
        self
    }

    /// Skip detection and use a fixed signal.
    pub fn signal(self, signal: CapabilitySignal) -> Self {
        self.probe(StaticProbe(signal))
    }

    /// Markers for the default environment probe; ignored with a custom probe.
    pub fn markers(mut self, markers: DetectionMarkers) -> Self {
        self.markers = Some(markers);
        self
    }

    /// Fixed overrides instead of reading the environment.
    pub fn overrides(mut self, overrides: OverrideFlags) -> Self {
        self.overrides = Some(overrides);
        self
    }

    /// Shorthand for a fixed absolute enable/disable override.
    pub fn ansi(self, enabled: bool) -> Self {
        self.overrides(OverrideFlags {
            ansi_enabled: Some(enabled),
            ..OverrideFlags::none()
        })
    }

    pub fn width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }

    pub fn sink(mut self, sink: Sink) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn build(self) -> RenderingContext {
        let probe = self.probe.unwrap_or_else(|| {
            Box::new(EnvironmentProbe::new(self.markers.unwrap_or_default()))
        });
        RenderingContext {
            probe,
            overrides: self
                .overrides
                .map_or(OverrideSource::Environment, OverrideSource::Fixed),
            width: self.width,
            signal: OnceLock::new(),
            sink: Mutex::new(self.sink.unwrap_or_else(stdout_sink)),
        }
    }
}
