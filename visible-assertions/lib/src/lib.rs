//! # visible-assertions
//!
//! Assertions that print what they check.
//!
//! Every assertion writes a line to an output sink (stdout by default): a
//! green `✔ message` when it passes, a red `✘ message` plus an optional
//! yellow hint when it fails. Failures are then returned as
//! [`AssertionError`] so a test can propagate them with `?`.
//!
//! Whether those lines carry ANSI escape sequences is decided per render
//! from explicit overrides first, then from what the environment looks like
//! (an interactive terminal, a build tool, an IDE console).
//!
//! ## Quick Start
//!
//! ```
//! use visible_assertions::VisibleAssertions;
//!
//! let va = VisibleAssertions::default();
//!
//! va.context("arithmetic");
//! va.assert_equals("two plus two", 4, 2 + 2).unwrap();
//! va.assert_true("ten is even", 10 % 2 == 0).unwrap();
//! va.info("all done");
//! ```
//!
//! ## Modules
//!
//! - [`assertions`] - `VisibleAssertions`, the assertion surface
//! - [`report`] - Pass/fail/info/warn/context line layout
//! - [`context`] - `RenderingContext`: probe, overrides, width and sink
//! - [`discovery`] - Capability detection
//!   - [`discovery::detection`] - Terminal, build tool and IDE signals
//!   - [`discovery::overrides`] - Environment override flags
//! - [`ansi`] - Styled segments, inline markup and the emit decision
//! - [`matcher`] - Matchers for `assert_that`
//! - [`value`] - How values are shown inside hints
//! - [`config`] - YAML-loadable configuration
//! - [`sink`] - Output sinks, including an in-memory capture buffer
//! - [`utils`] - Escape code utilities

pub mod ansi;
pub mod assertions;
pub mod config;
pub mod context;
pub mod discovery;
pub mod error;
pub mod matcher;
pub mod report;
pub mod sink;
pub mod utils;
pub mod value;

pub use assertions::{BoxError, VisibleAssertions};
pub use config::{AssertConfig, EqualityHint};
pub use context::RenderingContext;
pub use error::{AssertionError, ConfigError, Result};
pub use sink::CaptureBuffer;
