//! Configuration for rendering contexts and the assertion surface.
//!
//! Everything has a default, so an empty YAML document is a valid config:
//!
//! ```yaml
//! equality_hint: type_annotated   # or `plain`
//! terminal_width: 100             # omit to detect
//! overrides:                      # omit to read the environment
//!   ansi_enabled: false
//! markers:
//!   build_tool_vars: [NEXTEST_RUN_ID, MY_CI_RUNNER]
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::discovery::detection::DetectionMarkers;
use crate::discovery::overrides::OverrideFlags;
use crate::error::ConfigError;

/// How `assert_equals` describes a mismatch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EqualityHint {
    /// `'A' does not equal expected 'B'`
    Plain,
    /// Like `Plain`, but when both values print the same text their type
    /// names are appended: `'1' [i64] does not equal expected '1' [i64]`
    #[default]
    TypeAnnotated,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssertConfig {
    pub equality_hint: EqualityHint,
    /// Fixed width for context rules; detected when `None`.
    pub terminal_width: Option<u16>,
    /// Fixed overrides; the environment is read on every render when `None`.
    pub overrides: Option<OverrideFlags>,
    pub markers: DetectionMarkers,
}

impl AssertConfig {
    pub fn from_yaml_str(source: &str) -> Result<Self, ConfigError> {
        if source.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(source)?)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "Loaded assertion config");
        Self::from_yaml_str(&source)
    }
}
