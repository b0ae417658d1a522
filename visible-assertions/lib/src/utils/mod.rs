//! Utility functions (escape codes)

pub mod escape_codes;
