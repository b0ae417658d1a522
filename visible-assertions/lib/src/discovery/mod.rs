//! Terminal capability discovery
//!
//! Best-effort heuristics about the hosting environment (terminal, build
//! tool, IDE) plus the explicit overrides that outrank them.

pub mod detection;
pub mod overrides;
