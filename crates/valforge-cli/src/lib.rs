//! CLI library components for valforge.

pub mod logging;
pub mod pipeline;
