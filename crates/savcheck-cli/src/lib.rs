//! CLI library components for savcheck.

pub mod export;
pub mod logging;
