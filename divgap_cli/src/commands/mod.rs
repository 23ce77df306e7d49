//! CLI command implementations.

pub mod analyze;
