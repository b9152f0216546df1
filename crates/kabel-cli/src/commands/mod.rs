//! CLI command implementations.

pub mod compile;
pub mod ops;
pub mod patches;
