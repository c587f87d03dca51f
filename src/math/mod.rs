//! Mathematical utilities for the solver

/// Weighted sampling and entropy arithmetic
pub mod probability;
