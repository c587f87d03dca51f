//! Spatial data structures shared by the extractors and the solver
//!
//! This module contains:
//! - Output grid geometry and neighbor lookup
//! - Square pattern rotation and reflection

/// Grid geometry, direction offsets and wraparound
pub mod grid;
/// Rotation and reflection of square patterns
pub mod tiles;

pub use grid::Grid;
