//! Extraction of symbol alphabets from samples and tilesets

/// Weights and propagator handed to the solver
pub mod alphabet;
/// Overlapping-mode pattern extraction
pub mod patterns;
/// Tiled-mode symmetry expansion and neighbor rules
pub mod tileset;
