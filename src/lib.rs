//! Wave function collapse for bitmap and tilemap synthesis
//!
//! Symbols are extracted either as overlapping N×N patterns from a sample
//! image or as oriented tiles from a tileset with neighbor rules. The solver
//! then fills an output grid by repeatedly collapsing the most constrained
//! cell and propagating adjacency constraints until the grid is decided or a
//! contradiction is reached.

#![forbid(unsafe_code)]

/// Wave state, propagation, selection and the solver
pub mod algorithm;
/// Alphabet extraction from samples and tilesets
pub mod analysis;
/// Model construction, running and rendering in one place
pub mod generator;
/// Input/output operations and error handling
pub mod io;
/// Sampling and entropy arithmetic
pub mod math;
/// Grid geometry and square pattern transforms
pub mod spatial;

pub use algorithm::executor::{Model, ModelState, RunOutcome};
pub use generator::Generator;
pub use io::error::{Result, WfcError};
