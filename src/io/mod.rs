//! Input/output: resource parsing, rendering, the batch front end and errors

/// Command-line arguments and the batch runner
pub mod cli;
/// Defaults and per-model configuration
pub mod configuration;
/// Error type shared by the crate
pub mod error;
/// ARGB bitmaps and PNG conversion
pub mod image;
/// Tracing subscriber setup
pub mod logging;
/// Progress bars for batch runs
pub mod progress;
/// Batch description parsing
pub mod samples;
/// Tileset description parsing
pub mod tileset;
/// Rendering model state to bitmaps and text
pub mod visualization;
