/// Fixed-size symbol sets for building adjacency relations
pub mod bitset;
/// Weight statistics and per-cell entropy cache
pub mod cache;
/// Model lifecycle, run loop and propagation
pub mod executor;
/// Directional support counters
pub mod feasibility;
/// Directional adjacency table
pub mod propagation;
/// Cell selection heuristics and weighted symbol draws
pub mod selection;
/// Per-cell possibility bits
pub mod wave;
