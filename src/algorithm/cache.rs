//! Weight statistics and the per-cell entropy cache
//!
//! The cache is kept consistent incrementally: every elimination subtracts
//! the symbol's weight terms and recomputes the cell's entropy from the sums,
//! so selection never rescans a cell's possibilities.

use crate::math::probability::{entropy_from_sums, weight_log_weight};

/// Immutable weight statistics of an alphabet
#[derive(Debug, Clone)]
pub struct WeightTable {
    weights: Vec<f64>,
    weight_log_weights: Vec<f64>,
    sum_of_weights: f64,
    sum_of_weight_log_weights: f64,
    starting_entropy: f64,
}

impl WeightTable {
    /// Precompute `w ln w` and the totals over all symbols
    pub fn new(weights: &[f64]) -> Self {
        let weight_log_weights: Vec<f64> = weights.iter().map(|&w| weight_log_weight(w)).collect();
        let sum_of_weights: f64 = weights.iter().sum();
        let sum_of_weight_log_weights: f64 = weight_log_weights.iter().sum();

        Self {
            weights: weights.to_vec(),
            weight_log_weights,
            sum_of_weights,
            sum_of_weight_log_weights,
            starting_entropy: entropy_from_sums(sum_of_weights, sum_of_weight_log_weights),
        }
    }

    /// Weight of a symbol, zero if out of range
    pub fn weight(&self, symbol: usize) -> f64 {
        self.weights.get(symbol).copied().unwrap_or(0.0)
    }

    /// `w ln w` of a symbol, zero if out of range
    pub fn weight_log_weight(&self, symbol: usize) -> f64 {
        self.weight_log_weights.get(symbol).copied().unwrap_or(0.0)
    }

    /// All symbol weights
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Sum of all weights
    pub const fn sum_of_weights(&self) -> f64 {
        self.sum_of_weights
    }

    /// Sum of `w ln w` over all symbols
    pub const fn sum_of_weight_log_weights(&self) -> f64 {
        self.sum_of_weight_log_weights
    }

    /// Entropy of a cell where every symbol is possible
    pub const fn starting_entropy(&self) -> f64 {
        self.starting_entropy
    }
}

/// Running weight sums and entropy of each cell
#[derive(Debug, Clone, Default)]
pub struct EntropyCache {
    sums_of_weights: Vec<f64>,
    sums_of_weight_log_weights: Vec<f64>,
    entropies: Vec<f64>,
}

impl EntropyCache {
    /// Allocate an all-zero cache for the given number of cells
    pub fn new(cells: usize) -> Self {
        Self {
            sums_of_weights: vec![0.0; cells],
            sums_of_weight_log_weights: vec![0.0; cells],
            entropies: vec![0.0; cells],
        }
    }

    /// Restore every cell to the all-possible sums
    pub fn reset(&mut self, table: &WeightTable) {
        self.sums_of_weights.fill(table.sum_of_weights());
        self.sums_of_weight_log_weights
            .fill(table.sum_of_weight_log_weights());
        self.entropies.fill(table.starting_entropy());
    }

    /// Subtract an eliminated symbol's contribution from a cell
    pub fn remove(&mut self, cell: usize, weight: f64, weight_log_weight: f64) {
        let (Some(sum), Some(sum_log), Some(entropy)) = (
            self.sums_of_weights.get_mut(cell),
            self.sums_of_weight_log_weights.get_mut(cell),
            self.entropies.get_mut(cell),
        ) else {
            return;
        };

        *sum -= weight;
        *sum_log -= weight_log_weight;
        *entropy = entropy_from_sums(*sum, *sum_log);
    }

    /// Cached entropy of a cell
    pub fn entropy(&self, cell: usize) -> f64 {
        self.entropies.get(cell).copied().unwrap_or(0.0)
    }

    /// Sum of the weights still possible in a cell
    pub fn sum_of_weights(&self, cell: usize) -> f64 {
        self.sums_of_weights.get(cell).copied().unwrap_or(0.0)
    }

    /// Sum of `w ln w` over the symbols still possible in a cell
    pub fn sum_of_weight_log_weights(&self, cell: usize) -> f64 {
        self.sums_of_weight_log_weights
            .get(cell)
            .copied()
            .unwrap_or(0.0)
    }

    /// Number of cells tracked
    pub fn len(&self) -> usize {
        self.entropies.len()
    }

    /// Test if no cells are tracked
    pub fn is_empty(&self) -> bool {
        self.entropies.is_empty()
    }
}
