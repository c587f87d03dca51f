use crate::algorithm::propagation::Propagator;
use crate::spatial::grid::{DIRECTIONS, opposite};
use ndarray::Array3;

/// Remaining support of each (cell, symbol) pair from each direction
///
/// `count(cell, t, d)` is how many symbols still possible in the neighbor at
/// direction `d` of `cell` admit `t`. A count reaching zero means `t` has
/// lost all support from that side and must be eliminated.
#[derive(Debug, Clone)]
pub struct CompatibilityCounters {
    counts: Array3<i32>,
}

impl CompatibilityCounters {
    /// Allocate zeroed counters with shape `(cells, symbols, 4)`
    pub fn new(cells: usize, symbols: usize) -> Self {
        Self {
            counts: Array3::zeros((cells, symbols, DIRECTIONS)),
        }
    }

    /// Reset each counter to the size of the opposite propagator entry
    pub fn reset(&mut self, propagator: &Propagator) {
        for ((_, symbol, direction), count) in self.counts.indexed_iter_mut() {
            *count = opposite(direction).map_or(0, |reverse| {
                propagator.support_count(reverse, symbol) as i32
            });
        }
    }

    /// Current support count
    pub fn get(&self, cell: usize, symbol: usize, direction: usize) -> i32 {
        self.counts
            .get((cell, symbol, direction))
            .copied()
            .unwrap_or(0)
    }

    /// Decrement a counter and return its new value
    ///
    /// Out-of-range indices return `-1`, which never triggers an elimination.
    pub fn decrement(&mut self, cell: usize, symbol: usize, direction: usize) -> i32 {
        self.counts
            .get_mut((cell, symbol, direction))
            .map_or(-1, |count| {
                *count -= 1;
                *count
            })
    }

    /// Zero all four counters of an eliminated symbol
    pub fn clear_symbol(&mut self, cell: usize, symbol: usize) {
        for direction in 0..DIRECTIONS {
            if let Some(count) = self.counts.get_mut((cell, symbol, direction)) {
                *count = 0;
            }
        }
    }
}
