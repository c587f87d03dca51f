//! Per-cell possibility bits and remaining-symbol counts

use bitvec::prelude::*;

/// Which symbols are still possible in each cell
///
/// Bits are stored flat, `cell * symbols + symbol`. A cleared bit is never set
/// again until [`Wave::reset`].
#[derive(Debug, Clone)]
pub struct Wave {
    possible: BitVec,
    sums_of_ones: Vec<usize>,
    symbols: usize,
}

impl Wave {
    /// Create a wave with every symbol possible in every cell
    pub fn new(cells: usize, symbols: usize) -> Self {
        Self {
            possible: bitvec![1; cells * symbols],
            sums_of_ones: vec![symbols; cells],
            symbols,
        }
    }

    /// Make every symbol possible again
    pub fn reset(&mut self) {
        self.possible.fill(true);
        self.sums_of_ones.fill(self.symbols);
    }

    /// Test whether a symbol is still possible in a cell
    pub fn is_possible(&self, cell: usize, symbol: usize) -> bool {
        symbol < self.symbols && self.possible.get(cell * self.symbols + symbol).as_deref() == Some(&true)
    }

    /// Clear a possibility bit
    ///
    /// Returns `false` without touching anything if the symbol was already gone.
    pub fn eliminate(&mut self, cell: usize, symbol: usize) -> bool {
        if !self.is_possible(cell, symbol) {
            return false;
        }
        self.possible.set(cell * self.symbols + symbol, false);
        if let Some(sum) = self.sums_of_ones.get_mut(cell) {
            *sum = sum.saturating_sub(1);
        }
        true
    }

    /// Number of symbols still possible in a cell
    pub fn remaining(&self, cell: usize) -> usize {
        self.sums_of_ones.get(cell).copied().unwrap_or(0)
    }

    /// Still-possible symbols of a cell in ascending order
    pub fn possible_symbols(&self, cell: usize) -> impl Iterator<Item = usize> + '_ {
        let start = cell * self.symbols;
        self.possible
            .get(start..start + self.symbols)
            .into_iter()
            .flat_map(|bits| bits.iter_ones())
    }

    /// Lowest still-possible symbol of a cell
    pub fn first_possible(&self, cell: usize) -> Option<usize> {
        self.possible_symbols(cell).next()
    }

    /// Number of symbols in the alphabet
    pub const fn symbol_count(&self) -> usize {
        self.symbols
    }

    /// Number of cells tracked
    pub fn cell_count(&self) -> usize {
        self.sums_of_ones.len()
    }
}
