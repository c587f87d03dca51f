use crate::{
    algorithm::bitset::SymbolSet,
    io::error::{Result, WfcError, invalid_source},
    spatial::grid::{DIRECTIONS, opposite},
};

/// Directional adjacency table consumed by the solver
///
/// `compatible(d, t)` lists, in ascending order, every symbol that may occupy
/// the neighbor at direction `d` of a cell holding `t`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Propagator {
    sets: [Vec<Vec<usize>>; DIRECTIONS],
    symbols: usize,
}

impl Propagator {
    /// Build from sparse per-direction lists
    ///
    /// Each list is sorted and deduplicated.
    ///
    /// # Errors
    ///
    /// Returns an error if the directions disagree on the symbol count or an
    /// entry references a symbol outside the alphabet
    pub fn new(mut sets: [Vec<Vec<usize>>; DIRECTIONS]) -> Result<Self> {
        let symbols = sets.first().map_or(0, Vec::len);
        for (direction, lists) in sets.iter_mut().enumerate() {
            if lists.len() != symbols {
                return Err(invalid_source(&format!(
                    "direction {direction} lists {} symbols, expected {symbols}",
                    lists.len()
                )));
            }
            for list in lists.iter_mut() {
                list.sort_unstable();
                list.dedup();
                if let Some(&index) = list.iter().find(|&&index| index >= symbols) {
                    return Err(WfcError::InvalidSymbolIndex { index, symbols });
                }
            }
        }

        Ok(Self { sets, symbols })
    }

    /// Compile dense per-direction membership sets into sparse lists
    ///
    /// # Errors
    ///
    /// Returns an error if the dense sets are inconsistently sized
    pub fn from_dense(dense: &[Vec<SymbolSet>; DIRECTIONS]) -> Result<Self> {
        let sets = std::array::from_fn(|direction| {
            dense
                .get(direction)
                .map(|sets| sets.iter().map(SymbolSet::to_vec).collect())
                .unwrap_or_default()
        });
        Self::new(sets)
    }

    /// Number of symbols covered by the table
    pub const fn symbol_count(&self) -> usize {
        self.symbols
    }

    /// Symbols allowed next to `symbol` in the given direction
    pub fn compatible(&self, direction: usize, symbol: usize) -> &[usize] {
        self.sets
            .get(direction)
            .and_then(|lists| lists.get(symbol))
            .map_or(&[][..], Vec::as_slice)
    }

    /// Size of a propagator entry
    pub fn support_count(&self, direction: usize, symbol: usize) -> usize {
        self.compatible(direction, symbol).len()
    }

    /// Entries with no compatible neighbor, as `(direction, symbol)` pairs
    pub fn isolated(&self) -> Vec<(usize, usize)> {
        let mut isolated = Vec::new();
        for (direction, lists) in self.sets.iter().enumerate() {
            for (symbol, list) in lists.iter().enumerate() {
                if list.is_empty() {
                    isolated.push((direction, symbol));
                }
            }
        }
        isolated
    }

    /// Whether every relation is mirrored by the reverse direction
    ///
    /// `b ∈ compatible(d, a)` exactly when `a ∈ compatible(opposite(d), b)`.
    pub fn is_symmetric(&self) -> bool {
        (0..DIRECTIONS).all(|direction| {
            let Some(reverse) = opposite(direction) else {
                return false;
            };
            (0..self.symbols).all(|symbol| {
                self.compatible(direction, symbol).iter().all(|&other| {
                    self.compatible(reverse, other).binary_search(&symbol).is_ok()
                })
            })
        })
    }
}
