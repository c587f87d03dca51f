use bitvec::prelude::*;

/// Fixed-size bitset over symbol indices `0..capacity`
///
/// Used while assembling dense adjacency relations before they are
/// compiled into sparse propagator lists.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SymbolSet {
    bits: BitVec,
    capacity: usize,
}

impl SymbolSet {
    /// Create a set with no symbols present
    pub fn new(capacity: usize) -> Self {
        Self {
            bits: bitvec![0; capacity],
            capacity,
        }
    }

    /// Insert a symbol; indices past the capacity are ignored
    pub fn insert(&mut self, symbol: usize) {
        if symbol < self.capacity {
            self.bits.set(symbol, true);
        }
    }

    /// Test symbol membership
    pub fn contains(&self, symbol: usize) -> bool {
        self.bits.get(symbol).as_deref() == Some(&true)
    }

    /// Members in ascending order
    pub fn to_vec(&self) -> Vec<usize> {
        self.bits.iter_ones().collect()
    }
}
