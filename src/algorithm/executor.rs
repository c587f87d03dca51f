use crate::{
    algorithm::cache::{EntropyCache, WeightTable},
    algorithm::feasibility::CompatibilityCounters,
    algorithm::selection::{self, Heuristic},
    algorithm::wave::Wave,
    analysis::alphabet::Alphabet,
    io::error::{Result, invalid_source},
    spatial::Grid,
    spatial::grid::DIRECTIONS,
};
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Lifecycle of a model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelState {
    /// Constructed, buffers not yet allocated
    Uninitialized,
    /// Buffers allocated, no run finished yet
    Ready,
    /// A run is in progress
    Running,
    /// The last run decided every eligible cell
    Solved,
    /// The last run eliminated every symbol from some cell
    Contradiction,
    /// The last run used up its step budget with undecided cells left
    StepLimit,
}

/// Result of a single run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every eligible cell holds exactly one symbol
    Solved,
    /// Some cell ran out of symbols
    Contradiction,
    /// The step budget ran out first
    StepLimitReached,
}

impl RunOutcome {
    /// Whether the run should be treated as a success
    ///
    /// Exhausting the step budget without a contradiction counts as success.
    pub const fn is_success(self) -> bool {
        !matches!(self, Self::Contradiction)
    }
}

// Mutable per-run storage, kept apart from the model's immutable tables so
// propagation can borrow both at once
#[derive(Debug, Clone)]
struct RunBuffers {
    wave: Wave,
    counters: CompatibilityCounters,
    entropy: EntropyCache,
    stack: Vec<(usize, usize)>,
    observed: Vec<Option<usize>>,
    distribution: Vec<f64>,
    scan_cursor: usize,
    contradiction: bool,
}

impl RunBuffers {
    fn allocate(cells: usize, symbols: usize) -> Self {
        Self {
            wave: Wave::new(cells, symbols),
            counters: CompatibilityCounters::new(cells, symbols),
            entropy: EntropyCache::new(cells),
            stack: Vec::with_capacity(cells * symbols),
            observed: vec![None; cells],
            distribution: Vec::with_capacity(symbols),
            scan_cursor: 0,
            contradiction: false,
        }
    }

    fn ban(&mut self, weights: &WeightTable, cell: usize, symbol: usize) {
        if !self.wave.eliminate(cell, symbol) {
            return;
        }
        self.counters.clear_symbol(cell, symbol);
        self.stack.push((cell, symbol));
        self.entropy.remove(
            cell,
            weights.weight(symbol),
            weights.weight_log_weight(symbol),
        );
        if self.wave.remaining(cell) == 0 {
            self.contradiction = true;
        }
    }
}

/// Constraint solver over a grid of cells and an alphabet of symbols
///
/// Each run repeatedly picks an undecided cell, collapses it to one symbol
/// drawn by weight, and propagates the consequences through the compatibility
/// counters until every eligible cell is decided or some cell runs out of
/// symbols. All randomness comes from the generator handed to the run, so a
/// seed fully determines the result.
#[derive(Debug, Clone)]
pub struct Model {
    alphabet: Alphabet,
    weights: WeightTable,
    grid: Grid,
    heuristic: Heuristic,
    ground: bool,
    state: ModelState,
    buffers: RunBuffers,
}

impl Model {
    /// Create a model over the given alphabet and grid
    ///
    /// With `ground` set, the last symbol is pinned to the last row and
    /// removed from every other row at the start of each run.
    ///
    /// # Errors
    ///
    /// Returns an error if the alphabet has no symbols
    pub fn new(alphabet: Alphabet, grid: Grid, heuristic: Heuristic, ground: bool) -> Result<Self> {
        if alphabet.symbol_count() == 0 {
            return Err(invalid_source(&"cannot build a model over an empty alphabet"));
        }
        let weights = WeightTable::new(alphabet.weights());
        let symbols = alphabet.symbol_count();

        Ok(Self {
            alphabet,
            weights,
            grid,
            heuristic,
            ground,
            state: ModelState::Uninitialized,
            buffers: RunBuffers::allocate(0, symbols),
        })
    }

    /// Allocate the per-run buffers; a no-op once initialized
    pub fn init(&mut self) {
        if self.state != ModelState::Uninitialized {
            return;
        }
        self.buffers = RunBuffers::allocate(self.grid.len(), self.alphabet.symbol_count());
        self.state = ModelState::Ready;
    }

    /// Reset the wave to the all-possible state
    ///
    /// Applies the ground constraint when enabled and propagates it. Returns
    /// `false` if that propagation hits a contradiction. Clearing twice in a
    /// row leaves the same state as clearing once.
    pub fn clear(&mut self) -> bool {
        self.init();

        let buffers = &mut self.buffers;
        buffers.wave.reset();
        buffers.counters.reset(self.alphabet.propagator());
        buffers.entropy.reset(&self.weights);
        buffers.observed.fill(None);
        buffers.stack.clear();
        buffers.scan_cursor = 0;
        buffers.contradiction = false;

        if !self.ground {
            return true;
        }

        let floor = self.alphabet.symbol_count() - 1;
        let bottom = self.grid.height() - 1;
        for x in 0..self.grid.width() {
            let cell = self.grid.index(x, bottom);
            for symbol in 0..floor {
                buffers.ban(&self.weights, cell, symbol);
            }
            for y in 0..bottom {
                buffers.ban(&self.weights, self.grid.index(x, y), floor);
            }
        }

        self.propagate()
    }

    /// Run with a generator seeded from an integer
    ///
    /// `limit` caps the number of collapse steps; `None` runs to completion.
    pub fn run(&mut self, seed: u64, limit: Option<usize>) -> RunOutcome {
        let mut rng = StdRng::seed_from_u64(seed);
        self.run_with_rng(&mut rng, limit)
    }

    /// Run with a caller-supplied generator
    pub fn run_with_rng<R: Rng + ?Sized>(&mut self, rng: &mut R, limit: Option<usize>) -> RunOutcome {
        self.init();
        self.state = ModelState::Running;

        if !self.clear() {
            tracing::debug!("ground constraint contradicts the alphabet");
            self.state = ModelState::Contradiction;
            return RunOutcome::Contradiction;
        }

        for step in 0..limit.unwrap_or(usize::MAX) {
            let Some(cell) = self.select_cell(rng) else {
                self.finalize_observed();
                self.state = ModelState::Solved;
                tracing::trace!(steps = step, "all cells decided");
                return RunOutcome::Solved;
            };

            self.observe(cell, rng);
            if !self.propagate() {
                tracing::debug!(step, cell, "contradiction during propagation");
                self.state = ModelState::Contradiction;
                return RunOutcome::Contradiction;
            }
        }

        self.state = ModelState::StepLimit;
        RunOutcome::StepLimitReached
    }

    /// Choose the next cell to collapse according to the heuristic
    ///
    /// Returns `None` when every eligible cell is decided.
    pub fn select_cell<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<usize> {
        let buffers = &mut self.buffers;
        selection::select_cell(
            self.heuristic,
            &self.grid,
            &buffers.wave,
            &buffers.entropy,
            &mut buffers.scan_cursor,
            rng,
        )
    }

    /// Remove a symbol from a cell and queue the removal for propagation
    ///
    /// A no-op if the symbol is already gone.
    pub fn ban(&mut self, cell: usize, symbol: usize) {
        self.buffers.ban(&self.weights, cell, symbol);
    }

    /// Drain the propagation queue
    ///
    /// Returns `false` as soon as any cell has no symbols left.
    pub fn propagate(&mut self) -> bool {
        let propagator = self.alphabet.propagator();
        let buffers = &mut self.buffers;

        while !buffers.contradiction {
            let Some((cell, symbol)) = buffers.stack.pop() else {
                break;
            };

            for direction in 0..DIRECTIONS {
                let Some(neighbor) = self.grid.neighbor(cell, direction) else {
                    continue;
                };
                for &other in propagator.compatible(direction, symbol) {
                    if buffers.counters.decrement(neighbor, other, direction) == 0 {
                        buffers.ban(&self.weights, neighbor, other);
                        if buffers.contradiction {
                            return false;
                        }
                    }
                }
            }
        }

        !buffers.contradiction
    }

    fn observe<R: Rng + ?Sized>(&mut self, cell: usize, rng: &mut R) {
        let buffers = &mut self.buffers;
        let chosen = selection::draw_symbol(
            &buffers.wave,
            &self.weights,
            cell,
            &mut buffers.distribution,
            rng,
        );

        for symbol in 0..self.alphabet.symbol_count() {
            if symbol != chosen {
                buffers.ban(&self.weights, cell, symbol);
            }
        }
        if let Some(slot) = buffers.observed.get_mut(cell) {
            *slot = Some(chosen);
        }
    }

    fn finalize_observed(&mut self) {
        let buffers = &mut self.buffers;
        for (cell, slot) in buffers.observed.iter_mut().enumerate() {
            *slot = buffers.wave.first_possible(cell);
        }
    }

    /// Current lifecycle state
    pub const fn state(&self) -> ModelState {
        self.state
    }

    /// Decided symbol per cell
    ///
    /// Collapsed cells are filled in as the run proceeds; after a solved run
    /// every cell holds its single remaining symbol.
    pub fn observed(&self) -> &[Option<usize>] {
        &self.buffers.observed
    }

    /// Whether a symbol is still possible in a cell
    pub fn is_possible(&self, cell: usize, symbol: usize) -> bool {
        self.buffers.wave.is_possible(cell, symbol)
    }

    /// Number of symbols still possible in a cell
    pub fn remaining(&self, cell: usize) -> usize {
        self.buffers.wave.remaining(cell)
    }

    /// Still-possible symbols of a cell in ascending order
    pub fn possible_symbols(&self, cell: usize) -> Vec<usize> {
        self.buffers.wave.possible_symbols(cell).collect()
    }

    /// Sum of the weights still possible in a cell
    pub fn sum_of_weights(&self, cell: usize) -> f64 {
        self.buffers.entropy.sum_of_weights(cell)
    }

    /// Sum of `w ln w` over the symbols still possible in a cell
    pub fn sum_of_weight_log_weights(&self, cell: usize) -> f64 {
        self.buffers.entropy.sum_of_weight_log_weights(cell)
    }

    /// Cached entropy of a cell
    pub fn entropy(&self, cell: usize) -> f64 {
        self.buffers.entropy.entropy(cell)
    }

    /// Remaining support of `symbol` in `cell` from `direction`
    pub fn compatible_count(&self, cell: usize, symbol: usize, direction: usize) -> i32 {
        self.buffers.counters.get(cell, symbol, direction)
    }

    /// Number of removals waiting to be propagated
    pub fn pending(&self) -> usize {
        self.buffers.stack.len()
    }

    /// Output grid
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Symbol weights and adjacency table
    pub const fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Precomputed weight statistics
    pub const fn weights(&self) -> &WeightTable {
        &self.weights
    }

    /// Cell selection strategy
    pub const fn heuristic(&self) -> Heuristic {
        self.heuristic
    }

    /// Number of symbols
    pub fn symbol_count(&self) -> usize {
        self.alphabet.symbol_count()
    }
}
