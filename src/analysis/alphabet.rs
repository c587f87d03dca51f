//! The contract between extractors and the solver

use crate::algorithm::propagation::Propagator;
use crate::io::error::{Result, invalid_source};

/// Symbol weights together with their adjacency table
///
/// Both extraction modes produce one of these; the solver needs nothing else
/// from its source.
#[derive(Debug, Clone)]
pub struct Alphabet {
    weights: Vec<f64>,
    propagator: Propagator,
}

impl Alphabet {
    /// Validate and bundle weights with a propagator
    ///
    /// # Errors
    ///
    /// Returns an error if the alphabet is empty, the propagator covers a
    /// different number of symbols, or any weight is not positive and finite
    pub fn new(weights: Vec<f64>, propagator: Propagator) -> Result<Self> {
        if weights.is_empty() {
            return Err(invalid_source(&"alphabet has no symbols"));
        }
        if propagator.symbol_count() != weights.len() {
            return Err(invalid_source(&format!(
                "{} weights but the propagator covers {} symbols",
                weights.len(),
                propagator.symbol_count()
            )));
        }
        if let Some((symbol, weight)) = weights
            .iter()
            .enumerate()
            .find(|&(_, &weight)| !(weight.is_finite() && weight > 0.0))
        {
            return Err(invalid_source(&format!(
                "symbol {symbol} has non-positive weight {weight}"
            )));
        }

        Ok(Self {
            weights,
            propagator,
        })
    }

    /// Number of symbols
    pub fn symbol_count(&self) -> usize {
        self.weights.len()
    }

    /// Weight of every symbol
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Weight of one symbol, zero if out of range
    pub fn weight(&self, symbol: usize) -> f64 {
        self.weights.get(symbol).copied().unwrap_or(0.0)
    }

    /// Adjacency table
    pub const fn propagator(&self) -> &Propagator {
        &self.propagator
    }

    /// Log each propagator entry with no compatible neighbor
    ///
    /// Such entries make the symbol unplaceable wherever that neighbor exists.
    /// Returns how many entries were reported.
    pub fn report_isolated<F>(&self, describe: F) -> usize
    where
        F: Fn(usize) -> String,
    {
        let isolated = self.propagator.isolated();
        for &(direction, symbol) in &isolated {
            tracing::error!(
                symbol = %describe(symbol),
                direction,
                "symbol has no compatible neighbors"
            );
        }
        isolated.len()
    }
}
