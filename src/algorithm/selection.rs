use crate::{
    algorithm::{
        cache::{EntropyCache, WeightTable},
        wave::Wave,
    },
    math::probability::weighted_index,
    spatial::Grid,
};
use rand::Rng;
use std::fmt;

/// Scale of the random tie-breaking noise added to each score
const TIE_BREAK_NOISE: f64 = 1e-6;

/// Strategy for choosing which cell to collapse next
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Heuristic {
    /// Lowest weighted Shannon entropy first
    #[default]
    Entropy,
    /// Fewest remaining symbols first
    Mrv,
    /// Row-major order, resuming after the last selected cell
    Scanline,
}

impl Heuristic {
    /// Parse a heuristic name
    ///
    /// `"Scanline"` and `"MRV"` select those strategies; anything else falls
    /// back to entropy.
    pub fn from_name(name: &str) -> Self {
        match name {
            "Scanline" => Self::Scanline,
            "MRV" => Self::Mrv,
            _ => Self::Entropy,
        }
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Entropy => "Entropy",
            Self::Mrv => "MRV",
            Self::Scanline => "Scanline",
        };
        f.write_str(name)
    }
}

/// Choose the next undecided cell, or `None` when every eligible cell is decided
///
/// Ineligible cells are skipped. Scanline advances `cursor` past the chosen
/// cell; the scoring heuristics draw one noise value per candidate that is
/// not already beaten by the running minimum, so the stream of random draws
/// depends only on the wave contents. Scores are unbounded, so MRV handles
/// any alphabet size.
pub fn select_cell<R: Rng + ?Sized>(
    heuristic: Heuristic,
    grid: &Grid,
    wave: &Wave,
    entropy: &EntropyCache,
    cursor: &mut usize,
    rng: &mut R,
) -> Option<usize> {
    if heuristic == Heuristic::Scanline {
        for cell in *cursor..grid.len() {
            if grid.is_eligible(cell) && wave.remaining(cell) > 1 {
                *cursor = cell + 1;
                return Some(cell);
            }
        }
        return None;
    }

    let mut min = f64::INFINITY;
    let mut selected = None;
    for cell in 0..grid.len() {
        if !grid.is_eligible(cell) {
            continue;
        }
        let remaining = wave.remaining(cell);
        let score = match heuristic {
            Heuristic::Entropy => entropy.entropy(cell),
            Heuristic::Mrv | Heuristic::Scanline => remaining as f64,
        };
        if remaining <= 1 || score.is_nan() || score > min {
            continue;
        }

        let noise = TIE_BREAK_NOISE * rng.random::<f64>();
        if score + noise < min {
            min = score + noise;
            selected = Some(cell);
        }
    }
    selected
}

/// Draw one of a cell's still-possible symbols proportionally to weight
///
/// `distribution` is scratch space reused across calls.
pub fn draw_symbol<R: Rng + ?Sized>(
    wave: &Wave,
    weights: &WeightTable,
    cell: usize,
    distribution: &mut Vec<f64>,
    rng: &mut R,
) -> usize {
    distribution.clear();
    distribution.extend((0..wave.symbol_count()).map(|symbol| {
        if wave.is_possible(cell, symbol) {
            weights.weight(symbol)
        } else {
            0.0
        }
    }));
    weighted_index(distribution, rng.random::<f64>())
}
