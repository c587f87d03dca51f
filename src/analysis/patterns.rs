//! Overlapping-mode extraction: N×N patterns from a sample bitmap
//!
//! Every N×N window of the sample (wrapping when the input is periodic) and
//! up to seven of its rotations and reflections becomes a candidate pattern.
//! Patterns with identical cells are merged in first-seen order, counting
//! occurrences as weights. Two patterns are compatible in a direction when
//! they agree on their overlap.

use crate::algorithm::propagation::Propagator;
use crate::analysis::alphabet::Alphabet;
use crate::io::error::{Result, invalid_parameter, invalid_source};
use crate::io::image::Bitmap;
use crate::spatial::grid::{DX, DY};
use crate::spatial::tiles::{square_pattern, symmetry_variants};
use ndarray::Array2;
use std::collections::HashMap;

/// Colors beyond this count cannot be indexed by a byte
pub const MAX_COLORS: usize = 256;

/// Options controlling pattern extraction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlappingOptions {
    /// Side length N of each pattern
    pub pattern_size: usize,
    /// Whether windows wrap around the sample edges
    pub periodic_input: bool,
    /// Number of dihedral variants to keep per window, 1 to 8
    pub symmetry: usize,
}

/// Map each pixel to the index of its color in first-seen order
///
/// Returns the color index grid with shape `(height, width)` and the palette.
///
/// # Errors
///
/// Returns an error if the sample has more than [`MAX_COLORS`] distinct colors
pub fn index_colors(sample: &Bitmap) -> Result<(Array2<u8>, Vec<u32>)> {
    let mut colors: Vec<u32> = Vec::new();
    let mut lookup: HashMap<u32, u8> = HashMap::new();
    let mut indices = Array2::zeros((sample.height(), sample.width()));

    for ((y, x), slot) in indices.indexed_iter_mut() {
        let color = sample.pixel(x, y).unwrap_or(0);
        let index = if let Some(&index) = lookup.get(&color) {
            index
        } else {
            if colors.len() >= MAX_COLORS {
                return Err(invalid_source(&format!(
                    "sample has more than {MAX_COLORS} distinct colors"
                )));
            }
            let index = colors.len() as u8;
            colors.push(color);
            lookup.insert(color, index);
            index
        };
        *slot = index;
    }

    Ok((indices, colors))
}

/// Whether `second`, shifted by `(dx, dy)`, agrees with `first` on their overlap
pub fn agrees(first: &[u8], second: &[u8], dx: i32, dy: i32, n: usize) -> bool {
    let n = n as i32;
    let (x_min, x_max) = if dx < 0 { (0, dx + n) } else { (dx, n) };
    let (y_min, y_max) = if dy < 0 { (0, dy + n) } else { (dy, n) };

    for y in y_min..y_max {
        for x in x_min..x_max {
            let a = first.get((x + n * y) as usize);
            let b = second.get((x - dx + n * (y - dy)) as usize);
            if a.is_none() || a != b {
                return false;
            }
        }
    }
    true
}

/// Patterns extracted from a sample together with their palette
#[derive(Debug, Clone)]
pub struct PatternSet {
    patterns: Vec<Vec<u8>>,
    colors: Vec<u32>,
    pattern_size: usize,
    alphabet: Alphabet,
}

impl PatternSet {
    /// Extract weighted patterns and their overlap propagator from a sample
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The pattern size is zero or symmetry is outside `1..=8`
    /// - The sample is empty or, without periodic input, smaller than a pattern
    /// - The sample has more than [`MAX_COLORS`] colors
    pub fn extract(sample: &Bitmap, options: &OverlappingOptions) -> Result<Self> {
        let n = options.pattern_size;
        if n == 0 {
            return Err(invalid_parameter("N", &n, &"must be at least 1"));
        }
        if !(1..=8).contains(&options.symmetry) {
            return Err(invalid_parameter(
                "symmetry",
                &options.symmetry,
                &"must be between 1 and 8",
            ));
        }
        let (sx, sy) = (sample.width(), sample.height());
        if sx == 0 || sy == 0 {
            return Err(invalid_source(&"sample image is empty"));
        }
        if !options.periodic_input && (sx < n || sy < n) {
            return Err(invalid_source(&format!(
                "sample {sx}x{sy} is smaller than pattern size {n}"
            )));
        }

        let (indices, colors) = index_colors(sample)?;
        let window = |x: usize, y: usize| {
            square_pattern(n, |dx, dy| {
                indices
                    .get(((y + dy) % sy, (x + dx) % sx))
                    .copied()
                    .unwrap_or(0)
            })
        };

        let (x_max, y_max) = if options.periodic_input {
            (sx, sy)
        } else {
            (sx + 1 - n, sy + 1 - n)
        };

        let mut patterns: Vec<Vec<u8>> = Vec::new();
        let mut weights: Vec<f64> = Vec::new();
        let mut positions: HashMap<Vec<u8>, usize> = HashMap::new();

        for y in 0..y_max {
            for x in 0..x_max {
                let variants = symmetry_variants(&window(x, y), n);
                for variant in variants.into_iter().take(options.symmetry) {
                    if let Some(&index) = positions.get(&variant) {
                        if let Some(weight) = weights.get_mut(index) {
                            *weight += 1.0;
                        }
                    } else {
                        positions.insert(variant.clone(), patterns.len());
                        patterns.push(variant);
                        weights.push(1.0);
                    }
                }
            }
        }

        let propagator = Propagator::new(std::array::from_fn(|direction| {
            let (dx, dy) = (
                DX.get(direction).copied().unwrap_or(0),
                DY.get(direction).copied().unwrap_or(0),
            );
            patterns
                .iter()
                .map(|first| {
                    patterns
                        .iter()
                        .enumerate()
                        .filter(|(_, second)| agrees(first, second, dx, dy, n))
                        .map(|(index, _)| index)
                        .collect()
                })
                .collect()
        }))?;

        tracing::debug!(
            patterns = patterns.len(),
            colors = colors.len(),
            "extracted overlapping patterns"
        );

        let alphabet = Alphabet::new(weights, propagator)?;
        Ok(Self {
            patterns,
            colors,
            pattern_size: n,
            alphabet,
        })
    }

    /// Distinct patterns as color indices, row-major
    pub fn patterns(&self) -> &[Vec<u8>] {
        &self.patterns
    }

    /// Palette in first-seen order
    pub fn colors(&self) -> &[u32] {
        &self.colors
    }

    /// Side length N of each pattern
    pub const fn pattern_size(&self) -> usize {
        self.pattern_size
    }

    /// Pattern weights and overlap propagator
    pub const fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Color of a pattern at an offset inside it
    pub fn color_at(&self, pattern: usize, dx: usize, dy: usize) -> Option<u32> {
        if dx >= self.pattern_size {
            return None;
        }
        let index = self
            .patterns
            .get(pattern)?
            .get(dx + dy * self.pattern_size)?;
        self.colors.get(usize::from(*index)).copied()
    }
}
