//! Batch defaults and per-model configuration

use crate::algorithm::selection::Heuristic;
use crate::analysis::patterns::OverlappingOptions;
use crate::io::error::{Result, invalid_descriptor};
use quick_xml::events::BytesStart;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

// Model defaults, applied when a sample entry omits the attribute
/// Output side length for overlapping models
pub const DEFAULT_OVERLAPPING_SIZE: usize = 48;
/// Output side length for tiled models
pub const DEFAULT_TILED_SIZE: usize = 24;
/// Pattern side length N
pub const DEFAULT_PATTERN_SIZE: usize = 3;
/// Number of dihedral variants kept per sample window
pub const DEFAULT_SYMMETRY: usize = 8;
/// Outputs generated per model
pub const DEFAULT_SCREENSHOTS: usize = 2;
/// Heuristic name used when none is given
pub const DEFAULT_HEURISTIC: &str = "Entropy";

// Batch defaults
/// Attempts per output before giving up
pub const DEFAULT_ATTEMPTS: usize = 10;
/// Seed of the generator that hands out per-attempt seeds
pub const DEFAULT_SEED: u64 = 42;
/// Directory generated files are written to
pub const DEFAULT_OUTPUT_DIR: &str = "output";
/// Subdirectory of the resources holding sample images
pub const SAMPLES_DIR: &str = "samples";
/// Subdirectory of the resources holding tileset descriptions and images
pub const TILESETS_DIR: &str = "tilesets";

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;

/// Extraction-specific part of a model configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelKind {
    /// Patterns extracted from a sample image
    Overlapping {
        /// Pattern extraction options
        options: OverlappingOptions,
        /// Pin the last pattern to the bottom row
        ground: bool,
    },
    /// Symbols expanded from a tileset
    Tiled {
        /// Named subset of tiles to use
        subset: Option<String>,
        /// Paint fully undecided cells black in partial renders
        black_background: bool,
        /// Also write a text listing of the chosen tiles
        text_output: bool,
    },
}

/// Everything needed to build and run one model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelConfig {
    /// Sample image or tileset name
    pub name: String,
    /// Output width in cells
    pub width: usize,
    /// Output height in cells
    pub height: usize,
    /// Whether the output wraps around
    pub periodic: bool,
    /// Cell selection strategy
    pub heuristic: Heuristic,
    /// Number of outputs to produce
    pub screenshots: usize,
    /// Step budget per run, `None` for unlimited
    pub limit: Option<usize>,
    /// Extraction mode and its options
    pub kind: ModelKind,
}

impl ModelConfig {
    /// Overlapping model with default options and a square output
    pub fn overlapping(name: &str, size: usize) -> Self {
        Self {
            name: name.to_string(),
            width: size,
            height: size,
            periodic: false,
            heuristic: Heuristic::default(),
            screenshots: DEFAULT_SCREENSHOTS,
            limit: None,
            kind: ModelKind::Overlapping {
                options: OverlappingOptions {
                    pattern_size: DEFAULT_PATTERN_SIZE,
                    periodic_input: true,
                    symmetry: DEFAULT_SYMMETRY,
                },
                ground: false,
            },
        }
    }

    /// Tiled model with default options and a square output
    pub fn tiled(name: &str, size: usize) -> Self {
        Self {
            name: name.to_string(),
            width: size,
            height: size,
            periodic: false,
            heuristic: Heuristic::default(),
            screenshots: DEFAULT_SCREENSHOTS,
            limit: None,
            kind: ModelKind::Tiled {
                subset: None,
                black_background: false,
                text_output: false,
            },
        }
    }

    /// Side length of the area each cell covers in the output grid
    pub const fn footprint(&self) -> usize {
        match &self.kind {
            ModelKind::Overlapping { options, .. } => options.pattern_size,
            ModelKind::Tiled { .. } => 1,
        }
    }
}

/// Attribute map of a single XML element with typed accessors
#[derive(Debug, Clone, Default)]
pub(crate) struct Attributes {
    element: &'static str,
    values: HashMap<String, String>,
}

impl Attributes {
    /// Collect the attributes of an element, decoding entity references
    pub(crate) fn read(element: &'static str, start: &BytesStart<'_>) -> Result<Self> {
        let mut values = HashMap::new();
        for attribute in start.attributes() {
            let attribute = attribute.map_err(|e| invalid_descriptor(element, &e))?;
            let key = std::str::from_utf8(attribute.key.as_ref())
                .map_err(|e| invalid_descriptor(element, &e))?;
            let value = attribute
                .unescape_value()
                .map_err(|e| invalid_descriptor(element, &e))?;
            values.insert(key.to_string(), value.into_owned());
        }
        Ok(Self { element, values })
    }

    pub(crate) fn string(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub(crate) fn required(&self, key: &str) -> Result<&str> {
        self.string(key).ok_or_else(|| {
            invalid_descriptor(self.element, &format!("missing required attribute '{key}'"))
        })
    }

    pub(crate) fn boolean(&self, key: &str, default: bool) -> Result<bool> {
        match self.string(key) {
            None => Ok(default),
            Some(value) if value.eq_ignore_ascii_case("true") => Ok(true),
            Some(value) if value.eq_ignore_ascii_case("false") => Ok(false),
            Some(value) => Err(invalid_descriptor(
                self.element,
                &format!("attribute '{key}' = '{value}' is not a boolean"),
            )),
        }
    }

    pub(crate) fn number<T>(&self, key: &str, default: T) -> Result<T>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        match self.string(key) {
            None => Ok(default),
            Some(value) => value.trim().parse().map_err(|e| {
                invalid_descriptor(
                    self.element,
                    &format!("attribute '{key}' = '{value}': {e}"),
                )
            }),
        }
    }
}
