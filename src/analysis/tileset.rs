//! Tiled-mode extraction: symmetric tiles and neighbor rules
//!
//! Each tile expands into one symbol per distinct orientation of its
//! symmetry class. Neighbor rules are stated for one orientation pair and
//! closed under the group action, so a single horizontal rule also yields
//! its rotated and reflected counterparts.

use crate::algorithm::bitset::SymbolSet;
use crate::algorithm::propagation::Propagator;
use crate::analysis::alphabet::Alphabet;
use crate::io::error::{Result, invalid_source};
use crate::io::image::Bitmap;
use crate::spatial::grid::DIRECTIONS;
use crate::spatial::tiles::{reflect, rotate};
use std::collections::HashMap;

/// Number of entries in an action-map row
pub const ORIENTATIONS: usize = 8;

/// Symmetry of a tile under quarter turns and reflection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SymmetryClass {
    /// Invariant under every rotation and reflection
    #[default]
    X,
    /// Four orientations, like a corner
    L,
    /// Four orientations, like a T junction
    T,
    /// Two orientations, like a straight line
    I,
    /// Two orientations, like a diagonal
    Backslash,
    /// Eight orientations, no symmetry
    F,
}

impl SymmetryClass {
    /// Parse the single-character class code
    ///
    /// `L`, `T`, `I`, `\` and `F` select those classes; anything else is `X`.
    pub fn from_code(code: &str) -> Self {
        match code.chars().next() {
            Some('L') => Self::L,
            Some('T') => Self::T,
            Some('I') => Self::I,
            Some('\\') => Self::Backslash,
            Some('F') => Self::F,
            _ => Self::X,
        }
    }

    /// Number of distinct orientations
    pub const fn cardinality(self) -> usize {
        match self {
            Self::X => 1,
            Self::I | Self::Backslash => 2,
            Self::L | Self::T => 4,
            Self::F => 8,
        }
    }

    /// Orientation reached by a quarter turn
    pub const fn rotate(self, orientation: usize) -> usize {
        match self {
            Self::X => orientation,
            Self::I | Self::Backslash => 1 - orientation,
            Self::L | Self::T => (orientation + 1) % 4,
            Self::F => {
                if orientation < 4 {
                    (orientation + 1) % 4
                } else {
                    4 + (orientation - 1) % 4
                }
            }
        }
    }

    /// Orientation reached by a reflection
    pub const fn reflect(self, orientation: usize) -> usize {
        match self {
            Self::X | Self::I => orientation,
            Self::Backslash => 1 - orientation,
            Self::L => {
                if orientation % 2 == 0 {
                    orientation + 1
                } else {
                    orientation - 1
                }
            }
            Self::T => {
                if orientation % 2 == 0 {
                    orientation
                } else {
                    4 - orientation
                }
            }
            Self::F => {
                if orientation < 4 {
                    orientation + 4
                } else {
                    orientation - 4
                }
            }
        }
    }

    /// Action-map rows for a tile whose first symbol is `first`
    ///
    /// Row `t` lists the symbols reached from orientation `t` by
    /// `[id, a, a², a³, b, b·a, b·a², b·a³]` where `a` rotates and `b` reflects.
    pub fn action(self, first: usize) -> Vec<[usize; ORIENTATIONS]> {
        (0..self.cardinality())
            .map(|t| {
                let a = |i| self.rotate(i);
                let b = |i| self.reflect(i);
                [t, a(t), a(a(t)), a(a(a(t))), b(t), b(a(t)), b(a(a(t))), b(a(a(a(t))))]
                    .map(|orientation| first + orientation)
            })
            .collect()
    }
}

/// One tile of a tileset description
#[derive(Debug, Clone, PartialEq)]
pub struct TileDescription {
    /// Tile name, also the image file stem
    pub name: String,
    /// Symmetry class
    pub symmetry: SymmetryClass,
    /// Weight shared by every orientation
    pub weight: f64,
}

/// A tile name with an orientation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileRef {
    /// Referenced tile name
    pub tile: String,
    /// Orientation index into the tile's action row, 0 when omitted
    pub orientation: usize,
}

impl TileRef {
    /// Parse `"name"` or `"name k"`
    ///
    /// An unparsable orientation is treated as 0.
    pub fn parse(text: &str) -> Self {
        let mut parts = text.split_whitespace();
        let tile = parts.next().unwrap_or_default().to_string();
        let orientation = parts.next().and_then(|o| o.parse().ok()).unwrap_or(0);
        Self { tile, orientation }
    }
}

/// Horizontal adjacency: `left` may sit immediately left of `right`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NeighborRule {
    /// Tile on the left
    pub left: TileRef,
    /// Tile on the right
    pub right: TileRef,
}

/// Parsed tileset contents, independent of where the images come from
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TilesetDescription {
    /// Whether every orientation has its own image
    pub unique: bool,
    /// Tiles in declaration order
    pub tiles: Vec<TileDescription>,
    /// Neighbor rules in declaration order
    pub neighbors: Vec<NeighborRule>,
    /// Named subsets of tile names
    pub subsets: HashMap<String, Vec<String>>,
}

/// Tile symbols expanded from a tileset, with their bitmaps
#[derive(Debug, Clone)]
pub struct TileSet {
    bitmaps: Vec<Vec<u32>>,
    names: Vec<String>,
    tile_size: usize,
    alphabet: Alphabet,
}

impl TileSet {
    /// Expand a tileset description into symbols
    ///
    /// `load` receives an image name (`"name"` or `"name k"` for unique
    /// tilesets) and returns its bitmap. Tiles outside the chosen subset are
    /// skipped, as are rules mentioning them. Rules naming unknown tiles and
    /// repeated tile names are logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - An image cannot be loaded, is not square, or differs in size from the first
    /// - No tile survives the subset filter
    pub fn build<F>(description: &TilesetDescription, subset: Option<&str>, mut load: F) -> Result<Self>
    where
        F: FnMut(&str) -> Result<Bitmap>,
    {
        let allowed = resolve_subset(description, subset);
        let is_allowed = |name: &str| allowed.as_ref().is_none_or(|names| names.iter().any(|n| n == name));

        let mut bitmaps: Vec<Vec<u32>> = Vec::new();
        let mut names: Vec<String> = Vec::new();
        let mut weights: Vec<f64> = Vec::new();
        let mut action: Vec<[usize; ORIENTATIONS]> = Vec::new();
        let mut first_occurrence: HashMap<String, usize> = HashMap::new();
        let mut tile_size: Option<usize> = None;

        for tile in &description.tiles {
            if !is_allowed(&tile.name) {
                continue;
            }
            if first_occurrence.contains_key(&tile.name) {
                tracing::warn!(
                    tile = %tile.name,
                    "duplicate tile name, keeping the first definition"
                );
                continue;
            }

            let first = action.len();
            let cardinality = tile.symmetry.cardinality();
            first_occurrence.insert(tile.name.clone(), first);
            action.extend(tile.symmetry.action(first));

            let mut load_checked = |image_name: &str| -> Result<Vec<u32>> {
                let bitmap = load(image_name)?;
                let size = check_tile_size(&bitmap, image_name, tile_size)?;
                tile_size = Some(size);
                Ok(bitmap.pixels().to_vec())
            };

            if description.unique {
                for t in 0..cardinality {
                    bitmaps.push(load_checked(&format!("{} {t}", tile.name))?);
                    names.push(format!("{} {t}", tile.name));
                }
            } else {
                let base = load_checked(&tile.name)?;
                let size = tile_size.unwrap_or(0);
                bitmaps.push(base);
                names.push(format!("{} 0", tile.name));
                for t in 1..cardinality {
                    let source = if t <= 3 {
                        bitmaps.get(first + t - 1).map(|b| rotate(b, size))
                    } else {
                        bitmaps.get(first + t - 4).map(|b| reflect(b, size))
                    };
                    bitmaps.push(source.unwrap_or_default());
                    names.push(format!("{} {t}", tile.name));
                }
            }

            weights.extend(std::iter::repeat_n(tile.weight, cardinality));
        }

        let symbols = action.len();
        if symbols == 0 {
            return Err(invalid_source(&match subset {
                Some(name) => format!("subset '{name}' selects no tiles"),
                None => "tileset has no tiles".to_string(),
            }));
        }

        let mut dense: [Vec<SymbolSet>; DIRECTIONS] =
            std::array::from_fn(|_| vec![SymbolSet::new(symbols); symbols]);
        let resolve = |reference: &TileRef| -> Option<usize> {
            let first = *first_occurrence.get(&reference.tile)?;
            action.get(first)?.get(reference.orientation).copied()
        };
        let act = |symbol: usize, k: usize| -> usize {
            action
                .get(symbol)
                .and_then(|row| row.get(k))
                .copied()
                .unwrap_or(symbol)
        };

        for rule in &description.neighbors {
            if !is_allowed(&rule.left.tile) || !is_allowed(&rule.right.tile) {
                continue;
            }
            let (Some(l), Some(r)) = (resolve(&rule.left), resolve(&rule.right)) else {
                tracing::warn!(
                    left = %rule.left.tile,
                    right = %rule.right.tile,
                    "neighbor rule references an unknown tile or orientation"
                );
                continue;
            };
            let d = act(l, 1);
            let u = act(r, 1);

            allow(&mut dense, 0, r, l);
            allow(&mut dense, 0, act(r, 6), act(l, 6));
            allow(&mut dense, 0, act(l, 4), act(r, 4));
            allow(&mut dense, 0, act(l, 2), act(r, 2));

            allow(&mut dense, 1, u, d);
            allow(&mut dense, 1, act(d, 6), act(u, 6));
            allow(&mut dense, 1, act(u, 4), act(d, 4));
            allow(&mut dense, 1, act(d, 2), act(u, 2));
        }

        for t1 in 0..symbols {
            for t2 in 0..symbols {
                if dense.first().and_then(|sets| sets.get(t1)).is_some_and(|set| set.contains(t2)) {
                    allow(&mut dense, 2, t2, t1);
                }
                if dense.get(1).and_then(|sets| sets.get(t1)).is_some_and(|set| set.contains(t2)) {
                    allow(&mut dense, 3, t2, t1);
                }
            }
        }

        let alphabet = Alphabet::new(weights, Propagator::from_dense(&dense)?)?;
        alphabet.report_isolated(|symbol| names.get(symbol).cloned().unwrap_or_default());

        tracing::debug!(symbols, rules = description.neighbors.len(), "expanded tileset");

        Ok(Self {
            bitmaps,
            names,
            tile_size: tile_size.unwrap_or(0),
            alphabet,
        })
    }

    /// Pixels of each symbol's tile, row-major
    pub fn bitmaps(&self) -> &[Vec<u32>] {
        &self.bitmaps
    }

    /// `"name k"` label of each symbol
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Side length of every tile in pixels
    pub const fn tile_size(&self) -> usize {
        self.tile_size
    }

    /// Symbol weights and adjacency table
    pub const fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }
}

fn allow(dense: &mut [Vec<SymbolSet>; DIRECTIONS], direction: usize, from: usize, to: usize) {
    if let Some(set) = dense.get_mut(direction).and_then(|sets| sets.get_mut(from)) {
        set.insert(to);
    }
}

fn resolve_subset(description: &TilesetDescription, subset: Option<&str>) -> Option<Vec<String>> {
    let name = subset?;
    let names = description.subsets.get(name);
    if names.is_none() {
        tracing::error!(subset = name, "subset not found, using every tile");
    }
    names.cloned()
}

fn check_tile_size(bitmap: &Bitmap, image_name: &str, expected: Option<usize>) -> Result<usize> {
    if bitmap.width() != bitmap.height() {
        return Err(invalid_source(&format!(
            "tile image '{image_name}' is {}x{}, tiles must be square",
            bitmap.width(),
            bitmap.height()
        )));
    }
    match expected {
        Some(size) if size != bitmap.width() => Err(invalid_source(&format!(
            "tile image '{image_name}' is {0}x{0}, expected {size}x{size}",
            bitmap.width()
        ))),
        _ => Ok(bitmap.width()),
    }
}
