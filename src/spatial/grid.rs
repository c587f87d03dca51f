//! Output grid geometry: cell indexing, wraparound and footprint eligibility
//!
//! Cells are numbered row-major (`x + y * width`). Row indices grow toward the
//! last row of the output image, which is where the ground constraint lives.

use crate::io::error::{Result, invalid_parameter};

/// Number of propagation directions on a square grid
pub const DIRECTIONS: usize = 4;

/// Horizontal offset of each direction
pub const DX: [i32; DIRECTIONS] = [-1, 0, 1, 0];

/// Vertical offset of each direction
pub const DY: [i32; DIRECTIONS] = [0, 1, 0, -1];

/// Index of the reverse of each direction
pub const OPPOSITE: [usize; DIRECTIONS] = [2, 3, 0, 1];

/// Return the reverse of a direction index
pub fn opposite(direction: usize) -> Option<usize> {
    OPPOSITE.get(direction).copied()
}

/// Rectangular cell grid with optional toroidal wraparound
///
/// The footprint is the side of the square area each cell's symbol covers in
/// the output (the pattern size in overlapping mode, 1 for tiles). Without
/// wraparound a cell whose footprint would leave the grid is never collapsed
/// directly and never receives propagation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    periodic: bool,
    footprint: usize,
}

impl Grid {
    /// Create a grid description
    ///
    /// # Errors
    ///
    /// Returns an error if any dimension or the footprint is zero
    pub fn new(width: usize, height: usize, periodic: bool, footprint: usize) -> Result<Self> {
        if width == 0 {
            return Err(invalid_parameter("width", &width, &"must be at least 1"));
        }
        if height == 0 {
            return Err(invalid_parameter("height", &height, &"must be at least 1"));
        }
        if footprint == 0 {
            return Err(invalid_parameter(
                "footprint",
                &footprint,
                &"must be at least 1",
            ));
        }

        Ok(Self {
            width,
            height,
            periodic,
            footprint,
        })
    }

    /// Grid width in cells
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Whether opposite edges are adjacent
    pub const fn periodic(&self) -> bool {
        self.periodic
    }

    /// Side length of the area a single cell covers
    pub const fn footprint(&self) -> usize {
        self.footprint
    }

    /// Total number of cells
    pub const fn len(&self) -> usize {
        self.width * self.height
    }

    /// Always false for a constructed grid
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Column and row of a cell index
    pub const fn coordinates(&self, cell: usize) -> (usize, usize) {
        (cell % self.width, cell / self.width)
    }

    /// Cell index of a column and row
    pub const fn index(&self, x: usize, y: usize) -> usize {
        x + y * self.width
    }

    /// Whether the cell's footprint fits inside the grid
    ///
    /// Always true on a periodic grid.
    pub const fn is_eligible(&self, cell: usize) -> bool {
        if self.periodic {
            return true;
        }
        let (x, y) = self.coordinates(cell);
        x + self.footprint <= self.width && y + self.footprint <= self.height
    }

    /// Neighboring cell in the given direction
    ///
    /// Wraps around on periodic grids. Without wraparound, returns `None` when
    /// the neighbor lies outside the grid or its footprint would leave it.
    pub fn neighbor(&self, cell: usize, direction: usize) -> Option<usize> {
        let dx = i64::from(*DX.get(direction)?);
        let dy = i64::from(*DY.get(direction)?);
        let (x, y) = self.coordinates(cell);

        let width = self.width as i64;
        let height = self.height as i64;
        let footprint = self.footprint as i64;
        let x2 = x as i64 + dx;
        let y2 = y as i64 + dy;

        if !self.periodic && (x2 < 0 || y2 < 0 || x2 + footprint > width || y2 + footprint > height)
        {
            return None;
        }

        let x2 = x2.rem_euclid(width) as usize;
        let y2 = y2.rem_euclid(height) as usize;
        Some(self.index(x2, y2))
    }
}
