//! Immutable passability matrix
//!
//! Cells are addressed as `(x, y)`: `x` is the column, `y` the row, origin at
//! the top-left. The grid never changes once built; extra obstacles are
//! layered on top by [`crate::terrain::Terrain`].

use core::fmt;

use thiserror::Error;

use crate::direction::Direction;

/// Largest grid the loaders and the generator will allocate.
pub const MAX_GRID_CELLS: usize = 1 << 24;

/// A cell position
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub x: usize,
    pub y: usize,
}

impl Coord {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// The adjacent cell in `dir`, or `None` if it would have a negative
    /// component. The upper bound is the grid's business.
    pub fn step(self, dir: Direction) -> Option<Coord> {
        let (dx, dy) = dir.delta();
        Some(Coord {
            x: self.x.checked_add_signed(dx)?,
            y: self.y.checked_add_signed(dy)?,
        })
    }

    /// `(dx, dy)` from `self` to `other`.
    pub fn delta_to(self, other: Coord) -> (isize, isize) {
        (
            other.x as isize - self.x as isize,
            other.y as isize - self.y as isize,
        )
    }

    pub fn manhattan(self, other: Coord) -> usize {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    pub fn euclidean(self, other: Coord) -> f64 {
        let dx = self.x.abs_diff(other.x) as f64;
        let dy = self.y.abs_diff(other.y) as f64;
        (dx * dx + dy * dy).sqrt()
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(usize, usize)> for Coord {
    fn from((x, y): (usize, usize)) -> Self {
        Coord { x, y }
    }
}

/// Malformed grid input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("grid has no cells")]
    Empty,
    #[error("row {row} has {found} cells, expected {expected}")]
    Jagged {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("{cols}x{rows} maze cells exceed the {max} grid cell limit", max = MAX_GRID_CELLS)]
    TooLarge { cols: usize, rows: usize },
}

/// Rectangular boolean grid; `true` is passable
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    cols: usize,
    rows: usize,
    cells: Vec<bool>,
}

impl Grid {
    /// Build from row slices; every row must have the same, non-zero length.
    pub fn from_rows<R: AsRef<[bool]>>(rows: &[R]) -> Result<Self, GridError> {
        let cols = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        if cols == 0 {
            return Err(GridError::Empty);
        }

        let mut cells = Vec::with_capacity(cols * rows.len());
        for (row, r) in rows.iter().enumerate() {
            let r = r.as_ref();
            if r.len() != cols {
                return Err(GridError::Jagged {
                    row,
                    expected: cols,
                    found: r.len(),
                });
            }
            cells.extend_from_slice(r);
        }

        Ok(Self {
            cols,
            rows: rows.len(),
            cells,
        })
    }

    /// Build from a binary grid where `0` is a wall and anything else a path.
    pub fn from_binary_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self, GridError> {
        let bools: Vec<Vec<bool>> = rows
            .iter()
            .map(|r| r.as_ref().iter().map(|&c| c != 0).collect())
            .collect();
        Self::from_rows(&bools)
    }

    /// Build from ASCII art: `#` is a wall, anything else is open.
    ///
    /// Handy for tests and fixtures; lines are taken verbatim.
    pub fn from_art(art: &str) -> Result<Self, GridError> {
        let rows: Vec<Vec<bool>> = art
            .lines()
            .map(|line| line.chars().map(|c| c != '#').collect())
            .collect();
        Self::from_rows(&rows)
    }

    /// Grid `(width, height)` for `cols` × `rows` maze cells with walls
    /// around and between them.
    pub fn walled_size(cols: usize, rows: usize) -> Result<(usize, usize), GridError> {
        let side = |n: usize| n.checked_mul(2)?.checked_add(1);
        let size = side(cols).zip(side(rows));
        match size.and_then(|(w, h)| Some((w, h, w.checked_mul(h)?))) {
            Some((width, height, cells)) if cells <= MAX_GRID_CELLS => Ok((width, height)),
            _ => Err(GridError::TooLarge { cols, rows }),
        }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn in_bounds(&self, at: Coord) -> bool {
        at.x < self.cols && at.y < self.rows
    }

    /// In bounds and passable in the underlying matrix.
    pub fn is_open(&self, at: Coord) -> bool {
        self.index(at).map(|i| self.cells[i]).unwrap_or(false)
    }

    /// Row-major index of an in-bounds cell.
    pub fn index(&self, at: Coord) -> Option<usize> {
        self.in_bounds(at).then(|| at.y * self.cols + at.x)
    }

    /// All cells in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = Coord> + '_ {
        (0..self.rows).flat_map(move |y| (0..self.cols).map(move |x| Coord::new(x, y)))
    }

    /// Binary rows (`1` path, `0` wall), the inverse of [`Grid::from_binary_rows`].
    pub fn to_binary_rows(&self) -> Vec<Vec<u8>> {
        self.cells
            .chunks(self.cols)
            .map(|row| row.iter().map(|&open| u8::from(open)).collect())
            .collect()
    }
}
