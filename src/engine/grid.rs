//! Toroidal cell grid

use crate::error::{LifeError, Result};
use rand::Rng;

/// A fixed-size field of alive/dead cells whose edges wrap around.
///
/// Cells are stored row-major in a flat vector. A `Grid` is a value: edits
/// return a new grid and leave the original untouched, so snapshots held by
/// the history never change underneath it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<bool>,
}

impl Grid {
    /// All-dead grid
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        check_dimensions(rows, cols)?;
        Ok(Self {
            rows,
            cols,
            cells: vec![false; rows * cols],
        })
    }

    /// Each cell alive independently with probability `density`.
    pub fn random<R: Rng + ?Sized>(rows: usize, cols: usize, density: f64, rng: &mut R) -> Result<Self> {
        check_dimensions(rows, cols)?;
        let density = if density.is_nan() { 0.0 } else { density.clamp(0.0, 1.0) };
        let cells = (0..rows * cols).map(|_| rng.gen_bool(density)).collect();
        Ok(Self { rows, cols, cells })
    }

    /// Build from nested rows; every row must have the same width.
    pub fn from_rows(rows: Vec<Vec<bool>>) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        check_dimensions(height, width)?;
        if rows.iter().any(|r| r.len() != width) {
            return Err(LifeError::RaggedRows);
        }
        Ok(Self {
            rows: height,
            cols: width,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> Option<bool> {
        if row < self.rows && col < self.cols {
            Some(self.cells[row * self.cols + col])
        } else {
            None
        }
    }

    #[inline]
    fn alive(&self, row: usize, col: usize) -> bool {
        self.cells[row * self.cols + col]
    }

    /// Number of live cells
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// True when no cell is alive
    pub fn is_empty(&self) -> bool {
        !self.cells.iter().any(|&c| c)
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[bool]> + '_ {
        self.cells.chunks(self.cols)
    }

    /// Live cells among the 8 Moore neighbours, wrapping at every edge.
    ///
    /// Panics if `(row, col)` is outside the grid.
    #[inline]
    pub fn count_live_neighbors(&self, row: usize, col: usize) -> u8 {
        assert!(row < self.rows && col < self.cols, "cell ({row}, {col}) outside grid");
        let up = (row + self.rows - 1) % self.rows;
        let down = (row + 1) % self.rows;
        let left = (col + self.cols - 1) % self.cols;
        let right = (col + 1) % self.cols;
        let neighbors = [
            (up, left),
            (up, col),
            (up, right),
            (row, left),
            (row, right),
            (down, left),
            (down, col),
            (down, right),
        ];
        neighbors.iter().filter(|&&(r, c)| self.alive(r, c)).count() as u8
    }

    /// Copy with a single cell flipped.
    pub fn toggled(&self, row: usize, col: usize) -> Result<Self> {
        let alive = self.get(row, col).ok_or(LifeError::OutOfRange {
            row,
            col,
            rows: self.rows,
            cols: self.cols,
        })?;
        self.with_cell(row, col, !alive)
    }

    /// Copy with a single cell set to `alive`.
    pub fn with_cell(&self, row: usize, col: usize, alive: bool) -> Result<Self> {
        if row >= self.rows || col >= self.cols {
            return Err(LifeError::OutOfRange {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        let mut next = self.clone();
        next.cells[row * self.cols + col] = alive;
        Ok(next)
    }

    /// Overwrite a cell in place. Only used while building a fresh grid
    /// that nobody else can see yet.
    pub(crate) fn set(&mut self, row: usize, col: usize, alive: bool) {
        self.cells[row * self.cols + col] = alive;
    }
}

fn check_dimensions(rows: usize, cols: usize) -> Result<()> {
    if rows == 0 || cols == 0 {
        return Err(LifeError::InvalidDimension { rows, cols });
    }
    Ok(())
}
