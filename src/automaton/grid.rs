//! Grid representation shared by the one- and two-dimensional automata

use crate::error::{AutomatonError, AutomatonResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Relative positions of the Moore neighborhood
pub const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    (0, -1),           (0, 1),
    (1, -1),  (1, 0),  (1, 1),
];

/// A fixed-size grid of binary cells.
///
/// A one-dimensional automaton is a grid with a single row. Dimensions are
/// set at construction and never change; cells are stored row-major.
/// Serialized as a list of rows of `0`/`1` integers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "Vec<Vec<u8>>", try_from = "Vec<Vec<u8>>")]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl Grid {
    /// Create an all-dead grid. Both dimensions must be positive.
    pub fn new(width: usize, height: usize) -> AutomatonResult<Self> {
        if width == 0 || height == 0 {
            return Err(AutomatonError::EmptyGrid);
        }
        Ok(Self {
            width,
            height,
            cells: vec![false; width * height],
        })
    }

    /// Create an all-dead single-row grid
    pub fn new_row(width: usize) -> AutomatonResult<Self> {
        Self::new(width, 1)
    }

    /// Build a grid from a flat row-major buffer produced by a transition
    pub(crate) fn from_raw(width: usize, height: usize, cells: Vec<bool>) -> Self {
        debug_assert_eq!(cells.len(), width * height);
        Self { width, height, cells }
    }

    /// Create a grid from rows of 0/1 integers
    pub fn from_rows(rows: Vec<Vec<u8>>) -> AutomatonResult<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if height == 0 || width == 0 {
            return Err(AutomatonError::EmptyGrid);
        }

        let mut cells = Vec::with_capacity(width * height);
        for (row_idx, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(AutomatonError::RaggedRows {
                    row: row_idx,
                    actual: row.len(),
                    expected: width,
                });
            }
            for (col_idx, &value) in row.iter().enumerate() {
                match value {
                    0 => cells.push(false),
                    1 => cells.push(true),
                    _ => {
                        return Err(AutomatonError::InvalidCellValue {
                            value,
                            row: row_idx,
                            col: col_idx,
                        })
                    }
                }
            }
        }

        Ok(Self { width, height, cells })
    }

    /// Create a single-row grid from 0/1 integers
    pub fn from_row(row: Vec<u8>) -> AutomatonResult<Self> {
        Self::from_rows(vec![row])
    }

    /// Create a grid from a 2D boolean array
    pub fn from_cells(cells: Vec<Vec<bool>>) -> AutomatonResult<Self> {
        Self::from_rows(
            cells
                .into_iter()
                .map(|row| row.into_iter().map(u8::from).collect())
                .collect(),
        )
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows; always 1 for a one-dimensional automaton
    pub fn height(&self) -> usize {
        self.height
    }

    /// `(rows, cols)`
    pub fn shape(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    /// Whether this grid is a single row, the shape used by 1D automata
    pub fn is_row(&self) -> bool {
        self.height == 1
    }

    /// Row-major cell buffer
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    /// Borrow a single row, or `None` past the last row
    pub fn row(&self, row: usize) -> Option<&[bool]> {
        if row >= self.height {
            return None;
        }
        let start = self.index(row, 0);
        Some(&self.cells[start..start + self.width])
    }

    /// Row-major buffer index of `(row, col)`; does not check bounds
    #[inline]
    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.width + col
    }

    /// Get cell state; out-of-bounds cells read as dead
    pub fn get(&self, row: usize, col: usize) -> bool {
        row < self.height && col < self.width && self.cells[self.index(row, col)]
    }

    /// Get cell state as a 0/1 integer
    pub fn value(&self, row: usize, col: usize) -> u8 {
        u8::from(self.get(row, col))
    }

    /// Set cell value at coordinates
    pub fn set(&mut self, row: usize, col: usize, value: bool) -> AutomatonResult<()> {
        if row >= self.height || col >= self.width {
            return Err(AutomatonError::OutOfBounds {
                row,
                col,
                height: self.height,
                width: self.width,
            });
        }
        let idx = self.index(row, col);
        self.cells[idx] = value;
        Ok(())
    }

    /// Count living neighbors in the Moore neighborhood.
    ///
    /// Positions outside the grid are not candidates at all, so edge cells
    /// have fewer than eight neighbors. There is no wraparound.
    pub fn count_neighbors(&self, row: usize, col: usize) -> u8 {
        NEIGHBOR_OFFSETS
            .iter()
            .filter(|(dr, dc)| {
                let r = row as isize + dr;
                let c = col as isize + dc;
                r >= 0
                    && c >= 0
                    && (r as usize) < self.height
                    && (c as usize) < self.width
                    && self.cells[self.index(r as usize, c as usize)]
            })
            .count() as u8
    }

    /// Get all living cell coordinates
    pub fn living_cells(&self) -> Vec<(usize, usize)> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &alive)| alive)
            .map(|(idx, _)| (idx / self.width, idx % self.width))
            .collect()
    }

    /// Count total living cells
    pub fn living_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell).count()
    }

    /// Check if the grid is empty (no living cells)
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&cell| !cell)
    }

    /// Fraction of living cells
    pub fn density(&self) -> f64 {
        if self.cells.is_empty() {
            return 0.0;
        }
        self.living_count() as f64 / self.cells.len() as f64
    }

    /// Rows as 0/1 integers
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        self.cells
            .chunks(self.width)
            .map(|row| row.iter().map(|&cell| u8::from(cell)).collect())
            .collect()
    }
}

impl From<Grid> for Vec<Vec<u8>> {
    fn from(grid: Grid) -> Self {
        grid.to_rows()
    }
}

impl TryFrom<Vec<Vec<u8>>> for Grid {
    type Error = AutomatonError;

    fn try_from(rows: Vec<Vec<u8>>) -> AutomatonResult<Self> {
        Grid::from_rows(rows)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.height {
            for col in 0..self.width {
                let symbol = if self.get(row, col) { "⬛" } else { "⬜" };
                write!(f, "{}", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
