//! Binary matrix type shared by the goal and every individual.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A fixed-size grid of binary cells stored row-major.
///
/// Every cell holds `0` or `1`. Dimensions are fixed at construction, so two
/// matrices built from the same shape can always be compared cell by cell.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawBitMatrix")]
pub struct BitMatrix {
    rows: usize,
    cols: usize,
    cells: Vec<u8>,
}

/// Unvalidated wire form of [`BitMatrix`].
#[derive(Deserialize)]
struct RawBitMatrix {
    rows: usize,
    cols: usize,
    cells: Vec<u8>,
}

impl TryFrom<RawBitMatrix> for BitMatrix {
    type Error = MatrixError;

    fn try_from(raw: RawBitMatrix) -> Result<Self, Self::Error> {
        Self::from_cells(raw.rows, raw.cols, raw.cells)
    }
}

impl BitMatrix {
    /// Create an all-zero matrix.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![0; rows * cols],
        }
    }

    /// Build a matrix from row-major cells.
    pub fn from_cells(rows: usize, cols: usize, cells: Vec<u8>) -> Result<Self, MatrixError> {
        if cells.len() != rows * cols {
            return Err(MatrixError::CellCount {
                expected: rows * cols,
                found: cells.len(),
            });
        }
        if let Some(&bad) = cells.iter().find(|&&c| c > 1) {
            return Err(MatrixError::InvalidCell(bad));
        }
        Ok(Self { rows, cols, cells })
    }

    /// Build a matrix from nested rows. All rows must have the same length.
    pub fn from_rows(rows: &[Vec<u8>]) -> Result<Self, MatrixError> {
        let cols = rows.first().map_or(0, Vec::len);
        let mut cells = Vec::with_capacity(rows.len() * cols);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(MatrixError::RaggedRows {
                    row: i,
                    expected: cols,
                    found: row.len(),
                });
            }
            cells.extend_from_slice(row);
        }
        Self::from_cells(rows.len(), cols, cells)
    }

    /// Number of rows (X).
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns (Y).
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Row-major view of all cells.
    #[inline]
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// Cell value, or `None` outside the grid.
    pub fn get(&self, row: usize, col: usize) -> Option<u8> {
        self.index(row, col).map(|i| self.cells[i])
    }

    /// Set a cell to `0` or `1`.
    pub fn set(&mut self, row: usize, col: usize, value: u8) -> Result<(), MatrixError> {
        if value > 1 {
            return Err(MatrixError::InvalidCell(value));
        }
        let i = self.checked_index(row, col)?;
        self.cells[i] = value;
        Ok(())
    }

    /// Flip a cell (0 <-> 1).
    pub fn flip(&mut self, row: usize, col: usize) -> Result<(), MatrixError> {
        let i = self.checked_index(row, col)?;
        self.cells[i] ^= 1;
        Ok(())
    }

    /// Iterate over rows as slices.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[u8]> {
        // chunks(0) panics; a zero-column matrix has no cells anyway
        self.cells.chunks(self.cols.max(1))
    }

    /// Nested-row copy of the cells.
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        self.iter_rows().map(<[u8]>::to_vec).collect()
    }

    /// Number of cells set to `1`.
    pub fn count_ones(&self) -> usize {
        self.cells.iter().filter(|&&c| c == 1).count()
    }

    /// Number of cells that differ from `other`.
    ///
    /// # Panics
    /// If the two matrices differ in shape.
    pub fn hamming_distance(&self, other: &BitMatrix) -> usize {
        assert_eq!(self.shape(), other.shape(), "matrix shapes differ");
        self.cells
            .iter()
            .zip(other.cells.iter())
            .filter(|(a, b)| a != b)
            .count()
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.rows && col < self.cols).then(|| row * self.cols + col)
    }

    fn checked_index(&self, row: usize, col: usize) -> Result<usize, MatrixError> {
        self.index(row, col).ok_or(MatrixError::OutOfBounds {
            row,
            col,
            rows: self.rows,
            cols: self.cols,
        })
    }
}

impl fmt::Display for BitMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.iter_rows() {
            for cell in row {
                write!(f, "{cell}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Matrix construction and access errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MatrixError {
    #[error("Cell ({row}, {col}) is outside a {rows}x{cols} matrix")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
    #[error("Cell value {0} is not binary")]
    InvalidCell(u8),
    #[error("Row {row} has {found} cells, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("Expected {expected} cells, got {found}")]
    CellCount { expected: usize, found: usize },
}
