//! Goal loading from plain-text grids.
//!
//! A goal file holds one matrix row per line, each character `'0'` or `'1'`.
//! The row count gives X and the first line's length gives Y.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::BitMatrix;

/// Infer `(rows, cols)` from goal text.
pub fn goal_shape(text: &str) -> Result<(usize, usize), GoalError> {
    let mut lines = text.lines();
    let first = lines.next().ok_or(GoalError::Empty)?;
    let cols = strip_cr(first).chars().count();
    if cols == 0 {
        return Err(GoalError::Empty);
    }
    Ok((1 + lines.count(), cols))
}

/// Parse exactly `rows` x `cols` cells from goal text.
///
/// Lines past `rows` and characters past `cols` are ignored.
pub fn parse_goal(text: &str, rows: usize, cols: usize) -> Result<BitMatrix, GoalError> {
    let mut cells = Vec::with_capacity(rows * cols);
    let mut lines = text.lines();

    for row in 0..rows {
        let line = lines.next().map(strip_cr).ok_or(GoalError::MissingRows {
            expected: rows,
            found: row,
        })?;

        let mut chars = line.chars();
        for col in 0..cols {
            let cell = match chars.next() {
                Some('0') => 0,
                Some('1') => 1,
                Some(found) => return Err(GoalError::Format { row, col, found }),
                None => {
                    return Err(GoalError::ShortRow {
                        row,
                        expected: cols,
                        found: col,
                    });
                }
            };
            cells.push(cell);
        }
    }

    Ok(BitMatrix::from_cells(rows, cols, cells)?)
}

/// Load a goal file with a known shape.
pub fn load_goal_with_shape(
    path: impl AsRef<Path>,
    rows: usize,
    cols: usize,
) -> Result<BitMatrix, GoalError> {
    let text = read_goal_text(path.as_ref())?;
    parse_goal(&text, rows, cols)
}

/// Load a goal file, taking its shape from the file itself.
pub fn load_goal(path: impl AsRef<Path>) -> Result<BitMatrix, GoalError> {
    let path = path.as_ref();
    let text = read_goal_text(path)?;
    let (rows, cols) = goal_shape(&text)?;
    log::debug!("Goal {} is {}x{}", path.display(), rows, cols);
    parse_goal(&text, rows, cols)
}

fn read_goal_text(path: &Path) -> Result<String, GoalError> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => GoalError::NotFound(path.to_path_buf()),
        _ => GoalError::Io(e),
    })
}

fn strip_cr(line: &str) -> &str {
    line.strip_suffix('\r').unwrap_or(line)
}

/// Goal loading errors.
#[derive(Debug, thiserror::Error)]
pub enum GoalError {
    #[error("Goal file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Failed to read goal file: {0}")]
    Io(#[from] io::Error),
    #[error("Goal file is empty")]
    Empty,
    #[error("Invalid character {found:?} at row {row}, column {col} (expected '0' or '1')")]
    Format { row: usize, col: usize, found: char },
    #[error("Goal has {found} rows, expected {expected}")]
    MissingRows { expected: usize, found: usize },
    #[error("Row {row} has {found} cells, expected at least {expected}")]
    ShortRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("Invalid goal matrix: {0}")]
    Matrix(#[from] super::MatrixError),
}

impl GoalError {
    /// True for errors caused by too few rows or columns.
    pub fn is_size_error(&self) -> bool {
        matches!(self, Self::MissingRows { .. } | Self::ShortRow { .. })
    }
}
