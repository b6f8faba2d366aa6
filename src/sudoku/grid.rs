//! Grid representation for 9x9 Sudoku puzzles

use crate::error::SudokuSatError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of rows and columns in a puzzle
pub const GRID_SIZE: usize = 9;
/// Side length of one 3x3 block
pub const BLOCK_SIZE: usize = 3;
/// Total number of cells
pub const CELL_COUNT: usize = GRID_SIZE * GRID_SIZE;

/// A 9x9 Sudoku grid stored row-major.
///
/// Cells hold `0` for a blank and `1..=9` for a given or solved digit.
/// Structural well-formedness (shape and value range) is the only invariant;
/// a grid with, say, two fives in one row is still a valid *input*, it just
/// encodes to an unsatisfiable formula.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SudokuGrid {
    cells: Vec<u8>,
}

impl SudokuGrid {
    /// Create an empty grid (all cells blank)
    pub fn empty() -> Self {
        Self {
            cells: vec![0; CELL_COUNT],
        }
    }

    /// Create a grid from 9 rows of 9 values each
    pub fn from_rows(rows: Vec<Vec<u8>>) -> Result<Self, SudokuSatError> {
        if rows.len() != GRID_SIZE {
            return Err(SudokuSatError::InvalidPuzzle(format!(
                "expected {} rows, got {}",
                GRID_SIZE,
                rows.len()
            )));
        }

        for (i, row) in rows.iter().enumerate() {
            if row.len() != GRID_SIZE {
                return Err(SudokuSatError::InvalidPuzzle(format!(
                    "row {} has {} values, expected {}",
                    i,
                    row.len(),
                    GRID_SIZE
                )));
            }
            for (j, &value) in row.iter().enumerate() {
                if value > 9 {
                    return Err(SudokuSatError::InvalidPuzzle(format!(
                        "cell ({}, {}) holds {}, values must be 0-9",
                        i, j, value
                    )));
                }
            }
        }

        Ok(Self {
            cells: rows.into_iter().flatten().collect(),
        })
    }

    /// Convert 2D coordinates to the flat cell index
    #[inline]
    fn index(row: usize, col: usize) -> usize {
        row * GRID_SIZE + col
    }

    /// Get the digit at a cell (0 means blank)
    pub fn get(&self, row: usize, col: usize) -> u8 {
        assert!(row < GRID_SIZE && col < GRID_SIZE, "cell ({}, {}) out of range", row, col);
        self.cells[Self::index(row, col)]
    }

    /// Set the digit at a cell
    pub fn set(&mut self, row: usize, col: usize, digit: u8) {
        assert!(row < GRID_SIZE && col < GRID_SIZE, "cell ({}, {}) out of range", row, col);
        assert!(digit <= 9, "digit {} out of range", digit);
        self.cells[Self::index(row, col)] = digit;
    }

    /// Check structural well-formedness: exactly 81 cells, each in 0-9.
    ///
    /// The constructors already guarantee this; the check exists for grids
    /// that arrive through deserialization, where the field layout alone
    /// does not enforce the value range.
    pub fn validate(&self) -> Result<(), SudokuSatError> {
        if self.cells.len() != CELL_COUNT {
            return Err(SudokuSatError::InvalidPuzzle(format!(
                "expected {} cells, got {}",
                CELL_COUNT,
                self.cells.len()
            )));
        }
        for (idx, &value) in self.cells.iter().enumerate() {
            if value > 9 {
                return Err(SudokuSatError::InvalidPuzzle(format!(
                    "cell ({}, {}) holds {}, values must be 0-9",
                    idx / GRID_SIZE,
                    idx % GRID_SIZE,
                    value
                )));
            }
        }
        Ok(())
    }

    /// Count cells with a fixed digit
    pub fn given_count(&self) -> usize {
        self.cells.iter().filter(|&&v| v != 0).count()
    }

    /// Check whether every cell holds a digit
    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(|&v| v != 0)
    }

    /// Iterate over all `(row, col, digit)` entries with a nonzero digit
    pub fn given_cells(&self) -> impl Iterator<Item = (usize, usize, u8)> + '_ {
        self.cells.iter().enumerate().filter_map(|(idx, &v)| {
            (v != 0).then_some((idx / GRID_SIZE, idx % GRID_SIZE, v))
        })
    }

    /// Get one row as a slice
    pub fn row(&self, row: usize) -> &[u8] {
        assert!(row < GRID_SIZE, "row {} out of range", row);
        &self.cells[row * GRID_SIZE..(row + 1) * GRID_SIZE]
    }
}

impl fmt::Display for SudokuGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..GRID_SIZE {
            if row > 0 && row % BLOCK_SIZE == 0 {
                writeln!(f, "------+-------+------")?;
            }
            for col in 0..GRID_SIZE {
                if col > 0 {
                    write!(f, " ")?;
                    if col % BLOCK_SIZE == 0 {
                        write!(f, "| ")?;
                    }
                }
                match self.get(row, col) {
                    0 => write!(f, ".")?,
                    d => write!(f, "{}", d)?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_grid() {
        let grid = SudokuGrid::empty();
        assert_eq!(grid.given_count(), 0);
        assert!(!grid.is_complete());
        assert!(grid.validate().is_ok());
    }

    #[test]
    fn test_from_rows() {
        let mut rows = vec![vec![0u8; 9]; 9];
        rows[0][0] = 5;
        rows[8][8] = 9;
        let grid = SudokuGrid::from_rows(rows).unwrap();

        assert_eq!(grid.get(0, 0), 5);
        assert_eq!(grid.get(8, 8), 9);
        assert_eq!(grid.get(4, 4), 0);
        assert_eq!(grid.given_count(), 2);
    }

    #[test]
    fn test_wrong_row_count_rejected() {
        let rows = vec![vec![0u8; 9]; 8];
        let err = SudokuGrid::from_rows(rows).unwrap_err();
        assert!(matches!(err, SudokuSatError::InvalidPuzzle(_)));
    }

    #[test]
    fn test_wrong_row_length_rejected() {
        let mut rows = vec![vec![0u8; 9]; 9];
        rows[3] = vec![0u8; 10];
        assert!(SudokuGrid::from_rows(rows).is_err());
    }

    #[test]
    fn test_out_of_range_value_rejected() {
        let mut rows = vec![vec![0u8; 9]; 9];
        rows[2][7] = 10;
        let err = SudokuGrid::from_rows(rows).unwrap_err();
        assert!(err.to_string().contains("(2, 7)"));
    }

    #[test]
    fn test_duplicate_givens_are_structurally_valid() {
        // Semantic consistency is not checked; this grid simply has no
        // solution once encoded.
        let mut rows = vec![vec![0u8; 9]; 9];
        rows[0][0] = 5;
        rows[0][1] = 5;
        assert!(SudokuGrid::from_rows(rows).is_ok());
    }

    #[test]
    fn test_set_and_given_cells() {
        let mut grid = SudokuGrid::empty();
        grid.set(3, 4, 7);
        grid.set(0, 0, 1);

        let givens: Vec<_> = grid.given_cells().collect();
        assert_eq!(givens, vec![(0, 0, 1), (3, 4, 7)]);
    }

    #[test]
    fn test_display_has_block_separators() {
        let grid = SudokuGrid::empty();
        let text = grid.to_string();
        assert!(text.contains('|'));
        assert!(text.contains("------+"));
        assert_eq!(text.lines().count(), 11); // 9 rows + 2 separators
    }
}
