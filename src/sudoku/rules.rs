//! Sudoku rule checks for completed grids

use super::{SudokuGrid, BLOCK_SIZE, GRID_SIZE};

/// Rule checks over solved (or candidate) grids
pub struct SudokuRules;

impl SudokuRules {
    /// Check that a grid is a complete, rule-consistent solution: every
    /// cell filled, and every row, column and 3x3 block holding each of
    /// 1-9 exactly once
    pub fn is_solved(grid: &SudokuGrid) -> bool {
        grid.is_complete() && Self::first_violation(grid).is_none()
    }

    /// Check that a candidate solution keeps every given of the original
    /// puzzle unchanged
    pub fn respects_givens(solution: &SudokuGrid, puzzle: &SudokuGrid) -> bool {
        puzzle
            .given_cells()
            .all(|(row, col, digit)| solution.get(row, col) == digit)
    }

    /// Find the first rule violation in a complete grid, described for
    /// human output. Returns `None` for a valid solution.
    pub fn first_violation(grid: &SudokuGrid) -> Option<String> {
        for row in 0..GRID_SIZE {
            if !Self::unit_complete((0..GRID_SIZE).map(|col| grid.get(row, col))) {
                return Some(format!("row {} does not contain 1-9 exactly once", row));
            }
        }

        for col in 0..GRID_SIZE {
            if !Self::unit_complete((0..GRID_SIZE).map(|row| grid.get(row, col))) {
                return Some(format!("column {} does not contain 1-9 exactly once", col));
            }
        }

        for block_row in 0..BLOCK_SIZE {
            for block_col in 0..BLOCK_SIZE {
                let digits = Self::block_cells(block_row, block_col)
                    .map(|(row, col)| grid.get(row, col));
                if !Self::unit_complete(digits) {
                    return Some(format!(
                        "block ({}, {}) does not contain 1-9 exactly once",
                        block_row, block_col
                    ));
                }
            }
        }

        None
    }

    /// The nine cells of one 3x3 block, in row-major order
    pub fn block_cells(
        block_row: usize,
        block_col: usize,
    ) -> impl Iterator<Item = (usize, usize)> {
        (0..BLOCK_SIZE).flat_map(move |i| {
            (0..BLOCK_SIZE).map(move |j| (block_row * BLOCK_SIZE + i, block_col * BLOCK_SIZE + j))
        })
    }

    /// True when the nine values are exactly the digits 1-9
    fn unit_complete(values: impl Iterator<Item = u8>) -> bool {
        let mut seen = [false; 10];
        let mut count = 0;

        for value in values {
            if value == 0 || seen[value as usize] {
                return false;
            }
            seen[value as usize] = true;
            count += 1;
        }

        count == GRID_SIZE
    }
}
