//! Sudoku SAT Solver
//!
//! This library encodes 9x9 Sudoku puzzles as CNF formulas in DIMACS form,
//! delegates satisfiability to a SAT backend, and decodes satisfying models
//! back into completed grids.

pub mod config;
pub mod error;
pub mod sat;
pub mod solve;
pub mod sudoku;
pub mod utils;

pub use config::Settings;
pub use error::SudokuSatError;
pub use solve::{PuzzleOutcome, Solution, SudokuProblem};
pub use sudoku::SudokuGrid;

use anyhow::Result;

/// Main entry point: push one puzzle through the encode/solve/decode pipeline
pub fn solve_sudoku(settings: Settings) -> Result<PuzzleOutcome> {
    let mut problem = SudokuProblem::new(settings)?;
    problem.solve()
}
