//! Error types for the Sudoku SAT pipeline

use thiserror::Error;

/// Errors produced by the encode/solve/decode pipeline.
///
/// An unsatisfiable puzzle is not an error; it is reported as a normal
/// outcome by the pipeline. Only backend faults travel the `SolverFailure`
/// path, so callers can tell "no solution exists" apart from "the solver
/// broke".
#[derive(Debug, Error)]
pub enum SudokuSatError {
    /// The input grid is not a structurally valid 9x9 Sudoku
    /// (wrong shape, or a cell value outside 0-9).
    #[error("invalid puzzle: {0}")]
    InvalidPuzzle(String),

    /// A DIMACS clause file could not be parsed.
    #[error("malformed clause file: {0}")]
    MalformedClauseFile(String),

    /// The SAT backend reported an internal fault.
    #[error("solver failure: {0}")]
    SolverFailure(String),

    /// A model assigned two different digits to the same cell.
    #[error("ambiguous assignment for cell ({row}, {col}): digits {first} and {second} are both set")]
    AmbiguousAssignment {
        row: usize,
        col: usize,
        first: u8,
        second: u8,
    },

    /// Underlying I/O failure while reading or writing a clause file.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
