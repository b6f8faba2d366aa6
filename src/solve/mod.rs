//! Pipeline and solution types

pub mod problem;
pub mod solution;

pub use problem::{EncodingStatistics, PuzzleOutcome, SudokuProblem};
pub use solution::{decode_assignment, Solution, SolutionMetadata};
