//! Pipeline orchestration: validate, encode, solve, decode

use super::solution::{decode_assignment, Solution};
use crate::config::Settings;
use crate::sat::{CadicalSolver, ClauseGenerator, SatSolve, SolveOutcome, NUM_VARIABLES};
use crate::sudoku::{load_puzzle_from_file, SudokuGrid, SudokuRules};
use anyhow::{Context, Result};
use std::fmt;

/// Terminal result of the pipeline.
///
/// An unsatisfiable puzzle is a legitimate answer, so it is a variant here
/// and never an error.
#[derive(Debug)]
pub enum PuzzleOutcome {
    Solved(Solution),
    Unsatisfiable,
}

/// One puzzle being pushed through the encode/solve/decode pipeline.
///
/// The stages run linearly with no retries; the first failing stage aborts
/// the whole run.
pub struct SudokuProblem {
    settings: Settings,
    puzzle: SudokuGrid,
    solver: Box<dyn SatSolve>,
}

impl SudokuProblem {
    /// Create a problem from settings, loading the puzzle file
    pub fn new(settings: Settings) -> Result<Self> {
        let puzzle = load_puzzle_from_file(&settings.input.puzzle_file)
            .context("Failed to load puzzle file")?;

        Ok(Self::with_puzzle(settings, puzzle))
    }

    /// Create a problem with an explicit puzzle grid (useful for testing)
    pub fn with_puzzle(settings: Settings, puzzle: SudokuGrid) -> Self {
        Self {
            settings,
            puzzle,
            solver: Box::new(CadicalSolver::new()),
        }
    }

    /// Replace the SAT backend. The pipeline only needs the two-outcome
    /// solve contract, so any collaborator fits here.
    pub fn with_solver(mut self, solver: Box<dyn SatSolve>) -> Self {
        self.solver = solver;
        self
    }

    /// Run the pipeline: encode the puzzle, hand the clause set to the
    /// solver, and decode the model into a completed grid.
    pub fn solve(&mut self) -> Result<PuzzleOutcome> {
        let clauses = ClauseGenerator::new().generate(&self.puzzle)?;

        println!(
            "Encoded {} givens into {} clauses over {} variables",
            self.puzzle.given_count(),
            clauses.len(),
            NUM_VARIABLES
        );

        if self.settings.output.save_cnf {
            let path = self.settings.output.output_directory.join("problem.cnf");
            std::fs::create_dir_all(&self.settings.output.output_directory)
                .context("Failed to create output directory")?;
            crate::sat::dimacs::write_problem_to_file(
                &path,
                &clauses,
                Some("Encoded Sudoku puzzle"),
            )
            .context("Failed to write clause file")?;
            println!("Clause set written to {}", path.display());
        }

        let outcome = self.solver.solve(&clauses)?;

        match outcome {
            SolveOutcome::Unsatisfiable => Ok(PuzzleOutcome::Unsatisfiable),
            SolveOutcome::Satisfiable(model) => {
                let solved = decode_assignment(&model.assignment)?;

                // The decoded grid must be a real solution of this puzzle;
                // anything else means the model and the encoding disagree.
                if let Some(violation) = SudokuRules::first_violation(&solved) {
                    anyhow::bail!("decoded model is not a valid solution: {}", violation);
                }
                if !SudokuRules::respects_givens(&solved, &self.puzzle) {
                    anyhow::bail!("decoded model contradicts the puzzle givens");
                }

                Ok(PuzzleOutcome::Solved(Solution::new(
                    self.puzzle.clone(),
                    solved,
                    clauses.len(),
                    model.solve_time,
                )))
            }
        }
    }

    /// Get the puzzle grid
    pub fn puzzle(&self) -> &SudokuGrid {
        &self.puzzle
    }

    /// Get the problem settings
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Get encoding statistics without generating the clause set; the
    /// counts are fully determined by the given cells
    pub fn encoding_statistics(&self) -> EncodingStatistics {
        let givens = self.puzzle.given_count();

        EncodingStatistics {
            variables: NUM_VARIABLES,
            clauses: crate::sat::RULE_CLAUSE_COUNT + givens,
            givens,
        }
    }
}

/// Statistics about one puzzle's encoding
#[derive(Debug, Clone)]
pub struct EncodingStatistics {
    pub variables: usize,
    pub clauses: usize,
    pub givens: usize,
}

impl fmt::Display for EncodingStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Encoding Statistics:")?;
        writeln!(f, "  Variables: {}", self.variables)?;
        writeln!(f, "  Clauses: {}", self.clauses)?;
        writeln!(f, "  Given cells: {}", self.givens)?;
        Ok(())
    }
}
