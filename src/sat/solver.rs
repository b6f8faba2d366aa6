//! SAT backend integration using CaDiCaL

use super::constraints::Clause;
use crate::error::SudokuSatError;
use cadical::Solver;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Truth values for variable ids in a satisfying model
pub type Assignment = HashMap<i32, bool>;

/// A satisfying model together with how long the backend took to find it
#[derive(Debug, Clone)]
pub struct Model {
    pub assignment: Assignment,
    pub solve_time: Duration,
}

/// Outcome of one solve call.
///
/// Unsatisfiable is an expected terminal result of the pipeline, so it lives
/// on the `Ok` path; only backend faults are reported as errors.
#[derive(Debug, Clone)]
pub enum SolveOutcome {
    Satisfiable(Model),
    Unsatisfiable,
}

impl SolveOutcome {
    /// Check whether this outcome carries a model
    pub fn is_satisfiable(&self) -> bool {
        matches!(self, SolveOutcome::Satisfiable(_))
    }
}

/// Capability seam for SAT solving: consume a clause set, report UNSAT or
/// one satisfying model. The pipeline depends only on this two-outcome
/// contract, never on how the backend decides it, so tests can substitute
/// a scripted collaborator.
pub trait SatSolve {
    fn solve(&mut self, clauses: &[Clause]) -> Result<SolveOutcome, SudokuSatError>;
}

/// Production solver backed by the CaDiCaL library.
///
/// Each call builds a fresh solver instance; the clause set is append-only
/// per encode and never reused across calls.
pub struct CadicalSolver;

impl CadicalSolver {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CadicalSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl SatSolve for CadicalSolver {
    fn solve(&mut self, clauses: &[Clause]) -> Result<SolveOutcome, SudokuSatError> {
        let mut solver: Solver = Solver::new();
        let mut max_variable = 0i32;

        for clause in clauses {
            if clause.is_empty() {
                return Err(SudokuSatError::SolverFailure(
                    "cannot add empty clause".to_string(),
                ));
            }
            for &literal in &clause.literals {
                max_variable = max_variable.max(literal.abs());
            }
            solver.add_clause(clause.literals.iter().copied());
        }

        let start_time = Instant::now();
        let verdict = solver.solve();
        let solve_time = start_time.elapsed();

        match verdict {
            Some(true) => {
                let mut assignment = Assignment::new();
                for variable in 1..=max_variable {
                    if let Some(value) = solver.value(variable) {
                        assignment.insert(variable, value);
                    }
                }
                Ok(SolveOutcome::Satisfiable(Model {
                    assignment,
                    solve_time,
                }))
            }
            Some(false) => Ok(SolveOutcome::Unsatisfiable),
            None => Err(SudokuSatError::SolverFailure(
                "backend returned no verdict".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_satisfiable() {
        let mut solver = CadicalSolver::new();

        // (x1 v x2) and (-x1 v x2): x2 must be true.
        let clauses = vec![Clause::binary(1, 2), Clause::binary(-1, 2)];
        let outcome = solver.solve(&clauses).unwrap();

        match outcome {
            SolveOutcome::Satisfiable(model) => {
                assert_eq!(model.assignment.get(&2), Some(&true));
            }
            SolveOutcome::Unsatisfiable => panic!("formula is satisfiable"),
        }
    }

    #[test]
    fn test_unsatisfiable_is_not_an_error() {
        let mut solver = CadicalSolver::new();

        let clauses = vec![Clause::unit(1), Clause::unit(-1)];
        let outcome = solver.solve(&clauses).unwrap();

        assert!(!outcome.is_satisfiable());
    }

    #[test]
    fn test_unit_clauses_force_values() {
        let mut solver = CadicalSolver::new();

        let clauses = vec![Clause::unit(3), Clause::unit(-5), Clause::binary(3, 5)];
        let outcome = solver.solve(&clauses).unwrap();

        match outcome {
            SolveOutcome::Satisfiable(model) => {
                assert_eq!(model.assignment.get(&3), Some(&true));
                assert_eq!(model.assignment.get(&5), Some(&false));
            }
            SolveOutcome::Unsatisfiable => panic!("formula is satisfiable"),
        }
    }

    #[test]
    fn test_empty_clause_is_a_failure() {
        let mut solver = CadicalSolver::new();

        let err = solver.solve(&[Clause::new(vec![])]).unwrap_err();
        assert!(matches!(err, SudokuSatError::SolverFailure(_)));
    }
}
