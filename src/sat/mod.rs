//! SAT encoding, DIMACS exchange format, and solver integration

pub mod constraints;
pub mod dimacs;
pub mod solver;
pub mod variables;

pub use constraints::{Clause, ClauseGenerator, RULE_CLAUSE_COUNT};
pub use solver::{Assignment, CadicalSolver, Model, SatSolve, SolveOutcome};
pub use variables::{VariableMap, NUM_VARIABLES};
