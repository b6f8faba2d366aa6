//! Clause generation for the Sudoku SAT encoding

use super::variables::VariableMap;
use crate::error::SudokuSatError;
use crate::sudoku::{SudokuGrid, BLOCK_SIZE, GRID_SIZE};
use itertools::Itertools;

/// Number of clauses in the fixed rule skeleton, independent of the puzzle:
/// 81 cells x (1 at-least-one + 36 pairwise at-most-one) = 2997, plus
/// 81 row, 81 column and 81 block clauses.
pub const RULE_CLAUSE_COUNT: usize = 2997 + 81 + 81 + 81;

/// Represents a SAT clause (disjunction of literals)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    pub literals: Vec<i32>, // Positive for variable, negative for negation
}

impl Clause {
    /// Create a new clause from literals
    pub fn new(literals: Vec<i32>) -> Self {
        Self { literals }
    }

    /// Create a unit clause (single literal)
    pub fn unit(literal: i32) -> Self {
        Self {
            literals: vec![literal],
        }
    }

    /// Create a binary clause (two literals)
    pub fn binary(lit1: i32, lit2: i32) -> Self {
        Self {
            literals: vec![lit1, lit2],
        }
    }

    /// Check if clause is empty (unsatisfiable)
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    /// Check if clause is unit
    pub fn is_unit(&self) -> bool {
        self.literals.len() == 1
    }

    /// Number of literals in the clause
    pub fn len(&self) -> usize {
        self.literals.len()
    }
}

/// Builds the clause set for one puzzle.
///
/// The rule skeleton is emitted in a fixed group order (cell, row, column,
/// block, givens) so the serialized output is reproducible. The clause count
/// is always the length of the built vector; there is no separate counter to
/// drift out of sync.
pub struct ClauseGenerator {
    clauses: Vec<Clause>,
}

impl ClauseGenerator {
    /// Create a new generator with an empty clause set
    pub fn new() -> Self {
        Self {
            clauses: Vec::with_capacity(RULE_CLAUSE_COUNT + GRID_SIZE * GRID_SIZE),
        }
    }

    /// Generate the complete clause set for a puzzle.
    ///
    /// The grid is validated first; nothing is generated for a structurally
    /// invalid puzzle. For a valid grid with `k` givens the result holds
    /// exactly `RULE_CLAUSE_COUNT + k` clauses.
    pub fn generate(mut self, puzzle: &SudokuGrid) -> Result<Vec<Clause>, SudokuSatError> {
        puzzle.validate()?;

        self.cell_constraints();
        self.row_constraints();
        self.column_constraints();
        self.block_constraints();
        self.given_constraints(puzzle);

        Ok(self.clauses)
    }

    /// Each cell holds exactly one digit: one at-least-one clause over the
    /// nine digit variables, then a pairwise at-most-one clause per
    /// unordered digit pair.
    fn cell_constraints(&mut self) {
        for row in 0..GRID_SIZE {
            for col in 0..GRID_SIZE {
                let literals = (1..=9u8)
                    .map(|digit| VariableMap::variable(row, col, digit))
                    .collect();
                self.clauses.push(Clause::new(literals));

                for (d1, d2) in (1..=9u8).tuple_combinations() {
                    self.clauses.push(Clause::binary(
                        -VariableMap::variable(row, col, d1),
                        -VariableMap::variable(row, col, d2),
                    ));
                }
            }
        }
    }

    /// Each digit appears in each row: together with the cell at-most-one
    /// clauses this pins every digit to exactly one column per row.
    fn row_constraints(&mut self) {
        for row in 0..GRID_SIZE {
            for digit in 1..=9u8 {
                let literals = (0..GRID_SIZE)
                    .map(|col| VariableMap::variable(row, col, digit))
                    .collect();
                self.clauses.push(Clause::new(literals));
            }
        }
    }

    /// Each digit appears in each column
    fn column_constraints(&mut self) {
        for col in 0..GRID_SIZE {
            for digit in 1..=9u8 {
                let literals = (0..GRID_SIZE)
                    .map(|row| VariableMap::variable(row, col, digit))
                    .collect();
                self.clauses.push(Clause::new(literals));
            }
        }
    }

    /// Each digit appears in each 3x3 block
    fn block_constraints(&mut self) {
        for block_row in 0..BLOCK_SIZE {
            for block_col in 0..BLOCK_SIZE {
                for digit in 1..=9u8 {
                    let literals = (0..BLOCK_SIZE)
                        .cartesian_product(0..BLOCK_SIZE)
                        .map(|(i, j)| {
                            VariableMap::variable(
                                block_row * BLOCK_SIZE + i,
                                block_col * BLOCK_SIZE + j,
                                digit,
                            )
                        })
                        .collect();
                    self.clauses.push(Clause::new(literals));
                }
            }
        }
    }

    /// One unit clause per given cell, forcing its digit
    fn given_constraints(&mut self, puzzle: &SudokuGrid) {
        for (row, col, digit) in puzzle.given_cells() {
            self.clauses
                .push(Clause::unit(VariableMap::variable(row, col, digit)));
        }
    }
}

impl Default for ClauseGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clause_constructors() {
        let unit = Clause::unit(5);
        assert!(unit.is_unit());
        assert_eq!(unit.len(), 1);

        let binary = Clause::binary(-1, -2);
        assert_eq!(binary.literals, vec![-1, -2]);

        let empty = Clause::new(vec![]);
        assert!(empty.is_empty());
    }

    #[test]
    fn test_empty_puzzle_clause_count() {
        let clauses = ClauseGenerator::new()
            .generate(&SudokuGrid::empty())
            .unwrap();
        assert_eq!(clauses.len(), RULE_CLAUSE_COUNT);
        assert_eq!(clauses.len(), 3240);
    }

    #[test]
    fn test_clause_count_tracks_givens() {
        let mut grid = SudokuGrid::empty();
        grid.set(0, 0, 5);
        grid.set(4, 4, 1);
        grid.set(8, 8, 9);

        let clauses = ClauseGenerator::new().generate(&grid).unwrap();
        assert_eq!(clauses.len(), RULE_CLAUSE_COUNT + 3);
    }

    #[test]
    fn test_full_grid_yields_81_unit_clauses() {
        let rows: Vec<Vec<u8>> = (0..9)
            .map(|r| (0..9).map(|c| (((r * 3 + r / 3 + c) % 9) + 1) as u8).collect())
            .collect();
        let grid = SudokuGrid::from_rows(rows).unwrap();
        assert_eq!(grid.given_count(), 81);

        let clauses = ClauseGenerator::new().generate(&grid).unwrap();
        assert_eq!(clauses.len(), RULE_CLAUSE_COUNT + 81);

        let units: Vec<_> = clauses[RULE_CLAUSE_COUNT..]
            .iter()
            .filter(|c| c.is_unit())
            .collect();
        assert_eq!(units.len(), 81);
        assert!(units.iter().all(|c| c.literals[0] > 0));
    }

    #[test]
    fn test_group_ordering_is_stable() {
        let clauses = ClauseGenerator::new()
            .generate(&SudokuGrid::empty())
            .unwrap();

        // First clause: cell (0,0) holds at least one digit.
        assert_eq!(
            clauses[0].literals,
            vec![1, 2, 3, 4, 5, 6, 7, 8, 9]
        );
        // Followed by the 36 pairwise exclusions for that cell.
        assert_eq!(clauses[1].literals, vec![-1, -2]);
        assert_eq!(clauses[36].literals, vec![-8, -9]);

        // Row group starts right after all 81 cell blocks.
        let row_start = 81 * 37;
        assert_eq!(
            clauses[row_start].literals,
            (0..9).map(|col| VariableMap::variable(0, col, 1)).collect::<Vec<_>>()
        );

        // Column group follows the row group.
        let col_start = row_start + 81;
        assert_eq!(
            clauses[col_start].literals,
            (0..9).map(|row| VariableMap::variable(row, 0, 1)).collect::<Vec<_>>()
        );

        // Block group last; first clause covers the top-left block.
        let block_start = col_start + 81;
        let expected: Vec<i32> = [(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2), (2, 0), (2, 1), (2, 2)]
            .iter()
            .map(|&(r, c)| VariableMap::variable(r, c, 1))
            .collect();
        assert_eq!(clauses[block_start].literals, expected);
    }

    #[test]
    fn test_at_most_one_pairs_are_negative() {
        let clauses = ClauseGenerator::new()
            .generate(&SudokuGrid::empty())
            .unwrap();

        // Clauses 1..=36 are the digit-pair exclusions for cell (0,0).
        for clause in &clauses[1..37] {
            assert_eq!(clause.len(), 2);
            assert!(clause.literals.iter().all(|&lit| lit < 0));
        }
    }

    #[test]
    fn test_invalid_grid_generates_nothing() {
        let grid = SudokuGrid::empty();
        // Corrupt a value through serde to bypass the constructor checks.
        let mut value = serde_json::to_value(&grid).unwrap();
        value["cells"][17] = serde_json::json!(12);
        let bad: SudokuGrid = serde_json::from_value(value).unwrap();

        let err = ClauseGenerator::new().generate(&bad).unwrap_err();
        assert!(matches!(err, SudokuSatError::InvalidPuzzle(_)));
    }
}
