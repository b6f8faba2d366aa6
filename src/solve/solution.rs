//! Decoded solutions and their metadata

use crate::error::SudokuSatError;
use crate::sat::{Assignment, VariableMap};
use crate::sudoku::SudokuGrid;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Map a satisfying assignment back onto a 9x9 grid.
///
/// Only positive entries matter: each true variable pins one digit into one
/// cell via the variable bijection. A model that sets two different digits
/// for the same cell is reported as `AmbiguousAssignment` rather than
/// silently letting the later entry win.
pub fn decode_assignment(assignment: &Assignment) -> Result<SudokuGrid, SudokuSatError> {
    let mut grid = SudokuGrid::empty();

    for (&variable, &value) in assignment {
        if !value {
            continue;
        }

        let (row, col, digit) = VariableMap::cell(variable);
        let existing = grid.get(row, col);
        if existing != 0 && existing != digit {
            let (first, second) = if existing < digit {
                (existing, digit)
            } else {
                (digit, existing)
            };
            return Err(SudokuSatError::AmbiguousAssignment {
                row,
                col,
                first,
                second,
            });
        }
        grid.set(row, col, digit);
    }

    Ok(grid)
}

/// A solved puzzle: the original givens, the completed grid, and how the
/// solve went
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Solution {
    /// The puzzle as given
    pub puzzle: SudokuGrid,
    /// The completed grid
    pub solved: SudokuGrid,
    /// Size of the clause set the solver consumed
    pub clause_count: usize,
    /// Time the backend spent on this puzzle
    #[serde(skip)]
    pub solve_time: Duration,
    /// Derived facts about the solve
    pub metadata: SolutionMetadata,
}

/// Metadata about a solution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolutionMetadata {
    /// Identifier derived from the puzzle givens
    pub id: String,
    /// Number of given cells in the puzzle
    pub givens: usize,
    /// Number of cells the solver filled in
    pub solved_cells: usize,
}

impl Solution {
    /// Create a solution record from a decoded grid
    pub fn new(
        puzzle: SudokuGrid,
        solved: SudokuGrid,
        clause_count: usize,
        solve_time: Duration,
    ) -> Self {
        let metadata = SolutionMetadata::analyze(&puzzle);

        Self {
            puzzle,
            solved,
            clause_count,
            solve_time,
            metadata,
        }
    }

    /// Convert to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Create from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Save to file
    pub fn save_to_file<P: AsRef<std::path::Path>>(&self, path: P) -> anyhow::Result<()> {
        let json = self.to_json()?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load from file
    pub fn load_from_file<P: AsRef<std::path::Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_json(&content)?)
    }
}

impl SolutionMetadata {
    fn analyze(puzzle: &SudokuGrid) -> Self {
        let givens = puzzle.given_count();

        Self {
            id: Self::generate_id(puzzle),
            givens,
            solved_cells: crate::sudoku::CELL_COUNT - givens,
        }
    }

    /// Stable identifier derived from the puzzle's given cells
    fn generate_id(puzzle: &SudokuGrid) -> String {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        for (row, col, digit) in puzzle.given_cells() {
            (row, col, digit).hash(&mut hasher);
        }

        format!("sol_{:x}", hasher.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solved_grid() -> SudokuGrid {
        let rows: Vec<Vec<u8>> = (0..9)
            .map(|r| {
                (0..9)
                    .map(|c| (((r * 3 + r / 3 + c) % 9) + 1) as u8)
                    .collect()
            })
            .collect();
        SudokuGrid::from_rows(rows).unwrap()
    }

    fn assignment_for(grid: &SudokuGrid) -> Assignment {
        grid.given_cells()
            .map(|(row, col, digit)| (VariableMap::variable(row, col, digit), true))
            .collect()
    }

    #[test]
    fn test_decode_reproduces_grid() {
        let grid = solved_grid();
        let decoded = decode_assignment(&assignment_for(&grid)).unwrap();
        assert_eq!(decoded, grid);
    }

    #[test]
    fn test_false_entries_ignored() {
        let grid = solved_grid();
        let mut assignment = assignment_for(&grid);

        // Add false entries for every digit of one cell; they carry no
        // information and must not disturb the decode.
        for digit in 1..=9u8 {
            assignment
                .entry(VariableMap::variable(0, 0, digit))
                .or_insert(false);
        }

        let decoded = decode_assignment(&assignment).unwrap();
        assert_eq!(decoded, grid);
    }

    #[test]
    fn test_partial_assignment_leaves_blanks() {
        let mut assignment = Assignment::new();
        assignment.insert(VariableMap::variable(3, 3, 7), true);

        let decoded = decode_assignment(&assignment).unwrap();
        assert_eq!(decoded.get(3, 3), 7);
        assert_eq!(decoded.given_count(), 1);
    }

    #[test]
    fn test_two_digits_for_one_cell_is_ambiguous() {
        let mut assignment = Assignment::new();
        assignment.insert(VariableMap::variable(2, 5, 4), true);
        assignment.insert(VariableMap::variable(2, 5, 8), true);

        let err = decode_assignment(&assignment).unwrap_err();
        match err {
            SudokuSatError::AmbiguousAssignment {
                row,
                col,
                first,
                second,
            } => {
                assert_eq!((row, col), (2, 5));
                assert_eq!((first, second), (4, 8));
            }
            other => panic!("expected AmbiguousAssignment, got {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_truth_for_same_digit_is_fine() {
        // Same (cell, digit) twice is redundant, not ambiguous; a HashMap
        // cannot even represent it, so drive the decode twice instead.
        let mut assignment = Assignment::new();
        assignment.insert(VariableMap::variable(1, 1, 3), true);
        let first = decode_assignment(&assignment).unwrap();
        let second = decode_assignment(&assignment).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_solution_json_round_trip() {
        let puzzle = SudokuGrid::empty();
        let solution = Solution::new(puzzle, solved_grid(), 3240, Duration::from_millis(12));

        let json = solution.to_json().unwrap();
        let restored = Solution::from_json(&json).unwrap();

        assert_eq!(restored.solved, solution.solved);
        assert_eq!(restored.metadata.givens, 0);
        assert_eq!(restored.metadata.solved_cells, 81);
    }

    #[test]
    fn test_metadata_id_is_stable() {
        let mut puzzle = SudokuGrid::empty();
        puzzle.set(0, 0, 5);

        let a = Solution::new(puzzle.clone(), solved_grid(), 3241, Duration::ZERO);
        let b = Solution::new(puzzle, solved_grid(), 3241, Duration::ZERO);
        assert_eq!(a.metadata.id, b.metadata.id);
    }
}
