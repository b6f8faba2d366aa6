//! File I/O for Sudoku puzzles
//!
//! The text format is 9 non-empty lines of 9 cells each. A cell is a digit
//! `1`-`9`, or `0`/`.` for a blank; cells may optionally be separated by
//! spaces. Files ending in `.cnf` are treated as encoded clause files and
//! their forced values are read back instead.

use super::{SudokuGrid, GRID_SIZE};
use crate::sat::dimacs;
use anyhow::{Context, Result};
use std::path::Path;

/// Load a puzzle from a file, routing `.cnf` inputs through the clause-file
/// read-back path
pub fn load_puzzle_from_file<P: AsRef<Path>>(path: P) -> Result<SudokuGrid> {
    let path = path.as_ref();

    if path.extension().is_some_and(|ext| ext == "cnf") {
        return dimacs::read_givens_from_file(path)
            .with_context(|| format!("Failed to read encoded puzzle: {}", path.display()));
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read puzzle file: {}", path.display()))?;

    parse_puzzle_from_string(&content)
        .with_context(|| format!("Failed to parse puzzle from file: {}", path.display()))
}

/// Parse a puzzle from its text representation
pub fn parse_puzzle_from_string(content: &str) -> Result<SudokuGrid> {
    let lines: Vec<&str> = content
        .lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect();

    if lines.len() != GRID_SIZE {
        anyhow::bail!(
            "expected {} puzzle rows, found {}",
            GRID_SIZE,
            lines.len()
        );
    }

    let mut rows = Vec::with_capacity(GRID_SIZE);
    for (row_idx, line) in lines.iter().enumerate() {
        rows.push(parse_row(line, row_idx)?);
    }

    Ok(SudokuGrid::from_rows(rows)?)
}

fn parse_row(line: &str, row_idx: usize) -> Result<Vec<u8>> {
    let mut row = Vec::with_capacity(GRID_SIZE);

    for ch in line.chars() {
        match ch {
            ' ' | '\t' => continue,
            '.' | '0' => row.push(0),
            '1'..='9' => row.push(ch as u8 - b'0'),
            _ => anyhow::bail!(
                "invalid character '{}' in row {}; cells are 1-9, with 0 or '.' for blanks",
                ch,
                row_idx
            ),
        }
    }

    if row.len() != GRID_SIZE {
        anyhow::bail!(
            "row {} has {} cells, expected {}",
            row_idx,
            row.len(),
            GRID_SIZE
        );
    }

    Ok(row)
}

/// Save a grid to a text file, one row per line, `.` for blanks
pub fn save_grid_to_file<P: AsRef<Path>>(grid: &SudokuGrid, path: P) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    std::fs::write(path, grid_to_string(grid))
        .with_context(|| format!("Failed to write grid to file: {}", path.display()))?;

    Ok(())
}

/// Compact text form of a grid: 9 lines of 9 characters
pub fn grid_to_string(grid: &SudokuGrid) -> String {
    let mut result = String::with_capacity(GRID_SIZE * (GRID_SIZE + 1));

    for row in 0..GRID_SIZE {
        for &value in grid.row(row) {
            result.push(match value {
                0 => '.',
                d => (b'0' + d) as char,
            });
        }
        result.push('\n');
    }

    result
}

/// Create example puzzle files for the setup command
pub fn create_example_puzzles<P: AsRef<Path>>(output_dir: P) -> Result<()> {
    let dir = output_dir.as_ref();
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    // The classic 30-given puzzle.
    let classic = "\
530070000
600195000
098000060
800060003
400803001
700020006
060000280
000419005
000080079
";
    std::fs::write(dir.join("classic.txt"), classic).context("Failed to write classic.txt")?;

    // Blank grid; satisfiable with many models.
    let empty = ".........\n".repeat(GRID_SIZE);
    std::fs::write(dir.join("empty.txt"), empty).context("Failed to write empty.txt")?;

    // Two fives in the top row: structurally valid, logically unsatisfiable.
    let conflict = "\
550000000
.........
.........
.........
.........
.........
.........
.........
.........
";
    std::fs::write(dir.join("conflict.txt"), conflict).context("Failed to write conflict.txt")?;

    Ok(())
}
