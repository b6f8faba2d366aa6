//! DIMACS CNF serialization and parsing
//!
//! This is the wire contract with the external solver: an optional leading
//! comment line, a `p cnf <vars> <clauses>` header, then one clause per line
//! as space-separated literals with a trailing `0`. The same module also
//! reads a clause file back into a grid of forced values (positive unit
//! clauses) and writes the solution-only model format.

use super::constraints::Clause;
use super::variables::{VariableMap, NUM_VARIABLES};
use crate::error::SudokuSatError;
use crate::sudoku::SudokuGrid;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Write a clause set in DIMACS CNF form.
///
/// The declared clause count is taken from the slice length, so header and
/// body cannot disagree.
pub fn write_problem<W: Write>(
    writer: W,
    clauses: &[Clause],
    comment: Option<&str>,
) -> Result<(), SudokuSatError> {
    let mut writer = BufWriter::new(writer);

    if let Some(comment) = comment {
        writeln!(writer, "c {}", comment)?;
    }
    writeln!(writer, "p cnf {} {}", NUM_VARIABLES, clauses.len())?;

    for clause in clauses {
        for literal in &clause.literals {
            write!(writer, "{} ", literal)?;
        }
        writeln!(writer, "0")?;
    }

    writer.flush()?;
    Ok(())
}

/// Parse a DIMACS CNF clause list.
///
/// Comment lines are skipped, the header is required, and every clause line
/// must end in the `0` terminator. Literal order and duplicates within a
/// clause are preserved verbatim. Any defect aborts the parse; no partial
/// clause set is returned.
pub fn read_problem<R: BufRead>(reader: R) -> Result<Vec<Clause>, SudokuSatError> {
    let mut lines = reader.lines();

    let declared_count = loop {
        let line = match lines.next() {
            Some(line) => line?,
            None => {
                return Err(SudokuSatError::MalformedClauseFile(
                    "missing problem header".to_string(),
                ))
            }
        };
        let line = line.trim();

        if line.is_empty() || line.starts_with('c') {
            continue;
        }

        break parse_header(line)?;
    };

    let mut clauses = Vec::with_capacity(declared_count);
    for line in lines {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('c') {
            continue;
        }

        clauses.push(parse_clause_line(line)?);
    }

    if clauses.len() != declared_count {
        return Err(SudokuSatError::MalformedClauseFile(format!(
            "header declares {} clauses, file contains {}",
            declared_count,
            clauses.len()
        )));
    }

    Ok(clauses)
}

/// Read a clause file and recover the grid of forced values.
///
/// Every positive unit clause pins one cell to one digit; all other clauses
/// are ignored. This is how a pre-seeded puzzle comes back out of an
/// encoded file.
pub fn read_givens<R: BufRead>(reader: R) -> Result<SudokuGrid, SudokuSatError> {
    let clauses = read_problem(reader)?;

    let mut grid = SudokuGrid::empty();
    for clause in &clauses {
        if !clause.is_unit() {
            continue;
        }
        let literal = clause.literals[0];
        if literal <= 0 {
            continue;
        }
        if literal > NUM_VARIABLES as i32 {
            return Err(SudokuSatError::MalformedClauseFile(format!(
                "unit clause references variable {} outside 1..={}",
                literal, NUM_VARIABLES
            )));
        }

        let (row, col, digit) = VariableMap::cell(literal);
        grid.set(row, col, digit);
    }

    Ok(grid)
}

/// Write a solved grid in the solution model format: one `<id> 0` line per
/// filled cell, preceded by a comment and a `p cnf` line.
///
/// The header count reflects the clause set the solution came from, not the
/// 81 lines written here. This format is output-only; the decoder works on
/// the in-memory model, never on this file.
pub fn write_model<W: Write>(
    writer: W,
    solution: &SudokuGrid,
    clause_count: usize,
    comment: Option<&str>,
) -> Result<(), SudokuSatError> {
    let mut writer = BufWriter::new(writer);

    if let Some(comment) = comment {
        writeln!(writer, "c {}", comment)?;
    }
    writeln!(writer, "p cnf {} {}", NUM_VARIABLES, clause_count)?;

    for (row, col, digit) in solution.given_cells() {
        writeln!(writer, "{} 0", VariableMap::variable(row, col, digit))?;
    }

    writer.flush()?;
    Ok(())
}

/// Write a clause set to a file; the handle lives only for this one pass
pub fn write_problem_to_file<P: AsRef<Path>>(
    path: P,
    clauses: &[Clause],
    comment: Option<&str>,
) -> Result<(), SudokuSatError> {
    let file = File::create(path)?;
    write_problem(file, clauses, comment)
}

/// Read a clause set from a file
pub fn read_problem_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<Clause>, SudokuSatError> {
    let file = File::open(path)?;
    read_problem(BufReader::new(file))
}

/// Read the forced-value grid back from an encoded file
pub fn read_givens_from_file<P: AsRef<Path>>(path: P) -> Result<SudokuGrid, SudokuSatError> {
    let file = File::open(path)?;
    read_givens(BufReader::new(file))
}

/// Write a solution model to a file
pub fn write_model_to_file<P: AsRef<Path>>(
    path: P,
    solution: &SudokuGrid,
    clause_count: usize,
    comment: Option<&str>,
) -> Result<(), SudokuSatError> {
    let file = File::create(path)?;
    write_model(file, solution, clause_count, comment)
}

fn parse_header(line: &str) -> Result<usize, SudokuSatError> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() != 4 || parts[0] != "p" || parts[1] != "cnf" {
        return Err(SudokuSatError::MalformedClauseFile(format!(
            "expected 'p cnf <vars> <clauses>' header, got '{}'",
            line
        )));
    }

    // The variable count is informational for this pipeline; only the
    // clause count is enforced against the body.
    parts[2].parse::<usize>().map_err(|_| {
        SudokuSatError::MalformedClauseFile(format!("non-integer variable count '{}'", parts[2]))
    })?;
    parts[3].parse::<usize>().map_err(|_| {
        SudokuSatError::MalformedClauseFile(format!("non-integer clause count '{}'", parts[3]))
    })
}

fn parse_clause_line(line: &str) -> Result<Clause, SudokuSatError> {
    let mut literals = Vec::new();
    for token in line.split_whitespace() {
        let literal = token.parse::<i32>().map_err(|_| {
            SudokuSatError::MalformedClauseFile(format!("non-integer literal '{}'", token))
        })?;
        literals.push(literal);
    }

    match literals.pop() {
        Some(0) => Ok(Clause::new(literals)),
        _ => Err(SudokuSatError::MalformedClauseFile(format!(
            "clause line '{}' does not end with the 0 terminator",
            line
        ))),
    }
}
