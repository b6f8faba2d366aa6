//! Display and output formatting utilities

use crate::config::OutputFormat;
use crate::sat::dimacs;
use crate::solve::Solution;
use crate::sudoku::{save_grid_to_file, SudokuGrid, GRID_SIZE};
use anyhow::Result;
use std::path::Path;

/// Format solutions for display and persist them to disk
pub struct SolutionFormatter;

impl SolutionFormatter {
    /// Format a single solution for console output
    pub fn format_solution(solution: &Solution) -> String {
        let mut output = String::new();

        output.push_str(&format!("=== Solution {} ===\n", solution.metadata.id));
        output.push_str(&format!(
            "Givens: {}, solved cells: {}\n",
            solution.metadata.givens, solution.metadata.solved_cells
        ));
        output.push_str(&format!("Clauses: {}\n", solution.clause_count));
        output.push_str(&format!(
            "Solve time: {:.3}s\n\n",
            solution.solve_time.as_secs_f64()
        ));

        output.push_str("Puzzle:\n");
        output.push_str(&solution.puzzle.to_string());
        output.push('\n');
        output.push_str("Solved:\n");
        output.push_str(&solution.solved.to_string());

        output
    }

    /// Format a grid with row and column indices
    pub fn format_grid_with_coords(grid: &SudokuGrid) -> String {
        let mut output = String::new();

        output.push_str("   ");
        for col in 0..GRID_SIZE {
            output.push_str(&format!("{} ", col));
        }
        output.push('\n');

        for row in 0..GRID_SIZE {
            output.push_str(&format!("{:2} ", row));
            for col in 0..GRID_SIZE {
                match grid.get(row, col) {
                    0 => output.push_str(". "),
                    d => output.push_str(&format!("{} ", d)),
                }
            }
            output.push('\n');
        }

        output
    }

    /// Save a solution to the output directory in the configured format.
    ///
    /// Alongside the formatted solution this always writes the solved grid
    /// as `solution.txt`, and optionally the model form as `solution.cnf`
    /// with a header reflecting the original clause count.
    pub fn save_solution<P: AsRef<Path>>(
        solution: &Solution,
        output_dir: P,
        format: &OutputFormat,
        save_model: bool,
    ) -> Result<()> {
        let output_dir = output_dir.as_ref();
        std::fs::create_dir_all(output_dir)?;

        match format {
            OutputFormat::Text => {
                let path = output_dir.join(format!("{}.txt", solution.metadata.id));
                std::fs::write(path, Self::format_solution(solution))?;
            }
            OutputFormat::Json => {
                let path = output_dir.join(format!("{}.json", solution.metadata.id));
                solution.save_to_file(path)?;
            }
        }

        save_grid_to_file(&solution.solved, output_dir.join("solution.txt"))?;

        if save_model {
            dimacs::write_model_to_file(
                output_dir.join("solution.cnf"),
                &solution.solved,
                solution.clause_count,
                Some("Sudoku solution"),
            )?;
        }

        Ok(())
    }
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if terminal supports it)
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    /// Check if terminal supports color
    fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err()
            && (std::env::var("TERM").unwrap_or_default() != "dumb")
    }

    /// Format success message
    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    /// Format error message
    pub fn error(text: &str) -> String {
        Self::colored(text, Color::Red)
    }

    /// Format warning message
    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    /// Format info message
    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
        }
    }
}
