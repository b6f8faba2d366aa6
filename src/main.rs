//! Main CLI application for the Sudoku SAT solver

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;
use sudoku_sat::{
    config::{CliOverrides, Settings},
    sat::{dimacs, ClauseGenerator},
    solve::{PuzzleOutcome, SudokuProblem},
    sudoku::{create_example_puzzles, load_puzzle_from_file, SudokuRules},
    utils::{ColorOutput, SolutionFormatter},
};

#[derive(Parser)]
#[command(name = "sudoku_sat")]
#[command(about = "Sudoku solver via SAT encoding")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a puzzle end to end
    Solve {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Puzzle file (overrides config); text grid or .cnf clause file
        #[arg(short, long)]
        puzzle: Option<PathBuf>,

        /// Output directory (overrides config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also write the encoded clause set to problem.cnf
        #[arg(long)]
        save_cnf: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Encode a puzzle to a DIMACS clause file without solving it
    Encode {
        /// Puzzle file to encode
        #[arg(short, long)]
        puzzle: PathBuf,

        /// Clause file to write
        #[arg(short, long, default_value = "problem.cnf")]
        output: PathBuf,

        /// Comment for the leading DIMACS comment line
        #[arg(long, default_value = "Encoded Sudoku puzzle")]
        comment: String,
    },

    /// Check a candidate solution against a puzzle
    Validate {
        /// Original puzzle file
        #[arg(short, long)]
        puzzle: PathBuf,

        /// Candidate solution file
        #[arg(short, long)]
        solution: PathBuf,
    },

    /// Create example configuration and puzzle files
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Solve {
            config,
            puzzle,
            output,
            save_cnf,
            verbose,
        } => solve_command(config, puzzle, output, save_cnf, verbose),
        Commands::Encode {
            puzzle,
            output,
            comment,
        } => encode_command(puzzle, output, comment),
        Commands::Validate { puzzle, solution } => validate_command(puzzle, solution),
        Commands::Setup { directory, force } => setup_command(directory, force),
    }
}

fn solve_command(
    config_path: PathBuf,
    puzzle_file: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    save_cnf: bool,
    verbose: bool,
) -> Result<()> {
    let mut settings = if config_path.exists() {
        Settings::from_file(&config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))?
    } else {
        println!(
            "{}",
            ColorOutput::warning(&format!(
                "Config file {} not found, using defaults",
                config_path.display()
            ))
        );
        Settings::default()
    };

    let cli_overrides = CliOverrides {
        puzzle_file,
        output_dir,
        save_cnf,
    };
    settings.merge_with_cli(&cli_overrides);

    settings
        .validate()
        .context("Configuration validation failed")?;

    let start_time = Instant::now();
    let mut problem =
        SudokuProblem::new(settings.clone()).context("Failed to create Sudoku problem")?;

    if verbose {
        println!("Puzzle:");
        println!("{}", problem.puzzle());
        println!("{}", problem.encoding_statistics());
    }

    let outcome = problem.solve().context("Failed to solve puzzle")?;
    let total_time = start_time.elapsed();

    match outcome {
        PuzzleOutcome::Unsatisfiable => {
            // A valid terminal answer, not a failure of the pipeline.
            println!(
                "{}",
                ColorOutput::warning(&format!(
                    "Puzzle has no solution ({:.3}s)",
                    total_time.as_secs_f64()
                ))
            );
        }
        PuzzleOutcome::Solved(solution) => {
            println!(
                "{}",
                ColorOutput::success(&format!("Solved in {:.3}s", total_time.as_secs_f64()))
            );
            println!("\n{}", SolutionFormatter::format_solution(&solution));

            SolutionFormatter::save_solution(
                &solution,
                &settings.output.output_directory,
                &settings.output.format,
                settings.output.save_model,
            )
            .context("Failed to save solution")?;

            println!(
                "{}",
                ColorOutput::success(&format!(
                    "Solution saved to {}",
                    settings.output.output_directory.display()
                ))
            );
        }
    }

    Ok(())
}

fn encode_command(puzzle_path: PathBuf, output_path: PathBuf, comment: String) -> Result<()> {
    let puzzle = load_puzzle_from_file(&puzzle_path)
        .with_context(|| format!("Failed to load puzzle from {}", puzzle_path.display()))?;

    let clauses = ClauseGenerator::new()
        .generate(&puzzle)
        .context("Failed to encode puzzle")?;

    dimacs::write_problem_to_file(&output_path, &clauses, Some(&comment))
        .with_context(|| format!("Failed to write clause file {}", output_path.display()))?;

    println!(
        "{}",
        ColorOutput::success(&format!(
            "Encoded {} givens into {} clauses: {}",
            puzzle.given_count(),
            clauses.len(),
            output_path.display()
        ))
    );

    Ok(())
}

fn validate_command(puzzle_path: PathBuf, solution_path: PathBuf) -> Result<()> {
    let puzzle = load_puzzle_from_file(&puzzle_path)
        .with_context(|| format!("Failed to load puzzle from {}", puzzle_path.display()))?;
    let solution = load_puzzle_from_file(&solution_path)
        .with_context(|| format!("Failed to load solution from {}", solution_path.display()))?;

    if let Some(violation) = SudokuRules::first_violation(&solution) {
        println!(
            "{}",
            ColorOutput::error(&format!("Solution is invalid: {}", violation))
        );
        return Ok(());
    }

    if !SudokuRules::respects_givens(&solution, &puzzle) {
        println!(
            "{}",
            ColorOutput::error("Solution does not match the puzzle givens")
        );
        return Ok(());
    }

    println!("{}", ColorOutput::success("Solution is valid"));
    Ok(())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("Setting up project structure..."));

    let config_dir = directory.join("config");
    let puzzle_dir = directory.join("puzzles");
    let output_dir = directory.join("output");

    for dir in [&config_dir, &puzzle_dir, &output_dir] {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }

    let config_path = config_dir.join("default.yaml");
    if !config_path.exists() || force {
        Settings::default()
            .to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!("Skipped: {} (already exists)", config_path.display());
    }

    create_example_puzzles(&puzzle_dir).context("Failed to create example puzzles")?;
    println!("Created example puzzles in: {}", puzzle_dir.display());

    println!("\n{}", ColorOutput::success("Setup complete"));
    println!("\nNext steps:");
    println!("1. Add your puzzles to {}", puzzle_dir.display());
    println!("2. Run: cargo run -- solve --puzzle puzzles/classic.txt");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from([
            "sudoku_sat",
            "solve",
            "--puzzle",
            "puzzles/classic.txt",
            "--save-cnf",
        ]);

        assert!(cli.is_ok());
    }

    #[test]
    fn test_setup_command() {
        let temp_dir = tempdir().unwrap();
        let result = setup_command(temp_dir.path().to_path_buf(), false);

        assert!(result.is_ok());
        assert!(temp_dir.path().join("config/default.yaml").exists());
        assert!(temp_dir.path().join("puzzles/classic.txt").exists());
    }

    #[test]
    fn test_encode_command_writes_header() {
        let temp_dir = tempdir().unwrap();
        create_example_puzzles(temp_dir.path()).unwrap();

        let cnf_path = temp_dir.path().join("classic.cnf");
        encode_command(
            temp_dir.path().join("classic.txt"),
            cnf_path.clone(),
            "classic".to_string(),
        )
        .unwrap();

        let content = std::fs::read_to_string(cnf_path).unwrap();
        assert!(content.starts_with("c classic\np cnf 729 3270\n"));
    }
}
