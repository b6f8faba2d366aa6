//! Configuration settings for the Sudoku SAT solver

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub input: InputConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// Puzzle file: a 9-line text grid, or a `.cnf` clause file whose unit
    /// clauses seed the grid
    pub puzzle_file: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub output_directory: PathBuf,
    /// Write the encoded clause set to `problem.cnf` before solving
    pub save_cnf: bool,
    /// Write the solved grid as a `solution.cnf` model file
    pub save_model: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Text,
    Json,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            input: InputConfig {
                puzzle_file: PathBuf::from("puzzles/classic.txt"),
            },
            output: OutputConfig {
                format: OutputFormat::Text,
                output_directory: PathBuf::from("output"),
                save_cnf: false,
                save_model: true,
            },
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(settings)
    }

    /// Save settings to a YAML file
    pub fn to_file(&self, path: &PathBuf) -> Result<()> {
        let content = serde_yaml::to_string(self).context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if !self.input.puzzle_file.exists() {
            anyhow::bail!(
                "Puzzle file does not exist: {}",
                self.input.puzzle_file.display()
            );
        }

        Ok(())
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(ref puzzle_file) = cli_overrides.puzzle_file {
            self.input.puzzle_file = puzzle_file.clone();
        }
        if let Some(ref output_dir) = cli_overrides.output_dir {
            self.output.output_directory = output_dir.clone();
        }
        if cli_overrides.save_cnf {
            self.output.save_cnf = true;
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub puzzle_file: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub save_cnf: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_yaml_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");

        let settings = Settings::default();
        settings.to_file(&path).unwrap();
        let loaded = Settings::from_file(&path).unwrap();

        assert_eq!(loaded.input.puzzle_file, settings.input.puzzle_file);
        assert_eq!(loaded.output.format, OutputFormat::Text);
        assert!(loaded.output.save_model);
    }

    #[test]
    fn test_validate_missing_puzzle() {
        let mut settings = Settings::default();
        settings.input.puzzle_file = PathBuf::from("does/not/exist.txt");

        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_cli_overrides() {
        let mut settings = Settings::default();
        let overrides = CliOverrides {
            puzzle_file: Some(PathBuf::from("other.txt")),
            output_dir: None,
            save_cnf: true,
        };

        settings.merge_with_cli(&overrides);
        assert_eq!(settings.input.puzzle_file, PathBuf::from("other.txt"));
        assert_eq!(settings.output.output_directory, PathBuf::from("output"));
        assert!(settings.output.save_cnf);
    }
}
