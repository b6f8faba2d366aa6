//! Sudoku domain model: grid, file I/O, and rule checks

pub mod grid;
pub mod io;
pub mod rules;

pub use grid::{SudokuGrid, BLOCK_SIZE, CELL_COUNT, GRID_SIZE};
pub use io::{
    create_example_puzzles, grid_to_string, load_puzzle_from_file, parse_puzzle_from_string,
    save_grid_to_file,
};
pub use rules::SudokuRules;
