//! Display and output helpers

pub mod display;

pub use display::{Color, ColorOutput, SolutionFormatter};
