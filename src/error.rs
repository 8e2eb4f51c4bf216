//! Error types for the automaton core

use crate::automaton::Dimensionality;
use thiserror::Error;

/// Errors raised by grid construction, generators, rules and the evolution driver.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AutomatonError {
    #[error("Invalid preset '{preset}' for {dimensionality} automaton")]
    InvalidPreset {
        preset: String,
        dimensionality: Dimensionality,
    },

    #[error("Invalid rule number {rule_number} (supported: {supported:?})")]
    InvalidRuleNumber {
        rule_number: u32,
        supported: &'static [u8],
    },

    #[error("Grid shape mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        expected: String,
        actual: String,
    },

    #[error("Grid size {size} is too small for preset '{preset}' (minimum {minimum})")]
    InvalidSize {
        size: usize,
        minimum: usize,
        preset: String,
    },

    #[error("Cell value {value} at ({row}, {col}) is not 0 or 1")]
    InvalidCellValue {
        value: u8,
        row: usize,
        col: usize,
    },

    #[error("Coordinates ({row}, {col}) out of bounds for {height}x{width} grid")]
    OutOfBounds {
        row: usize,
        col: usize,
        height: usize,
        width: usize,
    },

    #[error("Grid cannot be empty")]
    EmptyGrid,

    #[error("Row {row} has length {actual}, expected {expected}")]
    RaggedRows {
        row: usize,
        actual: usize,
        expected: usize,
    },
}

pub type AutomatonResult<T> = std::result::Result<T, AutomatonError>;
