//! Construction-time errors
//!
//! Gameplay never fails: tiles locked above the grid end the game and
//! out-of-range queries read as empty. Only building a configuration or a
//! footprint from untrusted input can be rejected.

use thiserror::Error;

/// Rejected [`EngineConfig`](crate::config::EngineConfig)
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("grid must be between {min}x{min} and {max}x{max} cells, got {height}x{width}")]
    InvalidDimensions {
        height: usize,
        width: usize,
        min: usize,
        max: usize,
    },
    #[error("win value {0} must be a power of two above every spawn value")]
    InvalidWinValue(u32),
    #[error("spawn value {0} must be a power of two of at least 2")]
    InvalidSpawnValue(u32),
}

/// Rejected [`Footprint`](crate::footprint::Footprint) matrix
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum FootprintError {
    #[error("footprint matrix has no cells")]
    Empty,
    #[error("footprint is {rows}x{cols}, larger than {max}x{max}")]
    TooLarge { rows: usize, cols: usize, max: usize },
    #[error("footprint row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("footprint declares {expected} cells but {found} were supplied")]
    CellCount { expected: usize, found: usize },
}
