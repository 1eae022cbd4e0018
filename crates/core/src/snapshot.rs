use serde::{Deserialize, Serialize};

/// Read-only view of the engine for presentation layers
///
/// `cells` is row-major with row 0 (the floor) first; `0` marks an empty cell.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridSnapshot {
    pub height: usize,
    pub width: usize,
    pub cells: Vec<u32>,
    pub score: u32,
    pub lines: u32,
    pub won: bool,
    pub game_over: bool,
}

impl GridSnapshot {
    /// Value at `(row, col)`, `0` when empty or outside
    pub fn value(&self, row: usize, col: usize) -> u32 {
        if row >= self.height || col >= self.width {
            return 0;
        }
        self.cells.get(row * self.width + col).copied().unwrap_or(0)
    }

    /// Whether the game has ended, by loss or by win
    pub fn finished(&self) -> bool {
        self.game_over || self.won
    }
}
