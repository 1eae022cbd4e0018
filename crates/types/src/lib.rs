//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are plain data with no game logic, making them usable in any
//! context (grid engine, piece movement, presentation).
//!
//! # Grid Dimensions
//!
//! Canonical playfield dimensions:
//!
//! - **Height**: 20 rows (indexed 0-19, row 0 is the floor)
//! - **Width**: 12 columns (indexed 0-11, left to right)
//!
//! # Tile Values
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `SPAWN_VALUES` | 2, 4 | Values a freshly spawned tile may carry |
//! | `WIN_VALUE` | 2048 | A merge reaching this value wins the game |
//! | `MAX_FOOTPRINT_SIDE` | 4 | Largest piece matrix side (the I piece) |
//!
//! # Examples
//!
//! ```
//! use tetris_2048_types::{Cell, PieceKind, Rotation, Tile, GRID_HEIGHT, GRID_WIDTH};
//!
//! let mut tile = Tile::new(2);
//! assert_eq!(tile.promote(), 4);
//!
//! let cell = Cell::Occupied(tile);
//! assert_eq!(cell.value(), Some(4));
//! assert!(Cell::Empty.is_empty());
//!
//! assert_eq!(PieceKind::from_str("z"), Some(PieceKind::Z));
//! assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
//!
//! assert_eq!(GRID_HEIGHT, 20);
//! assert_eq!(GRID_WIDTH, 12);
//! ```

use serde::{Deserialize, Serialize};

/// Grid height in cells (20 rows)
pub const GRID_HEIGHT: usize = 20;

/// Grid width in cells (12 columns)
pub const GRID_WIDTH: usize = 12;

/// Tile value that wins the game once produced by a merge
pub const WIN_VALUE: u32 = 2048;

/// Values a newly spawned tile is drawn from
pub const SPAWN_VALUES: [u32; 2] = [2, 4];

/// Largest side of a piece footprint matrix
pub const MAX_FOOTPRINT_SIDE: usize = 4;

/// Largest number of cells in a piece footprint matrix (4x4)
pub const MAX_FOOTPRINT_CELLS: usize = MAX_FOOTPRINT_SIDE * MAX_FOOTPRINT_SIDE;

/// Largest supported grid side; keeps every coordinate inside `i32`
pub const MAX_GRID_SIDE: usize = 256;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_defaults() {
        assert_eq!(GRID_HEIGHT, 20);
        assert_eq!(GRID_WIDTH, 12);
        assert_eq!(WIN_VALUE, 2048);
        assert_eq!(SPAWN_VALUES, [2, 4]);
        assert_eq!(MAX_FOOTPRINT_CELLS, 16);
    }

    #[test]
    fn tile_promote_doubles() {
        let mut tile = Tile::new(1024);
        assert_eq!(tile.promote(), 2048);
        assert_eq!(tile.value(), 2048);
    }

    #[test]
    fn cell_take_leaves_empty() {
        let mut cell = Cell::Occupied(Tile::new(8));
        let tile = cell.take();
        assert_eq!(tile, Some(Tile::new(8)));
        assert!(cell.is_empty());
        assert_eq!(cell.take(), None);
    }

    #[test]
    fn tile_style_follows_value() {
        assert_eq!(Tile::new(2).style().background, Rgb::new(238, 228, 218));
        assert_eq!(Tile::new(2048).style().background, Rgb::new(237, 194, 46));
        // Past the table every tile shares the dark fallback.
        assert_eq!(Tile::new(4096).style().background, Rgb::new(60, 58, 50));
        assert_eq!(Tile::new(4).style().foreground, Rgb::new(119, 110, 101));
        assert_eq!(Tile::new(8).style().foreground, Rgb::new(255, 255, 255));
    }
}

/// An RGB color used by presentation layers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Colors a renderer uses to draw one tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileStyle {
    pub background: Rgb,
    pub foreground: Rgb,
    pub border: Rgb,
}

/// Background colors by tile value (2048 palette)
const TILE_BACKGROUNDS: [(u32, Rgb); 11] = [
    (2, Rgb::new(238, 228, 218)),
    (4, Rgb::new(237, 224, 200)),
    (8, Rgb::new(242, 177, 121)),
    (16, Rgb::new(245, 149, 99)),
    (32, Rgb::new(246, 124, 95)),
    (64, Rgb::new(246, 94, 59)),
    (128, Rgb::new(237, 207, 114)),
    (256, Rgb::new(237, 204, 97)),
    (512, Rgb::new(237, 200, 80)),
    (1024, Rgb::new(237, 197, 63)),
    (2048, Rgb::new(237, 194, 46)),
];

const FALLBACK_BACKGROUND: Rgb = Rgb::new(60, 58, 50);
const DARK_TEXT: Rgb = Rgb::new(119, 110, 101);
const LIGHT_TEXT: Rgb = Rgb::new(255, 255, 255);
const TILE_BORDER: Rgb = Rgb::new(187, 173, 160);

/// A numbered tile
///
/// Tiles are owned by exactly one grid cell (or piece matrix slot) and are
/// moved, never shared. Merging promotes the surviving tile in place and the
/// absorbed tile is dropped.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tile {
    value: u32,
}

impl Tile {
    /// Create a tile carrying `value`
    pub fn new(value: u32) -> Self {
        Self { value }
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    /// Double the value after absorbing an equal neighbour, returning the new value
    pub fn promote(&mut self) -> u32 {
        self.value = self.value.saturating_mul(2);
        self.value
    }

    /// Presentation colors for the current value
    pub fn style(&self) -> TileStyle {
        let background = TILE_BACKGROUNDS
            .iter()
            .find(|(value, _)| *value == self.value)
            .map(|(_, color)| *color)
            .unwrap_or(FALLBACK_BACKGROUND);
        let foreground = if self.value <= 4 { DARK_TEXT } else { LIGHT_TEXT };

        TileStyle {
            background,
            foreground,
            border: TILE_BORDER,
        }
    }
}

/// A cell of the grid
///
/// - `Empty`: nothing locked here
/// - `Occupied(Tile)`: the cell owns a locked tile
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Occupied(Tile),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn is_occupied(&self) -> bool {
        matches!(self, Cell::Occupied(_))
    }

    pub fn tile(&self) -> Option<&Tile> {
        match self {
            Cell::Occupied(tile) => Some(tile),
            Cell::Empty => None,
        }
    }

    pub fn tile_mut(&mut self) -> Option<&mut Tile> {
        match self {
            Cell::Occupied(tile) => Some(tile),
            Cell::Empty => None,
        }
    }

    /// Value of the held tile, if any
    pub fn value(&self) -> Option<u32> {
        self.tile().map(Tile::value)
    }

    /// Move the tile out, leaving the cell empty
    pub fn take(&mut self) -> Option<Tile> {
        match std::mem::take(self) {
            Cell::Occupied(tile) => Some(tile),
            Cell::Empty => None,
        }
    }
}

impl From<Option<Tile>> for Cell {
    fn from(value: Option<Tile>) -> Self {
        match value {
            Some(tile) => Cell::Occupied(tile),
            None => Cell::Empty,
        }
    }
}

/// The seven tetromino piece kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// Every kind, in declaration order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tetris_2048_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }
}

/// Rotation states of a piece
///
/// The rotation cycle goes: North → East → South → West → North
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rotation {
    #[default]
    North,
    East,
    South,
    West,
}

impl Rotation {
    pub fn rotate_cw(&self) -> Self {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    /// Number of clockwise quarter turns from North
    pub fn quarter_turns(&self) -> u8 {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }
}

/// Actions the piece-movement layer accepts
///
/// Every action maps to one movement or lifecycle step; landing resolution
/// happens as a consequence of a downward move failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one column left
    MoveLeft,
    /// Move piece one column right
    MoveRight,
    /// Move piece one row down, landing it if blocked
    SoftDrop,
    /// Drop piece to its lowest position and land it
    HardDrop,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Start a fresh game
    Restart,
}
