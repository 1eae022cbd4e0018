//! Piece movement and play sessions
//!
//! Everything here sits on top of the grid engine in `tetris-2048-core`:
//! falling pieces only read the grid through its occupancy queries and only
//! change it by handing a landed piece to landing resolution.
//!
//! - [`piece`]: tetromino matrices, entry position, shifts and rotation
//! - [`game`]: a session with the active and preview pieces
//! - [`place`]: one-call "rotate, slide, drop" placement for bots and tests

pub mod game;
pub mod piece;
pub mod place;

pub use game::{ActiveSnapshot, Game, GameSnapshot, PieceCell};
pub use piece::Tetromino;
pub use place::{apply_place, PlaceError};
