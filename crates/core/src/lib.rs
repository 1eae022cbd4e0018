//! Core game logic - the grid state engine
//!
//! This crate holds the locked tiles and every rule that runs when a piece
//! lands. It has **zero dependencies** on rendering, input or timing, making it:
//!
//! - **Deterministic**: a grid and a footprint fully decide the result
//! - **Testable**: every pass can be driven on its own
//! - **Portable**: usable headless, from a terminal or from a GUI
//!
//! # Module Structure
//!
//! - [`grid`]: tile store, bounds/occupancy queries and the per-landing passes
//! - [`flood`]: breadth-first search marking tiles connected to the floor
//! - [`footprint`]: the tile matrix of a landing piece and its anchor
//! - [`engine`]: score, win/game-over flags and landing resolution
//! - [`config`]: grid dimensions, thresholds and floating policy
//! - [`rng`]: deterministic piece bag and tile value spawner
//! - [`snapshot`]: serializable read-only view for presentation
//!
//! # Landing Rules
//!
//! - **Lock**: footprint tiles are written into the grid; one outside the
//!   grid ends the game
//! - **Merge**: equal tiles stacked in a column merge into their doubled
//!   value, chaining until nothing merges; reaching 2048 wins
//! - **Line clear**: full rows are removed and their tile sum is scored
//! - **Floating removal**: tiles without an orthogonal path to the floor are
//!   removed and their values scored
//!
//! # Example
//!
//! ```
//! use tetris_2048_core::{Anchor, EngineConfig, Footprint, GridEngine};
//!
//! let mut engine = GridEngine::new(EngineConfig::default()).unwrap();
//!
//! // A vertical pair of 2s lands on the floor and merges into a 4.
//! let piece = Footprint::from_values(&[&[2], &[2]]).unwrap();
//! let landing = engine.resolve_landing(piece, Anchor::new(0, 0));
//!
//! assert!(!landing.game_over);
//! assert_eq!(engine.grid().value(0, 0), Some(4));
//! assert_eq!(engine.score(), 4);
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod flood;
pub mod footprint;
pub mod grid;
pub mod rng;
pub mod snapshot;

pub use tetris_2048_types as types;

// Re-export commonly used types for convenience
pub use config::{EngineConfig, FloatingPolicy};
pub use engine::{GridEngine, Landing, LandingReport};
pub use error::{ConfigError, FootprintError};
pub use flood::GroundScan;
pub use footprint::{Anchor, Footprint};
pub use grid::{FloatingOutcome, Grid, LineClear, LockOutcome, MergeOutcome};
pub use rng::{PieceQueue, SimpleRng, TileSpawner};
pub use snapshot::GridSnapshot;
