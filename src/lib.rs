//! Tetris 2048 (workspace facade crate).
//!
//! Re-exports the member crates as `tetris_2048::{core, engine, types}` so
//! callers and integration tests depend on one package.

pub use tetris_2048_core as core;
pub use tetris_2048_engine as engine;
pub use tetris_2048_types as types;
