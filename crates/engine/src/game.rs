//! Game module - a play session driving the grid engine
//!
//! [`Game`] owns the [`GridEngine`], the falling piece and the preview piece.
//! Movement is checked against the engine's occupancy queries; when a downward
//! move fails the piece is handed to [`GridEngine::resolve_landing`] and the
//! preview piece enters. Play stops when the engine reports a loss or a win,
//! after which only [`GameAction::Restart`] is accepted.

use log::{debug, info};
use serde::{Deserialize, Serialize};

use tetris_2048_core::{
    Anchor, ConfigError, EngineConfig, GridEngine, GridSnapshot, Landing, PieceQueue, TileSpawner,
};
use tetris_2048_types::{GameAction, PieceKind, Rotation};

use crate::piece::Tetromino;

/// Seed offset so tile values and piece kinds come from different streams
const TILE_STREAM: u32 = 0x9E37_79B9;

/// One occupied cell of the falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PieceCell {
    pub row: i32,
    pub col: i32,
    pub value: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub anchor: Anchor,
    pub cells: Vec<PieceCell>,
}

impl From<&Tetromino> for ActiveSnapshot {
    fn from(value: &Tetromino) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            anchor: value.anchor,
            cells: value
                .cells()
                .map(|(row, col, value)| PieceCell { row, col, value })
                .collect(),
        }
    }
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub grid: GridSnapshot,
    pub active: Option<ActiveSnapshot>,
    pub next: PieceKind,
    pub episode_id: u32,
    pub piece_id: u32,
    pub seed: u32,
}

/// A play session
#[derive(Debug, Clone)]
pub struct Game {
    engine: GridEngine,
    active: Option<Tetromino>,
    next: Tetromino,
    piece_queue: PieceQueue,
    spawner: TileSpawner,
    seed: u32,
    /// Monotonic episode id (increments on restart).
    episode_id: u32,
    /// Monotonic id for spawned pieces.
    piece_id: u32,
    started: bool,
}

impl Game {
    /// Create a game drawing from all seven piece kinds
    pub fn new(config: EngineConfig, seed: u32) -> Result<Self, ConfigError> {
        Self::with_kinds(config, seed, &PieceKind::ALL)
    }

    /// Create a game drawing only from `kinds`
    pub fn with_kinds(
        config: EngineConfig,
        seed: u32,
        kinds: &[PieceKind],
    ) -> Result<Self, ConfigError> {
        let engine = GridEngine::new(config)?;
        let mut piece_queue = PieceQueue::with_kinds(seed, kinds);
        let mut spawner = TileSpawner::new(seed ^ TILE_STREAM, config.spawn_values);
        let next = Tetromino::new(piece_queue.draw(), &mut spawner);

        Ok(Self {
            engine,
            active: None,
            next,
            piece_queue,
            spawner,
            seed,
            episode_id: 0,
            piece_id: 0,
            started: false,
        })
    }

    /// Start the game and bring in the first piece
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        self.spawn_piece();
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn engine(&self) -> &GridEngine {
        &self.engine
    }

    pub fn active(&self) -> Option<&Tetromino> {
        self.active.as_ref()
    }

    pub fn next(&self) -> &Tetromino {
        &self.next
    }

    pub fn score(&self) -> u32 {
        self.engine.score()
    }

    pub fn finished(&self) -> bool {
        self.engine.finished()
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn piece_id(&self) -> u32 {
        self.piece_id
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Whether the session accepts movement
    pub fn playable(&self) -> bool {
        self.started && !self.finished()
    }

    /// Bring the preview piece in above the grid and draw a new preview
    pub fn spawn_piece(&mut self) -> bool {
        if self.finished() {
            return false;
        }

        let kind = self.piece_queue.draw();
        let upcoming = Tetromino::new(kind, &mut self.spawner);
        let mut piece = std::mem::replace(&mut self.next, upcoming);

        let grid = self.engine.grid();
        piece.enter(grid.height(), grid.width());
        debug!(
            "spawn {} at ({}, {})",
            piece.kind.as_str(),
            piece.anchor.x,
            piece.anchor.y
        );

        self.active = Some(piece);
        self.piece_id = self.piece_id.wrapping_add(1);
        true
    }

    /// Move the active piece sideways
    pub fn try_move(&mut self, dx: i32) -> bool {
        if !self.playable() {
            return false;
        }
        match self.active.as_mut() {
            Some(piece) => piece.try_shift(&self.engine, dx, 0),
            None => false,
        }
    }

    pub fn try_rotate(&mut self) -> bool {
        if !self.playable() {
            return false;
        }
        match self.active.as_mut() {
            Some(piece) => piece.try_rotate_cw(&self.engine),
            None => false,
        }
    }

    /// Move the active piece down one row, landing it if it is blocked
    ///
    /// Returns the landing when one happened.
    pub fn step_gravity(&mut self) -> Option<Landing> {
        if !self.playable() {
            return None;
        }
        let piece = self.active.as_mut()?;
        if piece.try_shift(&self.engine, 0, -1) {
            return None;
        }
        self.land()
    }

    /// Drop the active piece as far as it goes and land it
    pub fn hard_drop(&mut self) -> Option<Landing> {
        if !self.playable() {
            return None;
        }
        let piece = self.active.as_mut()?;
        let distance = piece.drop_distance(&self.engine);
        piece.try_shift(&self.engine, 0, -distance);
        self.land()
    }

    /// Lock the active piece, resolve the landing and spawn the next piece
    fn land(&mut self) -> Option<Landing> {
        let piece = self.active.take()?;
        let (footprint, anchor) = piece.into_landing();
        let landing = self.engine.resolve_landing(footprint, anchor);

        if self.engine.finished() {
            info!(
                "episode {} finished after {} pieces: score={} lines={} won={}",
                self.episode_id,
                self.piece_id,
                self.engine.score(),
                self.engine.lines(),
                self.engine.won()
            );
        } else {
            self.spawn_piece();
        }
        Some(landing)
    }

    /// Empty the grid and start over, keeping the random streams going
    pub fn restart(&mut self) {
        self.engine.reset();
        self.active = None;
        self.episode_id = self.episode_id.wrapping_add(1);
        self.piece_id = 0;
        self.started = true;
        self.spawn_piece();
    }

    /// Apply an action; returns whether anything changed
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::Restart => {
                self.restart();
                true
            }
            _ if !self.playable() => false,
            GameAction::MoveLeft => self.try_move(-1),
            GameAction::MoveRight => self.try_move(1),
            GameAction::RotateCw => self.try_rotate(),
            GameAction::SoftDrop => {
                // a blocked soft drop still changes the game by landing
                self.step_gravity();
                true
            }
            GameAction::HardDrop => self.hard_drop().is_some(),
        }
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            grid: self.engine.snapshot(),
            active: self.active.as_ref().map(ActiveSnapshot::from),
            next: self.next.kind,
            episode_id: self.episode_id,
            piece_id: self.piece_id,
            seed: self.seed,
        }
    }

    #[cfg(test)]
    pub(crate) fn active_mut(&mut self) -> Option<&mut Tetromino> {
        self.active.as_mut()
    }
}
