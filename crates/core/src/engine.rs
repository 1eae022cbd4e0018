//! Engine module - landing resolution and engine state
//!
//! [`GridEngine`] owns the grid together with the score and the win and
//! game-over flags. Piece movement reads it through [`GridEngine::is_inside`]
//! and [`GridEngine::is_occupied`] and mutates it only through
//! [`GridEngine::resolve_landing`], which runs four passes in a fixed order:
//!
//! 1. **Lock** the footprint; any tile outside the grid ends the game
//! 2. **Merge** equal vertical neighbours (may win the game)
//! 3. **Clear** full rows
//! 4. **Settle** floating tiles according to the [`FloatingPolicy`]
//!
//! Merging first lets merged tiles complete rows in the same landing, and
//! clearing before settling lets the floating pass see the collapsed rows.
//! Every pass adds its gain to the score. Both flags only ever turn on.

use log::{debug, info};

use crate::config::{EngineConfig, FloatingPolicy};
use crate::error::ConfigError;
use crate::flood::GroundScan;
use crate::footprint::{Anchor, Footprint};
use crate::grid::{FloatingOutcome, Grid, LineClear, LockOutcome, MergeOutcome};
use crate::snapshot::GridSnapshot;

/// What the piece-movement layer needs back from a landing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Landing {
    pub game_over: bool,
    pub lines_cleared: u32,
}

/// Full breakdown of one landing resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LandingReport {
    pub lock: LockOutcome,
    pub merge: MergeOutcome,
    pub lines: LineClear,
    pub floating: FloatingOutcome,
    /// Flags after the landing
    pub game_over: bool,
    pub won: bool,
}

impl LandingReport {
    /// Score gained by this landing
    pub fn total_gain(&self) -> u32 {
        self.merge
            .gain
            .saturating_add(self.lines.gain)
            .saturating_add(self.floating.gain)
    }
}

/// The grid state engine
#[derive(Debug, Clone)]
pub struct GridEngine {
    config: EngineConfig,
    grid: Grid,
    score: u32,
    lines: u32,
    won: bool,
    game_over: bool,
    /// Flood-fill scratch reused across landings
    scan: GroundScan,
    /// Last landing breakdown (consumed by observers)
    last_report: Option<LandingReport>,
}

impl GridEngine {
    /// Create an engine with an empty grid
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let grid = Grid::new(config.height, config.width);
        Ok(Self::build(config, grid))
    }

    /// Create an engine around an existing grid
    ///
    /// The grid's dimensions take precedence over the ones in `config`.
    pub fn with_grid(config: EngineConfig, grid: Grid) -> Result<Self, ConfigError> {
        let config = EngineConfig {
            height: grid.height(),
            width: grid.width(),
            ..config
        };
        config.validate()?;
        Ok(Self::build(config, grid))
    }

    fn build(config: EngineConfig, grid: Grid) -> Self {
        Self {
            config,
            grid,
            score: 0,
            lines: 0,
            won: false,
            game_over: false,
            scan: GroundScan::new(),
            last_report: None,
        }
    }

    /// Empty the grid and zero the score and flags
    pub fn reset(&mut self) {
        self.grid.clear();
        self.score = 0;
        self.lines = 0;
        self.won = false;
        self.game_over = false;
        self.last_report = None;
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Rows cleared since the engine was created or reset
    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn won(&self) -> bool {
        self.won
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    /// Whether play should stop, by loss or by win
    pub fn finished(&self) -> bool {
        self.game_over || self.won
    }

    pub fn is_inside(&self, row: i32, col: i32) -> bool {
        self.grid.is_inside(row, col)
    }

    pub fn is_occupied(&self, row: i32, col: i32) -> bool {
        self.grid.is_occupied(row, col)
    }

    /// Lock a landed footprint into the grid
    ///
    /// Tiles that would land outside the grid are dropped and end the game.
    pub fn lock(&mut self, footprint: Footprint, anchor: Anchor) -> LockOutcome {
        let outcome = self.grid.lock(footprint, anchor);
        if outcome.overflowed > 0 && !self.game_over {
            self.game_over = true;
            info!(
                "game over: {} tile(s) locked outside the grid at anchor ({}, {})",
                outcome.overflowed, anchor.x, anchor.y
            );
        }
        outcome
    }

    /// Merge every column to a fixed point and bank the gain
    pub fn merge(&mut self) -> MergeOutcome {
        let outcome = self.grid.merge_columns();
        self.add_score(outcome.gain);
        if outcome.max_value >= self.config.win_value && !self.won {
            self.won = true;
            info!("win: merged a {} tile", outcome.max_value);
        }
        outcome
    }

    /// Clear full rows and bank their tile sums
    pub fn clear_lines(&mut self) -> LineClear {
        let cleared = self.grid.clear_full_rows();
        self.add_score(cleared.gain);
        self.lines = self.lines.saturating_add(cleared.rows);
        cleared
    }

    /// Resolve tiles with no path to the floor per the configured policy
    pub fn settle_floating(&mut self) -> FloatingOutcome {
        let outcome = match self.config.floating_policy {
            FloatingPolicy::Remove => self.grid.remove_floating(&mut self.scan),
            FloatingPolicy::Fall => self.grid.drop_floating(&mut self.scan),
        };
        self.add_score(outcome.gain);
        outcome
    }

    /// Lock a landed piece and resolve everything that follows
    ///
    /// The caller must only pass a footprint that cannot move further down
    /// and does not overlap locked tiles; overlapping tiles are overwritten.
    pub fn resolve_landing(&mut self, footprint: Footprint, anchor: Anchor) -> Landing {
        let lock = self.lock(footprint, anchor);
        let merge = self.merge();
        let lines = self.clear_lines();
        let floating = self.settle_floating();

        let report = LandingReport {
            lock,
            merge,
            lines,
            floating,
            game_over: self.game_over,
            won: self.won,
        };
        debug!(
            "landing: placed={} merges={} (+{}) lines={} (+{}) floating removed={} moved={} (+{}) score={}",
            lock.placed,
            merge.merges,
            merge.gain,
            lines.rows,
            lines.gain,
            floating.removed,
            floating.moved,
            floating.gain,
            self.score
        );
        self.last_report = Some(report);

        Landing {
            game_over: self.game_over,
            lines_cleared: lines.rows,
        }
    }

    pub fn last_report(&self) -> Option<&LandingReport> {
        self.last_report.as_ref()
    }

    /// Take and clear the last landing report.
    pub fn take_last_report(&mut self) -> Option<LandingReport> {
        self.last_report.take()
    }

    /// Fill `out` with the current state, reusing its cell buffer
    pub fn snapshot_into(&self, out: &mut GridSnapshot) {
        out.height = self.grid.height();
        out.width = self.grid.width();
        self.grid.write_values(&mut out.cells);
        out.score = self.score;
        out.lines = self.lines;
        out.won = self.won;
        out.game_over = self.game_over;
    }

    pub fn snapshot(&self) -> GridSnapshot {
        let mut s = GridSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    fn add_score(&mut self, gain: u32) {
        self.score = self.score.saturating_add(gain);
    }
}
