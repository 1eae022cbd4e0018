//! Flood fill from the floor
//!
//! A tile is grounded when a chain of orthogonally adjacent tiles connects it
//! to row 0. [`GroundScan`] finds every grounded tile with a breadth-first
//! search seeded from the occupied floor cells. The visited buffer and queue
//! are kept between scans so steady-state play does not allocate.

use std::collections::VecDeque;

use crate::grid::Grid;

const NEIGHBOURS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Reusable breadth-first search over the occupied cells of a [`Grid`]
#[derive(Debug, Clone, Default)]
pub struct GroundScan {
    width: usize,
    visited: Vec<bool>,
    queue: VecDeque<(usize, usize)>,
}

impl GroundScan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark every grounded tile of `grid`, returning how many there are
    ///
    /// Cells are marked when enqueued, so no cell is expanded twice.
    pub fn scan(&mut self, grid: &Grid) -> usize {
        self.width = grid.width();
        self.visited.clear();
        self.visited.resize(grid.height() * grid.width(), false);
        self.queue.clear();

        for col in 0..grid.width() {
            if grid.is_occupied(0, col as i32) {
                self.visited[col] = true;
                self.queue.push_back((0, col));
            }
        }

        let mut grounded = self.queue.len();
        while let Some((row, col)) = self.queue.pop_front() {
            for (dr, dc) in NEIGHBOURS {
                let r = row as i32 + dr;
                let c = col as i32 + dc;
                if !grid.is_occupied(r, c) {
                    continue;
                }
                let idx = r as usize * self.width + c as usize;
                if !self.visited[idx] {
                    self.visited[idx] = true;
                    self.queue.push_back((r as usize, c as usize));
                    grounded += 1;
                }
            }
        }

        grounded
    }

    /// Whether `(row, col)` was reached by the last [`scan`](Self::scan)
    pub fn is_grounded(&self, row: usize, col: usize) -> bool {
        if col >= self.width {
            return false;
        }
        self.visited
            .get(row * self.width + col)
            .copied()
            .unwrap_or(false)
    }
}
