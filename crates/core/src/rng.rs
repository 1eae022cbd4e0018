//! RNG module - deterministic piece and tile generation
//!
//! Pieces come from a shuffled bag holding one of each enabled kind; the bag is
//! drawn empty before a new one is shuffled. Tile values are drawn uniformly
//! from the configured spawn values (2 or 4 by default).
//!
//! Everything runs on a simple LCG so a seed reproduces a whole game.

use arrayvec::ArrayVec;

use crate::types::{PieceKind, Tile, SPAWN_VALUES};

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        // high bits of an LCG are far better distributed than the low ones
        (self.next_u32() >> 16) % max
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }
}

/// Bag-based piece generator over a set of enabled kinds
#[derive(Debug, Clone)]
pub struct PieceQueue {
    kinds: ArrayVec<PieceKind, 7>,
    /// Current bag of pieces
    bag: ArrayVec<PieceKind, 7>,
    /// Index into current bag
    bag_index: usize,
    /// RNG for shuffling
    rng: SimpleRng,
}

impl PieceQueue {
    /// Create a queue over all seven kinds
    pub fn new(seed: u32) -> Self {
        Self::with_kinds(seed, &PieceKind::ALL)
    }

    /// Create a queue over `kinds`; duplicates are ignored and an empty set
    /// falls back to all seven kinds
    pub fn with_kinds(seed: u32, kinds: &[PieceKind]) -> Self {
        let mut enabled = ArrayVec::new();
        for &kind in kinds {
            if !enabled.contains(&kind) {
                enabled.push(kind);
            }
        }
        if enabled.is_empty() {
            enabled = PieceKind::ALL.into_iter().collect();
        }

        let mut queue = Self {
            bag: enabled.clone(),
            kinds: enabled,
            bag_index: 0,
            rng: SimpleRng::new(seed),
        };
        queue.refill_bag();
        queue
    }

    /// Generate a new shuffled bag
    fn refill_bag(&mut self) {
        self.bag = self.kinds.clone();
        self.rng.shuffle(&mut self.bag);
        self.bag_index = 0;
    }

    /// Draw the next piece from the queue
    pub fn draw(&mut self) -> PieceKind {
        if self.bag_index >= self.bag.len() {
            self.refill_bag();
        }

        let piece = self.bag[self.bag_index];
        self.bag_index += 1;
        piece
    }

    /// Get current bag for testing/debugging
    #[cfg(test)]
    pub fn current_bag(&self) -> &[PieceKind] {
        &self.bag[self.bag_index..]
    }
}

/// Draws values for freshly spawned tiles
#[derive(Debug, Clone)]
pub struct TileSpawner {
    values: [u32; 2],
    rng: SimpleRng,
}

impl TileSpawner {
    pub fn new(seed: u32, values: [u32; 2]) -> Self {
        Self {
            values,
            rng: SimpleRng::new(seed),
        }
    }

    /// A new tile carrying one of the spawn values, picked uniformly
    pub fn spawn(&mut self) -> Tile {
        let pick = self.rng.next_range(self.values.len() as u32) as usize;
        Tile::new(self.values[pick])
    }
}

impl Default for TileSpawner {
    fn default() -> Self {
        Self::new(1, SPAWN_VALUES)
    }
}
