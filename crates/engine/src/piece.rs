//! Pieces module - tetromino matrices and their movement against the grid
//!
//! Each kind is a square matrix, top row first, whose marked cells carry a
//! freshly spawned tile. Pieces enter from above the grid: the anchor puts the
//! lowest occupied row one row above the top of the playfield, horizontally
//! centred. Space above the grid is open, so a piece only collides with the
//! side walls, the floor and locked tiles.

use tetris_2048_core::{Anchor, Footprint, GridEngine, TileSpawner};
use tetris_2048_types::{PieceKind, Rotation};

/// Horizontal offsets tried, in order, when a rotation does not fit in place
const ROTATION_KICKS: [i32; 3] = [0, -1, 1];

/// Occupancy matrix for a kind, top row first
fn shape(kind: PieceKind) -> &'static [&'static str] {
    match kind {
        PieceKind::I => &["....", "####", "....", "...."],
        PieceKind::O => &["##", "##"],
        PieceKind::T => &[".#.", "###", "..."],
        PieceKind::S => &[".##", "##.", "..."],
        PieceKind::Z => &["##.", ".##", "..."],
        PieceKind::J => &["#..", "###", "..."],
        PieceKind::L => &["..#", "###", "..."],
    }
}

/// Build the footprint of `kind`, drawing a value for every occupied cell
pub fn footprint_for(kind: PieceKind, spawner: &mut TileSpawner) -> Footprint {
    let rows = shape(kind);
    let side = rows.len();
    let cells: Vec<_> = rows
        .iter()
        .flat_map(|row| row.bytes())
        .map(|b| (b == b'#').then(|| spawner.spawn()))
        .collect();

    match Footprint::new(side, side, cells) {
        Ok(footprint) => footprint,
        // the shape table only holds square matrices of side 2..=4
        Err(err) => unreachable!("bad shape table for {:?}: {}", kind, err),
    }
}

/// A falling piece
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tetromino {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub anchor: Anchor,
    footprint: Footprint,
}

impl Tetromino {
    /// Create a piece of `kind` with new tiles, anchored at the origin
    pub fn new(kind: PieceKind, spawner: &mut TileSpawner) -> Self {
        Self {
            kind,
            rotation: Rotation::North,
            anchor: Anchor::default(),
            footprint: footprint_for(kind, spawner),
        }
    }

    /// Move the piece to its entry position above a `height x width` grid
    pub fn enter(&mut self, height: usize, width: usize) {
        let side = self.footprint.rows();
        let lowest = self.footprint.lowest_occupied_row().unwrap_or(side - 1);
        self.anchor = Anchor {
            x: (width.saturating_sub(self.footprint.cols()) / 2) as i32,
            y: height as i32 - (side - 1 - lowest) as i32,
        };
    }

    pub fn footprint(&self) -> &Footprint {
        &self.footprint
    }

    /// Occupied cells as grid `(row, col, value)`
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32, u32)> + '_ {
        self.footprint.occupied().map(move |(r, c, tile)| {
            let (row, col) = self.footprint.target(self.anchor, r, c);
            (row, col, tile.value())
        })
    }

    /// Whether `footprint` fits at `anchor`
    fn fits_at(footprint: &Footprint, engine: &GridEngine, anchor: Anchor) -> bool {
        let width = engine.grid().width() as i32;
        footprint.targets(anchor).all(|(row, col)| {
            row >= 0 && (0..width).contains(&col) && !engine.is_occupied(row, col)
        })
    }

    /// Whether the piece fits where it is
    pub fn fits(&self, engine: &GridEngine) -> bool {
        Self::fits_at(&self.footprint, engine, self.anchor)
    }

    /// Whether the piece could move by `(dx, dy)`
    pub fn can_shift(&self, engine: &GridEngine, dx: i32, dy: i32) -> bool {
        Self::fits_at(&self.footprint, engine, self.anchor.offset(dx, dy))
    }

    /// Move by `(dx, dy)` if the target position is free
    pub fn try_shift(&mut self, engine: &GridEngine, dx: i32, dy: i32) -> bool {
        if !self.can_shift(engine, dx, dy) {
            return false;
        }
        self.anchor = self.anchor.offset(dx, dy);
        true
    }

    /// Rotate 90° clockwise, nudging one column sideways if needed
    pub fn try_rotate_cw(&mut self, engine: &GridEngine) -> bool {
        // The O piece looks the same in every rotation
        if self.kind == PieceKind::O {
            return false;
        }

        let rotated = self.footprint.clone().rotated_cw();
        for dx in ROTATION_KICKS {
            let anchor = self.anchor.offset(dx, 0);
            if Self::fits_at(&rotated, engine, anchor) {
                self.footprint = rotated;
                self.anchor = anchor;
                self.rotation = self.rotation.rotate_cw();
                return true;
            }
        }
        false
    }

    /// Rows the piece can still fall before it rests on something
    pub fn drop_distance(&self, engine: &GridEngine) -> i32 {
        let mut distance = 0;
        while self.can_shift(engine, 0, -(distance + 1)) {
            distance += 1;
        }
        distance
    }

    /// Leftmost and rightmost occupied grid columns
    pub fn column_span(&self) -> Option<(i32, i32)> {
        self.footprint
            .occupied_columns()
            .map(|(lo, hi)| (self.anchor.x + lo as i32, self.anchor.x + hi as i32))
    }

    /// Give up the tiles for locking
    pub fn into_landing(self) -> (Footprint, Anchor) {
        (self.footprint, self.anchor)
    }
}
