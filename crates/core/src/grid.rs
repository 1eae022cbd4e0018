//! Grid module - the store of locked tiles
//!
//! The grid is `height x width` cells kept in a flat, row-major vector.
//! Coordinates are `(row, col)`: row 0 is the floor and rows count upward,
//! columns count left to right. Queries take `i32` so callers can probe space
//! outside the grid (a piece entering from above) without conversions; such
//! cells are never inside and never occupied.
//!
//! Besides storage this module implements the per-landing passes that act on
//! the tiles alone: lock, vertical merge, line clear and floating removal.
//! Scoring and flags are kept by [`GridEngine`](crate::engine::GridEngine).

use crate::flood::GroundScan;
use crate::footprint::{Anchor, Footprint};
use crate::types::{Cell, Tile};

/// Result of locking a footprint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LockOutcome {
    /// Tiles written into the grid
    pub placed: u32,
    /// Tiles that landed outside the grid and were dropped
    pub overflowed: u32,
}

/// Result of a merge pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MergeOutcome {
    pub merges: u32,
    /// Sum of every value produced by a merge
    pub gain: u32,
    /// Largest value produced by a merge (0 if none)
    pub max_value: u32,
}

impl MergeOutcome {
    fn record(&mut self, value: u32) {
        self.merges += 1;
        self.gain = self.gain.saturating_add(value);
        self.max_value = self.max_value.max(value);
    }

    fn absorb(&mut self, other: MergeOutcome) {
        self.merges += other.merges;
        self.gain = self.gain.saturating_add(other.gain);
        self.max_value = self.max_value.max(other.max_value);
    }
}

/// Result of clearing full rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LineClear {
    pub rows: u32,
    /// Sum of the tile values in the cleared rows
    pub gain: u32,
}

/// Result of resolving floating tiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FloatingOutcome {
    /// Tiles deleted (remove policy)
    pub removed: u32,
    /// Tiles that dropped to a lower row (fall policy)
    pub moved: u32,
    /// Sum of the deleted tile values
    pub gain: u32,
}

/// The grid of locked tiles
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    height: usize,
    width: usize,
    /// Flat array of cells, row-major order (row * width + col)
    cells: Vec<Cell>,
}

impl Grid {
    /// Create an empty grid
    pub fn new(height: usize, width: usize) -> Self {
        Self {
            height,
            width,
            cells: vec![Cell::Empty; height * width],
        }
    }

    /// Build a grid from rows of tile values listed floor first; `0` is empty
    ///
    /// Rows missing from `rows` stay empty. This is a fixture helper for
    /// tests, benches and examples; play builds its grid with [`Grid::new`]
    /// and [`Grid::lock`].
    ///
    /// # Panics
    ///
    /// Panics if more than `height` rows are given or a row is not `width` long.
    ///
    /// # Examples
    ///
    /// ```
    /// use tetris_2048_core::Grid;
    ///
    /// let grid = Grid::from_values(4, 4, &[&[2, 0, 0, 4], &[2, 0, 0, 0]]);
    /// assert_eq!(grid.value(0, 3), Some(4));
    /// assert_eq!(grid.value(1, 0), Some(2));
    /// assert_eq!(grid.value(1, 3), None);
    /// ```
    pub fn from_values(height: usize, width: usize, rows: &[&[u32]]) -> Self {
        assert!(rows.len() <= height, "{} rows exceed height {}", rows.len(), height);

        let mut grid = Self::new(height, width);
        for (row, values) in rows.iter().enumerate() {
            assert_eq!(values.len(), width, "row {} has wrong width", row);
            for (col, &value) in values.iter().enumerate() {
                if value != 0 {
                    let idx = grid.idx(row, col);
                    grid.cells[idx] = Cell::Occupied(Tile::new(value));
                }
            }
        }
        grid
    }

    /// Flat index for in-bounds coordinates
    #[inline(always)]
    fn idx(&self, row: usize, col: usize) -> usize {
        row * self.width + col
    }

    /// Flat index from signed coordinates, `None` outside the grid
    #[inline(always)]
    fn index(&self, row: i32, col: i32) -> Option<usize> {
        if !self.is_inside(row, col) {
            return None;
        }
        Some(self.idx(row as usize, col as usize))
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Check if `(row, col)` lies inside the grid
    pub fn is_inside(&self, row: i32, col: i32) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.height && (col as usize) < self.width
    }

    /// Check if `(row, col)` is inside and holds a tile
    pub fn is_occupied(&self, row: i32, col: i32) -> bool {
        self.get(row, col).is_some()
    }

    /// Tile at `(row, col)`, `None` if empty or outside
    pub fn get(&self, row: i32, col: i32) -> Option<&Tile> {
        self.index(row, col).and_then(|idx| self.cells[idx].tile())
    }

    /// Value of the tile at `(row, col)`
    pub fn value(&self, row: i32, col: i32) -> Option<u32> {
        self.get(row, col).map(Tile::value)
    }

    /// Put `tile` at `(row, col)`, replacing whatever was there
    ///
    /// Returns false (and drops the tile) if the cell is outside the grid.
    pub fn place(&mut self, row: i32, col: i32, tile: Tile) -> bool {
        match self.index(row, col) {
            Some(idx) => {
                self.cells[idx] = Cell::Occupied(tile);
                true
            }
            None => false,
        }
    }

    /// Move the tile out of `(row, col)`
    pub fn take(&mut self, row: i32, col: i32) -> Option<Tile> {
        let idx = self.index(row, col)?;
        self.cells[idx].take()
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, row: usize) -> bool {
        self.row(row)
            .is_some_and(|cells| cells.iter().all(Cell::is_occupied))
    }

    /// Cells of one row, left to right
    pub fn row(&self, row: usize) -> Option<&[Cell]> {
        if row >= self.height {
            return None;
        }
        let start = row * self.width;
        Some(&self.cells[start..start + self.width])
    }

    /// Rows from the floor upward
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width.max(1))
    }

    /// Sum of the tile values in a row
    pub fn row_sum(&self, row: usize) -> u32 {
        self.row(row)
            .map(|cells| {
                cells
                    .iter()
                    .filter_map(Cell::value)
                    .fold(0u32, u32::saturating_add)
            })
            .unwrap_or(0)
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_occupied()).count()
    }

    /// Largest tile value on the grid (0 when empty)
    pub fn max_value(&self) -> u32 {
        self.cells.iter().filter_map(Cell::value).max().unwrap_or(0)
    }

    /// Column values from the floor upward, `0` for empty cells
    pub fn column_values(&self, col: usize) -> Vec<u32> {
        if col >= self.width {
            return Vec::new();
        }
        (0..self.height)
            .map(|row| self.cells[self.idx(row, col)].value().unwrap_or(0))
            .collect()
    }

    /// Rows of values from the floor upward, `0` for empty cells
    pub fn to_values(&self) -> Vec<Vec<u32>> {
        self.rows()
            .map(|cells| cells.iter().map(|cell| cell.value().unwrap_or(0)).collect())
            .collect()
    }

    /// Write row-major values into `out`, reusing its allocation
    pub fn write_values(&self, out: &mut Vec<u32>) {
        out.clear();
        out.extend(self.cells.iter().map(|cell| cell.value().unwrap_or(0)));
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Clear the entire grid
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = Cell::Empty;
        }
    }

    /// Lock every occupied footprint cell into the grid
    ///
    /// The caller guarantees the target cells inside the grid are empty.
    /// Targets outside the grid are counted as overflow and their tiles dropped.
    pub fn lock(&mut self, footprint: Footprint, anchor: Anchor) -> LockOutcome {
        let rows = footprint.rows();
        let mut outcome = LockOutcome::default();

        for (r, c, tile) in footprint.into_occupied() {
            let row = anchor.y + (rows - 1 - r) as i32;
            let col = anchor.x + c as i32;
            if self.place(row, col, tile) {
                outcome.placed += 1;
            } else {
                outcome.overflowed += 1;
            }
        }

        outcome
    }

    /// Merge equal vertical neighbours in one column until nothing merges
    ///
    /// Scanning goes upward from the floor. After a merge the same row is
    /// tested again against the tile that slid into place above it, so a
    /// column `[2, 2, 2, 2]` collapses to `[8]` in one call.
    pub fn merge_column(&mut self, col: usize) -> MergeOutcome {
        let mut outcome = MergeOutcome::default();
        if col >= self.width {
            return outcome;
        }

        loop {
            let mut pass = MergeOutcome::default();
            let mut row = 0;
            while row + 1 < self.height {
                match self.merge_up(row, col) {
                    Some(value) => pass.record(value),
                    None => row += 1,
                }
            }

            if pass.merges == 0 {
                return outcome;
            }
            outcome.absorb(pass);
        }
    }

    /// Run [`merge_column`](Self::merge_column) on every column
    pub fn merge_columns(&mut self) -> MergeOutcome {
        let mut outcome = MergeOutcome::default();
        for col in 0..self.width {
            outcome.absorb(self.merge_column(col));
        }
        outcome
    }

    /// Fold the tile above `(row, col)` into it when the values match
    fn merge_up(&mut self, row: usize, col: usize) -> Option<u32> {
        let lower = self.idx(row, col);
        let upper = self.idx(row + 1, col);

        let above = self.cells[upper].value()?;
        let tile = self.cells[lower].tile_mut()?;
        if tile.value() != above {
            return None;
        }

        let merged = tile.promote();
        self.cells[upper] = Cell::Empty;
        self.collapse_column(row + 1, col);
        Some(merged)
    }

    /// Shift everything above `gap` in `col` down one row; the top cell ends empty
    fn collapse_column(&mut self, gap: usize, col: usize) {
        for row in gap + 1..self.height {
            let from = self.idx(row, col);
            let to = self.idx(row - 1, col);
            self.cells[to] = std::mem::take(&mut self.cells[from]);
        }
    }

    /// Clear every full row, shifting the rows above down
    ///
    /// Rows are compacted in one bottom-to-top sweep: kept rows are copied down
    /// to the next write position, full rows are summed and skipped, and the
    /// rows left over at the top are emptied. This matches clearing each full
    /// row in turn and re-testing the row that slides into its place, so
    /// stacked full rows are all removed and each is counted once.
    pub fn clear_full_rows(&mut self) -> LineClear {
        let mut cleared = LineClear::default();
        let width = self.width;
        let mut write_row = 0;

        for read_row in 0..self.height {
            if self.is_row_full(read_row) {
                cleared.rows += 1;
                cleared.gain = cleared.gain.saturating_add(self.row_sum(read_row));
                continue;
            }

            if write_row != read_row {
                for col in 0..width {
                    let from = self.idx(read_row, col);
                    let to = self.idx(write_row, col);
                    self.cells[to] = std::mem::take(&mut self.cells[from]);
                }
            }
            write_row += 1;
        }

        // Clear the remaining rows at the top
        let start = write_row * width;
        for cell in &mut self.cells[start..] {
            *cell = Cell::Empty;
        }

        cleared
    }

    /// Delete every tile with no orthogonal path of tiles to the floor
    ///
    /// `scan` is scratch space reused between calls.
    pub fn remove_floating(&mut self, scan: &mut GroundScan) -> FloatingOutcome {
        scan.scan(self);

        let mut outcome = FloatingOutcome::default();
        for row in 0..self.height {
            for col in 0..self.width {
                if scan.is_grounded(row, col) {
                    continue;
                }
                let idx = self.idx(row, col);
                if let Some(tile) = self.cells[idx].take() {
                    outcome.removed += 1;
                    outcome.gain = outcome.gain.saturating_add(tile.value());
                }
            }
        }

        outcome
    }

    /// Drop every floating tile straight down its column
    ///
    /// Tiles are classified like [`remove_floating`](Self::remove_floating)
    /// and then settled from the lowest row up, so each one rests on whatever
    /// is below it after the tiles underneath have settled. Nothing is scored.
    pub fn drop_floating(&mut self, scan: &mut GroundScan) -> FloatingOutcome {
        scan.scan(self);

        let mut outcome = FloatingOutcome::default();
        for row in 1..self.height {
            for col in 0..self.width {
                if scan.is_grounded(row, col) {
                    continue;
                }
                let idx = self.idx(row, col);
                let Some(tile) = self.cells[idx].take() else {
                    continue;
                };

                let mut target = row;
                while target > 0 && self.cells[self.idx(target - 1, col)].is_empty() {
                    target -= 1;
                }
                if target != row {
                    outcome.moved += 1;
                }
                let to = self.idx(target, col);
                self.cells[to] = Cell::Occupied(tile);
            }
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[should_panic(expected = "wrong width")]
    fn test_from_values_rejects_short_row() {
        Grid::from_values(4, 4, &[&[2, 0, 0]]);
    }

    #[test]
    #[should_panic(expected = "exceed height")]
    fn test_from_values_rejects_extra_rows() {
        Grid::from_values(4, 4, &[&[0; 4], &[0; 4], &[0; 4], &[0; 4], &[2, 0, 0, 0]]);
    }

    #[test]
    fn test_grid_index_calculation() {
        let grid = Grid::new(20, 12);
        assert_eq!(grid.index(0, 0), Some(0));
        assert_eq!(grid.index(0, 11), Some(11));
        assert_eq!(grid.index(1, 0), Some(12));
        assert_eq!(grid.index(19, 11), Some(239));
        assert_eq!(grid.index(-1, 0), None);
        assert_eq!(grid.index(0, 12), None);
        assert_eq!(grid.index(20, 0), None);
    }

    #[test]
    fn test_grid_flat_array() {
        let mut grid = Grid::new(20, 12);
        grid.place(0, 0, Tile::new(2));
        grid.place(10, 5, Tile::new(4));

        assert_eq!(grid.value(0, 0), Some(2));
        assert_eq!(grid.value(10, 5), Some(4));
        assert_eq!(grid.cells[0].value(), Some(2));
        assert_eq!(grid.cells[10 * 12 + 5].value(), Some(4));
    }

    #[test]
    fn test_merge_up_requires_equal_neighbour() {
        let mut grid = Grid::from_values(4, 4, &[&[2, 4, 0, 0], &[2, 2, 0, 0]]);
        assert_eq!(grid.merge_up(0, 0), Some(4));
        assert_eq!(grid.merge_up(0, 1), None);
        // empty above
        assert_eq!(grid.merge_up(0, 2), None);
        assert_eq!(grid.column_values(0), vec![4, 0, 0, 0]);
    }

    #[test]
    fn test_collapse_column_empties_top() {
        let mut grid = Grid::from_values(4, 4, &[&[2, 0, 0, 0], &[0, 0, 0, 0], &[4, 0, 0, 0], &[8, 0, 0, 0]]);
        grid.collapse_column(1, 0);
        assert_eq!(grid.column_values(0), vec![2, 4, 8, 0]);
    }

    #[test]
    fn test_drop_floating_settles_bottom_up() {
        // column 1 holds two floating tiles stacked with a gap under them
        let mut grid = Grid::from_values(
            5,
            4,
            &[&[2, 0, 0, 0], &[0, 0, 0, 0], &[0, 8, 0, 0], &[0, 16, 0, 0]],
        );
        let mut scan = GroundScan::new();
        let outcome = grid.drop_floating(&mut scan);

        assert_eq!(outcome.moved, 2);
        assert_eq!(outcome.gain, 0);
        assert_eq!(grid.column_values(1), vec![8, 16, 0, 0, 0]);
        assert_eq!(grid.occupied_count(), 3);
    }
}
