//! Footprint module - the tiles of a piece about to lock
//!
//! A footprint is a small rectangular matrix stored top row first, paired with
//! an [`Anchor`] naming the grid cell under its bottom-left corner. Because the
//! grid counts rows upward from the floor, matrix row `r` of an `n`-row
//! footprint lands on grid row `anchor.y + (n - 1 - r)`.

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::error::FootprintError;
use crate::types::{Tile, MAX_FOOTPRINT_CELLS, MAX_FOOTPRINT_SIDE};

/// Grid position of a footprint's bottom-left corner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Anchor {
    /// Column
    pub x: i32,
    /// Row (0 = floor)
    pub y: i32,
}

impl Anchor {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Rectangular tile matrix of at most 4x4 cells, row-major, top row first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Footprint {
    rows: usize,
    cols: usize,
    cells: ArrayVec<Option<Tile>, MAX_FOOTPRINT_CELLS>,
}

impl Footprint {
    /// Build a `rows x cols` footprint from row-major cells
    pub fn new<I>(rows: usize, cols: usize, cells: I) -> Result<Self, FootprintError>
    where
        I: IntoIterator<Item = Option<Tile>>,
    {
        if rows == 0 || cols == 0 {
            return Err(FootprintError::Empty);
        }
        if rows > MAX_FOOTPRINT_SIDE || cols > MAX_FOOTPRINT_SIDE {
            return Err(FootprintError::TooLarge {
                rows,
                cols,
                max: MAX_FOOTPRINT_SIDE,
            });
        }

        let expected = rows * cols;
        let mut buf = ArrayVec::new();
        let mut found = 0;
        for cell in cells {
            found += 1;
            // keep counting past the end so the error reports the real length
            if found <= expected {
                buf.push(cell);
            }
        }
        if found != expected {
            return Err(FootprintError::CellCount { expected, found });
        }

        Ok(Self {
            rows,
            cols,
            cells: buf,
        })
    }

    /// Build a footprint from rows of tile values, top row first; `0` is empty
    ///
    /// # Examples
    ///
    /// ```
    /// use tetris_2048_core::Footprint;
    ///
    /// let fp = Footprint::from_values(&[&[2, 0], &[4, 8]]).unwrap();
    /// assert_eq!((fp.rows(), fp.cols()), (2, 2));
    /// assert_eq!(fp.occupied_count(), 3);
    /// ```
    pub fn from_values(rows: &[&[u32]]) -> Result<Self, FootprintError> {
        let cols = rows.first().map(|row| row.len()).unwrap_or(0);
        for (row, values) in rows.iter().enumerate() {
            if values.len() != cols {
                return Err(FootprintError::Ragged {
                    row,
                    expected: cols,
                    found: values.len(),
                });
            }
        }

        let cells = rows
            .iter()
            .flat_map(|row| row.iter())
            .map(|&value| (value != 0).then(|| Tile::new(value)));
        Self::new(rows.len(), cols, cells)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Tile at matrix position (`row` from the top)
    pub fn get(&self, row: usize, col: usize) -> Option<&Tile> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.cells[row * self.cols + col].as_ref()
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Occupied cells as `(row, col, tile)` in matrix coordinates
    pub fn occupied(&self) -> impl Iterator<Item = (usize, usize, &Tile)> + '_ {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .filter_map(move |(i, cell)| cell.as_ref().map(|tile| (i / cols, i % cols, tile)))
    }

    /// Consume the footprint, yielding owned tiles with their matrix coordinates
    pub fn into_occupied(self) -> impl Iterator<Item = (usize, usize, Tile)> {
        let cols = self.cols;
        self.cells
            .into_iter()
            .enumerate()
            .filter_map(move |(i, cell)| cell.map(|tile| (i / cols, i % cols, tile)))
    }

    /// Grid `(row, col)` where matrix cell (`row`, `col`) lands for `anchor`
    pub fn target(&self, anchor: Anchor, row: usize, col: usize) -> (i32, i32) {
        let flipped = (self.rows - 1 - row) as i32;
        (anchor.y + flipped, anchor.x + col as i32)
    }

    /// Grid cells covered by the occupied tiles for `anchor`
    pub fn targets(&self, anchor: Anchor) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.occupied()
            .map(move |(row, col, _)| self.target(anchor, row, col))
    }

    /// Bottom-most matrix row holding a tile
    pub fn lowest_occupied_row(&self) -> Option<usize> {
        self.occupied().map(|(row, _, _)| row).max()
    }

    /// Occupied column span `(leftmost, rightmost)` in matrix coordinates
    pub fn occupied_columns(&self) -> Option<(usize, usize)> {
        let mut cols = self.occupied().map(|(_, col, _)| col);
        let first = cols.next()?;
        Some(cols.fold((first, first), |(lo, hi), col| (lo.min(col), hi.max(col))))
    }

    /// Rotate 90° clockwise; an `r x c` matrix becomes `c x r`
    pub fn rotated_cw(mut self) -> Self {
        let (rows, cols) = (self.rows, self.cols);
        let mut rotated = ArrayVec::new();
        for r in 0..cols {
            for c in 0..rows {
                rotated.push(self.cells[(rows - 1 - c) * cols + r].take());
            }
        }

        Self {
            rows: cols,
            cols: rows,
            cells: rotated,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_flips_rows() {
        let fp = Footprint::from_values(&[&[2, 0], &[4, 8]]).unwrap();
        let anchor = Anchor::new(3, 5);
        // top row sits one above the anchor row
        assert_eq!(fp.target(anchor, 0, 0), (6, 3));
        assert_eq!(fp.target(anchor, 1, 0), (5, 3));
        assert_eq!(fp.target(anchor, 1, 1), (5, 4));

        let targets: Vec<_> = fp.targets(anchor).collect();
        assert_eq!(targets, vec![(6, 3), (5, 3), (5, 4)]);
    }

    #[test]
    fn rejects_bad_shapes() {
        assert_eq!(Footprint::from_values(&[]), Err(FootprintError::Empty));
        assert_eq!(
            Footprint::from_values(&[&[2, 2], &[2]]),
            Err(FootprintError::Ragged {
                row: 1,
                expected: 2,
                found: 1
            })
        );
        assert_eq!(
            Footprint::from_values(&[&[2, 2, 2, 2, 2]]),
            Err(FootprintError::TooLarge {
                rows: 1,
                cols: 5,
                max: 4
            })
        );
        assert_eq!(
            Footprint::new(2, 2, vec![None; 3]),
            Err(FootprintError::CellCount {
                expected: 4,
                found: 3
            })
        );
        assert_eq!(
            Footprint::new(1, 1, vec![None; 40]),
            Err(FootprintError::CellCount {
                expected: 1,
                found: 40
            })
        );
    }

    #[test]
    fn rotate_cw_moves_tiles() {
        // 2 4 0      8 2
        // 8 0 0  ->  0 4
        //            0 0
        let fp = Footprint::from_values(&[&[2, 4, 0], &[8, 0, 0]]).unwrap();
        let rotated = fp.rotated_cw();
        assert_eq!((rotated.rows(), rotated.cols()), (3, 2));
        assert_eq!(rotated.get(0, 0).map(Tile::value), Some(8));
        assert_eq!(rotated.get(0, 1).map(Tile::value), Some(2));
        assert_eq!(rotated.get(1, 1).map(Tile::value), Some(4));
        assert_eq!(rotated.get(1, 0), None);
        assert_eq!(rotated.occupied_count(), 3);
    }

    #[test]
    fn four_rotations_restore_matrix() {
        let fp = Footprint::from_values(&[&[0, 2, 0], &[4, 8, 16], &[0, 0, 0]]).unwrap();
        let back = fp.clone().rotated_cw().rotated_cw().rotated_cw().rotated_cw();
        assert_eq!(fp, back);
    }

    #[test]
    fn occupied_extents() {
        let fp = Footprint::from_values(&[&[0, 0, 0, 0], &[2, 2, 2, 2], &[0, 0, 0, 0], &[0, 0, 0, 0]])
            .unwrap();
        assert_eq!(fp.lowest_occupied_row(), Some(1));
        assert_eq!(fp.occupied_columns(), Some((0, 3)));

        let empty = Footprint::new(1, 1, [None]).unwrap();
        assert_eq!(empty.lowest_occupied_row(), None);
        assert_eq!(empty.occupied_columns(), None);
    }
}
