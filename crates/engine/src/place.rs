use thiserror::Error;

use tetris_2048_core::Landing;
use tetris_2048_types::Rotation;

use crate::game::Game;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PlaceError {
    #[error("could not rotate to target rotation")]
    RotationBlocked,
    #[error("target column would place piece out of bounds")]
    ColumnOutOfBounds,
    #[error("could not move to target column due to collision")]
    ColumnBlocked,
    #[error("game is not playable")]
    NotPlayable,
    #[error("no active piece")]
    NoActive,
}

/// Rotate the active piece to `target_rot`, slide its leftmost tile to
/// `target_col`, then hard drop it.
///
/// On error the game is left exactly as it was.
pub fn apply_place(
    game: &mut Game,
    target_col: i32,
    target_rot: Rotation,
) -> Result<Landing, PlaceError> {
    if !game.playable() {
        return Err(PlaceError::NotPlayable);
    }
    let Some(active) = game.active() else {
        return Err(PlaceError::NoActive);
    };

    let turns = (target_rot.quarter_turns() + 4 - active.rotation.quarter_turns()) % 4;
    let snapshot = game.clone();

    for _ in 0..turns {
        if !game.try_rotate() {
            *game = snapshot;
            return Err(PlaceError::RotationBlocked);
        }
    }

    let Some((left, right)) = game.active().and_then(|p| p.column_span()) else {
        *game = snapshot;
        return Err(PlaceError::NoActive);
    };
    let dx = target_col - left;
    let width = game.engine().grid().width() as i32;
    if target_col < 0 || right + dx >= width {
        *game = snapshot;
        return Err(PlaceError::ColumnOutOfBounds);
    }

    let step = dx.signum();
    for _ in 0..dx.abs() {
        if !game.try_move(step) {
            *game = snapshot;
            return Err(PlaceError::ColumnBlocked);
        }
    }

    match game.hard_drop() {
        Some(landing) => Ok(landing),
        None => {
            *game = snapshot;
            Err(PlaceError::NoActive)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tetris_2048_core::EngineConfig;
    use tetris_2048_types::PieceKind;

    fn i_only_game() -> Game {
        let mut game = Game::with_kinds(EngineConfig::default(), 21, &[PieceKind::I]).unwrap();
        game.start();
        game
    }

    #[test]
    fn test_place_flat_on_left_wall() {
        let mut game = i_only_game();
        let landing = apply_place(&mut game, 0, Rotation::North).unwrap();
        assert!(!landing.game_over);

        let grid = game.engine().grid();
        // Horizontal I on the floor; equal neighbours only merge vertically.
        for col in 0..4 {
            assert!(grid.is_occupied(0, col));
        }
        assert!(!grid.is_occupied(0, 4));
    }

    #[test]
    fn test_place_vertical_in_column() {
        let mut game = i_only_game();
        apply_place(&mut game, 11, Rotation::East).unwrap();
        let grid = game.engine().grid();
        assert!(grid.is_occupied(0, 11));
        // merges may shorten the column, but nothing leaves it
        let in_column = (0..20).filter(|&r| grid.is_occupied(r, 11)).count();
        assert_eq!(grid.occupied_count(), in_column);
    }

    #[test]
    fn test_place_out_of_bounds_leaves_game_untouched() {
        let mut game = i_only_game();
        let before = game.active().cloned();

        assert_eq!(
            apply_place(&mut game, 9, Rotation::North),
            Err(PlaceError::ColumnOutOfBounds)
        );
        assert_eq!(
            apply_place(&mut game, -1, Rotation::East),
            Err(PlaceError::ColumnOutOfBounds)
        );
        assert_eq!(game.active().cloned(), before);
    }

    #[test]
    fn test_place_requires_started_game() {
        let mut game = Game::new(EngineConfig::default(), 1).unwrap();
        assert_eq!(
            apply_place(&mut game, 0, Rotation::North),
            Err(PlaceError::NotPlayable)
        );
    }
}
