//! Integration tests for play sessions

use tetris_2048::core::{EngineConfig, FloatingPolicy};
use tetris_2048::engine::{apply_place, Game, PlaceError};
use tetris_2048::types::{GameAction, PieceKind, Rotation};

fn started(seed: u32) -> Game {
    let mut game = Game::new(EngineConfig::default(), seed).unwrap();
    game.start();
    game
}

#[test]
fn test_game_lifecycle() {
    let mut game = Game::new(EngineConfig::default(), 12345).unwrap();
    assert!(!game.started());
    assert!(!game.apply_action(GameAction::HardDrop));

    game.start();
    assert!(game.started());
    assert!(game.active().is_some());
    assert!(game.playable());
    assert_eq!(game.score(), 0);
}

#[test]
fn test_game_actions() {
    let mut game = started(12345);
    let initial = game.active().unwrap().anchor;

    assert!(game.apply_action(GameAction::MoveLeft));
    assert_eq!(game.active().unwrap().anchor.x, initial.x - 1);
    assert!(game.apply_action(GameAction::MoveRight));
    assert_eq!(game.active().unwrap().anchor.x, initial.x);

    assert!(game.apply_action(GameAction::SoftDrop));
    assert_eq!(game.active().unwrap().anchor.y, initial.y - 1);

    assert!(game.apply_action(GameAction::HardDrop));
    assert_eq!(game.piece_id(), 2);
    assert!(game.engine().grid().occupied_count() > 0);
}

#[test]
fn test_side_walls_stop_movement() {
    let mut game = started(4);
    let mut moves = 0;
    while game.apply_action(GameAction::MoveLeft) {
        moves += 1;
        assert!(moves <= 12, "piece walked through the left wall");
    }
    let (left, _) = game.active().unwrap().column_span().unwrap();
    assert_eq!(left, 0);
}

#[test]
fn test_three_flat_i_pieces_clear_the_floor_row() {
    let mut game = Game::with_kinds(EngineConfig::default(), 8, &[PieceKind::I]).unwrap();
    game.start();

    let first = apply_place(&mut game, 0, Rotation::North).unwrap();
    let second = apply_place(&mut game, 4, Rotation::North).unwrap();
    assert_eq!(first.lines_cleared + second.lines_cleared, 0);
    assert_eq!(game.engine().grid().occupied_count(), 8);

    let third = apply_place(&mut game, 8, Rotation::North).unwrap();
    assert_eq!(third.lines_cleared, 1);
    assert_eq!(game.engine().lines(), 1);
    assert_eq!(game.engine().grid().occupied_count(), 0);
    // twelve tiles of 2 or 4
    assert!((24..=48).contains(&game.score()));
}

#[test]
fn test_place_errors_leave_game_playable() {
    let mut game = started(31);
    let piece_id = game.piece_id();

    assert_eq!(
        apply_place(&mut game, 40, Rotation::North),
        Err(PlaceError::ColumnOutOfBounds)
    );
    assert_eq!(game.piece_id(), piece_id);
    assert!(game.playable());
}

#[test]
fn test_same_seed_same_game() {
    let actions = [
        GameAction::MoveLeft,
        GameAction::RotateCw,
        GameAction::HardDrop,
        GameAction::MoveRight,
        GameAction::MoveRight,
        GameAction::HardDrop,
        GameAction::SoftDrop,
        GameAction::HardDrop,
    ];

    let mut a = started(2024);
    let mut b = started(2024);
    for action in actions {
        a.apply_action(action);
        b.apply_action(action);
        assert_eq!(a.snapshot(), b.snapshot());
    }
}

#[test]
fn test_score_and_flags_never_go_back() {
    let mut game = started(77);
    let mut last_score = 0;
    let mut was_finished = false;

    for i in 0..300 {
        if i % 3 == 0 {
            game.apply_action(GameAction::RotateCw);
        }
        game.apply_action(if i % 2 == 0 {
            GameAction::MoveLeft
        } else {
            GameAction::MoveRight
        });
        game.apply_action(GameAction::HardDrop);

        assert!(game.score() >= last_score);
        assert!(!was_finished || game.finished());
        last_score = game.score();
        was_finished = game.finished();
    }
}

#[test]
fn test_restart_after_finish() {
    // O pieces dropped in the middle of a 4x4 grid never complete a row, so
    // the two centre columns fill up until a tile overflows or one reaches 2048.
    let config = EngineConfig::with_dimensions(4, 4);
    let mut game = Game::with_kinds(config, 5, &[PieceKind::O]).unwrap();
    game.start();
    for _ in 0..2000 {
        if game.finished() {
            break;
        }
        game.apply_action(GameAction::HardDrop);
    }
    assert!(game.finished());
    assert!(!game.apply_action(GameAction::MoveLeft));

    assert!(game.apply_action(GameAction::Restart));
    assert!(!game.finished());
    assert_eq!(game.score(), 0);
    assert_eq!(game.episode_id(), 1);
    assert_eq!(game.piece_id(), 1);
    assert_eq!(game.engine().grid().occupied_count(), 0);
}

#[test]
fn test_config_from_json_drives_grid_size() {
    let config: EngineConfig =
        serde_json::from_str(r#"{"height": 10, "width": 6, "floating_policy": "fall"}"#).unwrap();
    assert_eq!(config.floating_policy, FloatingPolicy::Fall);

    let mut game = Game::new(config, 9).unwrap();
    game.start();
    let snap = game.snapshot();
    assert_eq!(snap.grid.height, 10);
    assert_eq!(snap.grid.width, 6);
    assert_eq!(snap.grid.cells.len(), 60);
    assert!(snap.active.unwrap().cells.iter().all(|c| c.row >= 10));
}

#[test]
fn test_invalid_config_is_rejected() {
    let config = EngineConfig {
        win_value: 3,
        ..EngineConfig::default()
    };
    assert!(Game::new(config, 1).is_err());
}

#[test]
fn test_snapshot_json_shape() {
    let mut game = started(42);
    game.apply_action(GameAction::HardDrop);

    let snap = game.snapshot();
    let json = serde_json::to_value(&snap).unwrap();

    assert_eq!(json["grid"]["height"], 20);
    assert_eq!(json["grid"]["width"], 12);
    assert_eq!(json["grid"]["cells"].as_array().unwrap().len(), 240);
    assert_eq!(json["piece_id"], 2);
    assert_eq!(json["next"], snap.next.as_str());
    assert_eq!(json["active"]["rotation"], "north");
}
