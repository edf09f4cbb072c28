//! Engine scenarios - fall, lock, clear, bomb, game over

use tui_tetrad::core::{Block, EngineEvent, GameState, Phase, ScriptedShapes, TickOutcome};
use tui_tetrad::types::{Intent, Position, ShapeKind, BOARD_COLS};

fn scripted(kinds: &[ShapeKind]) -> GameState<ScriptedShapes> {
    GameState::new(ScriptedShapes::new(kinds.to_vec()))
}

fn p(row: i32, col: i32) -> Position {
    Position::new(row, col)
}

fn kind_at(game: &GameState<ScriptedShapes>, row: i32, col: i32) -> Option<ShapeKind> {
    game.grid().get(p(row, col)).map(|b| b.kind)
}

/// Fill `row` except the listed columns
fn fill_row_except(game: &mut GameState<ScriptedShapes>, row: i32, gaps: &[i32]) {
    for col in 0..BOARD_COLS {
        if !gaps.contains(&col) {
            assert!(game.place_block(p(row, col), ShapeKind::T));
        }
    }
}

#[test]
fn test_nothing_happens_before_start() {
    let mut game = scripted(&[ShapeKind::I]);
    assert_eq!(game.phase(), Phase::Spawning);
    assert!(game.active().is_none());
    assert_eq!(game.tick(), TickOutcome::Idle);
    assert!(!game.apply(Intent::Rotate));
    assert_eq!(game.hard_drop(), TickOutcome::Idle);
}

#[test]
fn test_i_piece_falls_sixteen_rows_then_locks() {
    let mut game = scripted(&[ShapeKind::I]);
    game.start();
    assert_eq!(game.phase(), Phase::Falling);
    assert_eq!(game.pieces_spawned(), 1);

    for i in 0..16 {
        assert_eq!(game.tick(), TickOutcome::Fell, "tick {}", i);
    }
    assert_eq!(game.active().unwrap().row(), 19);

    let outcome = game.tick();
    let report = outcome.lock_report().unwrap();
    assert!(matches!(outcome, TickOutcome::Locked(_)));
    assert_eq!(report.kind, ShapeKind::I);
    assert!(report.cleared_rows.is_empty());

    for row in 16..20 {
        assert_eq!(kind_at(&game, row, 5), Some(ShapeKind::I));
    }
    // Next I already spawned at the top.
    assert_eq!(game.pieces_spawned(), 2);
    assert_eq!(game.active().unwrap().cells()[0], p(0, 5));
    assert_eq!(game.grid().occupied_count(), 8);
}

#[test]
fn test_completing_bottom_row_at_last_column_clears_and_shifts() {
    let mut game = scripted(&[ShapeKind::I]);
    fill_row_except(&mut game, 19, &[9]);
    assert!(game.place_block(p(18, 0), ShapeKind::Z));
    assert!(game.place_block(p(10, 3), ShapeKind::S));
    game.start();

    for _ in 0..4 {
        assert!(game.apply(Intent::MoveRight));
    }
    assert!(!game.apply(Intent::MoveRight));

    let outcome = game.hard_drop();
    assert_eq!(outcome.lock_report().unwrap().cleared_rows.as_slice(), &[19]);
    assert_eq!(game.rows_cleared(), 1);
    // 9 + 2 setup blocks and the locked I, less one full row, plus the next I.
    assert_eq!(game.grid().occupied_count(), 9 + 2 + 4 - BOARD_COLS as usize + 4);

    // Everything above row 19 moved down exactly one row.
    assert_eq!(kind_at(&game, 19, 0), Some(ShapeKind::Z));
    assert_eq!(kind_at(&game, 11, 3), Some(ShapeKind::S));
    assert_eq!(kind_at(&game, 10, 3), None);
    for row in 17..20 {
        assert_eq!(kind_at(&game, row, 9), Some(ShapeKind::I));
    }
    assert_eq!(kind_at(&game, 16, 9), None);
    for col in 1..9 {
        assert_eq!(kind_at(&game, 19, col), None);
    }
}

#[test]
fn test_cascading_clear_rescans_same_row() {
    let mut game = scripted(&[ShapeKind::I]);
    fill_row_except(&mut game, 19, &[9]);
    fill_row_except(&mut game, 18, &[9]);
    game.start();
    for _ in 0..4 {
        game.apply(Intent::MoveRight);
    }

    let outcome = game.hard_drop();
    assert_eq!(outcome.lock_report().unwrap().cleared_rows.as_slice(), &[19, 19]);
    assert_eq!(game.rows_cleared(), 2);

    // Two I cells remain in column 9.
    assert_eq!(kind_at(&game, 19, 9), Some(ShapeKind::I));
    assert_eq!(kind_at(&game, 18, 9), Some(ShapeKind::I));
    assert_eq!(kind_at(&game, 17, 9), None);
}

#[test]
fn test_bomb_clears_its_own_row_even_when_not_full() {
    let mut game = scripted(&[ShapeKind::Bomb, ShapeKind::I]);
    for col in 0..4 {
        assert!(game.place_block(p(19, col), ShapeKind::L));
    }
    assert!(game.place_block(p(17, 0), ShapeKind::J));
    assert!(game.place_block(p(19, 9), ShapeKind::L));
    game.start();

    let outcome = game.hard_drop();
    let report = outcome.lock_report().unwrap();
    assert!(report.bomb);
    assert_eq!(report.cleared_rows.as_slice(), &[19]);

    // Row 19 is gone; row 18 (the bomb's top half) slid into it.
    assert_eq!(kind_at(&game, 19, 4), Some(ShapeKind::Bomb));
    assert_eq!(kind_at(&game, 19, 5), Some(ShapeKind::Bomb));
    for col in [0, 1, 2, 3, 9] {
        assert_eq!(kind_at(&game, 19, col), None, "col {}", col);
    }
    assert_eq!(kind_at(&game, 18, 0), Some(ShapeKind::J));
    assert_eq!(kind_at(&game, 18, 4), None);
}

#[test]
fn test_bomb_does_not_trigger_full_row_clears() {
    let mut game = scripted(&[ShapeKind::Bomb, ShapeKind::I]);
    // Row 17 is full but the bomb lands on rows 15-16 above the stack.
    fill_row_except(&mut game, 17, &[]);
    game.start();

    let report = game.hard_drop().lock_report().cloned().unwrap();
    assert_eq!(report.cleared_rows.as_slice(), &[16]);
    assert!(game.grid().is_row_full(17));
    assert_eq!(kind_at(&game, 16, 4), Some(ShapeKind::Bomb));
}

#[test]
fn test_more_than_four_full_rows_clear_in_one_lock() {
    let mut game = scripted(&[ShapeKind::O]);
    for row in 14..20 {
        fill_row_except(&mut game, row, &[]);
    }
    game.start();

    let report = game.hard_drop().lock_report().cloned().unwrap();
    assert_eq!(report.cleared_rows, vec![19; 6]);
    assert_eq!(game.rows_cleared(), 6);

    // Only the O (now on rows 18-19) and the next O remain.
    assert_eq!(game.grid().occupied_count(), 8);
    assert_eq!(kind_at(&game, 19, 4), Some(ShapeKind::O));
    assert_eq!(kind_at(&game, 18, 5), Some(ShapeKind::O));
    assert!(!game.grid().is_row_touched(17));
}

#[test]
fn test_full_row_left_by_bomb_clears_on_next_lock() {
    let mut game = scripted(&[ShapeKind::Bomb, ShapeKind::I, ShapeKind::O]);
    fill_row_except(&mut game, 18, &[4, 5]);
    fill_row_except(&mut game, 19, &[4, 5]);
    game.start();

    // The bomb's top half completes row 18, which slides into row 19.
    let bomb = game.hard_drop().lock_report().cloned().unwrap();
    assert!(bomb.bomb);
    assert_eq!(bomb.cleared_rows, vec![19]);
    assert!(game.grid().is_row_full(19));
    assert_eq!(game.rows_cleared(), 1);

    // The next normal lock sweeps it up.
    let next = game.hard_drop().lock_report().cloned().unwrap();
    assert!(!next.bomb);
    assert_eq!(next.cleared_rows, vec![19]);
    assert_eq!(game.rows_cleared(), 2);
    assert!(!game.grid().is_row_full(19));
    for row in 16..20 {
        assert_eq!(kind_at(&game, row, 5), Some(ShapeKind::I));
    }
}

#[test]
fn test_game_over_when_row_four_holds_a_block_in_any_column() {
    for col in 0..BOARD_COLS {
        let mut game = scripted(&[ShapeKind::T]);
        assert!(game.place_block(p(4, col), ShapeKind::O));
        assert!(game.spawn_buffer_occupied());

        game.start();
        assert!(game.is_game_over(), "col {}", col);
        assert!(game.active().is_none());
        assert_eq!(game.pieces_spawned(), 0);
        assert_eq!(game.tick(), TickOutcome::Idle);
    }
}

#[test]
fn test_lock_into_row_four_ends_game_on_next_spawn() {
    let mut game = scripted(&[ShapeKind::I]);
    for row in 5..20 {
        assert!(game.place_block(p(row, 5), ShapeKind::Z));
    }
    game.start();

    assert_eq!(game.tick(), TickOutcome::Fell);
    let outcome = game.tick();
    assert!(outcome.is_game_over());
    assert!(outcome.lock_report().unwrap().game_over);
    assert_eq!(game.phase(), Phase::GameOver);
    assert_eq!(kind_at(&game, 4, 5), Some(ShapeKind::I));

    // Frozen: no more ticks, no more intents.
    assert_eq!(game.tick(), TickOutcome::Idle);
    assert!(!game.apply(Intent::MoveLeft));
}

#[test]
fn test_bomb_spawns_despite_occupied_buffer_row() {
    let mut game = scripted(&[ShapeKind::Bomb, ShapeKind::I]);
    assert!(game.place_block(p(4, 0), ShapeKind::S));
    game.start();
    assert_eq!(game.phase(), Phase::Falling);
    assert!(game.active().unwrap().is_bomb());

    // The bomb clears row 19 and the whole stack, including row 4, drops.
    let outcome = game.hard_drop();
    assert!(matches!(outcome, TickOutcome::Locked(_)));
    assert!(!game.spawn_buffer_occupied());
    assert_eq!(kind_at(&game, 5, 0), Some(ShapeKind::S));
    assert_eq!(game.active().unwrap().kind(), ShapeKind::I);
}

#[test]
fn test_blocked_spawn_cells_end_game_even_for_bomb() {
    let mut game = scripted(&[ShapeKind::Bomb]);
    assert!(game.place_block(p(1, 5), ShapeKind::T));
    game.start();
    assert!(game.is_game_over());
    assert_eq!(game.grid().get(p(0, 4)), None);
}

#[test]
fn test_failed_soft_drop_does_not_lock() {
    let mut game = scripted(&[ShapeKind::O]);
    game.start();
    while game.soft_drop() {}

    assert!(!game.soft_drop());
    assert_eq!(game.phase(), Phase::Falling);
    assert_eq!(game.pieces_spawned(), 1);

    assert!(matches!(game.tick(), TickOutcome::Locked(_)));
    assert_eq!(game.pieces_spawned(), 2);
}

#[test]
fn test_failed_intents_leave_board_unchanged() {
    let mut game = scripted(&[ShapeKind::I]);
    game.start();
    while game.move_left() {}

    let before = game.snapshot();
    assert!(!game.apply(Intent::MoveLeft));
    assert!(!game.apply(Intent::Rotate));
    assert_eq!(game.snapshot(), before);
}

#[test]
fn test_place_block_refuses_occupied_and_out_of_bounds() {
    let mut game = scripted(&[ShapeKind::O]);
    game.start();
    assert!(!game.place_block(p(0, 4), ShapeKind::T));
    assert!(!game.place_block(p(20, 0), ShapeKind::T));
    assert!(!game.place_block(p(0, -1), ShapeKind::T));
    assert!(game.place_block(p(19, 0), ShapeKind::T));
    assert_eq!(game.grid().get(p(19, 0)), Some(&Block::new(ShapeKind::T)));
}

#[test]
fn test_events_follow_the_cycle() {
    let mut game = scripted(&[ShapeKind::I]);
    fill_row_except(&mut game, 19, &[5]);
    game.start();
    game.hard_drop();

    let events = game.take_events();
    assert_eq!(
        events[0],
        EngineEvent::Spawned {
            kind: ShapeKind::I,
            piece: 1
        }
    );
    assert_eq!(
        events[1],
        EngineEvent::Locked {
            kind: ShapeKind::I,
            row: 19
        }
    );
    assert!(matches!(
        &events[2],
        EngineEvent::RowsCleared { rows, bomb: false } if rows.as_slice() == [19]
    ));
    assert_eq!(
        events[3],
        EngineEvent::Spawned {
            kind: ShapeKind::I,
            piece: 2
        }
    );
    assert_eq!(events.len(), 4);
    assert!(game.take_events().is_empty());
}

#[test]
fn test_seeded_games_are_reproducible() {
    let mut a = GameState::seeded(99);
    let mut b = GameState::seeded(99);
    a.start();
    b.start();

    for _ in 0..40 {
        a.hard_drop();
        b.hard_drop();
        assert_eq!(a.snapshot(), b.snapshot());
    }
    assert_eq!(a.seed(), Some(99));
}

#[test]
fn test_smallest_board_plays() {
    let mut game = GameState::with_dimensions(5, 5, ScriptedShapes::repeat(ShapeKind::O));
    game.start();
    assert_eq!(*game.active().unwrap().cells(), [p(0, 1), p(0, 2), p(1, 1), p(1, 2)]);

    // O lands on rows 3-4; row 4 is the buffer row, so the next spawn fails.
    let outcome = game.hard_drop();
    assert!(outcome.is_game_over());
}
