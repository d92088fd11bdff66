//! Property tests for row clearing, collision checks and command processing.
//!
//! Invariants covered:
//! - Row clearing removes exactly the complete rows, keeps the rest in order and
//!   keeps the grid at `Grid::ROWS` rows.
//! - Clearing `k` rows adds `10k` to the score; clearing none leaves the score
//!   alone and reports no clear.
//! - `check_collision` never changes the grid.
//! - Under any command sequence the falling piece stays inside the side walls
//!   and never overlaps a locked block.

use brickfall_engine::{
    Cell, Command, CommandQueue, GameEvent, GameSession, Grid, PieceKind, PieceRotation,
    PieceSeed, check_collision,
};
use proptest::prelude::*;

type Rows = Vec<[Cell; Grid::COLS]>;

fn rows_strategy() -> impl Strategy<Value = Vec<(bool, Vec<bool>)>> {
    prop::collection::vec(
        (prop::bool::weighted(0.3), prop::collection::vec(any::<bool>(), Grid::COLS)),
        Grid::ROWS,
    )
}

fn build_grid(pattern: &[(bool, Vec<bool>)]) -> Grid {
    let mut grid = Grid::new();
    for (row, (complete, cells)) in pattern.iter().enumerate() {
        for (col, &filled) in cells.iter().enumerate() {
            if *complete || filled {
                let kind = PieceKind::ALL[(row + col) % PieceKind::LEN];
                grid.set_cell(row, col, Cell::Piece(kind));
            }
        }
    }
    grid
}

fn snapshot(grid: &Grid) -> Rows {
    grid.rows().copied().collect()
}

fn command_strategy() -> impl Strategy<Value = Command> {
    prop_oneof![
        Just(Command::MoveLeft),
        Just(Command::MoveRight),
        Just(Command::Rotate),
        Just(Command::SoftDrop),
        Just(Command::Tick),
    ]
}

proptest! {
    #[test]
    fn clearing_removes_exactly_complete_rows(pattern in rows_strategy()) {
        let mut grid = build_grid(&pattern);
        let before = snapshot(&grid);
        let kept: Rows = before
            .iter()
            .filter(|row| row.iter().any(|cell| cell.is_empty()))
            .copied()
            .collect();
        let complete = Grid::ROWS - kept.len();

        let mut events: Vec<GameEvent> = Vec::new();
        let cleared = grid.evaluate_completed_rows(&mut events);
        let after = snapshot(&grid);

        prop_assert_eq!(cleared, complete);
        prop_assert_eq!(after.len(), Grid::ROWS);
        prop_assert!(after[..cleared].iter().flatten().all(|cell| cell.is_empty()));
        prop_assert_eq!(&after[cleared..], &kept[..]);
        prop_assert_eq!(events.last(), Some(&GameEvent::GridRedrawn));
    }

    #[test]
    fn score_grows_by_ten_per_cleared_row(first in rows_strategy(), second in rows_strategy()) {
        let mut grid = build_grid(&first);
        let initial = grid.evaluate_completed_rows(&mut Vec::<GameEvent>::new());
        prop_assert_eq!(grid.score(), initial * Grid::REWARD_PER_ROW);

        for (row, (complete, cells)) in second.iter().enumerate() {
            for (col, &filled) in cells.iter().enumerate() {
                if *complete || filled {
                    grid.set_cell(row, col, Cell::Piece(PieceKind::Z));
                }
            }
        }
        let score_before = grid.score();
        let mut events: Vec<GameEvent> = Vec::new();
        let cleared = grid.evaluate_completed_rows(&mut events);
        prop_assert_eq!(grid.score(), score_before + cleared * 10);

        let clear_events = events.iter().filter(|event| event.is_rows_cleared()).count();
        if cleared == 0 {
            prop_assert_eq!(clear_events, 0);
            prop_assert!(!events.iter().any(GameEvent::is_score_changed));
        } else {
            prop_assert_eq!(clear_events, 1);
            let score_changed = GameEvent::ScoreChanged { score: grid.score() };
            prop_assert!(events.contains(&score_changed));
        }
    }

    #[test]
    fn check_collision_is_pure(
        pattern in rows_strategy(),
        kind_index in 0..PieceKind::LEN,
        rotation in 0u8..4,
        row in -4isize..24,
        col in -4isize..12,
    ) {
        let grid = build_grid(&pattern);
        let before = snapshot(&grid);
        let shape = PieceKind::ALL[kind_index].shape(PieceRotation::new(rotation));

        let first = check_collision(&grid, row, col, shape);
        let second = check_collision(&grid, row, col, shape);

        prop_assert_eq!(first, second);
        prop_assert_eq!(snapshot(&grid), before);
        prop_assert_eq!(grid.score(), 0);
    }

    #[test]
    fn falling_piece_never_leaves_valid_positions(
        seed in any::<u64>(),
        commands in prop::collection::vec(command_strategy(), 1..400),
    ) {
        let mut session = GameSession::with_seed(PieceSeed::from(seed));
        session.start();

        let mut queue = CommandQueue::new();
        for command in commands {
            queue.push(command);
            session.process(&mut queue);

            if let Some(piece) = session.falling_piece() {
                prop_assert!(!piece.is_colliding(session.grid()));
                let cols = 0..Grid::COLS.cast_signed();
                prop_assert!(piece.occupied_positions().all(|(_, col)| cols.contains(&col)));
            } else {
                prop_assert!(session.grid().is_game_over());
            }
            prop_assert_eq!(session.score(), session.stats().cleared_rows() * 10);
        }
    }
}
