use std::vec;

use crate::{
    PieceSeed,
    core::{
        event::{EventSink as _, GameEvent},
        grid::{Cell, Grid},
        piece::{DropOutcome, Piece},
    },
};

use super::{
    command::{Command, CommandQueue},
    game_stats::GameStats,
    piece_source::{PieceSource, RandomPieceSource},
};

/// Where a session is in its lifecycle, derived from the grid flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum SessionState {
    /// Created but never started.
    Idle,
    Playing,
    Paused,
    GameOver,
}

/// One game: the grid, the falling piece, and everything needed to drive them.
///
/// The session owns the single [`Grid`] and the single active [`Piece`] and
/// passes the grid to the piece on every operation. Events produced by either
/// are buffered until the driver collects them with [`GameSession::drain_events`].
///
/// All piece operations are ignored unless the grid is playable
/// (`is_active && !is_game_over`).
///
/// # Example
///
/// ```
/// use brickfall_engine::{Command, CommandQueue, GameSession, PieceKind, ScriptedPieceSource};
///
/// let mut session = GameSession::new(ScriptedPieceSource::repeat(PieceKind::O));
/// session.start();
///
/// let mut queue = CommandQueue::new();
/// queue.extend([Command::Tick, Command::MoveLeft, Command::Rotate]);
/// session.process(&mut queue);
///
/// assert!(queue.is_empty());
/// assert_eq!(session.falling_piece().unwrap().position().col(), 2);
/// ```
#[derive(Debug)]
pub struct GameSession {
    grid: Grid,
    falling_piece: Option<Piece>,
    source: Box<dyn PieceSource>,
    stats: GameStats,
    events: Vec<GameEvent>,
}

impl GameSession {
    /// Creates an idle session drawing pieces from `source`.
    #[must_use]
    pub fn new<S>(source: S) -> Self
    where
        S: PieceSource + 'static,
    {
        Self {
            grid: Grid::new(),
            falling_piece: None,
            source: Box::new(source),
            stats: GameStats::new(),
            events: Vec::new(),
        }
    }

    /// Like [`Self::new`], with uniformly random pieces from a fixed seed.
    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        Self::new(RandomPieceSource::with_seed(seed))
    }

    /// Like [`Self::new`], with uniformly random pieces from a fresh seed.
    #[must_use]
    pub fn new_random() -> Self {
        Self::new(RandomPieceSource::new())
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Gives direct access to the grid, for setting up positions.
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    #[must_use]
    pub fn falling_piece(&self) -> Option<&Piece> {
        self.falling_piece.as_ref()
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.grid.score()
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        if self.grid.is_game_over() {
            SessionState::GameOver
        } else if self.grid.is_active() {
            SessionState::Playing
        } else if self.falling_piece.is_some() {
            SessionState::Paused
        } else {
            SessionState::Idle
        }
    }

    /// Starts a new game: resets the grid, activates it and spawns the first piece.
    ///
    /// May be called again at any time to restart.
    pub fn start(&mut self) {
        self.grid.reset();
        self.grid.activate();
        self.stats = GameStats::new();
        self.events.emit(GameEvent::GridRedrawn);
        self.events.emit(GameEvent::ScoreChanged { score: 0 });
        self.spawn_piece();
    }

    /// Suspends or resumes a running game. Has no effect before start or after game over.
    pub fn toggle_pause(&mut self) {
        if self.grid.is_game_over() || self.falling_piece.is_none() {
            return;
        }
        self.grid.set_active(!self.grid.is_active());
    }

    pub fn move_left(&mut self) -> bool {
        if !self.grid.is_playable() {
            return false;
        }
        self.falling_piece
            .as_mut()
            .is_some_and(|piece| piece.move_left(&self.grid, &mut self.events))
    }

    pub fn move_right(&mut self) -> bool {
        if !self.grid.is_playable() {
            return false;
        }
        self.falling_piece
            .as_mut()
            .is_some_and(|piece| piece.move_right(&self.grid, &mut self.events))
    }

    pub fn rotate(&mut self) -> bool {
        if !self.grid.is_playable() {
            return false;
        }
        self.falling_piece
            .as_mut()
            .is_some_and(|piece| piece.rotate(&self.grid, &mut self.events))
    }

    /// Moves the falling piece down one row, handling a landing completely.
    ///
    /// On [`DropOutcome::Locked`] the next piece has already been spawned when
    /// this returns; on [`DropOutcome::ToppedOut`] the session holds no piece.
    /// Returns `None` when the session is not playable.
    pub fn move_down(&mut self) -> Option<DropOutcome> {
        if !self.grid.is_playable() {
            return None;
        }
        let piece = self.falling_piece.as_mut()?;
        let outcome = piece.move_down(&mut self.grid, &mut self.events);
        match outcome {
            DropOutcome::Fell => {}
            DropOutcome::Locked { cleared_rows } => {
                self.stats.record_lock(cleared_rows);
                self.spawn_piece();
            }
            DropOutcome::ToppedOut => self.falling_piece = None,
        }
        Some(outcome)
    }

    pub fn apply(&mut self, command: Command) {
        match command {
            Command::MoveLeft => _ = self.move_left(),
            Command::MoveRight => _ = self.move_right(),
            Command::Rotate => _ = self.rotate(),
            Command::SoftDrop | Command::Tick => _ = self.move_down(),
        }
    }

    /// Applies every queued command in order, leaving the queue empty.
    pub fn process(&mut self, queue: &mut CommandQueue) {
        while let Some(command) = queue.pop() {
            self.apply(command);
        }
    }

    /// Removes and returns buffered events, oldest first.
    pub fn drain_events(&mut self) -> vec::Drain<'_, GameEvent> {
        self.events.drain(..)
    }

    fn spawn_piece(&mut self) {
        let piece = Piece::new(self.source.next_kind());
        self.events.emit(GameEvent::PieceSpawned { kind: piece.kind() });
        let cell = Cell::Piece(piece.kind());
        for (row, col) in piece.visible_positions() {
            self.events.emit(GameEvent::CellDrawn { row, col, cell });
        }
        self.falling_piece = Some(piece);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PieceKind, ScriptedPieceSource};

    fn started(kind: PieceKind) -> GameSession {
        let mut session = GameSession::new(ScriptedPieceSource::repeat(kind));
        session.start();
        session
    }

    #[test]
    fn test_new_session_is_idle() {
        let mut session = GameSession::with_seed(PieceSeed::from(1));
        assert_eq!(session.state(), SessionState::Idle);
        assert!(session.falling_piece().is_none());
        assert!(!session.move_left());
        assert_eq!(session.move_down(), None);
    }

    #[test]
    fn test_start_spawns_piece() {
        let mut session = started(PieceKind::T);
        assert_eq!(session.state(), SessionState::Playing);
        let piece = session.falling_piece().unwrap();
        assert_eq!(piece.kind(), PieceKind::T);
        assert_eq!(piece.position().row(), -2);

        let events: Vec<_> = session.drain_events().collect();
        assert_eq!(
            events,
            [
                GameEvent::GridRedrawn,
                GameEvent::ScoreChanged { score: 0 },
                GameEvent::PieceSpawned {
                    kind: PieceKind::T
                },
            ]
        );
        assert_eq!(session.drain_events().count(), 0);
    }

    #[test]
    fn test_pause_blocks_moves() {
        let mut session = started(PieceKind::O);
        session.toggle_pause();
        assert_eq!(session.state(), SessionState::Paused);
        assert!(!session.move_right());
        assert_eq!(session.move_down(), None);
        assert_eq!(session.falling_piece().unwrap().position().col(), 3);

        session.toggle_pause();
        assert_eq!(session.state(), SessionState::Playing);
        assert!(session.move_right());
    }

    #[test]
    fn test_lock_spawns_next_piece_and_counts() {
        let mut session = GameSession::new(ScriptedPieceSource::new([PieceKind::O, PieceKind::I]));
        session.start();
        while session.move_down() == Some(DropOutcome::Fell) {}

        assert_eq!(session.stats().locked_pieces(), 1);
        assert_eq!(session.grid().cell(19, 3), Cell::Piece(PieceKind::O));
        let next = session.falling_piece().unwrap();
        assert_eq!(next.kind(), PieceKind::I);
        assert_eq!(next.position().row(), -2);
    }

    #[test]
    fn test_game_over_ignores_further_commands() {
        let mut session = started(PieceKind::T);
        for row in 0..Grid::ROWS {
            for col in 0..Grid::COLS - 1 {
                session.grid_mut().set_cell(row, col, Cell::Piece(PieceKind::Z));
            }
        }
        assert_eq!(session.move_down(), Some(DropOutcome::ToppedOut));
        assert_eq!(session.state(), SessionState::GameOver);
        assert!(session.falling_piece().is_none());

        let mut queue = CommandQueue::new();
        queue.extend([Command::MoveLeft, Command::Tick, Command::Rotate]);
        session.process(&mut queue);
        assert!(queue.is_empty());
        assert_eq!(session.move_down(), None);

        session.toggle_pause();
        assert_eq!(session.state(), SessionState::GameOver);
    }

    #[test]
    fn test_restart_after_game_over() {
        let mut session = started(PieceKind::T);
        for col in 0..Grid::COLS - 1 {
            session.grid_mut().set_cell(0, col, Cell::Piece(PieceKind::S));
        }
        assert_eq!(session.move_down(), Some(DropOutcome::ToppedOut));

        session.start();
        assert_eq!(session.state(), SessionState::Playing);
        assert_eq!(session.score(), 0);
        assert!(session.grid().rows().flatten().all(|cell| cell.is_empty()));
        assert!(session.falling_piece().is_some());
    }
}
