use super::{grid::Cell, piece::PieceKind};

/// Notifications sent from the grid and the falling piece to the outside world.
///
/// The engine never draws, plays sounds or shows dialogs itself. Instead, every
/// operation that would touch one of those collaborators emits an event into an
/// [`EventSink`], and the driver decides what to do with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum GameEvent {
    /// A visible cell now shows part of the falling piece.
    CellDrawn { row: usize, col: usize, cell: Cell },
    /// A visible cell no longer shows the falling piece.
    CellCleared { row: usize, col: usize },
    /// A new falling piece has been spawned above the grid.
    PieceSpawned { kind: PieceKind },
    /// The whole grid should be redrawn from [`Grid::rows`](super::Grid::rows).
    GridRedrawn,
    /// One or more rows were removed in a single pass.
    RowsCleared { count: usize },
    /// The score changed to the given total.
    ScoreChanged { score: usize },
    /// The session ended.
    GameOver,
}

/// Receiver of [`GameEvent`]s.
pub trait EventSink {
    fn emit(&mut self, event: GameEvent);
}

impl EventSink for Vec<GameEvent> {
    fn emit(&mut self, event: GameEvent) {
        self.push(event);
    }
}

/// Sink that drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscardEvents;

impl EventSink for DiscardEvents {
    fn emit(&mut self, _event: GameEvent) {}
}
