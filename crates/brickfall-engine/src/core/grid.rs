use super::{
    event::{EventSink, GameEvent},
    piece::PieceKind,
};

/// A single cell of the grid.
///
/// A cell is either empty or holds the identity of the piece that was locked
/// into it, which is also what decides its color when rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, derive_more::IsVariant)]
pub enum Cell {
    /// Nothing locked here.
    #[default]
    Empty,
    /// Locked block of a specific piece kind.
    Piece(PieceKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct GridRow {
    cells: [Cell; Grid::COLS],
}

impl GridRow {
    const EMPTY: Self = Self {
        cells: [Cell::Empty; Grid::COLS],
    };

    fn is_complete(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_empty())
    }
}

/// The fixed-size board holding every locked block.
///
/// Besides the cells, the grid owns the session score and the two flags that
/// gate the falling piece:
///
/// - `is_active`: a session is running (cleared by game over and by pausing)
/// - `is_game_over`: the session has ended; only [`Grid::reset`] clears it
///
/// # Coordinate System
///
/// - Row 0 is the top visible row, row [`Grid::ROWS`] - 1 the floor
/// - Column 0 is the leftmost column
/// - Negative rows are the spawn area above the grid; they are always empty
///
/// # Example
///
/// ```
/// use brickfall_engine::{Cell, GameEvent, Grid, PieceKind};
///
/// let mut grid = Grid::new();
/// let mut events: Vec<GameEvent> = Vec::new();
///
/// for col in 0..Grid::COLS {
///     grid.set_cell(Grid::ROWS - 1, col, Cell::Piece(PieceKind::I));
/// }
/// assert_eq!(grid.evaluate_completed_rows(&mut events), 1);
/// assert_eq!(grid.score(), 10);
/// ```
#[derive(Debug, Clone)]
pub struct Grid {
    rows: [GridRow; Grid::ROWS],
    score: usize,
    is_game_over: bool,
    is_active: bool,
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl Grid {
    pub const ROWS: usize = 20;
    pub const COLS: usize = 10;

    /// Points awarded for every cleared row, regardless of how many clear at once.
    pub const REWARD_PER_ROW: usize = 10;

    /// Creates an empty, inactive grid.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            rows: [GridRow::EMPTY; Self::ROWS],
            score: 0,
            is_game_over: false,
            is_active: false,
        }
    }

    /// Empties every cell and clears the score and the game-over flag.
    ///
    /// The active flag is left alone; starting a session is the driver's call.
    pub fn reset(&mut self) {
        self.rows = [GridRow::EMPTY; Self::ROWS];
        self.score = 0;
        self.is_game_over = false;
    }

    /// Marks a session as running.
    pub fn activate(&mut self) {
        self.is_active = true;
    }

    pub(crate) fn set_active(&mut self, active: bool) {
        self.is_active = active;
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.score
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.is_game_over
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// Returns whether the falling piece may be moved (`is_active && !is_game_over`).
    #[must_use]
    pub fn is_playable(&self) -> bool {
        self.is_active && !self.is_game_over
    }

    /// Returns the cell at `(row, col)`.
    ///
    /// Rows above the grid (`row < 0`) are reported as empty without indexing.
    #[must_use]
    pub fn cell(&self, row: isize, col: usize) -> Cell {
        let Ok(row) = usize::try_from(row) else {
            return Cell::Empty;
        };
        self.rows[row].cells[col]
    }

    /// Overwrites the cell at `(row, col)`.
    ///
    /// Callers must pass in-bounds coordinates; the falling piece guarantees this
    /// through collision checks before it locks.
    pub fn set_cell(&mut self, row: usize, col: usize, cell: Cell) {
        self.rows[row].cells[col] = cell;
    }

    /// Returns an iterator over the rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell; Grid::COLS]> {
        self.rows.iter().map(|row| &row.cells)
    }

    /// Removes every complete row in a single pass and returns how many were removed.
    ///
    /// Remaining rows keep their relative order and fall to fill the gaps; the
    /// same number of empty rows appear at the top. Each removed row adds
    /// [`Grid::REWARD_PER_ROW`] to the score.
    ///
    /// Emits `RowsCleared` and `ScoreChanged` when at least one row was removed,
    /// and `GridRedrawn` in every case.
    pub fn evaluate_completed_rows<E>(&mut self, events: &mut E) -> usize
    where
        E: EventSink + ?Sized,
    {
        let mut count = 0;
        for y in (0..Self::ROWS).rev() {
            if self.rows[y].is_complete() {
                count += 1;
                continue;
            }
            if count > 0 {
                self.rows[y + count] = self.rows[y];
            }
        }
        self.rows[..count].fill(GridRow::EMPTY);

        if count > 0 {
            self.score += count * Self::REWARD_PER_ROW;
            events.emit(GameEvent::RowsCleared { count });
            events.emit(GameEvent::ScoreChanged { score: self.score });
        }
        events.emit(GameEvent::GridRedrawn);
        count
    }

    /// Ends the session. Only [`Grid::reset`] brings the grid back into play.
    pub fn trigger_game_over<E>(&mut self, events: &mut E)
    where
        E: EventSink + ?Sized,
    {
        self.is_game_over = true;
        self.is_active = false;
        events.emit(GameEvent::GameOver);
    }
}
