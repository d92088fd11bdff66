use arrayvec::ArrayVec;
use rand::{Rng, distr::StandardUniform, prelude::Distribution};

use super::{
    event::{EventSink, GameEvent},
    grid::{Cell, Grid},
};

/// The falling piece: a shape kind at a position and orientation.
///
/// Candidate states are built with [`Piece::left`], [`Piece::right`],
/// [`Piece::down`] and [`Piece::rotated`], which never look at the grid. The
/// mutating operations ([`Piece::move_left`], [`Piece::move_right`],
/// [`Piece::rotate`], [`Piece::move_down`]) test a candidate with
/// [`check_collision`] first and only then replace `self`, so a piece that has
/// moved successfully never overlaps a locked block and never leaves the column
/// range `0..Grid::COLS`.
///
/// # Coordinate System
///
/// - The position is the top-left corner of the 4×4 shape matrix
/// - Rows grow downward; negative rows lie above the visible grid
/// - A freshly spawned piece sits at [`PiecePosition::SPAWN`]
///
/// # Example
///
/// ```
/// use brickfall_engine::{DiscardEvents, Grid, Piece, PieceKind};
///
/// let grid = Grid::new();
/// let mut piece = Piece::new(PieceKind::T);
///
/// assert!(piece.move_right(&grid, &mut DiscardEvents));
/// assert!(piece.rotate(&grid, &mut DiscardEvents));
/// assert_eq!(piece.position().col(), 4);
/// assert_eq!(piece.rotation().index(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    position: PiecePosition,
    rotation: PieceRotation,
    kind: PieceKind,
}

/// Result of [`Piece::move_down`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum DropOutcome {
    /// The piece moved one row down.
    Fell,
    /// The piece landed, was written into the grid, and completed rows were removed.
    Locked { cleared_rows: usize },
    /// The piece landed before fully entering the grid; the game is over and
    /// nothing was written.
    ToppedOut,
}

impl Piece {
    #[must_use]
    pub const fn new(kind: PieceKind) -> Self {
        Self {
            position: PiecePosition::SPAWN,
            rotation: PieceRotation::SPAWN,
            kind,
        }
    }

    /// Creates a piece at an arbitrary position and orientation.
    #[must_use]
    pub const fn with_placement(
        kind: PieceKind,
        rotation: PieceRotation,
        position: PiecePosition,
    ) -> Self {
        Self {
            position,
            rotation,
            kind,
        }
    }

    #[must_use]
    pub fn position(&self) -> PiecePosition {
        self.position
    }

    #[must_use]
    pub fn rotation(&self) -> PieceRotation {
        self.rotation
    }

    #[must_use]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    /// Returns the occupancy matrix of the current orientation.
    #[must_use]
    pub fn shape(&self) -> &'static Shape {
        self.kind.shape(self.rotation)
    }

    /// Returns the absolute `(row, col)` of every occupied cell, including cells above the grid.
    pub fn occupied_positions(&self) -> impl Iterator<Item = (isize, isize)> + '_ {
        self.shape()
            .offsets()
            .map(move |(dr, dc)| (self.position.row + dr, self.position.col + dc))
    }

    /// Returns the occupied cells that lie inside the grid.
    #[must_use]
    pub fn visible_positions(&self) -> ArrayVec<(usize, usize), 4> {
        self.occupied_positions()
            .filter_map(|(row, col)| {
                Some((usize::try_from(row).ok()?, usize::try_from(col).ok()?))
            })
            .collect()
    }

    #[must_use]
    pub fn left(&self) -> Self {
        Self {
            position: self.position.left(),
            ..*self
        }
    }

    #[must_use]
    pub fn right(&self) -> Self {
        Self {
            position: self.position.right(),
            ..*self
        }
    }

    #[must_use]
    pub fn down(&self) -> Self {
        Self {
            position: self.position.down(),
            ..*self
        }
    }

    /// Returns the piece turned one step clockwise in place.
    ///
    /// No kick is attempted; if the turned shape does not fit, the rotation is
    /// simply not applied by [`Piece::rotate`].
    #[must_use]
    pub fn rotated(&self) -> Self {
        Self {
            rotation: self.rotation.rotated_right(),
            ..*self
        }
    }

    #[must_use]
    pub fn is_colliding(&self, grid: &Grid) -> bool {
        check_collision(grid, self.position.row, self.position.col, self.shape())
    }

    /// Moves one column left unless that collides. Returns whether the piece moved.
    pub fn move_left<E>(&mut self, grid: &Grid, events: &mut E) -> bool
    where
        E: EventSink + ?Sized,
    {
        self.try_commit(self.left(), grid, events)
    }

    /// Moves one column right unless that collides. Returns whether the piece moved.
    pub fn move_right<E>(&mut self, grid: &Grid, events: &mut E) -> bool
    where
        E: EventSink + ?Sized,
    {
        self.try_commit(self.right(), grid, events)
    }

    /// Turns clockwise unless that collides. Returns whether the piece turned.
    pub fn rotate<E>(&mut self, grid: &Grid, events: &mut E) -> bool
    where
        E: EventSink + ?Sized,
    {
        self.try_commit(self.rotated(), grid, events)
    }

    /// Moves one row down, or lands.
    ///
    /// Landing with the anchor row at or above 0 means the piece never fully
    /// entered the grid: the grid is told the game is over and no cell is
    /// written. Otherwise the piece is locked into the grid and completed rows
    /// are evaluated. Spawning the next piece is up to the caller.
    pub fn move_down<E>(&mut self, grid: &mut Grid, events: &mut E) -> DropOutcome
    where
        E: EventSink + ?Sized,
    {
        if self.try_commit(self.down(), grid, events) {
            return DropOutcome::Fell;
        }

        if self.position.row <= 0 {
            grid.trigger_game_over(events);
            return DropOutcome::ToppedOut;
        }

        self.lock(grid);
        let cleared_rows = grid.evaluate_completed_rows(events);
        DropOutcome::Locked { cleared_rows }
    }

    fn try_commit<E>(&mut self, candidate: Self, grid: &Grid, events: &mut E) -> bool
    where
        E: EventSink + ?Sized,
    {
        if candidate.is_colliding(grid) {
            return false;
        }
        for (row, col) in self.visible_positions() {
            events.emit(GameEvent::CellCleared { row, col });
        }
        *self = candidate;
        let cell = Cell::Piece(self.kind);
        for (row, col) in self.visible_positions() {
            events.emit(GameEvent::CellDrawn { row, col, cell });
        }
        true
    }

    fn lock(&self, grid: &mut Grid) {
        let cell = Cell::Piece(self.kind);
        for (row, col) in self.visible_positions() {
            grid.set_cell(row, col, cell);
        }
    }
}

/// Returns whether `shape` placed with its top-left corner at `(row, col)` collides.
///
/// An occupied cell collides when its column is outside `0..Grid::COLS`, or
/// when its row is not negative and it is either below the floor or on a
/// non-empty cell. Cells above the grid (negative rows) are only checked
/// against the side walls, which lets a piece spawn partially hidden and fall
/// into view.
///
/// This only reads `grid`.
#[must_use]
pub fn check_collision(grid: &Grid, row: isize, col: isize, shape: &Shape) -> bool {
    shape.offsets().any(|(dr, dc)| {
        let Ok(col) = usize::try_from(col + dc) else {
            return true;
        };
        if col >= Grid::COLS {
            return true;
        }
        let row = row + dr;
        match usize::try_from(row) {
            Ok(r) if r >= Grid::ROWS => true,
            Ok(_) => !grid.cell(row, col).is_empty(),
            Err(_) => false,
        }
    })
}

/// Anchor of a piece: the grid position of its shape matrix's top-left corner.
///
/// Both coordinates are signed. The row is negative while the piece is still
/// entering from above; the column may be negative for shapes whose leftmost
/// matrix columns are empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PiecePosition {
    row: isize,
    col: isize,
}

impl PiecePosition {
    /// Where every new piece appears: two rows above the grid, column 3.
    pub const SPAWN: Self = Self::new(-2, 3);

    #[must_use]
    pub const fn new(row: isize, col: isize) -> Self {
        Self { row, col }
    }

    #[must_use]
    pub const fn row(self) -> isize {
        self.row
    }

    #[must_use]
    pub const fn col(self) -> isize {
        self.col
    }

    #[must_use]
    pub const fn left(self) -> Self {
        Self::new(self.row, self.col - 1)
    }

    #[must_use]
    pub const fn right(self) -> Self {
        Self::new(self.row, self.col + 1)
    }

    #[must_use]
    pub const fn down(self) -> Self {
        Self::new(self.row + 1, self.col)
    }
}

/// Orientation index of a piece, in `0..4`.
///
/// Each step is a 90° clockwise turn; the index wraps around modulo 4.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PieceRotation(u8);

impl PieceRotation {
    pub const SPAWN: Self = Self(0);

    /// Returns the orientation with the given index, wrapped into `0..4`.
    #[must_use]
    pub const fn new(index: u8) -> Self {
        Self(index % 4)
    }

    #[must_use]
    pub const fn rotated_right(self) -> Self {
        Self((self.0 + 1) % 4)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Identity of a shape in the shape table.
///
/// The discriminant doubles as the color identity of locked cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PieceKind {
    /// I-piece.
    I = 0,
    /// O-piece.
    O = 1,
    /// S-piece.
    S = 2,
    /// Z-piece.
    Z = 3,
    /// J-piece.
    J = 4,
    /// L-piece.
    L = 5,
    /// T-piece.
    T = 6,
}

/// Picks a kind uniformly at random.
impl Distribution<PieceKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        PieceKind::ALL[rng.random_range(0..PieceKind::LEN)]
    }
}

impl PieceKind {
    /// Number of piece kinds (7).
    pub const LEN: usize = 7;

    pub const ALL: [Self; Self::LEN] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
        PieceKind::T,
    ];

    /// Returns the orientation matrix for the given rotation.
    #[must_use]
    pub fn shape(self, rotation: PieceRotation) -> &'static Shape {
        &SHAPES[self as usize][rotation.index()]
    }

    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::O => 'O',
            PieceKind::S => 'S',
            PieceKind::Z => 'Z',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
            PieceKind::T => 'T',
        }
    }
}

/// One orientation of a piece: a 4×4 occupancy matrix indexed `[row][col]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    cells: [[bool; Shape::SIZE]; Shape::SIZE],
}

impl Shape {
    pub const SIZE: usize = 4;

    #[must_use]
    pub const fn is_occupied(&self, row: usize, col: usize) -> bool {
        self.cells[row][col]
    }

    /// Returns the `(row, col)` offset of every occupied cell, row by row.
    #[expect(clippy::cast_possible_wrap)]
    pub fn offsets(&self) -> impl Iterator<Item = (isize, isize)> + '_ {
        self.cells.iter().enumerate().flat_map(|(dr, row)| {
            row.iter()
                .enumerate()
                .filter(|&(_, &occupied)| occupied)
                .map(move |(dc, _)| (dr as isize, dc as isize))
        })
    }

    /// Returns the number of columns between the leftmost and rightmost occupied cells, inclusive.
    #[must_use]
    pub fn width(&self) -> usize {
        span(self.offsets().map(|(_, dc)| dc))
    }

    /// Returns the number of rows between the topmost and bottommost occupied cells, inclusive.
    #[must_use]
    pub fn height(&self) -> usize {
        span(self.offsets().map(|(dr, _)| dr))
    }
}

fn span(values: impl Iterator<Item = isize>) -> usize {
    values
        .fold(None, |bounds, v| match bounds {
            None => Some((v, v)),
            Some((min, max)) => Some((isize::min(min, v), isize::max(max, v))),
        })
        .map_or(0, |(min, max)| (max - min).unsigned_abs() + 1)
}

/// Generates all 4 orientations by repeatedly turning the matrix 90° clockwise.
///
/// # Arguments
///
/// * `size` - Side of the square the shape turns within (4 for I, 2 for O, 3 otherwise)
/// * `cells` - Orientation 0
const fn shape_rotations(size: usize, cells: [[bool; Shape::SIZE]; Shape::SIZE]) -> [Shape; 4] {
    let mut rotations = [Shape { cells }; 4];
    let mut i = 1;
    while i < 4 {
        let mut turned = [[false; Shape::SIZE]; Shape::SIZE];
        let mut y = 0;
        while y < size {
            let mut x = 0;
            while x < size {
                turned[y][x] = rotations[i - 1].cells[size - 1 - x][y];
                x += 1;
            }
            y += 1;
        }
        rotations[i] = Shape { cells: turned };
        i += 1;
    }
    rotations
}

const SHAPES: [[Shape; 4]; PieceKind::LEN] = {
    const C: bool = true;
    const E: bool = false;
    const EEEE: [bool; 4] = [E; 4];
    [
        // I-piece
        shape_rotations(4, [EEEE, [C, C, C, C], EEEE, EEEE]),
        // O-piece
        shape_rotations(2, [[C, C, E, E], [C, C, E, E], EEEE, EEEE]),
        // S-piece
        shape_rotations(3, [[E, C, C, E], [C, C, E, E], EEEE, EEEE]),
        // Z-piece
        shape_rotations(3, [[C, C, E, E], [E, C, C, E], EEEE, EEEE]),
        // J-piece
        shape_rotations(3, [[C, E, E, E], [C, C, C, E], EEEE, EEEE]),
        // L-piece
        shape_rotations(3, [[E, E, C, E], [C, C, C, E], EEEE, EEEE]),
        // T-piece
        shape_rotations(3, [[E, C, E, E], [C, C, C, E], EEEE, EEEE]),
    ]
};
