use crate::core::{
    grid::{Cell, Grid},
    piece::{Piece, PieceKind},
};

use super::{game_session::SessionState, game_stats::GameStats};

/// What a painter draws in one grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderCell {
    #[default]
    Empty,
    /// Landing preview of the falling piece.
    Ghost(PieceKind),
    /// Locked or falling piece.
    Piece(PieceKind),
}

impl RenderCell {
    #[must_use]
    pub fn is_empty(self) -> bool {
        self == RenderCell::Empty
    }
}

impl From<Cell> for RenderCell {
    fn from(cell: Cell) -> Self {
        match cell {
            Cell::Empty => RenderCell::Empty,
            Cell::Locked(kind) => RenderCell::Piece(kind),
        }
    }
}

/// Grid, ghost and falling piece flattened into one layer of cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderGrid {
    width: usize,
    cells: Vec<RenderCell>,
}

impl RenderGrid {
    fn from_grid(grid: &Grid) -> Self {
        Self {
            width: grid.width(),
            cells: grid.rows().flatten().copied().map(RenderCell::from).collect(),
        }
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.cells.len() / self.width
    }

    #[must_use]
    pub fn cell(&self, x: usize, y: usize) -> RenderCell {
        self.cells[y * self.width + x]
    }

    /// Iterates over the rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[RenderCell]> {
        self.cells.chunks(self.width)
    }

    fn fill_piece_as(&mut self, piece: &Piece, cell: RenderCell) {
        for (x, y) in piece.occupied_positions() {
            let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) else {
                continue;
            };
            if x < self.width && y < self.height() {
                self.cells[y * self.width + x] = cell;
            }
        }
    }
}

/// Read-only view of a [`GameSession`](crate::GameSession) for painters.
///
/// Borrowed from the session, so it always reflects the latest accepted
/// command and can never be used to mutate it.
#[derive(Debug, Clone, Copy)]
pub struct GameSnapshot<'a> {
    pub grid: &'a Grid,
    pub falling_piece: Piece,
    pub ghost_piece: Piece,
    pub held_piece: Option<Piece>,
    pub next_piece: PieceKind,
    pub stats: &'a GameStats,
    pub high_score: u64,
    pub state: SessionState,
}

impl GameSnapshot<'_> {
    /// Flattens grid, ghost and falling piece into a single layer.
    ///
    /// The falling piece is drawn over its ghost; cells above the top of the
    /// grid are not part of the result.
    ///
    /// ```
    /// use minicade_engine::{EngineConfig, GameSession, NoLedger, RenderCell};
    ///
    /// let session = GameSession::new(EngineConfig::default(), Box::new(NoLedger)).unwrap();
    /// let snapshot = session.snapshot();
    /// let composed = snapshot.compose();
    ///
    /// let kind = snapshot.falling_piece.kind();
    /// let ghosts = composed.rows().flatten().filter(|c| **c == RenderCell::Ghost(kind)).count();
    /// assert_eq!(ghosts, 4);
    /// ```
    #[must_use]
    pub fn compose(&self) -> RenderGrid {
        let mut composed = RenderGrid::from_grid(self.grid);
        let kind = self.falling_piece.kind();
        composed.fill_piece_as(&self.ghost_piece, RenderCell::Ghost(kind));
        composed.fill_piece_as(&self.falling_piece, RenderCell::Piece(kind));
        composed
    }
}
