use crate::{
    HoldError, PieceCollisionError,
    core::{
        grid::Grid,
        piece::{Piece, PieceKind},
    },
};

use super::piece_buffer::PieceBuffer;

/// Single-turn game state: grid, falling piece, piece queue and hold slot.
///
/// Every mutation is checked against the grid first and applied only when it
/// fits, so a failed move or rotation leaves the field untouched.
#[derive(Debug, Clone)]
pub struct GameField {
    grid: Grid,
    falling_piece: Piece,
    piece_buffer: PieceBuffer,
    held_piece: Option<Piece>,
    hold_used: bool,
}

impl GameField {
    /// Creates an empty `cols × rows` field and spawns the first piece.
    #[must_use]
    pub fn new(cols: usize, rows: usize, mut piece_buffer: PieceBuffer) -> Self {
        let falling_piece = Piece::spawn(piece_buffer.pop_next(), cols);
        Self {
            grid: Grid::new(cols, rows),
            falling_piece,
            piece_buffer,
            held_piece: None,
            hold_used: false,
        }
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[cfg(test)]
    pub(crate) fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    #[must_use]
    pub fn falling_piece(&self) -> Piece {
        self.falling_piece
    }

    #[must_use]
    pub fn held_piece(&self) -> Option<Piece> {
        self.held_piece
    }

    #[must_use]
    pub fn hold_used(&self) -> bool {
        self.hold_used
    }

    /// The piece that spawns after the current one locks.
    #[must_use]
    pub fn next_piece(&self) -> PieceKind {
        self.piece_buffer.peek_next()
    }

    /// Where the falling piece would land if hard-dropped now.
    #[must_use]
    pub fn ghost_piece(&self) -> Piece {
        self.grid.drop_position(&self.falling_piece)
    }

    pub fn set_falling_piece(&mut self, piece: Piece) -> Result<(), PieceCollisionError> {
        if self.grid.is_colliding(&piece) {
            return Err(PieceCollisionError);
        }
        self.falling_piece = piece;
        Ok(())
    }

    pub fn try_move(&mut self, dx: i32, dy: i32) -> Result<(), PieceCollisionError> {
        self.set_falling_piece(self.falling_piece.translated(dx, dy))
    }

    /// Rotates the falling piece clockwise, kicking it one column right, one
    /// column left or one row up when it does not fit in place.
    pub fn try_rotate(&mut self) -> Result<(), PieceCollisionError> {
        let piece = self
            .falling_piece
            .rotation_candidates()
            .into_iter()
            .find(|piece| !self.grid.is_colliding(piece))
            .ok_or(PieceCollisionError)?;
        self.falling_piece = piece;
        Ok(())
    }

    /// Moves the falling piece down until it is blocked and returns the number
    /// of rows travelled.
    pub fn drop_to_bottom(&mut self) -> u32 {
        let mut rows = 0;
        while self.try_move(0, 1).is_ok() {
            rows += 1;
        }
        rows
    }

    /// Puts the falling piece on hold.
    ///
    /// With an empty hold slot the next piece is promoted; otherwise the held
    /// piece comes back at its spawn position, keeping its rotation. Only one
    /// hold is allowed per lock.
    ///
    /// [`HoldError::PieceCollision`] means the hold *was* applied and the
    /// promoted piece does not fit: the game is over.
    pub fn try_hold(&mut self) -> Result<(), HoldError> {
        if self.hold_used {
            return Err(HoldError::HoldAlreadyUsed);
        }
        let cols = self.grid.width();
        let promoted = match self.held_piece.take() {
            Some(held) => held.respawned(cols),
            None => Piece::spawn(self.piece_buffer.pop_next(), cols),
        };
        self.held_piece = Some(self.falling_piece);
        self.falling_piece = promoted;
        self.hold_used = true;

        if self.grid.is_colliding(&self.falling_piece) {
            return Err(HoldError::PieceCollision(PieceCollisionError));
        }
        Ok(())
    }

    /// Locks the falling piece, clears lines and spawns the next piece.
    ///
    /// Returns the number of cleared lines, and an error when the new piece
    /// collides at its spawn position.
    pub fn complete_piece_drop(&mut self) -> (usize, Result<(), PieceCollisionError>) {
        self.grid.fill_piece(&self.falling_piece);
        let cleared_lines = self.grid.clear_lines();

        self.falling_piece = Piece::spawn(self.piece_buffer.pop_next(), self.grid.width());
        self.hold_used = false;
        if self.grid.is_colliding(&self.falling_piece) {
            return (cleared_lines, Err(PieceCollisionError));
        }

        (cleared_lines, Ok(()))
    }
}

#[cfg(test)]
mod tests {
    use crate::{Cell, PieceSeed, Position, Randomizer};

    use super::*;

    fn field() -> GameField {
        let seed: PieceSeed = "0123456789abcdef0123456789abcdef".parse().unwrap();
        GameField::new(10, 20, PieceBuffer::with_seed(Randomizer::Uniform, seed))
    }

    fn field_with(kind: PieceKind) -> GameField {
        let mut field = field();
        field.falling_piece = Piece::spawn(kind, 10);
        field
    }

    fn fill_row(field: &mut GameField, y: i32, except: &[i32]) {
        for x in 0..10 {
            if !except.contains(&x) {
                field.grid.set_cell(x, y, Cell::Locked(PieceKind::Z));
            }
        }
    }

    #[test]
    fn test_new_field_spawns_piece() {
        let field = field();
        let piece = field.falling_piece();
        assert_eq!(piece, Piece::spawn(piece.kind(), 10));
        assert!(field.grid().is_empty());
        assert_eq!(field.held_piece(), None);
        assert!(!field.hold_used());
    }

    #[test]
    fn test_move_blocked_by_wall() {
        let mut field = field_with(PieceKind::O);
        for _ in 0..4 {
            field.try_move(-1, 0).unwrap();
        }
        let before = field.falling_piece();
        assert_eq!(field.try_move(-1, 0), Err(PieceCollisionError));
        assert_eq!(field.falling_piece(), before);
    }

    #[test]
    fn test_rotate_in_place() {
        let mut field = field_with(PieceKind::T);
        field.try_move(0, 5).unwrap();
        field.try_rotate().unwrap();
        let piece = field.falling_piece();
        assert_eq!(piece.position(), Position::new(3, 5));
        assert_eq!(piece.shape(), PieceKind::T.shape().rotated());
    }

    #[test]
    fn test_rotate_kicks_off_wall() {
        let mut field = field_with(PieceKind::I);
        field.try_move(0, 5).unwrap();
        field.try_rotate().unwrap();
        // vertical I occupies column x + 2; move it flush with the left wall
        while field.try_move(-1, 0).is_ok() {}
        assert_eq!(field.falling_piece().position().x, -2);

        // no candidate fits back inside the walls
        assert_eq!(field.try_rotate(), Err(PieceCollisionError));

        field.try_move(1, 0).unwrap();
        // at x = -1 the in-place rotation fails and the right kick fits
        field.try_rotate().unwrap();
        assert_eq!(field.falling_piece().position(), Position::new(0, 5));
    }

    #[test]
    fn test_rotate_kicks_left() {
        let mut field = field_with(PieceKind::T);
        field.try_move(0, 5).unwrap();
        // blocks the stem in place and the nub of the right kick
        field.grid.set_cell(4, 7, Cell::Locked(PieceKind::O));
        field.grid.set_cell(6, 6, Cell::Locked(PieceKind::O));
        field.try_rotate().unwrap();
        let piece = field.falling_piece();
        assert_eq!(piece.position(), Position::new(2, 5));
        assert_eq!(piece.shape(), PieceKind::T.shape().rotated());
    }

    #[test]
    fn test_rotate_kicks_up() {
        let mut field = field_with(PieceKind::T);
        field.try_move(0, 5).unwrap();
        // the rotated stem reaches row 7 in place and on both side kicks
        for x in 3..=5 {
            field.grid.set_cell(x, 7, Cell::Locked(PieceKind::O));
        }
        field.try_rotate().unwrap();
        assert_eq!(field.falling_piece().position(), Position::new(3, 4));
    }

    #[test]
    fn test_drop_to_bottom() {
        let mut field = field_with(PieceKind::O);
        assert_eq!(field.drop_to_bottom(), 18);
        assert_eq!(field.falling_piece().position().y, 18);
        assert_eq!(field.drop_to_bottom(), 0);
    }

    #[test]
    fn test_ghost_follows_falling_piece() {
        let mut field = field_with(PieceKind::O);
        assert_eq!(field.ghost_piece().position(), Position::new(4, 18));
        field.try_move(-4, 0).unwrap();
        field.grid.set_cell(0, 12, Cell::Locked(PieceKind::J));
        assert_eq!(field.ghost_piece().position(), Position::new(0, 10));
    }

    #[test]
    fn test_hold_promotes_next_then_swaps() {
        let mut field = field_with(PieceKind::T);
        let next = field.next_piece();
        field.try_move(2, 3).unwrap();
        field.try_rotate().unwrap();

        field.try_hold().unwrap();
        let held = field.held_piece().unwrap();
        assert_eq!(held.kind(), PieceKind::T);
        assert_eq!(held.shape(), PieceKind::T.shape().rotated());
        assert_eq!(field.falling_piece(), Piece::spawn(next, 10));
        assert!(field.hold_used());

        assert_eq!(field.try_hold(), Err(HoldError::HoldAlreadyUsed));
        assert_eq!(field.held_piece(), Some(held));

        field.drop_to_bottom();
        let (_, result) = field.complete_piece_drop();
        result.unwrap();
        assert!(!field.hold_used());

        let current = field.falling_piece();
        field.try_hold().unwrap();
        let swapped = field.falling_piece();
        assert_eq!(swapped.kind(), PieceKind::T);
        assert_eq!(swapped.shape(), PieceKind::T.shape().rotated());
        assert_eq!(swapped.position(), Position::new(3, 0));
        assert_eq!(field.held_piece(), Some(current));
    }

    #[test]
    fn test_hold_collision_is_applied() {
        let mut field = field_with(PieceKind::O);
        field.drop_to_bottom();
        for y in 0..18 {
            fill_row(&mut field, y, &[0]);
        }
        let result = field.try_hold();
        assert_eq!(result, Err(HoldError::PieceCollision(PieceCollisionError)));
        assert_eq!(field.held_piece().map(|p| p.kind()), Some(PieceKind::O));
    }

    #[test]
    fn test_complete_piece_drop_clears_line() {
        let mut field = field_with(PieceKind::O);
        fill_row(&mut field, 19, &[4, 5]);
        fill_row(&mut field, 18, &[4, 5, 6]);
        field.drop_to_bottom();

        let next = field.next_piece();
        let (cleared, result) = field.complete_piece_drop();
        result.unwrap();
        assert_eq!(cleared, 1);
        assert_eq!(field.grid().cell(4, 19), Some(Cell::Locked(PieceKind::O)));
        assert_eq!(field.grid().cell(6, 19), Some(Cell::Empty));
        assert_eq!(field.grid().cell(0, 18), Some(Cell::Empty));
        assert_eq!(field.falling_piece(), Piece::spawn(next, 10));
    }

    #[test]
    fn test_complete_piece_drop_top_out() {
        let mut field = field_with(PieceKind::O);
        for y in 0..20 {
            fill_row(&mut field, y, &[0]);
        }
        field.falling_piece = Piece::spawn(PieceKind::O, 10).up().up();
        let (cleared, result) = field.complete_piece_drop();
        assert_eq!(cleared, 0);
        assert_eq!(result, Err(PieceCollisionError));
    }
}
