use std::fmt;

use arrayvec::ArrayVec;
use rand::{Rng, distr::StandardUniform, prelude::Distribution};

use super::shape::Shape;

/// A Tetris piece (tetromino) with its current shape matrix and grid position.
///
/// Pieces are immutable values: movement and rotation return new `Piece`s.
///
/// # Coordinate System
///
/// - Position is the top-left corner of the shape's bounding box, in grid cells
/// - X increases rightward (columns), Y increases downward (rows)
/// - Coordinates are signed; a piece may extend above the grid (`y < 0`)
///
/// # Example
///
/// ```
/// use minicade_engine::{Piece, PieceKind, Position};
///
/// let piece = Piece::spawn(PieceKind::T, 10);
/// assert_eq!(piece.position(), Position::new(3, 0));
///
/// let moved = piece.right().rotated();
/// assert_eq!(moved.position(), Position::new(4, 0));
/// assert_eq!(moved.shape(), PieceKind::T.shape().rotated());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    kind: PieceKind,
    shape: Shape,
    position: Position,
}

impl Piece {
    /// Creates a piece in spawn orientation at the spawn position for a grid `cols` wide.
    #[must_use]
    pub fn spawn(kind: PieceKind, cols: usize) -> Self {
        let shape = kind.shape();
        Self {
            kind,
            shape,
            position: Position::spawn(shape, cols),
        }
    }

    /// Returns this piece, keeping its current shape, moved back to the spawn position.
    #[must_use]
    pub fn respawned(&self, cols: usize) -> Self {
        Self {
            position: Position::spawn(self.shape, cols),
            ..*self
        }
    }

    #[must_use]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub fn shape(&self) -> Shape {
        self.shape
    }

    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    /// Absolute grid coordinates `(x, y)` of the occupied cells.
    pub fn occupied_positions(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.shape.occupied_cells().map(move |(dx, dy)| {
            #[expect(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
            let (dx, dy) = (dx as i32, dy as i32);
            (self.position.x + dx, self.position.y + dy)
        })
    }

    #[must_use]
    pub fn translated(&self, dx: i32, dy: i32) -> Self {
        Self {
            position: Position::new(self.position.x + dx, self.position.y + dy),
            ..*self
        }
    }

    #[must_use]
    pub fn left(&self) -> Self {
        self.translated(-1, 0)
    }

    #[must_use]
    pub fn right(&self) -> Self {
        self.translated(1, 0)
    }

    #[must_use]
    pub fn up(&self) -> Self {
        self.translated(0, -1)
    }

    #[must_use]
    pub fn down(&self) -> Self {
        self.translated(0, 1)
    }

    /// Returns the piece with its shape rotated 90° clockwise, at the same position.
    #[must_use]
    pub fn rotated(&self) -> Self {
        Self {
            shape: self.shape.rotated(),
            ..*self
        }
    }

    /// Placements to try for a clockwise rotation, in order: in place, one
    /// column right, one column left, one row up.
    ///
    /// The first candidate that does not collide wins.
    #[must_use]
    pub fn rotation_candidates(&self) -> ArrayVec<Self, 4> {
        let rotated = self.rotated();
        ArrayVec::from([rotated, rotated.right(), rotated.left(), rotated.up()])
    }
}

/// Top-left corner of a piece's bounding box, in grid cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Horizontally centered (rounded down), on the top row.
    fn spawn(shape: Shape, cols: usize) -> Self {
        let x = cols.saturating_sub(shape.size()) / 2;
        Self::new(i32::try_from(x).unwrap_or(i32::MAX), 0)
    }
}

/// RGB display color of a piece kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

/// Enum representing the type of piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PieceKind {
    /// I-piece.
    I = 0,
    /// O-piece.
    O = 1,
    /// T-piece.
    T = 2,
    /// L-piece.
    L = 3,
    /// J-piece.
    J = 4,
    /// S-piece.
    S = 5,
    /// Z-piece.
    Z = 6,
}

impl Distribution<PieceKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        PieceKind::ALL[rng.random_range(0..PieceKind::LEN)]
    }
}

impl PieceKind {
    /// Number of piece types (7).
    pub const LEN: usize = 7;

    pub const ALL: [Self; Self::LEN] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::L,
        PieceKind::J,
        PieceKind::S,
        PieceKind::Z,
    ];

    /// Spawn-orientation shape matrix.
    #[must_use]
    pub const fn shape(self) -> Shape {
        PIECE_SHAPES[self as usize]
    }

    #[must_use]
    pub const fn color(self) -> Rgb {
        match self {
            PieceKind::I => Rgb(0x00, 0xBC, 0xD4),
            PieceKind::O => Rgb(0xFF, 0xD7, 0x00),
            PieceKind::T => Rgb(0x9C, 0x27, 0xB0),
            PieceKind::L => Rgb(0xFF, 0x98, 0x00),
            PieceKind::J => Rgb(0x21, 0x96, 0xF3),
            PieceKind::S => Rgb(0x4C, 0xAF, 0x50),
            PieceKind::Z => Rgb(0xF4, 0x43, 0x36),
        }
    }
}

const PIECE_SHAPES: [Shape; PieceKind::LEN] = [
    // I-piece
    Shape::from_matrix([[0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0], [0, 0, 0, 0]]),
    // O-piece
    Shape::from_matrix([[1, 1], [1, 1]]),
    // T-piece
    Shape::from_matrix([[0, 1, 0], [1, 1, 1], [0, 0, 0]]),
    // L-piece
    Shape::from_matrix([[0, 0, 1], [1, 1, 1], [0, 0, 0]]),
    // J-piece
    Shape::from_matrix([[1, 0, 0], [1, 1, 1], [0, 0, 0]]),
    // S-piece
    Shape::from_matrix([[0, 1, 1], [1, 1, 0], [0, 0, 0]]),
    // Z-piece
    Shape::from_matrix([[1, 1, 0], [0, 1, 1], [0, 0, 0]]),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_shape_has_four_cells() {
        for kind in PieceKind::ALL {
            assert_eq!(kind.shape().occupied_cells().count(), 4, "{kind:?}");
        }
    }

    #[test]
    fn test_shape_sizes() {
        assert_eq!(PieceKind::I.shape().size(), 4);
        assert_eq!(PieceKind::O.shape().size(), 2);
        for kind in [
            PieceKind::T,
            PieceKind::L,
            PieceKind::J,
            PieceKind::S,
            PieceKind::Z,
        ] {
            assert_eq!(kind.shape().size(), 3, "{kind:?}");
        }
    }

    #[test]
    fn test_spawn_position_is_centered() {
        assert_eq!(Piece::spawn(PieceKind::I, 10).position(), Position::new(3, 0));
        assert_eq!(Piece::spawn(PieceKind::O, 10).position(), Position::new(4, 0));
        assert_eq!(Piece::spawn(PieceKind::T, 10).position(), Position::new(3, 0));
        assert_eq!(Piece::spawn(PieceKind::T, 7).position(), Position::new(2, 0));
    }

    #[test]
    fn test_occupied_positions_follow_translation() {
        let piece = Piece::spawn(PieceKind::O, 10).down().left();
        let cells: Vec<_> = piece.occupied_positions().collect();
        assert_eq!(cells, vec![(3, 1), (4, 1), (3, 2), (4, 2)]);
    }

    #[test]
    fn test_occupied_positions_above_grid() {
        let piece = Piece::spawn(PieceKind::I, 10).up().up();
        assert!(piece.occupied_positions().all(|(_, y)| y == -1));
    }

    #[test]
    fn test_respawned_keeps_rotation() {
        let piece = Piece::spawn(PieceKind::J, 10).rotated().translated(4, 7);
        let respawned = piece.respawned(10);
        assert_eq!(respawned.position(), Position::new(3, 0));
        assert_eq!(respawned.shape(), PieceKind::J.shape().rotated());
    }

    #[test]
    fn test_rotation_candidates_order() {
        let piece = Piece::spawn(PieceKind::L, 10).translated(0, 5);
        let positions: Vec<_> = piece
            .rotation_candidates()
            .iter()
            .map(|p| p.position())
            .collect();
        assert_eq!(
            positions,
            vec![
                Position::new(3, 5),
                Position::new(4, 5),
                Position::new(2, 5),
                Position::new(3, 4),
            ]
        );
        assert!(
            piece
                .rotation_candidates()
                .iter()
                .all(|p| p.shape() == PieceKind::L.shape().rotated())
        );
    }

    #[test]
    fn test_color_hex() {
        assert_eq!(PieceKind::I.color().to_string(), "#00BCD4");
        assert_eq!(PieceKind::Z.color().to_string(), "#F44336");
    }
}
