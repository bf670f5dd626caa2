use super::{
    piece::{Piece, PieceKind},
    shape::Shape,
};

/// A single cell of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    /// Cell of a locked piece; the kind determines its color.
    Locked(PieceKind),
}

impl Cell {
    #[must_use]
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct GridRow {
    cells: Box<[Cell]>,
}

impl GridRow {
    fn empty(cols: usize) -> Self {
        Self {
            cells: vec![Cell::Empty; cols].into_boxed_slice(),
        }
    }

    fn is_filled(&self) -> bool {
        self.cells.iter().all(|c| !c.is_empty())
    }
}

/// Locked-cell grid of a game session.
///
/// The grid is `height` rows by `width` columns. Its dimensions are fixed at
/// creation; only the cell contents change (when pieces lock and lines clear).
///
/// Row 0 is the top of the grid. Pieces may extend above it: cells with a
/// negative row never collide and are discarded when the piece locks.
///
/// # Example
///
/// ```
/// use minicade_engine::{Grid, Piece, PieceKind};
///
/// let mut grid = Grid::new(10, 20);
/// let piece = Piece::spawn(PieceKind::O, 10).translated(0, 18);
///
/// assert!(!grid.is_colliding(&piece));
/// grid.fill_piece(&piece);
/// assert!(grid.is_colliding(&piece));
/// assert!(grid.is_colliding(&piece.down()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    rows: Vec<GridRow>,
}

impl Grid {
    /// Creates an empty grid of `width` columns and `height` rows.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero or does not fit in an `i32`.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        assert!(width > 0 && height > 0, "grid must not be empty");
        assert!(i32::try_from(width).is_ok() && i32::try_from(height).is_ok());
        Self {
            width,
            rows: (0..height).map(|_| GridRow::empty(width)).collect(),
        }
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Returns the cell at `(x, y)`, or `None` outside the grid.
    #[must_use]
    pub fn cell(&self, x: i32, y: i32) -> Option<Cell> {
        let (x, y) = self.index(x, y)?;
        Some(self.rows[y].cells[x])
    }

    /// Overwrites a single cell. Coordinates outside the grid are ignored.
    pub fn set_cell(&mut self, x: i32, y: i32, cell: Cell) {
        if let Some((x, y)) = self.index(x, y) {
            self.rows[y].cells[x] = cell;
        }
    }

    /// Iterates over the rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.rows.iter().map(|row| &*row.cells)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows
            .iter()
            .all(|row| row.cells.iter().all(|c| c.is_empty()))
    }

    /// Tests `shape` placed with its top-left corner at `(x, y)`.
    ///
    /// An occupied shape cell collides when its column is outside `[0, width)`,
    /// its row is at or below `height`, or it lands on a non-empty cell.
    /// Cells above the top of the grid (`row < 0`) never collide.
    #[must_use]
    pub fn check_collision(&self, x: i32, y: i32, shape: &Shape) -> bool {
        shape.occupied_cells().any(|(dx, dy)| {
            #[expect(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
            let (col, row) = (x + dx as i32, y + dy as i32);
            if col < 0 || col >= self.width_i32() || row >= self.height_i32() {
                return true;
            }
            if row < 0 {
                return false;
            }
            self.cell(col, row).is_some_and(|c| !c.is_empty())
        })
    }

    #[must_use]
    pub fn is_colliding(&self, piece: &Piece) -> bool {
        let pos = piece.position();
        self.check_collision(pos.x, pos.y, &piece.shape())
    }

    /// Writes the piece's cells into the grid as locked cells.
    ///
    /// Cells outside the grid (above the top) are dropped.
    pub fn fill_piece(&mut self, piece: &Piece) {
        let cell = Cell::Locked(piece.kind());
        for (x, y) in piece.occupied_positions() {
            self.set_cell(x, y, cell);
        }
    }

    /// Clears filled lines and returns the number of lines cleared.
    ///
    /// All full rows are collected first, then removed together. The same
    /// number of empty rows is inserted at the top, so the remaining rows keep
    /// their relative order and fall by the number of cleared rows below them.
    pub fn clear_lines(&mut self) -> usize {
        let height = self.rows.len();
        self.rows.retain(|row| !row.is_filled());
        let cleared = height - self.rows.len();
        if cleared > 0 {
            let mut rows = Vec::with_capacity(height);
            rows.extend((0..cleared).map(|_| GridRow::empty(self.width)));
            rows.append(&mut self.rows);
            self.rows = rows;
        }
        cleared
    }

    /// Returns the lowest position `piece` can fall to from where it is.
    #[must_use]
    pub fn drop_position(&self, piece: &Piece) -> Piece {
        let mut dropped = *piece;
        while !self.is_colliding(&dropped.down()) {
            dropped = dropped.down();
        }
        dropped
    }

    fn index(&self, x: i32, y: i32) -> Option<(usize, usize)> {
        let x = usize::try_from(x).ok().filter(|x| *x < self.width)?;
        let y = usize::try_from(y).ok().filter(|y| *y < self.rows.len())?;
        Some((x, y))
    }

    #[expect(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
    fn width_i32(&self) -> i32 {
        self.width as i32
    }

    #[expect(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
    fn height_i32(&self) -> i32 {
        self.rows.len() as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const W: usize = 10;
    const H: usize = 20;

    fn fill_row(grid: &mut Grid, y: i32, except: Option<i32>) {
        for x in 0..10 {
            if Some(x) != except {
                grid.set_cell(x, y, Cell::Locked(PieceKind::I));
            }
        }
    }

    #[test]
    fn test_initial_grid_is_empty() {
        let grid = Grid::new(W, H);
        assert_eq!(grid.width(), W);
        assert_eq!(grid.height(), H);
        assert!(grid.is_empty());
        assert_eq!(grid.rows().count(), H);
        assert!(grid.rows().all(|row| row.len() == W));
    }

    #[test]
    fn test_cell_out_of_bounds() {
        let grid = Grid::new(W, H);
        assert_eq!(grid.cell(0, 0), Some(Cell::Empty));
        assert_eq!(grid.cell(-1, 0), None);
        assert_eq!(grid.cell(0, -1), None);
        assert_eq!(grid.cell(10, 0), None);
        assert_eq!(grid.cell(0, 20), None);
    }

    #[test]
    fn test_collision_side_walls() {
        let grid = Grid::new(W, H);
        let t = PieceKind::T.shape();
        assert!(!grid.check_collision(0, 5, &t));
        assert!(grid.check_collision(-1, 5, &t));
        assert!(!grid.check_collision(7, 5, &t));
        assert!(grid.check_collision(8, 5, &t));
    }

    #[test]
    fn test_collision_empty_shape_columns_do_not_count() {
        let grid = Grid::new(W, H);
        // vertical I occupies only column 2 of its box
        let i = PieceKind::I.shape().rotated();
        assert!(!grid.check_collision(-2, 0, &i));
        assert!(grid.check_collision(-3, 0, &i));
        assert!(!grid.check_collision(7, 0, &i));
        assert!(grid.check_collision(8, 0, &i));
    }

    #[test]
    fn test_collision_floor() {
        let grid = Grid::new(W, H);
        let o = PieceKind::O.shape();
        assert!(!grid.check_collision(0, 18, &o));
        assert!(grid.check_collision(0, 19, &o));
    }

    #[test]
    fn test_rows_above_top_never_collide() {
        let mut grid = Grid::new(W, H);
        fill_row(&mut grid, 0, None);
        let o = PieceKind::O.shape();
        assert!(!grid.check_collision(4, -2, &o));
        assert!(grid.check_collision(4, -1, &o));
        // still out of bounds on the sides
        assert!(grid.check_collision(-1, -2, &o));
    }

    #[test]
    fn test_collision_with_locked_cells() {
        let mut grid = Grid::new(W, H);
        grid.set_cell(4, 10, Cell::Locked(PieceKind::Z));
        let o = PieceKind::O.shape();
        assert!(grid.check_collision(4, 9, &o));
        assert!(grid.check_collision(3, 10, &o));
        assert!(!grid.check_collision(5, 10, &o));
        assert!(!grid.check_collision(4, 11, &o));
    }

    #[test]
    fn test_fill_piece_discards_cells_above_top() {
        let mut grid = Grid::new(W, H);
        let piece = Piece::spawn(PieceKind::O, W).up();
        grid.fill_piece(&piece);
        assert_eq!(grid.cell(4, 0), Some(Cell::Locked(PieceKind::O)));
        assert_eq!(grid.cell(5, 0), Some(Cell::Locked(PieceKind::O)));
        assert_eq!(grid.rows().flatten().filter(|c| !c.is_empty()).count(), 2);
    }

    #[test]
    fn test_clear_lines_incomplete_row() {
        let mut grid = Grid::new(W, H);
        fill_row(&mut grid, 19, Some(9));
        let before = grid.clone();
        assert_eq!(grid.clear_lines(), 0);
        assert_eq!(grid, before);
    }

    #[test]
    fn test_clear_lines_single_row_shifts_down() {
        let mut grid = Grid::new(W, H);
        fill_row(&mut grid, 19, None);
        grid.set_cell(3, 18, Cell::Locked(PieceKind::T));
        grid.set_cell(5, 17, Cell::Locked(PieceKind::S));

        assert_eq!(grid.clear_lines(), 1);
        assert_eq!(grid.height(), H);
        assert_eq!(grid.cell(3, 19), Some(Cell::Locked(PieceKind::T)));
        assert_eq!(grid.cell(5, 18), Some(Cell::Locked(PieceKind::S)));
        assert_eq!(grid.rows().flatten().filter(|c| !c.is_empty()).count(), 2);
        assert!(grid.rows().next().unwrap().iter().all(|c| c.is_empty()));
    }

    #[test]
    fn test_clear_lines_non_adjacent_rows() {
        let mut grid = Grid::new(W, H);
        fill_row(&mut grid, 19, None);
        grid.set_cell(0, 18, Cell::Locked(PieceKind::J));
        fill_row(&mut grid, 17, None);
        grid.set_cell(9, 16, Cell::Locked(PieceKind::L));

        assert_eq!(grid.clear_lines(), 2);
        assert_eq!(grid.cell(0, 19), Some(Cell::Locked(PieceKind::J)));
        assert_eq!(grid.cell(9, 18), Some(Cell::Locked(PieceKind::L)));
        assert_eq!(grid.rows().flatten().filter(|c| !c.is_empty()).count(), 2);
    }

    #[test]
    fn test_clear_lines_all_filled() {
        let mut grid = Grid::new(W, 4);
        for y in 0..4 {
            fill_row(&mut grid, y, None);
        }
        assert_eq!(grid.clear_lines(), 4);
        assert!(grid.is_empty());
        assert_eq!(grid.height(), 4);
    }

    #[test]
    fn test_drop_position() {
        let mut grid = Grid::new(W, H);
        let piece = Piece::spawn(PieceKind::I, W);
        assert_eq!(grid.drop_position(&piece).position().y, 18);

        grid.set_cell(4, 10, Cell::Locked(PieceKind::O));
        assert_eq!(grid.drop_position(&piece).position().y, 8);
    }
}
