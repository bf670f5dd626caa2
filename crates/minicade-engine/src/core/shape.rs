use std::fmt;

/// Largest bounding box of any piece shape (the I-piece).
pub const MAX_SHAPE_SIZE: usize = 4;

/// Square occupancy matrix of a piece, at most 4×4.
///
/// Each row is stored as a bitmask where bit `x` marks column `x` as occupied.
/// Shapes are plain `Copy` values: rotating returns a new matrix and never
/// touches the original, so the active piece, its ghost and the held piece
/// can never alias each other.
///
/// # Example
///
/// ```
/// use minicade_engine::Shape;
///
/// let t = Shape::from_matrix([[0, 1, 0], [1, 1, 1], [0, 0, 0]]);
/// let rotated = t.rotated();
///
/// assert_eq!(rotated, Shape::from_matrix([[0, 1, 0], [0, 1, 1], [0, 1, 0]]));
/// assert_eq!(rotated.rotated().rotated().rotated(), rotated);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    size: u8,
    rows: [u8; MAX_SHAPE_SIZE],
}

impl Shape {
    /// Builds a shape from an `N×N` matrix of `0`/non-zero cells.
    ///
    /// # Panics
    ///
    /// Panics if `N` is zero or larger than [`MAX_SHAPE_SIZE`].
    #[must_use]
    pub const fn from_matrix<const N: usize>(matrix: [[u8; N]; N]) -> Self {
        assert!(N > 0 && N <= MAX_SHAPE_SIZE);
        let mut rows = [0; MAX_SHAPE_SIZE];
        let mut y = 0;
        while y < N {
            let mut x = 0;
            while x < N {
                if matrix[y][x] != 0 {
                    rows[y] |= 1 << x;
                }
                x += 1;
            }
            y += 1;
        }
        #[expect(clippy::cast_possible_truncation)]
        let size = N as u8;
        Self { size, rows }
    }

    /// Side length of the bounding box.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size as usize
    }

    #[must_use]
    pub const fn is_occupied(&self, col: usize, row: usize) -> bool {
        col < self.size() && row < self.size() && (self.rows[row] & (1 << col)) != 0
    }

    /// Iterates over occupied cells as `(col, row)` offsets, row by row.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let size = self.size();
        (0..size).flat_map(move |row| {
            (0..size).filter_map(move |col| self.is_occupied(col, row).then_some((col, row)))
        })
    }

    /// Returns the shape rotated 90° clockwise.
    ///
    /// Standard N×N rotation: cell `(x, y)` moves to `(N - 1 - y, x)`.
    #[must_use]
    pub const fn rotated(&self) -> Self {
        let size = self.size();
        let mut rows = [0; MAX_SHAPE_SIZE];
        let mut y = 0;
        while y < size {
            let mut x = 0;
            while x < size {
                if self.is_occupied(x, y) {
                    rows[x] |= 1 << (size - 1 - y);
                }
                x += 1;
            }
            y += 1;
        }
        Self {
            size: self.size,
            rows,
        }
    }
}

impl fmt::Debug for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Shape(")?;
        for row in 0..self.size() {
            if row > 0 {
                write!(f, "/")?;
            }
            for col in 0..self.size() {
                let c = if self.is_occupied(col, row) { '#' } else { '.' };
                write!(f, "{c}")?;
            }
        }
        write!(f, ")")
    }
}
