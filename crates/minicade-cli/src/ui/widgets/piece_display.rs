use minicade_engine::{PieceKind, RenderCell, Shape};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use super::CellDisplay;

/// Preview of a single piece (hold slot or next piece), centered in its panel.
#[derive(Debug, Default)]
pub struct PieceDisplay<'a> {
    piece: Option<(PieceKind, Shape)>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> PieceDisplay<'a> {
    pub fn new() -> Self {
        Self {
            piece: None,
            block: None,
        }
    }

    pub fn piece(self, kind: PieceKind, shape: Shape) -> Self {
        Self {
            piece: Some((kind, shape)),
            ..self
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        4 * CellDisplay::width() + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        4 * CellDisplay::height() + super::block_vertical_margin(self.block.as_ref())
    }
}

/// Occupied columns and rows of `shape`, trimmed to their bounding box.
fn bounds(shape: Shape) -> Option<(usize, usize, usize, usize)> {
    let (mut min_x, mut min_y, mut max_x, mut max_y) = (usize::MAX, usize::MAX, 0, 0);
    for (x, y) in shape.occupied_cells() {
        min_x = min_x.min(x);
        min_y = min_y.min(y);
        max_x = max_x.max(x);
        max_y = max_y.max(y);
    }
    (min_x <= max_x).then_some((min_x, min_y, max_x - min_x + 1, max_y - min_y + 1))
}

impl Widget for PieceDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &PieceDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let Some((kind, shape)) = self.piece else {
            return;
        };
        let Some((min_x, min_y, width, height)) = bounds(shape) else {
            return;
        };

        #[expect(clippy::cast_possible_truncation)]
        let (w, h) = (width as u16, height as u16);
        let piece_area = area.centered(
            Constraint::Length(w * CellDisplay::width()),
            Constraint::Length(h * CellDisplay::height()),
        );

        let horizontal = Layout::horizontal((0..w).map(|_| Constraint::Length(CellDisplay::width())))
            .flex(Flex::Center);
        let vertical = Layout::vertical((0..h).map(|_| Constraint::Length(CellDisplay::height())));
        let grid_rows = piece_area
            .layout_vec(&vertical)
            .into_iter()
            .map(|row| row.layout_vec(&horizontal));

        let occupied = CellDisplay::from_cell(RenderCell::Piece(kind), false);
        let empty = CellDisplay::from_cell(RenderCell::Empty, false);
        for (y, grid_row) in grid_rows.enumerate() {
            for (x, grid_cell) in grid_row.into_iter().enumerate() {
                if shape.is_occupied(min_x + x, min_y + y) {
                    occupied.render(grid_cell, buf);
                } else {
                    empty.render(grid_cell, buf);
                }
            }
        }
    }
}
