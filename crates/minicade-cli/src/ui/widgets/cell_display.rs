use minicade_engine::RenderCell;
use ratatui::{
    prelude::{Buffer, Rect},
    style::Style,
    widgets::{Paragraph, Widget},
};

use super::{piece_color, style};

/// One grid cell, two terminal columns wide.
#[derive(Debug)]
pub struct CellDisplay {
    style: Style,
    symbol: &'static str,
}

impl CellDisplay {
    pub const fn new(style: Style, symbol: &'static str) -> Self {
        Self { style, symbol }
    }

    pub const fn width() -> u16 {
        2
    }

    pub const fn height() -> u16 {
        1
    }

    pub fn from_cell(cell: RenderCell, show_dots: bool) -> Self {
        match cell {
            RenderCell::Empty if show_dots => Self::new(style::EMPTY_DOT, "."),
            RenderCell::Empty => Self::new(style::EMPTY, ""),
            RenderCell::Ghost(kind) => Self::new(style::EMPTY.fg(piece_color(kind)), "[]"),
            RenderCell::Piece(kind) => Self::new(style::EMPTY.bg(piece_color(kind)), ""),
        }
    }
}

impl Widget for &CellDisplay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Use a Paragraph to fill the whole area, not just the cells with the symbol
        Paragraph::new(self.symbol)
            .style(self.style)
            .centered()
            .render(area, buf);
    }
}
