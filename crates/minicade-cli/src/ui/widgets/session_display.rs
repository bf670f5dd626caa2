use std::time::Duration;

use minicade_engine::{GameSnapshot, SessionState};
use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::{Buffer, Rect},
    style::Style,
    text::{Line, Text},
    widgets::{Block, Clear, Padding, Widget},
};

use super::{BoardDisplay, PieceDisplay, SessionStatsDisplay, color, style};

/// Full play screen: hold and stats on the left, the board in the middle,
/// the next piece on the right, and a popup for non-running states.
#[derive(Debug)]
pub struct SessionDisplay<'a> {
    snapshot: GameSnapshot<'a>,
    play_time: Duration,
    horizontal_padding: u16,
    vertical_padding: u16,
}

impl<'a> SessionDisplay<'a> {
    pub fn new(snapshot: GameSnapshot<'a>, play_time: Duration) -> Self {
        Self {
            snapshot,
            play_time,
            horizontal_padding: 1,
            vertical_padding: 0,
        }
    }
}

/// Popup text and style shown over the board, if any.
fn popup(state: SessionState) -> Option<(&'static str, Style)> {
    match state {
        SessionState::Running => None,
        SessionState::Stopped => Some((
            "PRESS SPACE TO START",
            Style::new().fg(color::BLACK).bg(color::CYAN),
        )),
        SessionState::Paused => Some(("PAUSED", Style::new().fg(color::BLACK).bg(color::YELLOW))),
        SessionState::GameOver => Some((
            "GAME OVER!!",
            Style::new().fg(color::WHITE).bg(color::RED),
        )),
    }
}

impl Widget for SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let snapshot = &self.snapshot;
        let block_padding = Padding::symmetric(self.horizontal_padding, self.vertical_padding);
        let border_style = match snapshot.state {
            SessionState::Stopped | SessionState::Running => color::WHITE,
            SessionState::Paused => color::YELLOW,
            SessionState::GameOver => color::RED,
        };
        let panel = |title: &'static str| {
            Block::bordered()
                .title(Line::from(title).centered())
                .padding(block_padding)
                .border_style(border_style)
                .style(style::DEFAULT)
        };

        let game_board = BoardDisplay::new(snapshot.compose()).block(
            Block::bordered()
                .border_style(border_style)
                .style(style::DEFAULT),
        );
        let hold_panel = {
            let display = PieceDisplay::new().block(panel("HOLD"));
            match snapshot.held_piece {
                Some(piece) => display.piece(piece.kind(), piece.shape()),
                None => display,
            }
        };
        let next_panel = PieceDisplay::new()
            .piece(snapshot.next_piece, snapshot.next_piece.shape())
            .block(panel("NEXT"));
        let session_stats = SessionStatsDisplay::new(snapshot, self.play_time).block(panel("STATS"));

        let [left_column, center_column, right_column] = Layout::horizontal([
            Constraint::Length(u16::max(hold_panel.width(), session_stats.width())),
            Constraint::Length(game_board.width()),
            Constraint::Length(next_panel.width()),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(area);

        let [hold_area, stats_area] = Layout::vertical([
            Constraint::Length(hold_panel.height()),
            Constraint::Length(session_stats.height()),
        ])
        .spacing(1)
        .areas(left_column);
        let hold_area = hold_area.layout::<1>(
            &Layout::horizontal([Constraint::Length(hold_panel.width())]).flex(Flex::End),
        )[0];
        let stats_area = stats_area.layout::<1>(
            &Layout::horizontal([Constraint::Length(session_stats.width())]).flex(Flex::End),
        )[0];

        let [board_area] =
            Layout::vertical([Constraint::Length(game_board.height())]).areas(center_column);
        let [next_area] =
            Layout::vertical([Constraint::Length(next_panel.height())]).areas(right_column);

        let game_board_width = game_board.width();
        hold_panel.render(hold_area, buf);
        session_stats.render(stats_area, buf);
        game_board.render(board_area, buf);
        next_panel.render(next_area, buf);

        if let Some((text, style)) = popup(snapshot.state) {
            let block = Block::new().style(style);
            let text = Text::styled(text, style).centered();
            let area =
                board_area.centered(Constraint::Length(game_board_width), Constraint::Length(3));
            let inner = block.inner(area);
            Clear.render(area, buf);
            block.render(area, buf);
            text.render(inner.centered_vertically(Constraint::Length(1)), buf);
        }
    }
}
