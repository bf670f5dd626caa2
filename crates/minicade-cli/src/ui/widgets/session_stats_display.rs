use std::{iter, time::Duration};

use minicade_engine::GameSnapshot;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use super::style;

pub struct SessionStatsDisplay<'a> {
    snapshot: &'a GameSnapshot<'a>,
    play_time: Duration,
    block: Option<BlockWidget<'a>>,
}

impl<'a> SessionStatsDisplay<'a> {
    pub fn new(snapshot: &'a GameSnapshot<'a>, play_time: Duration) -> Self {
        Self {
            snapshot,
            play_time,
            block: None,
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        20 + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        let rows = u16::try_from(ROWS.len()).unwrap_or(u16::MAX);
        rows + super::block_vertical_margin(self.block.as_ref())
    }
}

type Value = &'static dyn Fn(&GameSnapshot<'_>, Duration) -> String;

#[derive(Clone, Copy)]
enum Row {
    Empty,
    FullLabel(&'static str),
    FullValue(Value),
    LabelValue(&'static str, Value),
}

const ROWS: &[Row] = &[
    Row::FullLabel("SCORE:"),
    Row::FullValue(&|snapshot, _| snapshot.stats.score().to_string()),
    Row::FullLabel("HIGH SCORE:"),
    Row::FullValue(&|snapshot, _| snapshot.high_score.to_string()),
    Row::FullLabel("TIME:"),
    Row::FullValue(&|_, time| format_play_time(time)),
    Row::Empty,
    Row::LabelValue("LEVEL:", &|snapshot, _| snapshot.stats.level().to_string()),
    Row::LabelValue("LINES:", &|snapshot, _| snapshot.stats.lines().to_string()),
    Row::LabelValue("COMBO:", &|snapshot, _| snapshot.stats.combo().to_string()),
    Row::Empty,
    Row::LabelValue("PIECES:", &|snapshot, _| {
        snapshot.stats.completed_pieces().to_string()
    }),
    Row::LabelValue("SINGLES:", &|snapshot, _| {
        snapshot.stats.line_cleared_counter()[1].to_string()
    }),
    Row::LabelValue("DOUBLES:", &|snapshot, _| {
        snapshot.stats.line_cleared_counter()[2].to_string()
    }),
    Row::LabelValue("TRIPLES:", &|snapshot, _| {
        snapshot.stats.line_cleared_counter()[3].to_string()
    }),
    Row::LabelValue("TETRIS:", &|snapshot, _| {
        snapshot.stats.line_cleared_counter()[4].to_string()
    }),
];

fn format_play_time(time: Duration) -> String {
    format!(
        "{:0}:{:0>2}.{:0>2}",
        time.as_secs() / 60,
        time.as_secs() % 60,
        time.subsec_millis() / 10
    )
}

impl Widget for SessionStatsDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let style = style::DEFAULT;

        let rows_areas =
            Layout::vertical((0..ROWS.len()).map(|_| Constraint::Length(1))).split(area);

        for (row, area) in iter::zip(ROWS.iter().copied(), rows_areas.iter().copied()) {
            match row {
                Row::Empty => {}
                Row::FullLabel(label) => {
                    Line::styled(label, style).left_aligned().render(area, buf);
                }
                Row::FullValue(value) => {
                    Line::styled(value(self.snapshot, self.play_time), style)
                        .right_aligned()
                        .render(area, buf);
                }
                Row::LabelValue(label, value) => {
                    let [label_area, value_area] = area.layout(&Layout::horizontal([
                        Constraint::Fill(1),
                        Constraint::Fill(1),
                    ]));
                    Line::styled(label, style)
                        .left_aligned()
                        .render(label_area, buf);
                    Line::styled(value(self.snapshot, self.play_time), style)
                        .right_aligned()
                        .render(value_area, buf);
                }
            }
        }
    }
}
