use std::iter;

use blockfall_engine::GameSession;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::ui::widgets::style;

pub struct SessionStatsDisplay<'a> {
    session: &'a GameSession,
    pilot_enabled: bool,
    block: Option<BlockWidget<'a>>,
}

impl<'a> SessionStatsDisplay<'a> {
    pub fn new(session: &'a GameSession) -> Self {
        Self {
            session,
            pilot_enabled: false,
            block: None,
        }
    }

    pub fn pilot_enabled(self, pilot_enabled: bool) -> Self {
        Self {
            pilot_enabled,
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
        20 + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        u16::try_from(ROWS.len()).unwrap() + super::block_vertical_margin(self.block.as_ref())
    }
}

#[derive(Clone, Copy)]
enum Row {
    Empty,
    FullLabel(&'static str),
    FullValue(&'static dyn Fn(&SessionStatsDisplay) -> String),
    LabelValue(&'static str, &'static dyn Fn(&SessionStatsDisplay) -> String),
}

const ROWS: &[Row] = &[
    Row::FullLabel("SCORE:"),
    Row::FullValue(&|d| d.session.stats().score().to_string()),
    Row::FullLabel("HIGH:"),
    Row::FullValue(&|d| d.session.high_score().to_string()),
    Row::Empty,
    Row::LabelValue("LEVEL:", &|d| d.session.stats().level().to_string()),
    Row::LabelValue("LINES:", &|d| {
        d.session.stats().total_cleared_lines().to_string()
    }),
    Row::LabelValue("PIECES:", &|d| {
        d.session.stats().completed_pieces().to_string()
    }),
    Row::Empty,
    Row::LabelValue("AI:", &|d| {
        if d.pilot_enabled { "ON" } else { "OFF" }.to_string()
    }),
];

impl Widget for SessionStatsDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let style = style::DEFAULT;

        let rows_areas =
            Layout::vertical((0..ROWS.len()).map(|_| Constraint::Length(1))).split(area);

        for (row, area) in iter::zip(ROWS.iter().copied(), rows_areas[..].iter().copied()) {
            match row {
                Row::Empty => {}
                Row::FullLabel(label) => {
                    Line::styled(label, style).left_aligned().render(area, buf);
                }
                Row::FullValue(value) => {
                    Line::styled(value(&self), style)
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
                    Line::styled(value(&self), style)
                        .right_aligned()
                        .render(value_area, buf);
                }
            }
        }
    }
}
