use blockfall_engine::{Cell, ShapeKind};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::ui::widgets::BlockDisplay;

/// Renders a single shape in its spawn orientation, for the NEXT panel.
#[derive(Debug)]
pub struct PieceDisplay<'a> {
    kind: Option<ShapeKind>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> PieceDisplay<'a> {
    pub fn new() -> Self {
        Self {
            kind: None,
            block: None,
        }
    }

    pub fn kind(self, kind: ShapeKind) -> Self {
        Self {
            kind: Some(kind),
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
        4 * BlockDisplay::width() + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        2 * BlockDisplay::height() + super::block_vertical_margin(self.block.as_ref())
    }
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

        let empty = BlockDisplay::from_cell(Cell::Empty, false);
        let Some(kind) = self.kind else {
            Widget::render(&empty, area, buf);
            return;
        };

        let shape = kind.spawn_shape();
        let piece_area = area.centered(
            Constraint::Length(shape.width() as u16 * BlockDisplay::width()),
            Constraint::Length(shape.height() as u16 * BlockDisplay::height()),
        );

        let col_constraints =
            (0..shape.width()).map(|_| Constraint::Length(BlockDisplay::width()));
        let row_constraints =
            (0..shape.height()).map(|_| Constraint::Length(BlockDisplay::height()));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);
        let grid_rows = piece_area
            .layout_vec(&vertical)
            .into_iter()
            .map(|row| row.layout_vec(&horizontal));

        let occupied = BlockDisplay::from_cell(Cell::Filled(kind), false);
        for (y, grid_row) in grid_rows.enumerate() {
            for (x, grid_cell) in grid_row.into_iter().enumerate() {
                if shape.is_occupied(x, y) {
                    Widget::render(&occupied, grid_cell, buf);
                } else {
                    Widget::render(&empty, grid_cell, buf);
                }
            }
        }
    }
}
