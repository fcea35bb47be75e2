use blockfall_engine::{Cell, ShapeKind};
use ratatui::{
    prelude::{Buffer, Rect},
    style::Style,
    widgets::{Paragraph, Widget},
};

use crate::ui::widgets::style;

/// Renders one board cell as a 2x1 colored block.
#[derive(Debug)]
pub struct BlockDisplay {
    style: Style,
    symbol: &'static str,
}

impl BlockDisplay {
    pub const fn new(style: Style, symbol: &'static str) -> Self {
        Self { style, symbol }
    }

    pub fn width() -> u16 {
        2
    }

    pub fn height() -> u16 {
        1
    }

    pub fn kind_style(kind: ShapeKind) -> Style {
        match kind {
            ShapeKind::I => style::I_BLOCK,
            ShapeKind::O => style::O_BLOCK,
            ShapeKind::T => style::T_BLOCK,
            ShapeKind::L => style::L_BLOCK,
            ShapeKind::J => style::J_BLOCK,
            ShapeKind::S => style::S_BLOCK,
            ShapeKind::Z => style::Z_BLOCK,
        }
    }

    pub fn from_cell(cell: Cell, show_dots: bool) -> Self {
        match cell {
            Cell::Empty => {
                if show_dots {
                    Self::new(style::EMPTY_DOT, ".")
                } else {
                    Self::new(style::EMPTY, "")
                }
            }
            Cell::Filled(kind) => Self::new(Self::kind_style(kind), ""),
        }
    }
}

impl Widget for BlockDisplay {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BlockDisplay {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        // A Paragraph fills the whole area, not just the symbol cells.
        Paragraph::new(self.symbol)
            .style(self.style)
            .centered()
            .render(area, buf);
    }
}
