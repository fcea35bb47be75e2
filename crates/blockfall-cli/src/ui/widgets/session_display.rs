use blockfall_engine::{GameSession, SessionState};
use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::{Buffer, Rect},
    style::Style,
    text::{Line, Text},
    widgets::{Block, Clear, Padding, Widget},
};

use crate::ui::widgets::{BoardDisplay, PieceDisplay, SessionStatsDisplay, color, style};

/// Renders a whole session: board in the center, stats on the left, the
/// upcoming piece on the right, and a popup when the game is over.
#[derive(Debug)]
pub struct SessionDisplay<'a> {
    session: &'a GameSession,
    pilot_enabled: bool,
    horizontal_padding: u16,
    vertical_padding: u16,
}

impl<'a> SessionDisplay<'a> {
    pub fn new(session: &'a GameSession) -> Self {
        Self {
            session,
            pilot_enabled: false,
            horizontal_padding: 1,
            vertical_padding: 0,
        }
    }

    pub fn pilot_enabled(self, pilot_enabled: bool) -> Self {
        Self {
            pilot_enabled,
            ..self
        }
    }
}

impl Widget for SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let style = style::DEFAULT;
        let block_padding = Padding::symmetric(self.horizontal_padding, self.vertical_padding);
        let border_style = match self.session.state() {
            SessionState::Playing if self.pilot_enabled => color::MAGENTA,
            SessionState::Playing => color::WHITE,
            SessionState::GameOver => color::RED,
        };

        let game_board = BoardDisplay::new(self.session.board())
            .falling_piece(*self.session.current_piece())
            .block(Block::bordered().border_style(border_style).style(style));
        let next_panel = PieceDisplay::new().kind(self.session.next_kind()).block(
            Block::bordered()
                .title(Line::from("NEXT").centered())
                .padding(block_padding)
                .border_style(border_style)
                .style(style::DEFAULT),
        );
        let session_stats = SessionStatsDisplay::new(self.session)
            .pilot_enabled(self.pilot_enabled)
            .block(
                Block::bordered()
                    .title(Line::from("STATS").centered())
                    .padding(block_padding)
                    .border_style(border_style)
                    .style(style::DEFAULT),
            );

        let [left_column, center_column, right_column] = Layout::horizontal([
            Constraint::Length(session_stats.width()),
            Constraint::Length(game_board.width()),
            Constraint::Length(next_panel.width()),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(area);

        let [stats_area] =
            Layout::vertical([Constraint::Length(session_stats.height())]).areas(left_column);
        let [board_area] =
            Layout::vertical([Constraint::Length(game_board.height())]).areas(center_column);
        let [next_area] =
            Layout::vertical([Constraint::Length(next_panel.height())]).areas(right_column);

        let game_board_width = game_board.width();
        session_stats.render(stats_area, buf);
        game_board.render(board_area, buf);
        next_panel.render(next_area, buf);

        if self.session.state().is_game_over() {
            let (text, style) = if self.session.is_new_high() {
                ("NEW HIGH SCORE!", Style::new().fg(color::BLACK).bg(color::YELLOW))
            } else {
                ("GAME OVER!!", Style::new().fg(color::WHITE).bg(color::RED))
            };
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
